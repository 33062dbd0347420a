//! Async drivers built on [`ChunkedDistance`].
//!
//! [`distance_async`] runs one slice at a time and yields to the tokio
//! scheduler between slices, so a long computation never holds a worker for
//! much longer than the slice budget. [`spawn_distance`] is the
//! callback-style entry point: it runs the computation as a task and calls
//! the completion handler exactly once.

use crate::chunked::{ChunkedDistance, Step};
use crate::error::{BoxError, Result};
use crate::policy::DistanceOptions;
use std::fmt;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Time a computation may run before yielding.
pub const DEFAULT_SLICE_BUDGET: Duration = Duration::from_millis(1000);

/// Progress callback, called with the percentage of the first sequence done.
pub type ProgressFn = Box<dyn FnMut(f64) -> std::result::Result<(), BoxError> + Send>;

/// Options for the async drivers.
pub struct AsyncOptions {
    /// Collation and cost settings shared with the sync driver
    pub distance: DistanceOptions,
    /// Wall-clock budget of one slice
    pub slice_budget: Duration,
    on_progress: Option<ProgressFn>,
}

impl Default for AsyncOptions {
    fn default() -> Self {
        Self {
            distance: DistanceOptions::default(),
            slice_budget: DEFAULT_SLICE_BUDGET,
            on_progress: None,
        }
    }
}

impl fmt::Debug for AsyncOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncOptions")
            .field("distance", &self.distance)
            .field("slice_budget", &self.slice_budget)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl AsyncOptions {
    /// Default options with the default slice budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use these collation and cost settings.
    pub fn with_distance_options(mut self, options: DistanceOptions) -> Self {
        self.distance = options;
        self
    }

    /// Override the slice budget.
    pub fn with_slice_budget(mut self, budget: Duration) -> Self {
        self.slice_budget = budget;
        self
    }

    /// Receive progress updates.
    pub fn on_progress<F>(self, mut f: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.on_progress_fallible(move |percent| {
            f(percent);
            Ok(())
        })
    }

    /// Receive progress updates; an error aborts the computation.
    pub fn on_progress_fallible<F>(mut self, f: F) -> Self
    where
        F: FnMut(f64) -> std::result::Result<(), BoxError> + Send + 'static,
    {
        self.on_progress = Some(Box::new(f));
        self
    }
}

/// Calculate the distance without blocking the scheduler for more than one
/// slice at a time.
///
/// # Example
/// ```
/// use fastlev_distance::{distance_async, AsyncOptions};
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// let d = runtime
///     .block_on(distance_async("kitten", "sitting", AsyncOptions::new()))
///     .unwrap();
/// assert_eq!(d, 3);
/// ```
pub async fn distance_async(a: &str, b: &str, options: AsyncOptions) -> Result<usize> {
    let AsyncOptions {
        distance,
        slice_budget,
        mut on_progress,
    } = options;

    let mut computation = ChunkedDistance::new(a, b, &distance);
    tracing::debug!(
        len_a = a.len(),
        len_b = b.len(),
        budget_ms = slice_budget.as_millis() as u64,
        "starting chunked distance"
    );

    let mut slices = 0u64;
    loop {
        slices += 1;
        match computation.run_slice(slice_budget)? {
            Step::Completed(d) => {
                tracing::debug!(distance = d, slices, "chunked distance completed");
                return Ok(d);
            }
            Step::Yielded { progress } => {
                if let (Some(percent), Some(callback)) = (progress, on_progress.as_mut()) {
                    computation.report_progress(percent, callback.as_mut())?;
                }
                tokio::task::yield_now().await;
            }
        }
    }
}

/// Handle to a computation started with [`spawn_distance`].
#[derive(Debug)]
pub struct DistanceTask {
    handle: JoinHandle<()>,
}

impl DistanceTask {
    /// Abort the computation. The completion handler is dropped uncalled.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has stopped running.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task. Returns false if it was cancelled or panicked.
    pub async fn wait(self) -> bool {
        self.handle.await.is_ok()
    }
}

/// Start a computation on the current tokio runtime.
///
/// `on_complete` receives either the distance or the error that stopped the
/// computation, exactly once. Must be called from within a runtime.
///
/// # Panics
///
/// A panic inside the cost function or the progress callback unwinds the
/// task: `on_complete` is dropped without being called and
/// [`DistanceTask::wait`] returns `false`, as after [`DistanceTask::cancel`].
pub fn spawn_distance<C>(
    a: impl Into<String>,
    b: impl Into<String>,
    options: AsyncOptions,
    on_complete: C,
) -> DistanceTask
where
    C: FnOnce(Result<usize>) + Send + 'static,
{
    let (a, b) = (a.into(), b.into());
    let handle = tokio::spawn(async move {
        let outcome = distance_async(&a, &b, options).await;
        on_complete(outcome);
    });
    DistanceTask { handle }
}
