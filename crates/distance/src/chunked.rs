//! Resumable, time-sliced distance computation.
//!
//! [`ChunkedDistance`] holds everything a computation needs between slices:
//! both sequences, both DP rows and the `(i, j)` cursor. Each call to
//! [`ChunkedDistance::run_slice`] computes cells in row-major order until the
//! time budget runs out or the last row is done. The caller decides when the
//! next slice runs.

use crate::error::{BoxError, DistanceError, Result};
use crate::kernel::{trivial_distance, Rows};
use crate::policy::{CostPolicy, DistanceOptions, Operands};
use std::time::{Duration, Instant};

/// Lifecycle of a chunked computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationState {
    /// Created, no slice run yet
    Initialized,
    /// Inside `run_slice`
    RunningSlice,
    /// Budget exhausted, waiting to be resumed
    Yielded,
    /// Progress handed to the caller, waiting to be resumed
    ProgressReported,
    /// Distance available
    Completed,
    /// A callback failed; the computation cannot resume
    Failed,
}

/// Outcome of one slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// The budget ran out.
    ///
    /// `progress` is the share of the first sequence fully processed, in
    /// percent, or `None` when no row finished since the last report.
    Yielded { progress: Option<f64> },
    /// The computation finished with this distance.
    Completed(usize),
}

/// A distance computation that can be suspended between cells.
#[derive(Debug)]
pub struct ChunkedDistance {
    operands: Option<Operands>,
    rows: Option<Rows>,
    i: usize,
    j: usize,
    reported_rows: usize,
    outcome: Option<usize>,
    state: ComputationState,
}

impl ChunkedDistance {
    /// Prepare a computation with the given options.
    pub fn new(a: &str, b: &str, options: &DistanceOptions) -> Self {
        Self::with_policy(a, b, &CostPolicy::from_options(options))
    }

    /// Prepare a computation under an explicit policy.
    ///
    /// Trivial inputs are resolved here and never allocate rows.
    pub fn with_policy(a: &str, b: &str, policy: &CostPolicy) -> Self {
        if let Some(d) = trivial_distance(a, b) {
            return Self {
                operands: None,
                rows: None,
                i: 0,
                j: 0,
                reported_rows: 0,
                outcome: Some(d),
                state: ComputationState::Completed,
            };
        }

        let operands = policy.prepare(a, b);
        let mut rows = Rows::new(operands.b.len());
        rows.begin_row(0);

        Self {
            operands: Some(operands),
            rows: Some(rows),
            i: 0,
            j: 0,
            reported_rows: 0,
            outcome: None,
            state: ComputationState::Initialized,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ComputationState {
        self.state
    }

    /// The distance, once completed.
    pub fn outcome(&self) -> Option<usize> {
        self.outcome
    }

    /// Number of rows of the first sequence fully processed.
    pub fn rows_completed(&self) -> usize {
        self.i
    }

    /// Returns true if the computation completed or failed.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            ComputationState::Completed | ComputationState::Failed
        )
    }

    /// Run cells until `budget` has elapsed or the computation completes.
    ///
    /// The budget is checked after every cell, so a slice overruns it by at
    /// most one cell. A failing substitution cost function moves the
    /// computation to [`ComputationState::Failed`] and its error is returned
    /// unwrapped.
    pub fn run_slice(&mut self, budget: Duration) -> Result<Step> {
        match self.state {
            ComputationState::Failed => return Err(DistanceError::AlreadyFailed),
            ComputationState::Completed => {
                if let Some(d) = self.outcome {
                    return Ok(Step::Completed(d));
                }
            }
            _ => {}
        }

        let (Some(operands), Some(rows)) = (self.operands.as_ref(), self.rows.as_mut()) else {
            self.state = ComputationState::Failed;
            return Err(DistanceError::AlreadyFailed);
        };

        self.state = ComputationState::RunningSlice;
        let (m, n) = (operands.a.len(), operands.b.len());
        let started = Instant::now();

        loop {
            let cost = match operands.substitution_cost(self.i, self.j) {
                Ok(cost) => cost,
                Err(err) => {
                    tracing::debug!(row = self.i, col = self.j, error = %err, "substitution cost failed");
                    self.state = ComputationState::Failed;
                    return Err(err);
                }
            };
            rows.cell(self.j, cost);
            self.j += 1;

            if self.j == n {
                rows.finish_row();
                self.i += 1;

                if self.i == m {
                    let d = rows.result();
                    self.outcome = Some(d);
                    self.state = ComputationState::Completed;
                    self.operands = None;
                    self.rows = None;
                    return Ok(Step::Completed(d));
                }

                rows.begin_row(self.i);
                self.j = 0;
            }

            if started.elapsed() >= budget {
                break;
            }
        }

        self.state = ComputationState::Yielded;
        let progress = if self.i > self.reported_rows {
            self.reported_rows = self.i;
            Some(self.i as f64 * 100.0 / m as f64)
        } else {
            None
        };
        tracing::trace!(row = self.i, col = self.j, ?progress, "slice budget exhausted");

        Ok(Step::Yielded { progress })
    }

    /// Hand a progress value to the caller's callback.
    ///
    /// An error from the callback fails the computation and comes back
    /// wrapped in [`DistanceError::ProgressCallback`].
    pub fn report_progress<F>(&mut self, percent: f64, callback: &mut F) -> Result<()>
    where
        F: FnMut(f64) -> std::result::Result<(), BoxError> + ?Sized,
    {
        match callback(percent) {
            Ok(()) => {
                self.state = ComputationState::ProgressReported;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(percent, error = %err, "progress callback failed");
                self.state = ComputationState::Failed;
                self.operands = None;
                self.rows = None;
                Err(DistanceError::ProgressCallback(err))
            }
        }
    }
}
