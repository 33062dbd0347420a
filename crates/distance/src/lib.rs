//! Levenshtein edit distance for fastlev.
//!
//! This crate provides:
//! - A two-row dynamic-programming kernel (O(n) memory)
//! - A synchronous driver
//! - A time-sliced async driver that yields to tokio and reports progress
//! - Exact, collation-based and custom substitution cost policies
//!
//! # Example
//!
//! ```
//! use fastlev_distance::{distance, distance_exact, DistanceOptions, SubstitutionCost};
//!
//! assert_eq!(distance_exact("kitten", "sitting"), 3);
//!
//! // Treat "8" as a free substitute for "b".
//! let options = DistanceOptions::new()
//!     .with_substitution_cost(SubstitutionCost::new(|a, b| usize::from((a, b) != ('b', '8'))));
//! assert_eq!(distance("bob", "8o8", &options).unwrap(), 0);
//! ```

mod chunked;
mod collation;
mod cost_table;
mod error;
mod kernel;
mod policy;
mod sync;
mod task;

pub use chunked::{ChunkedDistance, ComputationState, Step};
pub use collation::{Collator, Strength};
pub use cost_table::{CostRule, CostTable};
pub use error::{BoxError, DistanceError, DistanceErrorCode, Result};
pub use policy::{CostPolicy, DistanceOptions, Equality, SubstitutionCost};
pub use sync::{distance, distance_exact, distance_with_policy};
pub use task::{
    distance_async, spawn_distance, AsyncOptions, DistanceTask, ProgressFn, DEFAULT_SLICE_BUDGET,
};
