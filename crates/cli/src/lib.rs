//! Terminal helpers for fastlev tools
//!
//! Provides shared CLI functionality:
//! - Status messages and distance reports
//! - Progress bars fed by async progress callbacks

#![warn(missing_docs)]

pub mod output;
pub mod progress;
