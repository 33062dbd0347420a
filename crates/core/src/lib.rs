//! Shared utilities for fastlev tools
//!
//! This crate provides the pieces every front end needs around the distance
//! engine:
//!
//! - **Error handling**: errors with codes, context and recovery suggestions
//! - **Configuration**: TOML-based defaults for collation, costs and logging
//!
//! # Example
//!
//! ```rust,no_run
//! use fastlev_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! let options = config.distance_options();
//! let d = fastlev_distance::distance("kitten", "sitting", &options).unwrap();
//! println!("{d}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};
