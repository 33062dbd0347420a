//! Configuration loading and schema definitions
//!
//! Values come from a TOML file; anything missing falls back to defaults.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
