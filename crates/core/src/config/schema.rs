//! Configuration schema definitions

use fastlev_distance::{CostTable, Strength};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ConfigSchema {
    /// `[distance]`: equality and async defaults
    #[serde(default)]
    pub distance: DistanceConfig,

    /// `[costs]`: substitution cost rules
    #[serde(default)]
    pub costs: CostTable,

    /// `[logging]`: log filter
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Distance computation defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistanceConfig {
    /// Compare characters through a collator
    #[serde(default)]
    pub use_collator: bool,

    /// Collation strength when the collator is enabled
    #[serde(default)]
    pub collation_strength: Strength,

    /// Time an async computation runs before yielding, in milliseconds
    #[serde(default = "default_slice_budget_ms")]
    pub slice_budget_ms: u64,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            use_collator: false,
            collation_strength: Strength::default(),
            slice_budget_ms: default_slice_budget_ms(),
        }
    }
}

fn default_slice_budget_ms() -> u64 {
    1000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
