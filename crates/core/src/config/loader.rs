//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use fastlev_distance::{DistanceOptions, SubstitutionCost};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration wrapper
#[derive(Debug, Clone)]
pub struct Config {
    /// Parsed values, with defaults filled in
    pub schema: ConfigSchema,
    /// File the values came from, `None` when only defaults apply
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path or use defaults
    ///
    /// An explicit path must exist. Without one, the standard locations are
    /// searched and defaults are used when none exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            ConfigSchema::default()
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }

    /// Load with defaults only (no file)
    pub fn default() -> Self {
        Self {
            schema: ConfigSchema::default(),
            path: None,
        }
    }

    /// Distance options described by the `[distance]` and `[costs]` sections
    pub fn distance_options(&self) -> DistanceOptions {
        let distance = &self.schema.distance;
        let mut options = DistanceOptions::new()
            .with_collator(distance.use_collator)
            .with_strength(distance.collation_strength);

        let costs = &self.schema.costs;
        if !costs.is_empty() || costs.default != 1 {
            options = options.with_substitution_cost(SubstitutionCost::from(costs.clone()));
        }
        options
    }

    /// Slice budget for async computations
    pub fn slice_budget(&self) -> Duration {
        Duration::from_millis(self.schema.distance.slice_budget_ms)
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".fastlev.toml", "fastlev.toml", ".config/fastlev.toml"];

    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("fastlev").join("config.toml"))
        .filter(|path| path.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let context = format!("While loading {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(context.clone())?;

    toml::from_str(&content).map_err(Error::from).context(context)
}
