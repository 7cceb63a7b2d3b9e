//! ReadTrack configuration
//!
//! `config.toml` lives in the platform config directory and has one table
//! per [`ConfigSection`]: `[app]`, `[catalog]` and `[export]`. Missing keys
//! take their defaults. Out-of-range values are logged on load and
//! rejected on save.
//!
//! ```rust,no_run
//! use readtrack_config::ConfigManager;
//!
//! # fn main() -> Result<(), readtrack_config::ConfigError> {
//! let manager = ConfigManager::new()?;
//! let config = manager.load_with_env_overrides()?;
//! println!("Reading list in {}", manager.data_dir(&config)?.display());
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

// Config sections
pub mod app_config;
mod catalog_config;
mod export_config;

pub use error::{ConfigError, ConfigResult};
pub use manager::{apply_env_overrides, ConfigManager};
pub use validation::{ConfigSection, ValidationError, Validator};

// Re-export config sections
pub use app_config::{AppConfig, LogLevel};
pub use catalog_config::{CatalogConfig, DEFAULT_CATALOG_URL, DEFAULT_PLACEHOLDER_COVER};
pub use export_config::ExportConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// Metadata catalog lookup
    pub catalog: CatalogConfig,

    /// Export destinations
    pub export: ExportConfig,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every failing field across all sections
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = [
            self.app.validate(),
            self.catalog.validate(),
            self.export.validate(),
        ]
        .into_iter()
        .filter_map(Result::err)
        .flatten()
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Section-by-section; `other` wins
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.catalog.merge(other.catalog);
        self.export.merge(other.export);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            catalog: CatalogConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_version_is_set() {
        let config = Config::default();
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        let mut override_config = Config::default();
        override_config.catalog.timeout_secs = 3;

        base.merge(override_config);
        assert_eq!(base.catalog.timeout_secs, 3);
    }

    #[test]
    fn test_errors_collected_across_sections() {
        let mut config = Config::default();
        config.catalog.base_url = String::new();
        config.export.csv_path = std::path::PathBuf::new();

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
