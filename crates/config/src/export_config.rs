//! Export configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default export destinations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// CSV file written by `export` when no output is given
    pub csv_path: PathBuf,

    /// JSON file written by `export --format json`
    pub json_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("reading-list.csv"),
            json_path: PathBuf::from("reading-list.json"),
        }
    }
}

impl ConfigSection for ExportConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::gather([
            Validator::non_empty("export.csv_path", &self.csv_path.to_string_lossy()),
            Validator::non_empty("export.json_path", &self.json_path.to_string_lossy()),
        ])
    }

    fn merge(&mut self, other: Self) {
        self.csv_path = other.csv_path;
        self.json_path = other.json_path;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ExportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.csv_path, PathBuf::from("reading-list.csv"));
    }

    #[test]
    fn test_empty_paths() {
        let mut config = ExportConfig::default();
        config.json_path = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
