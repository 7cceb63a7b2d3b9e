//! Locating, loading and saving the ReadTrack config

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "readtrack";

/// Owns the config file location and resolves where the reading list lives
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory
    ///
    /// - Linux: `~/.config/readtrack/`
    /// - macOS: `~/Library/Application Support/readtrack/`
    /// - Windows: `%APPDATA%\readtrack\`
    pub fn new() -> ConfigResult<Self> {
        let dirs = Self::project_dirs("config")?;
        Self::with_directory(dirs.config_dir().to_path_buf())
    }

    /// `config.toml` inside `config_dir`
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let config_path = config_dir.join("config.toml");
        Ok(Self {
            persistence: ConfigPersistence::new(config_path),
            config_dir,
        })
    }

    /// An explicit config file, as passed with `--config`
    pub fn with_file(config_path: PathBuf) -> ConfigResult<Self> {
        let config_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(Self {
            persistence: ConfigPersistence::new(config_path),
            config_dir,
        })
    }

    fn project_dirs(purpose: &'static str) -> ConfigResult<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME).ok_or(ConfigError::NoProjectDirs(purpose))
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.persistence.path().to_path_buf()
    }

    /// Directory holding the reading list
    ///
    /// `app.data_dir` when set, otherwise the platform data directory.
    pub fn data_dir(&self, config: &Config) -> ConfigResult<PathBuf> {
        if let Some(ref dir) = config.app.data_dir {
            return Ok(dir.clone());
        }
        Ok(Self::project_dirs("data")?.data_dir().to_path_buf())
    }

    /// Defaults when the file does not exist yet
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Never fails; unreadable files are logged and replaced by defaults
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Read-modify-write of the config file
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default `config.toml` unless one is already there
    ///
    /// `true` when a file was written.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.persistence.path().exists() {
            return Ok(false);
        }
        self.save(&Config::default())?;
        Ok(true)
    }

    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Problems in the file on disk, one line per field
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let problems = self.load()?.validate().err().unwrap_or_default();
        Ok(problems.iter().map(ToString::to_string).collect())
    }

    /// Loads the config and applies `READTRACK_SECTION_FIELD` environment overrides
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let mut config = self.load()?;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }
}

/// Applies overrides looked up through `lookup`
///
/// Recognized keys: `READTRACK_APP_DATA_DIR`, `READTRACK_APP_LOG_LEVEL`,
/// `READTRACK_CATALOG_ENABLED`, `READTRACK_CATALOG_BASE_URL`,
/// `READTRACK_CATALOG_TIMEOUT_SECS`. Unparseable values are ignored with a warning.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup("READTRACK_APP_DATA_DIR") {
        config.app.data_dir = Some(PathBuf::from(dir));
    }

    if let Some(level) = lookup("READTRACK_APP_LOG_LEVEL") {
        match level.parse::<LogLevel>() {
            Ok(level) => config.app.log_level = level,
            Err(e) => log::warn!("Ignoring READTRACK_APP_LOG_LEVEL: {}", e),
        }
    }

    if let Some(enabled) = lookup("READTRACK_CATALOG_ENABLED") {
        match enabled.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => config.catalog.enabled = true,
            "0" | "false" | "no" | "off" => config.catalog.enabled = false,
            other => log::warn!("Ignoring READTRACK_CATALOG_ENABLED={}", other),
        }
    }

    if let Some(url) = lookup("READTRACK_CATALOG_BASE_URL") {
        config.catalog.base_url = url;
    }

    if let Some(timeout) = lookup("READTRACK_CATALOG_TIMEOUT_SECS") {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => config.catalog.timeout_secs = secs,
            Err(_) => log::warn!("Ignoring READTRACK_CATALOG_TIMEOUT_SECS={}", timeout),
        }
    }

    if let Err(errors) = config.validate() {
        for error in &errors {
            log::warn!("Config after environment overrides: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_directory_layout() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let manager = ConfigManager::with_directory(temp_dir.path().join("readtrack"))?;

        assert_eq!(manager.config_dir(), &temp_dir.path().join("readtrack"));
        assert_eq!(
            manager.config_path(),
            temp_dir.path().join("readtrack").join("config.toml")
        );
        Ok(())
    }

    #[test]
    fn test_with_file_uses_parent_as_dir() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("custom.toml");
        let manager = ConfigManager::with_file(path.clone())?;

        assert_eq!(manager.config_path(), path);
        assert_eq!(manager.config_dir(), &temp_dir.path().to_path_buf());
        Ok(())
    }

    #[test]
    fn test_bare_file_name_has_empty_dir() -> Result<(), Box<dyn std::error::Error>> {
        let manager = ConfigManager::with_file(PathBuf::from("readtrack.toml"))?;
        assert_eq!(manager.config_dir(), &PathBuf::new());
        Ok(())
    }

    #[test]
    fn test_initialize_leaves_existing_file() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
        manager.update(|config| config.catalog.timeout_secs = 99)?;

        assert!(!manager.initialize()?);
        assert_eq!(manager.load()?.catalog.timeout_secs, 99);
        Ok(())
    }

    #[test]
    fn test_load_or_default_survives_empty_file() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
        std::fs::write(manager.config_path(), "")?;

        assert!(manager.load().is_err());
        assert_eq!(manager.load_or_default(), Config::default());
        Ok(())
    }

    #[test]
    fn test_data_dir_prefers_config_value() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf())?;
        let mut config = Config::default();
        config.app.data_dir = Some(PathBuf::from("/tmp/books"));

        assert_eq!(manager.data_dir(&config)?, PathBuf::from("/tmp/books"));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("READTRACK_APP_DATA_DIR", "/data"),
                ("READTRACK_APP_LOG_LEVEL", "debug"),
                ("READTRACK_CATALOG_ENABLED", "off"),
                ("READTRACK_CATALOG_BASE_URL", "http://localhost:9000/volumes"),
                ("READTRACK_CATALOG_TIMEOUT_SECS", "3"),
            ]),
        );

        assert_eq!(config.app.data_dir, Some(PathBuf::from("/data")));
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert!(!config.catalog.enabled);
        assert_eq!(config.catalog.base_url, "http://localhost:9000/volumes");
        assert_eq!(config.catalog.timeout_secs, 3);
    }

    #[test]
    fn test_env_overrides_ignore_garbage() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            env(&[
                ("READTRACK_APP_LOG_LEVEL", "shouty"),
                ("READTRACK_CATALOG_ENABLED", "maybe"),
                ("READTRACK_CATALOG_TIMEOUT_SECS", "soon"),
            ]),
        );

        assert_eq!(config, Config::default());
    }
}
