//! Reading and writing `config.toml`
//!
//! Saves go through a temp file in the same directory and a rename, and
//! the previous file is copied to `config.toml.backup` first.

use crate::{Config, ConfigError, ConfigResult, CONFIG_VERSION};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn backup_path(&self) -> PathBuf {
        self.config_path.with_extension("toml.backup")
    }

    /// Missing file means defaults; bad values only warn
    pub fn load(&self) -> ConfigResult<Config> {
        let contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(
                    "No config at {}, using defaults",
                    self.config_path.display()
                );
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.config_path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Err(ConfigError::Empty {
                path: self.config_path.clone(),
            });
        }

        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })?;

        if config.version > CONFIG_VERSION {
            log::warn!(
                "{} was written by a newer ReadTrack (format {}, this build reads {})",
                self.config_path.display(),
                config.version,
                CONFIG_VERSION
            );
        }

        if let Err(errors) = config.validate() {
            for error in &errors {
                log::warn!("Config: {}", error);
            }
        }

        Ok(config)
    }

    /// Validates, backs up the current file, then replaces it in one rename
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        config.validate().map_err(ConfigError::Invalid)?;

        let encoded = toml::to_string_pretty(config)?;
        let dir = self.parent_dir();

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
            log::info!("Created config directory {}", dir.display());
        }

        if self.config_path.exists() {
            let backup = self.backup_path();
            fs::copy(&self.config_path, &backup)
                .map_err(|source| ConfigError::Write { path: backup, source })?;
        }

        self.replace_with(dir, &encoded)
            .map_err(|source| ConfigError::Write {
                path: self.config_path.clone(),
                source,
            })?;

        log::info!("Saved config to {}", self.config_path.display());
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn replace_with(&self, dir: &Path, contents: &str) -> std::io::Result<()> {
        let mut temp_file = NamedTempFile::new_in(dir)?;
        temp_file.write_all(contents.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.config_path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn persistence_in(temp_dir: &TempDir) -> ConfigPersistence {
        ConfigPersistence::new(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_missing_file_is_default() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        assert_eq!(persistence_in(&temp_dir).load()?, Config::default());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let persistence = persistence_in(&temp_dir);

        let mut config = Config::default();
        config.catalog.timeout_secs = 25;
        config.app.data_dir = Some(PathBuf::from("/srv/readtrack"));

        persistence.save(&config)?;
        assert_eq!(persistence.load()?, config);
        Ok(())
    }

    #[test]
    fn test_save_creates_nested_directory() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("a").join("b").join("config.toml");

        ConfigPersistence::new(config_path.clone()).save(&Config::default())?;
        assert!(config_path.exists());
        Ok(())
    }

    #[test]
    fn test_overwrite_keeps_previous_as_backup() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let persistence = persistence_in(&temp_dir);

        persistence.save(&Config::default())?;
        assert!(!persistence.backup_path().exists());

        let mut changed = Config::default();
        changed.catalog.enabled = false;
        persistence.save(&changed)?;

        let backup: Config = toml::from_str(&fs::read_to_string(persistence.backup_path())?)?;
        assert!(backup.catalog.enabled);
        assert!(!persistence.load()?.catalog.enabled);
        Ok(())
    }

    #[test]
    fn test_garbage_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let persistence = persistence_in(&temp_dir);
        fs::write(persistence.path(), "this is not valid TOML {{{")?;

        assert!(matches!(persistence.load(), Err(ConfigError::Parse { .. })));
        Ok(())
    }

    #[test]
    fn test_blank_file_is_error() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let persistence = persistence_in(&temp_dir);
        fs::write(persistence.path(), "  \n")?;

        assert!(matches!(persistence.load(), Err(ConfigError::Empty { .. })));
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let persistence = persistence_in(&temp_dir);
        fs::write(persistence.path(), "[catalog]\nenabled = false\n")?;

        let config = persistence.load()?;
        assert!(!config.catalog.enabled);
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.export, crate::ExportConfig::default());
        Ok(())
    }

    #[test]
    fn test_invalid_values_load_but_do_not_save() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let persistence = persistence_in(&temp_dir);
        fs::write(persistence.path(), "[catalog]\ntimeout_secs = 0\n")?;

        let config = persistence.load()?;
        assert_eq!(config.catalog.timeout_secs, 0);

        match persistence.save(&config) {
            Err(ConfigError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "catalog.timeout_secs");
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        Ok(())
    }
}
