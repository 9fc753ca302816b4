//! Configuration management for the RAX file manager
//!
//! Loads the work root and tuning knobs from a key-value file (TOML, INI, JSON
//! or YAML) with `RAX_FM_*` environment overrides. Relative paths resolve
//! against an explicit startup directory, never the process working directory.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default file stem searched for in the startup directory.
pub const DEFAULT_CONFIG_NAME: &str = "config";

/// Usage percentage above which the quota check warns, unless configured.
pub const DEFAULT_QUOTA_WARN_PERCENT: u8 = 90;

/// Longest accepted argument line, unless configured.
pub const DEFAULT_MAX_INPUT_LENGTH: usize = 4096;

/// Loaded file manager configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory every operation is confined to (absolute)
    pub work_dir: PathBuf,

    /// Usage percentage above which the quota check warns
    pub quota_warn_percent: u8,

    /// Longest accepted argument line
    pub max_input_length: usize,
}

/// Raw shape of the configuration source.
///
/// `work_dir` may sit at the top level or inside an INI `[DEFAULT]` section.
#[derive(Debug, Deserialize)]
struct RawConfig {
    work_dir: Option<String>,
    #[serde(alias = "DEFAULT")]
    default: Option<RawDefaultSection>,
    quota_warn_percent: Option<u8>,
    max_input_length: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawDefaultSection {
    work_dir: Option<String>,
}

impl AppConfig {
    /// Load configuration relative to `start_dir`.
    ///
    /// With `config_path` unset, `config.{toml,ini,json,yaml}` is looked up in
    /// `start_dir`. A missing file or a missing `work_dir` is an error.
    pub fn load(start_dir: &Path, config_path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let source = match config_path {
            Some(path) => File::from(start_dir.join(path)).required(true),
            None => {
                let stem = start_dir.join(DEFAULT_CONFIG_NAME);
                File::with_name(&stem.to_string_lossy()).required(true)
            }
        };

        let settings = Config::builder()
            .add_source(source)
            .add_source(Environment::with_prefix("RAX_FM"))
            .build()?;

        let raw: RawConfig = settings.try_deserialize()?;
        let config = Self::from_raw(raw, start_dir)?;
        config.validate()?;
        Ok(config)
    }

    fn from_raw(raw: RawConfig, start_dir: &Path) -> Result<Self, config::ConfigError> {
        let work_dir = raw
            .work_dir
            .or_else(|| raw.default.and_then(|section| section.work_dir))
            .ok_or_else(|| config::ConfigError::NotFound("work_dir".into()))?;

        if work_dir.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "work_dir cannot be empty".into(),
            ));
        }

        Ok(Self {
            work_dir: start_dir.join(work_dir.trim()),
            quota_warn_percent: raw.quota_warn_percent.unwrap_or(DEFAULT_QUOTA_WARN_PERCENT),
            max_input_length: raw.max_input_length.unwrap_or(DEFAULT_MAX_INPUT_LENGTH),
        })
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.quota_warn_percent == 0 || self.quota_warn_percent > 100 {
            return Err(config::ConfigError::Message(
                "quota_warn_percent must be between 1 and 100".into(),
            ));
        }

        if self.max_input_length == 0 {
            return Err(config::ConfigError::Message(
                "max_input_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml_with_relative_work_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "work_dir = \"storage\"\n").unwrap();

        let config = AppConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.work_dir, dir.path().join("storage"));
        assert_eq!(config.quota_warn_percent, DEFAULT_QUOTA_WARN_PERCENT);
        assert_eq!(config.max_input_length, DEFAULT_MAX_INPUT_LENGTH);
    }

    #[test]
    fn test_load_ini_default_section() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("settings.ini"),
            "[DEFAULT]\nwork_dir = /srv/files\n",
        )
        .unwrap();

        let config = AppConfig::load(dir.path(), Some(Path::new("settings.ini"))).unwrap();
        assert_eq!(config.work_dir, PathBuf::from("/srv/files"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(AppConfig::load(dir.path(), None).is_err());
    }

    #[test]
    fn test_missing_work_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "quota_warn_percent = 80\n").unwrap();
        assert!(AppConfig::load(dir.path(), None).is_err());
    }

    #[test]
    fn test_out_of_range_quota_percent_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "work_dir = \"w\"\nquota_warn_percent = 150\n",
        )
        .unwrap();
        assert!(AppConfig::load(dir.path(), None).is_err());
    }
}
