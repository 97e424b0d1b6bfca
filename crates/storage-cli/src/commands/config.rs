//! Config command implementation.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/cloud-storage/config.toml`
//! - macOS: `~/Library/Application Support/cloud-storage/config.toml`
//! - Windows: `%APPDATA%\cloud-storage\config.toml`

use crate::actions::ConfigAction;
use crate::formatters::print_output;
use anyhow::{Context, Result};
use cloud_storage_core::StorageConfig;
use cloud_storage_core::cli::{ExitCode, OutputFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "cloud-storage";

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// default_format = "pretty"
/// log_level = "info"
/// user_id = 42
///
/// [storage]
/// data_dir = "~/.local/share/cloud-storage"
/// bucket = "user-files"
/// root_archive_name = "root"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Object store location and naming
    #[serde(default)]
    pub storage: StorageSection,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format (json, text, pretty)
    pub default_format: String,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// User to act as when `--user` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Storage configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageSection {
    /// Directory holding the object store
    pub data_dir: String,

    /// Bucket name
    pub bucket: String,

    /// Archive name used when the whole tree is downloaded
    pub root_archive_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default().to_string(),
            log_level: "info".to_string(),
            user_id: None,
        }
    }
}

impl Default for StorageSection {
    fn default() -> Self {
        let defaults = StorageConfig::default();
        Self {
            data_dir: default_data_dir(),
            bucket: defaults.bucket,
            root_archive_name: defaults.root_archive_name,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        self.general
            .default_format
            .parse::<OutputFormat>()
            .context("invalid general.default_format")?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                valid_levels.join(", ")
            );
        }

        if self.storage.data_dir.trim().is_empty() {
            anyhow::bail!("storage.data_dir must not be empty");
        }

        self.storage_config(None)
            .validate()
            .context("invalid [storage] section")?;

        Ok(())
    }

    /// Builds the service configuration, optionally overriding the bucket.
    #[must_use]
    pub fn storage_config(&self, bucket: Option<&str>) -> StorageConfig {
        StorageConfig::builder()
            .bucket(bucket.unwrap_or(&self.storage.bucket))
            .root_archive_name(&self.storage.root_archive_name)
            .build()
    }
}

/// Gets the default configuration file path.
///
/// # Errors
///
/// Returns an error if the platform has no configuration directory.
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;
    Ok(config_dir.join(APP_DIR).join("config.toml"))
}

fn default_data_dir() -> String {
    dirs::data_dir().map_or_else(
        || format!("~/.local/share/{APP_DIR}"),
        |p| p.join(APP_DIR).display().to_string(),
    )
}

/// Loads configuration from the default location, or returns defaults.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Loads configuration from `path`, or returns defaults if it is missing.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).context("failed to read config file")?;
    let config: Config = toml::from_str(&content).context("failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Validates and writes `config` to `path`, creating parent directories.
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }

    let toml_str = toml::to_string_pretty(config).context("failed to serialize config")?;
    fs::write(path, toml_str).context("failed to write config file")?;

    debug!("Saved config to {}", path.display());
    Ok(())
}

/// Gets a configuration value by key path (e.g., "storage.bucket").
#[must_use]
pub fn get_config_value_by_key(config: &Config, key: &str) -> Option<String> {
    match key {
        "general.default_format" => Some(config.general.default_format.clone()),
        "general.log_level" => Some(config.general.log_level.clone()),
        "general.user_id" => config.general.user_id.map(|v| v.to_string()),

        "storage.data_dir" => Some(config.storage.data_dir.clone()),
        "storage.bucket" => Some(config.storage.bucket.clone()),
        "storage.root_archive_name" => Some(config.storage.root_archive_name.clone()),

        _ => None,
    }
}

/// Sets a configuration value by key path.
///
/// # Errors
///
/// Returns an error for unknown keys or unparsable values.
pub fn set_config_value_by_key(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "general.default_format" => config.general.default_format = value.to_string(),
        "general.log_level" => config.general.log_level = value.to_string(),
        "general.user_id" => {
            config.general.user_id = if value.is_empty() || value == "none" {
                None
            } else {
                Some(
                    value
                        .parse()
                        .context("invalid value for user_id, must be a number")?,
                )
            };
        }

        "storage.data_dir" => config.storage.data_dir = value.to_string(),
        "storage.bucket" => config.storage.bucket = value.to_string(),
        "storage.root_archive_name" => config.storage.root_archive_name = value.to_string(),

        _ => anyhow::bail!("unknown configuration key: {key}"),
    }

    Ok(())
}

/// Initialization result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InitResult {
    /// Whether a new file was written
    pub created: bool,
    /// Status message
    pub message: String,
    /// Configuration file path
    pub path: String,
}

/// Configuration value result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfigValue {
    /// Configuration key
    pub key: String,
    /// Configuration value
    pub value: String,
}

/// Runs the config command against the default configuration file.
pub async fn run(action: ConfigAction, output_format: OutputFormat) -> Result<ExitCode> {
    run_at(&config_path()?, action, output_format).await
}

/// Runs the config command against the configuration file at `path`.
pub async fn run_at(path: &Path, action: ConfigAction, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Config action: {:?}", action);

    match action {
        ConfigAction::Init => {
            let result = init_config(path)?;
            print_output(&result, output_format)?;
        }
        ConfigAction::Show => print_output(&load_config_from(path)?, output_format)?,
        ConfigAction::Get { key } => {
            let config = load_config_from(path)?;
            let Some(value) = get_config_value_by_key(&config, &key) else {
                anyhow::bail!("configuration key '{key}' is unknown or unset");
            };
            print_output(&ConfigValue { key, value }, output_format)?;
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config_from(path)?;
            set_config_value_by_key(&mut config, &key, &value)?;
            save_config_to(path, &config)?;
            print_output(&ConfigValue { key, value }, output_format)?;
        }
        ConfigAction::Path => {
            let value = path.display().to_string();
            print_output(
                &ConfigValue {
                    key: "path".to_string(),
                    value,
                },
                output_format,
            )?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Writes a default configuration unless one already exists.
fn init_config(path: &Path) -> Result<InitResult> {
    if path.exists() {
        return Ok(InitResult {
            created: false,
            message: "configuration file already exists".to_string(),
            path: path.display().to_string(),
        });
    }

    save_config_to(path, &Config::default())?;
    Ok(InitResult {
        created: true,
        message: "configuration file created with default values".to_string(),
        path: path.display().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.general.default_format, "pretty");
        assert_eq!(config.storage.bucket, "user-files");
        assert_eq!(config.storage.root_archive_name, "root");
        assert_eq!(config.general.user_id, None);
    }

    #[test]
    fn test_validate_rejects_bad_format() {
        let mut config = Config::default();
        config.general.default_format = "yaml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let mut config = Config::default();
        config.general.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_bucket() {
        let mut config = Config::default();
        config.storage.bucket = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_storage_config_bucket_override() {
        let config = Config::default();
        assert_eq!(config.storage_config(None).bucket, "user-files");
        assert_eq!(config.storage_config(Some("other")).bucket, "other");
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = Config::default();
        set_config_value_by_key(&mut config, "general.user_id", "42").unwrap();
        set_config_value_by_key(&mut config, "storage.bucket", "files").unwrap();

        assert_eq!(
            get_config_value_by_key(&config, "general.user_id").as_deref(),
            Some("42")
        );
        assert_eq!(
            get_config_value_by_key(&config, "storage.bucket").as_deref(),
            Some("files")
        );

        set_config_value_by_key(&mut config, "general.user_id", "none").unwrap();
        assert_eq!(get_config_value_by_key(&config, "general.user_id"), None);
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_number() {
        let mut config = Config::default();
        assert!(set_config_value_by_key(&mut config, "general.color", "on").is_err());
        assert!(set_config_value_by_key(&mut config, "general.user_id", "abc").is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.general.user_id = Some(7);
        config.storage.data_dir = "/srv/storage".to_string();
        save_config_to(&path, &config).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nuser_id = 3\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.user_id, Some(3));
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.storage.bucket, "user-files");
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nlog_level = \"shout\"\n").unwrap();

        assert!(load_config_from(&path).is_err());
    }

    #[tokio::test]
    async fn test_init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let first = init_config(&path).unwrap();
        assert!(first.created);

        fs::write(&path, "[general]\nuser_id = 9\n").unwrap();
        let second = init_config(&path).unwrap();
        assert!(!second.created);
        assert_eq!(load_config_from(&path).unwrap().general.user_id, Some(9));
    }

    #[tokio::test]
    async fn test_run_set_persists_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let code = run_at(
            &path,
            ConfigAction::Set {
                key: "storage.root_archive_name".to_string(),
                value: "everything".to_string(),
            },
            OutputFormat::Json,
        )
        .await
        .unwrap();

        assert!(code.is_success());
        assert_eq!(
            load_config_from(&path).unwrap().storage.root_archive_name,
            "everything"
        );
    }

    #[tokio::test]
    async fn test_run_get_unset_key_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let result = run_at(
            &path,
            ConfigAction::Get {
                key: "general.user_id".to_string(),
            },
            OutputFormat::Json,
        )
        .await;
        assert!(result.is_err());
    }
}
