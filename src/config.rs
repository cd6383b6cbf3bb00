//! Logger settings and file locations
//!
//! Settings are persisted as TOML with per-field defaults, so a partial or
//! missing config file always yields a usable configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::LogLevel;
use crate::summary::{DEFAULT_RETENTION_DAYS, SUMMARY_DIR_NAME};

/// Logger settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Threshold level; messages above it are dropped
    #[serde(default = "default_level")]
    pub current_level: LogLevel,

    /// Prefix rendered in front of error messages
    #[serde(default = "default_error_prefix")]
    pub error_prefix: String,

    /// Prefix rendered in front of warning messages
    #[serde(default = "default_warning_prefix")]
    pub warning_prefix: String,

    /// Prefix rendered in front of debug messages
    #[serde(default = "default_debug_prefix")]
    pub debug_prefix: String,

    /// Prefix rendered in front of info messages
    #[serde(default = "default_info_prefix")]
    pub info_prefix: String,

    /// Prefix rendered in front of success messages
    #[serde(default = "default_success_prefix")]
    pub success_prefix: String,

    /// Prefix rendered in front of verbose messages
    #[serde(default = "default_verbose_prefix")]
    pub verbose_prefix: String,

    /// Whether accepted messages are aggregated for the summary file
    #[serde(default = "default_write_to_file")]
    pub write_to_file: bool,

    /// Product name used in summary file names and headers
    #[serde(default = "default_product_name")]
    pub product_name: String,

    /// Product version shown in the summary header
    #[serde(default = "default_product_version")]
    pub product_version: String,

    /// Days to keep old summary files before cleanup
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

fn default_error_prefix() -> String {
    "[ERROR]".to_string()
}

fn default_warning_prefix() -> String {
    "WARNING".to_string()
}

fn default_debug_prefix() -> String {
    "=DEBUG=".to_string()
}

fn default_info_prefix() -> String {
    "INFORM:".to_string()
}

fn default_success_prefix() -> String {
    "SUCCESS".to_string()
}

fn default_verbose_prefix() -> String {
    "VERBOSE".to_string()
}

fn default_write_to_file() -> bool {
    true
}

fn default_product_name() -> String {
    "App".to_string()
}

fn default_product_version() -> String {
    "0.0.0".to_string()
}

fn default_retention_days() -> u64 {
    DEFAULT_RETENTION_DAYS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_level: default_level(),
            error_prefix: default_error_prefix(),
            warning_prefix: default_warning_prefix(),
            debug_prefix: default_debug_prefix(),
            info_prefix: default_info_prefix(),
            success_prefix: default_success_prefix(),
            verbose_prefix: default_verbose_prefix(),
            write_to_file: default_write_to_file(),
            product_name: default_product_name(),
            product_version: default_product_version(),
            retention_days: default_retention_days(),
        }
    }
}

impl Settings {
    /// Load settings from the config file, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load settings from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).context("Failed to read settings file")?;
        toml::from_str(&content).context("Failed to parse settings file")
    }

    /// Load settings, falling back to defaults on any error
    ///
    /// Config problems are reported once here and are never fatal.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to load logger settings: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to the config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Prefix rendered in front of messages at `level`
    pub fn prefix(&self, level: LogLevel) -> &str {
        match level {
            LogLevel::Error => &self.error_prefix,
            LogLevel::Warning => &self.warning_prefix,
            LogLevel::Debug => &self.debug_prefix,
            LogLevel::Info => &self.info_prefix,
            LogLevel::Success => &self.success_prefix,
            _ => &self.verbose_prefix,
        }
    }
}

/// Get the base configuration directory (~/.enhanced-logger)
/// Falls back to ./.enhanced-logger if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".enhanced-logger")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".enhanced-logger"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the persistent data root that summary files live under
///
/// Platform data dir when available, the config dir otherwise.
pub fn data_root() -> PathBuf {
    dirs::data_dir().unwrap_or_else(config_dir)
}

/// Get the directory that holds per-run summary files
pub fn summary_dir() -> PathBuf {
    data_root().join(SUMMARY_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.current_level, LogLevel::Info);
        assert_eq!(settings.error_prefix, "[ERROR]");
        assert_eq!(settings.info_prefix, "INFORM:");
        assert!(settings.write_to_file);
        assert_eq!(settings.retention_days, DEFAULT_RETENTION_DAYS);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.current_level, settings.current_level);
        assert_eq!(parsed.debug_prefix, settings.debug_prefix);
        assert_eq!(parsed.write_to_file, settings.write_to_file);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Settings =
            toml::from_str("current_level = \"verbose\"\nwrite_to_file = false\n").unwrap();
        assert_eq!(parsed.current_level, LogLevel::Verbose);
        assert!(!parsed.write_to_file);
        assert_eq!(parsed.error_prefix, "[ERROR]");
        assert_eq!(parsed.product_name, "App");
    }

    #[test]
    fn test_load_from_nonexistent_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&temp_dir.path().join("missing.toml")).unwrap();
        assert_eq!(settings.current_level, LogLevel::Info);
    }

    #[test]
    fn test_load_from_malformed_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "current_level = ").unwrap();
        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.current_level = LogLevel::Warning;
        settings.product_name = "DemoGame".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.current_level, LogLevel::Warning);
        assert_eq!(loaded.product_name, "DemoGame");
    }

    #[test]
    fn test_prefix_mapping() {
        let settings = Settings::default();
        assert_eq!(settings.prefix(LogLevel::Error), "[ERROR]");
        assert_eq!(settings.prefix(LogLevel::Warning), "WARNING");
        assert_eq!(settings.prefix(LogLevel::Debug), "=DEBUG=");
        assert_eq!(settings.prefix(LogLevel::Info), "INFORM:");
        assert_eq!(settings.prefix(LogLevel::Success), "SUCCESS");
        assert_eq!(settings.prefix(LogLevel::Verbose), "VERBOSE");
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".enhanced-logger"));
    }

    #[test]
    fn test_summary_dir_uses_summary_subfolder() {
        assert!(summary_dir().ends_with(SUMMARY_DIR_NAME));
    }
}
