//! Configuration Module
//!
//! Handles application configuration loading, validation, and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal UI behaviour
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to file even without --debug
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Terminal UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick interval for the event loop in milliseconds (default: 100)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Show dotfiles in the file picker
    #[serde(default)]
    pub show_hidden_files: bool,

    /// Directory the file picker opens in (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picker_start_dir: Option<PathBuf>,
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            show_hidden_files: false,
            picker_start_dir: None,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.config/game-creator/config.toml
    /// 3. Local config: ./game-creator.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        if let Some(system_config_path) = Self::system_config_path()
            && system_config_path.exists()
        {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::merge_from_file(config, &system_config_path)?;
        }

        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::merge_from_file(config, &local_config_path)?;
        }

        config = Self::apply_env_overrides(config)?;

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let config = Self::merge_from_file(Self::default(), path)?;
        let config = Self::apply_env_overrides(config)?;

        tracing::debug!("Configuration loaded successfully from custom path");
        Ok(config)
    }

    /// Get the system config path: ~/.config/game-creator/config.toml
    pub fn system_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("game-creator").join("config.toml"))
    }

    /// Get the local config path: ./game-creator.toml
    fn local_config_path() -> PathBuf {
        PathBuf::from("./game-creator.toml")
    }

    /// Load and merge configuration from a TOML file
    fn merge_from_file(base: Self, path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let overlay: toml::Value = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Self::merge(base, overlay)
            .with_context(|| format!("Invalid config file: {:?}", path))
    }

    /// Overlay the keys present in `overlay` onto `base`, leaving the rest
    fn merge(base: Self, overlay: toml::Value) -> Result<Self> {
        let mut merged = toml::Value::try_from(base)?;
        merge_values(&mut merged, overlay);
        Ok(merged.try_into()?)
    }

    fn apply_env_overrides(config: Self) -> Result<Self> {
        Self::apply_overrides_from(config, |key| std::env::var(key).ok())
    }

    /// Apply `GAME_CREATOR_*` overrides read through `lookup`
    fn apply_overrides_from<F>(mut config: Self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("GAME_CREATOR_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("GAME_CREATOR_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(file));
        }

        if let Some(tick) = lookup("GAME_CREATOR_TICK_RATE_MS") {
            config.ui.tick_rate_ms = tick
                .parse()
                .with_context(|| format!("Invalid GAME_CREATOR_TICK_RATE_MS: {}", tick))?;
        }

        if let Some(hidden) = lookup("GAME_CREATOR_SHOW_HIDDEN") {
            config.ui.show_hidden_files = parse_flag(&hidden)
                .with_context(|| format!("Invalid GAME_CREATOR_SHOW_HIDDEN: {}", hidden))?;
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        tracing::debug!("Validating configuration...");

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            );
        }

        if self.ui.tick_rate_ms == 0 {
            anyhow::bail!("ui.tick_rate_ms must be greater than zero");
        }

        if let Some(dir) = &self.ui.picker_start_dir
            && !dir.is_dir()
        {
            tracing::warn!(
                "Picker start directory does not exist, falling back to cwd: {:?}",
                dir
            );
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}

/// Boolean env value: true/false, 1/0, yes/no, on/off
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base), toml::Value::Table(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert!(!config.ui.show_hidden_files);
        assert!(config.ui.picker_start_dir.is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_tick_rate() {
        let mut config = Config::default();
        config.ui.tick_rate_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
[logging]
level = "debug"
file = "/tmp/game-creator.log"

[ui]
tick_rate_ms = 250
show_hidden_files = true
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/game-creator.log"))
        );
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert!(config.ui.show_hidden_files);
    }

    #[test]
    fn test_config_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[ui]\nshow_hidden_files = true\n").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.ui.tick_rate_ms = 50;

        config.save(temp_file.path()).unwrap();

        let contents = std::fs::read_to_string(temp_file.path()).unwrap();
        let loaded_config: Config = toml::from_str(&contents).unwrap();
        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let mut base = Config::default();
        base.ui.tick_rate_ms = 250;
        base.logging.level = "warn".to_string();

        let overlay: toml::Value = toml::from_str("[ui]\nshow_hidden_files = true\n").unwrap();
        let merged = Config::merge(base, overlay).unwrap();

        assert_eq!(merged.ui.tick_rate_ms, 250);
        assert!(merged.ui.show_hidden_files);
        assert_eq!(merged.logging.level, "warn");
    }

    #[test]
    fn test_merge_from_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game-creator.toml");
        std::fs::write(&path, "[logging]\nlevel = \"error\"\n").unwrap();

        let config = Config::merge_from_file(Config::default(), &path).unwrap();
        assert_eq!(config.logging.level, "error");
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_path(dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("GAME_CREATOR_LOG_LEVEL", "trace"),
            ("GAME_CREATOR_TICK_RATE_MS", "40"),
            ("GAME_CREATOR_SHOW_HIDDEN", "true"),
        ]);
        let config = Config::apply_overrides_from(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();

        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.ui.tick_rate_ms, 40);
        assert!(config.ui.show_hidden_files);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_env_override_bad_tick_rate() {
        let result = Config::apply_overrides_from(Config::default(), |key| {
            (key == "GAME_CREATOR_TICK_RATE_MS").then(|| "fast".to_string())
        });
        assert!(result.is_err());
    }

    #[rstest::rstest]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("TRUE", true)]
    #[case("off", false)]
    #[case("0", false)]
    fn test_env_override_show_hidden_spellings(#[case] raw: &str, #[case] expected: bool) {
        let config = Config::apply_overrides_from(Config::default(), |key| {
            (key == "GAME_CREATOR_SHOW_HIDDEN").then(|| raw.to_string())
        })
        .unwrap();
        assert_eq!(config.ui.show_hidden_files, expected);
    }

    #[test]
    fn test_env_override_bad_show_hidden() {
        let result = Config::apply_overrides_from(Config::default(), |key| {
            (key == "GAME_CREATOR_SHOW_HIDDEN").then(|| "maybe".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_system_config_path() {
        if let Some(path) = Config::system_config_path() {
            assert!(path.ends_with("game-creator/config.toml"));
        }
    }
}
