//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftTypeCatalog;

use super::types::{EngineConfig, EngineSettings, ShiftTypesConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml        # Display count, rate profile, Shabbat window, permissions
/// └── shift_types.yaml   # Shift type catalog
/// ```
///
/// # Example
///
/// ```no_run
/// use shift_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Hourly rate: {}", loader.config().rate_profile().hourly_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The catalog repeats a code or the Shabbat hours are out of range
    ///   (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine_path = path.join("engine.yaml");
        let settings = Self::load_yaml::<EngineSettings>(&engine_path)?;
        settings
            .shabbat
            .validate()
            .map_err(|e| Self::invalid(&engine_path, e))?;

        let shift_types_path = path.join("shift_types.yaml");
        let shift_types = Self::load_yaml::<ShiftTypesConfig>(&shift_types_path)?;
        let catalog = ShiftTypeCatalog::new(shift_types.shift_types)
            .map_err(|e| Self::invalid(&shift_types_path, e))?;

        info!(
            path = %path.display(),
            shift_types = catalog.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(settings, catalog),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn invalid(path: &Path, error: EngineError) -> EngineError {
        EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ShiftKind, TimeOfDay};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "shift-ledger-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap().into_config();
        assert_eq!(config.display_count(), 3);
        assert_eq!(config.rate_profile().hourly_rate, dec("51"));
        assert_eq!(config.rate_profile().overtime_rate_fallback(), Some(dec("63.75")));
        assert_eq!(config.shabbat_window().start_hour, 15);
        assert_eq!(config.shabbat_window().end_hour, 5);
        assert!(config.weekly_batch_allowed());
    }

    #[test]
    fn test_default_catalog_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let codes: Vec<_> = loader
            .config()
            .catalog()
            .iter()
            .map(|d| d.code.as_str())
            .collect();

        assert_eq!(
            codes,
            vec!["MORNING", "7AM_UNTIL_4", "MIDDLE", "EVENING", "4PM_UNTIL_12", "NIGHT"]
        );

        let night = loader.config().catalog().get("NIGHT").unwrap();
        assert_eq!(night.kind(), ShiftKind::Night);
        assert_eq!(night.default_end, Some(TimeOfDay::Text("07:15".to_string())));
        assert_eq!(night.unpaid_break_minutes, 0);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_yaml_returns_parse_error() {
        let dir = scratch_dir("bad-yaml");
        fs::write(dir.join("engine.yaml"), "rate_profile: [unclosed").unwrap();

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_duplicate_shift_codes_return_parse_error() {
        let dir = scratch_dir("dup-codes");
        fs::write(dir.join("engine.yaml"), "rate_profile:\n  hourly_rate: 40\n").unwrap();
        fs::write(
            dir.join("shift_types.yaml"),
            "shift_types:\n  - code: MORNING\n    name: Morning\n  - code: MORNING\n    name: Again\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("shift_types.yaml"));
                assert!(message.contains("duplicate"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_minimal_settings_use_defaults() {
        let dir = scratch_dir("minimal");
        fs::write(dir.join("engine.yaml"), "rate_profile:\n  hourly_rate: 40\n").unwrap();
        fs::write(dir.join("shift_types.yaml"), "shift_types: []\n").unwrap();

        let config = ConfigLoader::load(&dir).unwrap().into_config();
        assert_eq!(config.display_count(), 3);
        assert!(!config.weekly_batch_allowed());
        assert_eq!(config.shabbat_window().start_hour, 15);
        assert!(config.catalog().is_empty());

        fs::remove_dir_all(dir).ok();
    }
}
