//! User settings for MoneyMind
//!
//! Manages where the training data and model artifacts live and how budgets
//! are displayed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::MoneymindPaths;
use crate::error::PredictorError;

/// Environment variable that overrides the training dataset location
pub const TRAINING_DATA_ENV: &str = "TRAINING_DATA_PATH";

/// User settings for MoneyMind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying budgets
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Explicit training dataset location (overridden by `TRAINING_DATA_PATH`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_data_path: Option<PathBuf>,

    /// File name of the fitted model parameters, inside the model directory
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// File name of the category manifest, inside the model directory
    #[serde(default = "default_categories_file")]
    pub categories_file: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₱".to_string()
}

fn default_model_file() -> String {
    "budget_model.json".to_string()
}

fn default_categories_file() -> String {
    "budget_categories.json".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            training_data_path: None,
            model_file: default_model_file(),
            categories_file: default_categories_file(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &MoneymindPaths) -> Result<Self, PredictorError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                PredictorError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PredictorError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MoneymindPaths) -> Result<(), PredictorError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            PredictorError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            PredictorError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the training dataset path, honoring `TRAINING_DATA_PATH`
    pub fn dataset_path(&self, paths: &MoneymindPaths) -> PathBuf {
        self.dataset_path_with_override(paths, std::env::var(TRAINING_DATA_ENV).ok())
    }

    /// Resolve the training dataset path given an explicit override value
    ///
    /// Precedence: non-empty override, then `training_data_path`, then the
    /// default file in the base directory.
    pub fn dataset_path_with_override(
        &self,
        paths: &MoneymindPaths,
        env_override: Option<String>,
    ) -> PathBuf {
        match env_override.filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => self
                .training_data_path
                .clone()
                .unwrap_or_else(|| paths.default_dataset_file()),
        }
    }

    /// Path of the fitted model parameters file
    pub fn model_path(&self, paths: &MoneymindPaths) -> PathBuf {
        paths.model_dir().join(&self.model_file)
    }

    /// Path of the category manifest file
    pub fn categories_path(&self, paths: &MoneymindPaths) -> PathBuf {
        paths.model_dir().join(&self.categories_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₱");
        assert_eq!(settings.model_file, "budget_model.json");
        assert_eq!(settings.categories_file, "budget_categories.json");
        assert!(settings.training_data_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneymindPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.training_data_path = Some(PathBuf::from("/srv/data/history.csv"));

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(
            loaded.training_data_path,
            Some(PathBuf::from("/srv/data/history.csv"))
        );
    }

    #[test]
    fn test_partial_settings_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneymindPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "€"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.model_file, "budget_model.json");
    }

    #[test]
    fn test_invalid_settings_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneymindPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, PredictorError::Config(_)));
    }

    #[test]
    fn test_dataset_path_precedence() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneymindPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        assert_eq!(
            settings.dataset_path_with_override(&paths, None),
            paths.default_dataset_file()
        );

        settings.training_data_path = Some(PathBuf::from("configured.csv"));
        assert_eq!(
            settings.dataset_path_with_override(&paths, None),
            PathBuf::from("configured.csv")
        );

        assert_eq!(
            settings.dataset_path_with_override(&paths, Some("env.csv".into())),
            PathBuf::from("env.csv")
        );

        assert_eq!(
            settings.dataset_path_with_override(&paths, Some("  ".into())),
            PathBuf::from("configured.csv")
        );
    }

    #[test]
    fn test_artifact_paths_live_in_model_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneymindPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        assert_eq!(
            settings.model_path(&paths),
            temp_dir.path().join("model").join("budget_model.json")
        );
        assert_eq!(
            settings.categories_path(&paths),
            temp_dir.path().join("model").join("budget_categories.json")
        );
    }
}
