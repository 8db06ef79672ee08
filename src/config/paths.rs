//! Path management for MoneyMind
//!
//! Provides XDG-compliant path resolution for configuration, the training
//! dataset, and the trained model artifacts.
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYMIND_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/moneymind` or `~/.config/moneymind`
//! 3. Windows: `%APPDATA%\moneymind`

use std::path::PathBuf;

use crate::error::PredictorError;

/// Default file name of the exported training data
pub const DEFAULT_DATASET_FILE: &str = "exported_training_data.csv";

/// Manages all paths used by MoneyMind
#[derive(Debug, Clone)]
pub struct MoneymindPaths {
    /// Base directory for all MoneyMind data
    base_dir: PathBuf,
}

impl MoneymindPaths {
    /// Create a new MoneymindPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application data directory can be determined.
    pub fn new() -> Result<Self, PredictorError> {
        let base_dir = if let Ok(custom) = std::env::var("MONEYMIND_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create MoneymindPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/moneymind/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the directory holding the trained model artifacts
    pub fn model_dir(&self) -> PathBuf {
        self.base_dir.join("model")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the default path of the training dataset
    pub fn default_dataset_file(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_DATASET_FILE)
    }

    /// Ensure the base and model directories exist
    pub fn ensure_directories(&self) -> Result<(), PredictorError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PredictorError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.model_dir())
            .map_err(|e| PredictorError::Io(format!("Failed to create model directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, PredictorError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                PredictorError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("moneymind"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, PredictorError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| PredictorError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("moneymind"))
}
