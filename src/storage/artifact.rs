//! Artifact store for the trained model
//!
//! A trained artifact is persisted as two companion JSON files: the fitted
//! model parameters and the category manifest. Both carry the same generation
//! id; a pair whose ids disagree was torn by an interrupted save and is treated
//! as missing.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file_io::{read_json_required, write_json_atomic};
use crate::config::{MoneymindPaths, Settings};
use crate::error::PredictorResult;
use crate::models::{CategorySchema, GenerationId, LinearModel, TrainedArtifact};

/// On-disk form of the model parameters
#[derive(Debug, Serialize, Deserialize)]
struct ModelFile {
    generation: GenerationId,
    model: LinearModel,
}

/// On-disk form of the category manifest
#[derive(Debug, Serialize, Deserialize)]
struct CategoryManifest {
    generation: GenerationId,
    categories: CategorySchema,
    trained_at: DateTime<Utc>,
    #[serde(default)]
    training_rows: usize,
}

/// Reads and writes the paired model/categories files
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    model_path: PathBuf,
    categories_path: PathBuf,
}

impl ArtifactStore {
    /// Create a store over explicit file locations
    pub fn new(model_path: PathBuf, categories_path: PathBuf) -> Self {
        Self {
            model_path,
            categories_path,
        }
    }

    /// Create a store at the locations named by the settings
    pub fn from_settings(paths: &MoneymindPaths, settings: &Settings) -> Self {
        Self::new(settings.model_path(paths), settings.categories_path(paths))
    }

    /// Path of the model parameters file
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Path of the category manifest file
    pub fn categories_path(&self) -> &Path {
        &self.categories_path
    }

    /// Whether the model parameters file is present
    pub fn model_exists(&self) -> bool {
        self.model_path.exists()
    }

    /// Whether the category manifest file is present
    pub fn categories_exists(&self) -> bool {
        self.categories_path.exists()
    }

    /// Whether both halves of an artifact are present
    pub fn exists(&self) -> bool {
        self.model_exists() && self.categories_exists()
    }

    /// Persist both halves of the artifact
    ///
    /// Each file is replaced atomically. If the second write fails the first
    /// is not rolled back; `load` will then see mismatched generations.
    pub fn save(&self, artifact: &TrainedArtifact) -> PredictorResult<()> {
        let model_file = ModelFile {
            generation: artifact.generation,
            model: artifact.model.clone(),
        };
        let manifest = CategoryManifest {
            generation: artifact.generation,
            categories: artifact.schema.clone(),
            trained_at: artifact.trained_at,
            training_rows: artifact.training_rows,
        };

        write_json_atomic(&self.model_path, &model_file)?;
        write_json_atomic(&self.categories_path, &manifest)?;

        log::info!(
            "Saved model {} to {} and categories to {}",
            artifact.generation,
            self.model_path.display(),
            self.categories_path.display()
        );
        Ok(())
    }

    /// Load both halves of the artifact
    ///
    /// Returns `None` when either file is missing, unreadable, or the pair is
    /// inconsistent. Never creates files.
    pub fn load(&self) -> Option<TrainedArtifact> {
        if !self.exists() {
            log::warn!(
                "Model file '{}' or categories file '{}' not found; train the model first",
                self.model_path.display(),
                self.categories_path.display()
            );
            return None;
        }

        let started = std::time::Instant::now();
        let model_file: ModelFile = match read_json_required(&self.model_path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("Failed to load model: {}", e);
                return None;
            }
        };
        let manifest: CategoryManifest = match read_json_required(&self.categories_path) {
            Ok(file) => file,
            Err(e) => {
                log::error!("Failed to load categories: {}", e);
                return None;
            }
        };

        if model_file.generation != manifest.generation {
            log::error!(
                "Model generation {} does not match categories generation {}",
                model_file.generation,
                manifest.generation
            );
            return None;
        }

        log::info!(
            "Model and categories loaded in {:.4} seconds",
            started.elapsed().as_secs_f64()
        );

        Some(TrainedArtifact {
            generation: model_file.generation,
            model: model_file.model,
            schema: manifest.categories,
            trained_at: manifest.trained_at,
            training_rows: manifest.training_rows,
        })
    }
}
