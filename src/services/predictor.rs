//! Budget prediction service
//!
//! The predictor owns the in-memory copy of the trained artifact so that
//! predictions don't re-read storage. Its lifecycle is:
//!
//! ```text
//! Unloaded --load--> Ready
//!          \-------> Unavailable --(next predict retries load)--> Ready
//! ```
//!
//! The cached artifact is held as one `Arc`, so replacing it swaps the model
//! and its schema together and readers keep a consistent snapshot.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use crate::error::{PredictorError, PredictorResult};
use crate::models::{PredictedBudget, TrainedArtifact};
use crate::storage::ArtifactStore;

/// Lifecycle of the cached model
#[derive(Debug, Clone)]
pub enum ModelState {
    /// No load attempted yet
    Unloaded,
    /// Artifact loaded and cached
    Ready(Arc<TrainedArtifact>),
    /// Last load attempt found no usable artifact
    Unavailable,
}

impl ModelState {
    /// Short name for status output
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Ready(_) => "ready",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Predicts budgets from a cached trained artifact
pub struct Predictor {
    store: ArtifactStore,
    state: RwLock<ModelState>,
}

impl Predictor {
    /// Create a predictor reading from `store`; nothing is loaded yet
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            state: RwLock::new(ModelState::Unloaded),
        }
    }

    /// The store artifacts are loaded from
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModelState {
        self.state.read().clone()
    }

    /// Whether a model is cached
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.read(), ModelState::Ready(_))
    }

    /// The cached artifact, if any, without touching storage
    pub fn snapshot(&self) -> Option<Arc<TrainedArtifact>> {
        match &*self.state.read() {
            ModelState::Ready(artifact) => Some(Arc::clone(artifact)),
            _ => None,
        }
    }

    /// Return the cached artifact, attempting a load if none is cached
    pub fn ensure_loaded(&self) -> Option<Arc<TrainedArtifact>> {
        if let Some(artifact) = self.snapshot() {
            return Some(artifact);
        }
        log::info!("Model or categories not loaded, attempting to load");
        self.reload()
    }

    /// Re-read the artifact from storage and replace the cache
    pub fn reload(&self) -> Option<Arc<TrainedArtifact>> {
        let loaded = self.store.load().map(Arc::new);
        *self.state.write() = match &loaded {
            Some(artifact) => ModelState::Ready(Arc::clone(artifact)),
            None => ModelState::Unavailable,
        };
        loaded
    }

    /// Replace the cache with an artifact already in memory
    pub fn swap(&self, artifact: TrainedArtifact) {
        *self.state.write() = ModelState::Ready(Arc::new(artifact));
    }

    /// Predict a budget for a monthly income
    ///
    /// Every amount in the result is zero or more and the result has exactly
    /// one entry per persisted category.
    pub fn predict(&self, income: f64) -> PredictorResult<PredictedBudget> {
        let artifact = self.ensure_loaded().ok_or_else(|| {
            PredictorError::model_unavailable("model or categories could not be loaded")
        })?;

        let started = Instant::now();
        let outputs = artifact
            .model
            .predict_row(&[income])
            .map_err(|e| PredictorError::Inference(e.to_string()))?;
        log::debug!(
            "Prediction computed in {:.4} seconds",
            started.elapsed().as_secs_f64()
        );

        if outputs.len() != artifact.schema.len() {
            log::error!(
                "Model produced {} outputs for {} categories",
                outputs.len(),
                artifact.schema.len()
            );
            return Err(PredictorError::SchemaMismatch {
                expected: artifact.schema.len(),
                actual: outputs.len(),
            });
        }

        Ok(PredictedBudget::from_outputs(
            income,
            &artifact.schema,
            &outputs,
        ))
    }
}
