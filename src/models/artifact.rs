//! The trained artifact: a fitted model paired with its category schema

use chrono::{DateTime, Utc};

use super::category::CategorySchema;
use super::ids::GenerationId;
use super::linear::LinearModel;

/// A fitted model and the schema its outputs are aligned with
///
/// Both halves are created, saved, and loaded together. `model.num_outputs()`
/// is expected to equal `schema.len()`, but a hand-edited or torn artifact may
/// break that, so the predictor checks it on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedArtifact {
    pub generation: GenerationId,
    pub model: LinearModel,
    pub schema: CategorySchema,
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
}

impl TrainedArtifact {
    /// Wrap a freshly fitted model under a new generation
    pub fn new(model: LinearModel, schema: CategorySchema, training_rows: usize) -> Self {
        Self {
            generation: GenerationId::new(),
            model,
            schema,
            trained_at: Utc::now(),
            training_rows,
        }
    }
}
