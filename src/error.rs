//! Custom error types for MoneyMind
//!
//! This module defines the error hierarchy for the budget predictor using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for MoneyMind operations
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV reading errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Malformed or out-of-range caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required resource (dataset, model, categories) is missing
    #[error("{resource} unavailable: {reason}")]
    Unavailable {
        resource: &'static str,
        reason: String,
    },

    /// Training preconditions not met or fit failed
    #[error("Training error: {0}")]
    Training(String),

    /// Model output does not line up with the persisted categories
    #[error("Schema mismatch: model produced {actual} outputs for {expected} categories")]
    SchemaMismatch { expected: usize, actual: usize },

    /// The loaded model could not be evaluated
    #[error("Inference error: {0}")]
    Inference(String),

    /// Artifact storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PredictorError {
    /// Create an "unavailable" error for the trained model
    pub fn model_unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: "Model",
            reason: reason.into(),
        }
    }

    /// Create an "unavailable" error for the training dataset
    pub fn dataset_unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: "Training data",
            reason: reason.into(),
        }
    }

    /// Check if this is an "unavailable" error
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Check if this is a validation error (a client fault)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for PredictorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PredictorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for PredictorError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for MoneyMind operations
pub type PredictorResult<T> = Result<T, PredictorError>;
