//! Service layer for MoneyMind
//!
//! The service layer provides the model lifecycle on top of the storage
//! layer: dataset loading, training, prediction, and the backend operations
//! that tie them together.

pub mod backend;
pub mod dataset;
pub mod predictor;
pub mod trainer;

pub use backend::{Backend, BackendStatus, PredictOutcome, PredictRequest, TrainOutcome};
pub use dataset::DatasetLoader;
pub use predictor::{ModelState, Predictor};
pub use trainer::{Trainer, TrainingSummary};
