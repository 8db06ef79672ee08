//! Core data models for MoneyMind
//!
//! This module contains the data structures of the prediction domain: the
//! category schema, training records, the linear model, trained artifacts,
//! and predicted budgets.

pub mod artifact;
pub mod category;
pub mod ids;
pub mod linear;
pub mod prediction;
pub mod record;

pub use artifact::TrainedArtifact;
pub use category::{CategorySchema, CANONICAL_CATEGORIES};
pub use ids::GenerationId;
pub use linear::{LinearModel, LinearModelError};
pub use prediction::{BudgetBalance, BudgetLine, PredictedBudget};
pub use record::{TrainingRecord, TrainingTable};
