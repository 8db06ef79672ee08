//! Backend service: the train / predict / status operations callers invoke
//!
//! This is the boundary the command-line front end (or any other adapter)
//! talks to. Request validation happens here, before the predictor is
//! reached.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::predictor::Predictor;
use super::trainer::{Trainer, TrainingSummary};
use crate::config::{MoneymindPaths, Settings};
use crate::error::{PredictorError, PredictorResult};
use crate::models::PredictedBudget;
use crate::storage::ArtifactStore;

/// Raw prediction request as received from a caller
///
/// Fields are kept loosely typed so that missing or malformed values are
/// reported as validation errors instead of parse failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub current_income: Option<Value>,
}

/// A prediction request that passed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidPredictRequest {
    pub user_id: u64,
    pub income: f64,
}

impl PredictRequest {
    /// Build a request from command-line style text values
    pub fn from_text(user_id: Option<&str>, current_income: Option<&str>) -> Self {
        Self {
            user_id: user_id.map(|s| Value::String(s.to_string())),
            current_income: current_income.map(|s| Value::String(s.to_string())),
        }
    }

    /// Check presence, types, and ranges
    ///
    /// `user_id` must be a positive integer and `current_income` a finite,
    /// non-negative number. Numeric strings are accepted for both.
    pub fn validate(&self) -> PredictorResult<ValidPredictRequest> {
        let (Some(user_id), Some(income)) = (&self.user_id, &self.current_income) else {
            return Err(PredictorError::Validation(
                "Missing user_id or current_income in request".into(),
            ));
        };

        let invalid_type = || {
            PredictorError::Validation("Invalid data types for user_id or current_income".into())
        };
        let user_id = integer_value(user_id).ok_or_else(invalid_type)?;
        let income = number_value(income).ok_or_else(invalid_type)?;

        if user_id <= 0 || income < 0.0 {
            return Err(PredictorError::Validation(
                "Invalid user_id or current_income values".into(),
            ));
        }

        Ok(ValidPredictRequest {
            user_id: user_id as u64,
            income,
        })
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Result of a successful training request
#[derive(Debug, Clone, Serialize)]
pub struct TrainOutcome {
    pub message: String,
    pub summary: TrainingSummary,
}

/// Result of a successful prediction request
#[derive(Debug, Clone, Serialize)]
pub struct PredictOutcome {
    pub user_id: u64,
    pub budget: PredictedBudget,
}

/// Presence of the files the backend depends on
#[derive(Debug, Clone, Serialize)]
pub struct BackendStatus {
    pub status: String,
    pub training_data_csv_accessible: bool,
    pub model_trained: bool,
    pub categories_file_exists: bool,
    pub model_state: String,
    pub training_data_path_config: PathBuf,
    pub model_path: PathBuf,
    pub categories_path: PathBuf,
}

/// Owns the predictor cache and wires training into it
pub struct Backend {
    dataset_path: PathBuf,
    predictor: Predictor,
}

impl Backend {
    /// Create a backend at the configured locations
    pub fn new(paths: &MoneymindPaths, settings: &Settings) -> Self {
        Self::with_locations(
            settings.dataset_path(paths),
            ArtifactStore::from_settings(paths, settings),
        )
    }

    /// Create a backend over explicit dataset and artifact locations
    pub fn with_locations(dataset_path: PathBuf, store: ArtifactStore) -> Self {
        Self {
            dataset_path,
            predictor: Predictor::new(store),
        }
    }

    /// Location of the training dataset
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// The predictor backing `predict`
    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Try to load the model up front so the first prediction is fast
    pub fn warm_up(&self) -> bool {
        let ready = self.predictor.ensure_loaded().is_some();
        if !ready {
            log::warn!(
                "Model not loaded on startup; predictions will fail until training succeeds on '{}'",
                self.dataset_path.display()
            );
        }
        ready
    }

    /// Train from the configured dataset and refresh the cached model
    pub fn train(&self) -> PredictorResult<TrainOutcome> {
        if !self.dataset_path.exists() {
            return Err(PredictorError::dataset_unavailable(format!(
                "Training data CSV file '{}' not found",
                self.dataset_path.display()
            )));
        }

        let summary = Trainer::new(self.predictor.store()).train_from_csv(&self.dataset_path)?;

        if self.predictor.reload().is_none() {
            log::error!("Model was saved but could not be reloaded");
        }

        Ok(TrainOutcome {
            message: "Model training completed successfully from CSV.".into(),
            summary,
        })
    }

    /// Validate a request and predict a budget for it
    pub fn predict(&self, request: &PredictRequest) -> PredictorResult<PredictOutcome> {
        let valid = request.validate()?;

        let store = self.predictor.store();
        if !store.model_exists() {
            return Err(PredictorError::model_unavailable(format!(
                "Model file '{}' not found. Train the model first.",
                store.model_path().display()
            )));
        }
        if !store.categories_exists() {
            return Err(PredictorError::model_unavailable(format!(
                "Categories file '{}' not found. Train the model first.",
                store.categories_path().display()
            )));
        }

        log::info!(
            "Prediction request for user {} with income {}",
            valid.user_id,
            valid.income
        );
        let budget = self.predictor.predict(valid.income)?;

        Ok(PredictOutcome {
            user_id: valid.user_id,
            budget,
        })
    }

    /// Report which files are present
    pub fn status(&self) -> BackendStatus {
        let store = self.predictor.store();
        BackendStatus {
            status: "Backend running".into(),
            training_data_csv_accessible: self.dataset_path.exists(),
            model_trained: store.model_exists(),
            categories_file_exists: store.categories_exists(),
            model_state: self.predictor.state().name().to_string(),
            training_data_path_config: self.dataset_path.clone(),
            model_path: store.model_path().to_path_buf(),
            categories_path: store.categories_path().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CANONICAL_CATEGORIES;
    use crate::services::ModelState;
    use serde_json::json;
    use tempfile::TempDir;

    const SCENARIO_CSV: &str = "user_id,Month,Income,Bills,Food\n\
                                1,2025-01,30000,8000,6000\n\
                                1,2025-02,50000,12000,8000\n";

    fn backend(dir: &TempDir) -> Backend {
        Backend::with_locations(
            dir.path().join("exported_training_data.csv"),
            ArtifactStore::new(
                dir.path().join("model").join("budget_model.json"),
                dir.path().join("model").join("budget_categories.json"),
            ),
        )
    }

    fn request(user_id: Value, income: Value) -> PredictRequest {
        PredictRequest {
            user_id: Some(user_id),
            current_income: Some(income),
        }
    }

    #[test]
    fn test_validate_accepts_numbers_and_numeric_strings() {
        let valid = request(json!(3), json!(40000.5)).validate().unwrap();
        assert_eq!(valid, ValidPredictRequest { user_id: 3, income: 40000.5 });

        let valid = PredictRequest::from_text(Some("7"), Some(" 1200 ")).validate().unwrap();
        assert_eq!(valid, ValidPredictRequest { user_id: 7, income: 1200.0 });
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let err = PredictRequest::from_text(Some("1"), None).validate().unwrap_err();
        assert!(err.to_string().contains("Missing"));

        let err = serde_json::from_str::<PredictRequest>(r#"{"current_income": 10}"#)
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_validate_rejects_bad_types_and_ranges() {
        for req in [
            request(json!("abc"), json!(100)),
            request(json!(1), json!("lots")),
            request(json!(true), json!(100)),
            request(json!(1), json!("inf")),
            request(json!(0), json!(100)),
            request(json!(-4), json!(100)),
            request(json!(1), json!(-5)),
        ] {
            assert!(req.validate().unwrap_err().is_validation());
        }
    }

    #[test]
    fn test_negative_income_rejected_before_predictor() {
        let temp_dir = TempDir::new().unwrap();
        let backend = backend(&temp_dir);

        let err = backend
            .predict(&PredictRequest::from_text(Some("1"), Some("-5")))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(matches!(backend.predictor().state(), ModelState::Unloaded));
    }

    #[test]
    fn test_train_without_dataset_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let err = backend(&temp_dir).train().unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_predict_without_model_is_unavailable_and_creates_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let backend = backend(&temp_dir);

        let err = backend
            .predict(&request(json!(1), json!(40000)))
            .unwrap_err();

        assert!(err.is_unavailable());
        assert!(!temp_dir.path().join("model").exists());
    }

    #[test]
    fn test_train_then_predict_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let backend = backend(&temp_dir);
        std::fs::write(backend.dataset_path(), SCENARIO_CSV).unwrap();
        assert!(!backend.warm_up());

        let outcome = backend.train().unwrap();
        assert_eq!(outcome.summary.rows, 2);
        assert!(backend.predictor().is_ready());

        let predicted = backend.predict(&request(json!(1), json!(40000))).unwrap();
        let budget = &predicted.budget;

        let names: Vec<&str> = budget.lines().iter().map(|l| l.category.as_str()).collect();
        assert_eq!(names, CANONICAL_CATEGORIES.to_vec());
        assert!(budget.lines().iter().all(|l| l.amount >= 0.0));

        let bills = budget.get("Bills").unwrap();
        let food = budget.get("Food").unwrap();
        assert!(bills > 8000.0 && bills < 12000.0);
        assert!(food > 6000.0 && food < 8000.0);
    }

    #[test]
    fn test_training_schema_matches_prediction_schema() {
        let temp_dir = TempDir::new().unwrap();
        let backend = backend(&temp_dir);
        std::fs::write(backend.dataset_path(), SCENARIO_CSV).unwrap();

        let outcome = backend.train().unwrap();
        let predicted = backend.predict(&request(json!(1), json!(35000))).unwrap();

        let predicted_names: Vec<String> = predicted
            .budget
            .lines()
            .iter()
            .map(|l| l.category.clone())
            .collect();
        assert_eq!(predicted_names, outcome.summary.categories);
    }

    #[test]
    fn test_failed_retrain_keeps_previous_model() {
        let temp_dir = TempDir::new().unwrap();
        let backend = backend(&temp_dir);
        std::fs::write(backend.dataset_path(), SCENARIO_CSV).unwrap();
        let first = backend.train().unwrap();

        std::fs::write(backend.dataset_path(), "Income,Bills\n30000,8000\n").unwrap();
        let err = backend.train().unwrap_err();
        assert!(matches!(err, PredictorError::Training(_)));

        let snapshot = backend.predictor().snapshot().unwrap();
        assert_eq!(snapshot.generation, first.summary.generation);
        assert!(backend.predict(&request(json!(1), json!(40000))).is_ok());
    }

    #[test]
    fn test_status_reports_presence() {
        let temp_dir = TempDir::new().unwrap();
        let backend = backend(&temp_dir);

        let status = backend.status();
        assert!(!status.training_data_csv_accessible);
        assert!(!status.model_trained);
        assert!(!status.categories_file_exists);
        assert_eq!(status.model_state, "unloaded");

        std::fs::write(backend.dataset_path(), SCENARIO_CSV).unwrap();
        backend.train().unwrap();

        let status = backend.status();
        assert!(status.training_data_csv_accessible);
        assert!(status.model_trained);
        assert!(status.categories_file_exists);
        assert_eq!(status.model_state, "ready");
    }
}
