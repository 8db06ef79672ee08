//! Model training service
//!
//! Fits one multi-output linear model from income to every budget category
//! and persists it together with its schema.

use std::path::Path;

use serde::Serialize;

use super::dataset::DatasetLoader;
use crate::error::{PredictorError, PredictorResult};
use crate::models::{GenerationId, LinearModel, TrainedArtifact, TrainingTable};
use crate::storage::ArtifactStore;

/// Fewest rows a regression can be fitted on
pub const MIN_TRAINING_ROWS: usize = 2;

/// What a successful training run produced
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub generation: GenerationId,
    pub rows: usize,
    pub categories: Vec<String>,
    pub synthesized_categories: Vec<String>,
}

/// Service for training and persisting the budget model
pub struct Trainer<'a> {
    store: &'a ArtifactStore,
    loader: DatasetLoader,
}

impl<'a> Trainer<'a> {
    /// Create a trainer that saves into `store` using the canonical schema
    pub fn new(store: &'a ArtifactStore) -> Self {
        Self::with_loader(store, DatasetLoader::default())
    }

    /// Create a trainer with a specific dataset loader
    pub fn with_loader(store: &'a ArtifactStore, loader: DatasetLoader) -> Self {
        Self { store, loader }
    }

    /// Load a CSV dataset, fit, and save
    pub fn train_from_csv(&self, path: &Path) -> PredictorResult<TrainingSummary> {
        log::info!("Starting model training");
        let table = self.loader.load(path);
        if table.is_empty() {
            return Err(PredictorError::Training(
                "Could not read training data from CSV or dataset is empty".into(),
            ));
        }
        self.train(&table)
    }

    /// Fit a validated table and save the artifact
    ///
    /// On any failure the previously saved artifact is left as it was.
    pub fn train(&self, table: &TrainingTable) -> PredictorResult<TrainingSummary> {
        let artifact = fit(table)?;

        self.store.save(&artifact).map_err(|e| {
            log::error!("Failed to save model or categories: {}", e);
            e
        })?;

        log::info!(
            "Model {} trained on {} rows",
            artifact.generation,
            artifact.training_rows
        );

        Ok(TrainingSummary {
            generation: artifact.generation,
            rows: artifact.training_rows,
            categories: artifact.schema.names().to_vec(),
            synthesized_categories: table.synthesized().to_vec(),
        })
    }
}

/// Fit a model on a table without persisting it
pub fn fit(table: &TrainingTable) -> PredictorResult<TrainedArtifact> {
    if table.is_empty() {
        return Err(PredictorError::Training("Dataset is empty".into()));
    }
    if table.schema().is_empty() {
        return Err(PredictorError::Training(
            "No target categories to train on".into(),
        ));
    }
    if table.len() < MIN_TRAINING_ROWS {
        return Err(PredictorError::Training(format!(
            "Not enough data to train the model: need at least {} rows, found {}",
            MIN_TRAINING_ROWS,
            table.len()
        )));
    }

    let model = LinearModel::fit_single_feature(&table.incomes(), &table.targets())
        .map_err(|e| PredictorError::Training(e.to_string()))?;

    Ok(TrainedArtifact::new(
        model,
        table.schema().clone(),
        table.len(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySchema, TrainingRecord};
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ArtifactStore {
        ArtifactStore::new(
            dir.path().join("budget_model.json"),
            dir.path().join("budget_categories.json"),
        )
    }

    fn table(rows: &[(f64, f64)]) -> TrainingTable {
        let records = rows
            .iter()
            .map(|&(income, bills)| TrainingRecord {
                user_id: None,
                month: None,
                income,
                amounts: vec![bills],
            })
            .collect();
        TrainingTable::new(CategorySchema::canonical(), records, Vec::new())
    }

    #[test]
    fn test_train_saves_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let summary = Trainer::new(&store)
            .train(&table(&[(30000.0, 8000.0), (50000.0, 12000.0)]))
            .unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.categories.len(), 7);
        let artifact = store.load().unwrap();
        assert_eq!(artifact.generation, summary.generation);
        assert_eq!(artifact.schema, CategorySchema::canonical());
        assert_eq!(artifact.model.num_outputs(), 7);
    }

    #[test]
    fn test_insufficient_rows_fail_and_leave_store_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let trainer = Trainer::new(&store);
        trainer
            .train(&table(&[(30000.0, 8000.0), (50000.0, 12000.0)]))
            .unwrap();
        let model_before = std::fs::read(store.model_path()).unwrap();
        let categories_before = std::fs::read(store.categories_path()).unwrap();

        let too_small: [&[(f64, f64)]; 2] = [&[], &[(40000.0, 9000.0)]];
        for rows in too_small {
            let err = trainer.train(&table(rows)).unwrap_err();
            assert!(matches!(err, PredictorError::Training(_)));
        }

        assert_eq!(std::fs::read(store.model_path()).unwrap(), model_before);
        assert_eq!(
            std::fs::read(store.categories_path()).unwrap(),
            categories_before
        );
    }

    #[test]
    fn test_insufficient_rows_create_no_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        assert!(Trainer::new(&store).train(&table(&[(1.0, 1.0)])).is_err());
        assert!(!store.model_exists());
        assert!(!store.categories_exists());
    }

    #[test]
    fn test_empty_schema_fails() {
        let schema = CategorySchema::from_names(Vec::<String>::new()).unwrap();
        let records = vec![
            TrainingRecord {
                user_id: None,
                month: None,
                income: 1.0,
                amounts: Vec::new(),
            };
            3
        ];
        let err = fit(&TrainingTable::new(schema, records, Vec::new())).unwrap_err();
        assert!(matches!(err, PredictorError::Training(_)));
    }

    #[test]
    fn test_train_from_missing_csv_fails() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);

        let err = Trainer::new(&store)
            .train_from_csv(&temp_dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, PredictorError::Training(_)));
        assert!(!store.exists());
    }

    #[test]
    fn test_train_from_csv_reports_synthesized_categories() {
        let temp_dir = TempDir::new().unwrap();
        let store = store(&temp_dir);
        let csv = temp_dir.path().join("data.csv");
        std::fs::write(&csv, "Income,Bills,Food\n30000,8000,6000\n50000,12000,8000\n").unwrap();

        let summary = Trainer::new(&store).train_from_csv(&csv).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(
            summary.synthesized_categories,
            vec![
                "Entertainment",
                "Transportation",
                "Personal Spending",
                "Healthcare",
                "Savings"
            ]
        );
    }

    #[test]
    fn test_save_failure_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the model directory should be
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = ArtifactStore::new(
            blocker.join("budget_model.json"),
            blocker.join("budget_categories.json"),
        );

        let err = Trainer::new(&store)
            .train(&table(&[(1.0, 1.0), (2.0, 2.0)]))
            .unwrap_err();
        assert!(matches!(err, PredictorError::Storage(_)));
    }
}
