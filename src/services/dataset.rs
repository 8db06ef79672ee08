//! Training dataset loader
//!
//! Reads exported income/expense history from CSV and reconciles it against
//! the category schema. Loading is tolerant: a missing file, a missing
//! `Income` column, or a malformed CSV yields an empty table rather than an
//! error, and unparseable cells become zero.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};

use crate::error::{PredictorError, PredictorResult};
use crate::models::{CategorySchema, TrainingRecord, TrainingTable};

/// Header of the income (feature) column
pub const INCOME_COLUMN: &str = "Income";
/// Header of the optional identifier column
pub const USER_ID_COLUMN: &str = "user_id";
/// Header of the optional period column
pub const MONTH_COLUMN: &str = "Month";

/// Loads training tables for a fixed category schema
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    schema: CategorySchema,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(CategorySchema::canonical())
    }
}

impl DatasetLoader {
    /// Create a loader for the given schema
    pub fn new(schema: CategorySchema) -> Self {
        Self { schema }
    }

    /// The schema tables are reconciled against
    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    /// Load a CSV file, returning an empty table on any failure
    pub fn load(&self, path: &Path) -> TrainingTable {
        log::info!("Reading training data from CSV: {}", path.display());

        if !path.exists() {
            log::error!("CSV file not found at {}", path.display());
            return TrainingTable::empty(self.schema.clone());
        }

        let started = Instant::now();
        let result = std::fs::File::open(path)
            .map_err(PredictorError::from)
            .and_then(|file| self.read_csv(file));

        match result {
            Ok(table) => {
                log::info!(
                    "CSV read in {:.4} seconds, {} rows",
                    started.elapsed().as_secs_f64(),
                    table.len()
                );
                table
            }
            Err(e) => {
                log::error!("Failed to process CSV '{}': {}", path.display(), e);
                TrainingTable::empty(self.schema.clone())
            }
        }
    }

    /// Parse CSV data from a reader
    ///
    /// Unlike [`load`](Self::load), this reports why the data was rejected.
    pub fn read_csv<R: Read>(&self, reader: R) -> PredictorResult<TrainingTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::from_headers(&headers);

        let income_col = columns.get(INCOME_COLUMN).ok_or_else(|| {
            PredictorError::Validation(format!("'{}' column not found", INCOME_COLUMN))
        })?;
        let user_id_col = columns.get(USER_ID_COLUMN);
        let month_col = columns.get(MONTH_COLUMN);

        let mut category_cols = Vec::with_capacity(self.schema.len());
        let mut synthesized = Vec::new();
        for category in self.schema.iter() {
            let col = columns.get(category);
            if col.is_none() {
                log::warn!("Category '{}' not found in CSV, filling with 0", category);
                synthesized.push(category.to_string());
            }
            category_cols.push(col);
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            records.push(TrainingRecord {
                user_id: user_id_col.and_then(|c| text_cell(&row, c)),
                month: month_col.and_then(|c| text_cell(&row, c)),
                income: numeric_cell(&row, Some(income_col)),
                amounts: category_cols
                    .iter()
                    .map(|&col| numeric_cell(&row, col))
                    .collect(),
            });
        }

        Ok(TrainingTable::new(self.schema.clone(), records, synthesized))
    }
}

/// Header name → first column position carrying it
struct ColumnIndex(HashMap<String, usize>);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut map = HashMap::new();
        for (idx, name) in headers.iter().enumerate() {
            map.entry(name.trim().to_string()).or_insert(idx);
        }
        Self(map)
    }

    fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }
}

/// Coerce a cell to a finite number; anything else is zero
fn numeric_cell(row: &StringRecord, col: Option<usize>) -> f64 {
    col.and_then(|c| row.get(c))
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn text_cell(row: &StringRecord, col: usize) -> Option<String> {
    row.get(col)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
