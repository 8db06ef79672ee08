//! Training records and the validated table the trainer consumes

use serde::{Deserialize, Serialize};

use super::category::CategorySchema;

/// One month of observed income and spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRecord {
    /// Identifier column, carried through but not used for fitting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Period column, carried through but not used for fitting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,

    /// Monthly income (the single feature)
    pub income: f64,

    /// One amount per schema category, in schema order
    pub amounts: Vec<f64>,
}

/// Records reconciled against a category schema
///
/// Every record holds exactly `schema.len()` amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingTable {
    schema: CategorySchema,
    records: Vec<TrainingRecord>,
    synthesized: Vec<String>,
}

impl TrainingTable {
    /// Create a table, padding or truncating each record to the schema width
    pub fn new(
        schema: CategorySchema,
        records: Vec<TrainingRecord>,
        synthesized: Vec<String>,
    ) -> Self {
        let width = schema.len();
        let records = records
            .into_iter()
            .map(|mut r| {
                r.amounts.resize(width, 0.0);
                r
            })
            .collect();

        Self {
            schema,
            records,
            synthesized,
        }
    }

    /// An empty table for the given schema ("no data")
    pub fn empty(schema: CategorySchema) -> Self {
        Self::new(schema, Vec::new(), Vec::new())
    }

    /// The schema the records are aligned with
    pub fn schema(&self) -> &CategorySchema {
        &self.schema
    }

    /// All records in source order
    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    /// Categories that were absent from the source and zero-filled
    pub fn synthesized(&self) -> &[String] {
        &self.synthesized
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The income column
    pub fn incomes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.income).collect()
    }

    /// The target matrix, one row per record
    pub fn targets(&self) -> Vec<Vec<f64>> {
        self.records.iter().map(|r| r.amounts.clone()).collect()
    }

    /// Values of one category column
    pub fn column(&self, category: &str) -> Option<Vec<f64>> {
        let idx = self.schema.index_of(category)?;
        Some(self.records.iter().map(|r| r.amounts[idx]).collect())
    }
}
