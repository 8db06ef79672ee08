//! Budget category schema
//!
//! The schema is the ordered list of expense categories a model predicts for.
//! Order matters: the model's output vector is aligned with it index by index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical budget categories, in prediction order
pub const CANONICAL_CATEGORIES: [&str; 7] = [
    "Bills",
    "Food",
    "Entertainment",
    "Transportation",
    "Personal Spending",
    "Healthcare",
    "Savings",
];

/// Ordered set of category names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySchema(Vec<String>);

impl CategorySchema {
    /// The fixed schema every training run uses
    pub fn canonical() -> Self {
        Self(CANONICAL_CATEGORIES.iter().map(|c| c.to_string()).collect())
    }

    /// Build a schema from names, rejecting blanks and duplicates
    pub fn from_names<I, S>(names: I) -> Result<Self, CategorySchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(CategorySchemaError::EmptyName);
            }
            if out.contains(&name) {
                return Err(CategorySchemaError::Duplicate(name));
            }
            out.push(name);
        }
        Ok(Self(out))
    }

    /// Number of categories
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the schema has no categories
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Category names in order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Iterate over category names in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Position of a category in the schema
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    /// Whether the schema contains the named category
    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

impl fmt::Display for CategorySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Validation errors for category schemas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySchemaError {
    EmptyName,
    Duplicate(String),
}

impl fmt::Display for CategorySchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::Duplicate(name) => write!(f, "Duplicate category: {}", name),
        }
    }
}

impl std::error::Error for CategorySchemaError {}
