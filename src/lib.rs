//! MoneyMind - budget allocation prediction from income
//!
//! This library trains a multi-output linear regression on exported monthly
//! income and expense records and predicts how a given income should be split
//! across a fixed set of budget categories.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Category schema, training records, linear model, predictions
//! - `storage`: Atomic JSON persistence of the trained artifact
//! - `services`: Dataset loading, training, prediction, backend operations
//! - `display`: Terminal formatting of predicted budgets
//! - `cli`: Command handlers for the `moneymind` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use moneymind::config::{MoneymindPaths, Settings};
//! use moneymind::services::{Backend, PredictRequest};
//!
//! let paths = MoneymindPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let backend = Backend::new(&paths, &settings);
//! backend.train()?;
//! let outcome = backend.predict(&PredictRequest::from_text(Some("1"), Some("40000")))?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::PredictorError;
