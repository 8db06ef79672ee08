//! Configuration module for MoneyMind
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - Dataset and artifact location settings

pub mod paths;
pub mod settings;

pub use paths::MoneymindPaths;
pub use settings::Settings;
