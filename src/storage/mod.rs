//! Storage layer for MoneyMind
//!
//! Provides JSON file storage with atomic writes for the trained model
//! artifact. No caching lives here; this is a pure I/O boundary.

pub mod artifact;
pub mod file_io;

pub use artifact::ArtifactStore;
pub use file_io::{read_json_required, write_json_atomic};
