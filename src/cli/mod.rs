//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod model;

pub use model::{
    handle_predict_command, handle_status_command, handle_train_command, PredictArgs, StatusArgs,
};
