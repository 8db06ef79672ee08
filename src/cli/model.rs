//! Model CLI commands
//!
//! Implements the train, predict, and status commands on top of the backend
//! service.

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_budget;
use crate::error::PredictorResult;
use crate::services::{Backend, PredictRequest};

/// Arguments for `predict`
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// User ID (positive integer)
    #[arg(short, long)]
    pub user_id: Option<String>,

    /// Monthly income (non-negative number)
    #[arg(short, long, allow_hyphen_values = true)]
    pub income: Option<String>,

    /// Print the budget as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `status`
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle `train`
pub fn handle_train_command(backend: &Backend) -> PredictorResult<()> {
    println!(
        "Training model from CSV: {}",
        backend.dataset_path().display()
    );

    let outcome = backend.train()?;

    println!("{}", outcome.message);
    println!("  Generation: {}", outcome.summary.generation);
    println!("  Rows used:  {}", outcome.summary.rows);
    if !outcome.summary.synthesized_categories.is_empty() {
        println!(
            "  Zero-filled categories: {}",
            outcome.summary.synthesized_categories.join(", ")
        );
    }
    Ok(())
}

/// Handle `predict`
pub fn handle_predict_command(
    backend: &Backend,
    settings: &Settings,
    args: PredictArgs,
) -> PredictorResult<()> {
    let request = PredictRequest::from_text(args.user_id.as_deref(), args.income.as_deref());
    let outcome = backend.predict(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.budget)?);
    } else {
        println!("User ID: {}", outcome.user_id);
        print!("{}", format_budget(&outcome.budget, &settings.currency_symbol));
    }
    Ok(())
}

/// Handle `status`
pub fn handle_status_command(backend: &Backend, args: StatusArgs) -> PredictorResult<()> {
    let status = backend.status();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let yes_no = |present: bool| if present { "yes" } else { "no" };
    println!("MoneyMind Status");
    println!("================");
    println!("Status:              {}", status.status);
    println!(
        "Training data:       {} ({})",
        status.training_data_path_config.display(),
        yes_no(status.training_data_csv_accessible)
    );
    println!(
        "Model file:          {} ({})",
        status.model_path.display(),
        yes_no(status.model_trained)
    );
    println!(
        "Categories file:     {} ({})",
        status.categories_path.display(),
        yes_no(status.categories_file_exists)
    );
    Ok(())
}
