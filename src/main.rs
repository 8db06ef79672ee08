use anyhow::Result;
use clap::{Parser, Subcommand};

use moneymind::cli::{
    handle_predict_command, handle_status_command, handle_train_command, PredictArgs, StatusArgs,
};
use moneymind::config::{paths::MoneymindPaths, settings::Settings};
use moneymind::models::CANONICAL_CATEGORIES;
use moneymind::services::Backend;

#[derive(Parser)]
#[command(
    name = "moneymind",
    version,
    about = "Predict a monthly budget allocation from income",
    long_about = "MoneyMind trains a regression model on exported income and \
                  expense history and predicts how a monthly income should be \
                  split across budget categories."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model from the configured CSV dataset
    Train,

    /// Predict a budget for a monthly income
    Predict(PredictArgs),

    /// Show whether the dataset and model files are present
    Status(StatusArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let paths = MoneymindPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let backend = Backend::new(&paths, &settings);

    match cli.command {
        Some(Commands::Train) => handle_train_command(&backend)?,
        Some(Commands::Predict(args)) => handle_predict_command(&backend, &settings, args)?,
        Some(Commands::Status(args)) => handle_status_command(&backend, args)?,
        Some(Commands::Config) => {
            println!("MoneyMind Configuration");
            println!("=======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Training data:   {}", backend.dataset_path().display());
            println!(
                "Model file:      {}",
                backend.predictor().store().model_path().display()
            );
            println!(
                "Categories file: {}",
                backend.predictor().store().categories_path().display()
            );
            println!("Currency symbol: {}", settings.currency_symbol);
            println!("Categories:      {}", CANONICAL_CATEGORIES.join(", "));
        }
        None => {
            println!("MoneyMind - budget prediction from income");
            println!();
            println!("Run 'moneymind --help' for usage information.");
            println!("Run 'moneymind train' after exporting your training data.");
        }
    }

    Ok(())
}
