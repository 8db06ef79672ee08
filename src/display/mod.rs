//! Display formatting for terminal output

pub mod budget;

pub use budget::{format_amount, format_balance, format_budget};
