//! Predicted budget display formatting
//!
//! Renders a predicted budget as a table with its total and a note on how
//! the total compares to income.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetBalance, PredictedBudget};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format an amount with a currency symbol and thousands separators
pub fn format_amount(symbol: &str, amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}{}.{:02}", sign, symbol, grouped, cents % 100)
}

/// Format a predicted budget breakdown
pub fn format_budget(budget: &PredictedBudget, symbol: &str) -> String {
    let rows: Vec<BudgetRow> = budget
        .lines()
        .iter()
        .map(|line| BudgetRow {
            category: line.category.clone(),
            amount: format_amount(symbol, line.amount),
        })
        .collect();

    let mut output = format!(
        "Predicted budget breakdown for {}\n",
        format_amount(symbol, budget.income())
    );
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output.push_str(&format!(
        "Total Predicted Budget: {}\n",
        format_amount(symbol, budget.total())
    ));
    output.push_str(&format_balance(budget.balance(), symbol));
    output.push('\n');

    output
}

/// Describe how the predicted total compares to income
pub fn format_balance(balance: BudgetBalance, symbol: &str) -> String {
    match balance {
        BudgetBalance::OverIncome(diff) => format!(
            "Warning: total predicted budget exceeds income by {}. You may need to adjust spending.",
            format_amount(symbol, diff)
        ),
        BudgetBalance::Remaining(left) => format!(
            "Predicted budget is within income. Remaining: {}",
            format_amount(symbol, left)
        ),
        BudgetBalance::Exact => "Predicted budget exactly matches income.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategorySchema;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("₱", 0.0), "₱0.00");
        assert_eq!(format_amount("₱", 999.5), "₱999.50");
        assert_eq!(format_amount("₱", 1234567.891), "₱1,234,567.89");
        assert_eq!(format_amount("$", -1000.0), "-$1,000.00");
    }

    #[test]
    fn test_format_budget_lists_categories_and_total() {
        let schema = CategorySchema::from_names(["Bills", "Food"]).unwrap();
        let budget = PredictedBudget::from_outputs(20000.0, &schema, &[10000.0, 7000.0]);

        let output = format_budget(&budget, "₱");

        assert!(output.contains("Bills"));
        assert!(output.contains("₱10,000.00"));
        assert!(output.contains("Total Predicted Budget: ₱17,000.00"));
        assert!(output.contains("Remaining: ₱3,000.00"));
    }

    #[test]
    fn test_format_balance_over_income() {
        let msg = format_balance(BudgetBalance::OverIncome(250.0), "$");
        assert!(msg.starts_with("Warning"));
        assert!(msg.contains("$250.00"));
    }
}
