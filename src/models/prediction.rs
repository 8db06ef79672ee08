//! Predicted budget allocation
//!
//! A prediction is one non-negative amount per category, kept in schema order.
//! The total is not tied to income; `balance` reports how the two compare.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::category::CategorySchema;

/// One predicted amount
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub category: String,
    pub amount: f64,
}

/// Category-keyed budget in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedBudget {
    income: f64,
    lines: Vec<BudgetLine>,
}

impl PredictedBudget {
    /// Pair raw model outputs with the schema, clamping each amount to zero or more
    ///
    /// Callers must check `outputs.len() == schema.len()` first.
    pub fn from_outputs(income: f64, schema: &CategorySchema, outputs: &[f64]) -> Self {
        debug_assert_eq!(schema.len(), outputs.len());
        let lines = schema
            .iter()
            .zip(outputs)
            .map(|(category, &amount)| BudgetLine {
                category: category.to_string(),
                amount: clamp_amount(amount),
            })
            .collect();

        Self { income, lines }
    }

    /// The income the prediction was made for
    pub fn income(&self) -> f64 {
        self.income
    }

    /// Predicted lines in schema order
    pub fn lines(&self) -> &[BudgetLine] {
        &self.lines
    }

    /// Amount predicted for a category
    pub fn get(&self, category: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.category == category)
            .map(|l| l.amount)
    }

    /// Sum of all predicted amounts
    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// How the predicted total compares to income
    pub fn balance(&self) -> BudgetBalance {
        let total = round_cents(self.total());
        let income = round_cents(self.income);
        if total > income {
            BudgetBalance::OverIncome(total - income)
        } else if total < income {
            BudgetBalance::Remaining(income - total)
        } else {
            BudgetBalance::Exact
        }
    }
}

impl Serialize for PredictedBudget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.lines.len()))?;
        for line in &self.lines {
            map.serialize_entry(&line.category, &line.amount)?;
        }
        map.end()
    }
}

/// Comparison of the predicted total against income
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetBalance {
    /// Total exceeds income by this amount
    OverIncome(f64),
    /// Total is under income, leaving this amount
    Remaining(f64),
    /// Total matches income to the cent
    Exact,
}

fn clamp_amount(amount: f64) -> f64 {
    // NaN compares false, so it also lands on zero
    if amount > 0.0 {
        amount
    } else {
        0.0
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> CategorySchema {
        CategorySchema::from_names(["Bills", "Food", "Savings"]).unwrap()
    }

    #[test]
    fn test_negative_and_nan_outputs_are_clamped() {
        let budget = PredictedBudget::from_outputs(100.0, &schema(), &[-5.0, f64::NAN, 12.5]);

        assert_eq!(budget.get("Bills"), Some(0.0));
        assert_eq!(budget.get("Food"), Some(0.0));
        assert_eq!(budget.get("Savings"), Some(12.5));
    }

    #[test]
    fn test_lines_follow_schema_order() {
        let budget = PredictedBudget::from_outputs(100.0, &schema(), &[1.0, 2.0, 3.0]);
        let names: Vec<_> = budget.lines().iter().map(|l| l.category.as_str()).collect();
        assert_eq!(names, vec!["Bills", "Food", "Savings"]);
    }

    #[test]
    fn test_balance() {
        let over = PredictedBudget::from_outputs(50.0, &schema(), &[20.0, 20.0, 20.0]);
        assert_eq!(over.balance(), BudgetBalance::OverIncome(10.0));

        let under = PredictedBudget::from_outputs(100.0, &schema(), &[20.0, 20.0, 20.0]);
        assert_eq!(under.balance(), BudgetBalance::Remaining(40.0));

        let exact = PredictedBudget::from_outputs(60.0, &schema(), &[20.0, 20.0, 20.0]);
        assert_eq!(exact.balance(), BudgetBalance::Exact);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let budget = PredictedBudget::from_outputs(100.0, &schema(), &[3.0, 2.0, 1.0]);
        let json = serde_json::to_string(&budget).unwrap();
        assert_eq!(json, r#"{"Bills":3.0,"Food":2.0,"Savings":1.0}"#);
    }
}
