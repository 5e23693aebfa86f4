use serde::{Deserialize, Serialize};

use crate::domain::Amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    pub total: Amount,
}

/// Per-month totals in ascending month order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub months: Vec<MonthlyTotal>,
}

impl MonthlySummary {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn total_for(&self, month: &str) -> Option<Amount> {
        self.months
            .iter()
            .find(|m| m.month == month)
            .map(|m| m.total)
    }

    pub fn grand_total(&self) -> Amount {
        self.months.iter().map(|m| m.total).sum()
    }
}
