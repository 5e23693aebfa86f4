// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use impensa::application::{ExpenseService, NewExpense};
use impensa::domain::ExpenseDate;
use tempfile::TempDir;

/// Helper to create a test service over a ledger file in a temporary directory
pub fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = ExpenseService::open_path(ledger_path(&temp_dir))?;
    Ok((service, temp_dir))
}

/// Path of the ledger file used by [`test_service`]
pub fn ledger_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("expenses.json")
}

/// Helper to parse a date string into an ExpenseDate
pub fn parse_date(date_str: &str) -> ExpenseDate {
    date_str.parse().unwrap()
}

/// Helper to build a validated expense
pub fn expense(date: &str, amount: f64, category: &str, description: &str) -> NewExpense {
    NewExpense {
        date: parse_date(date),
        amount,
        category: category.to_string(),
        description: description.to_string(),
    }
}
