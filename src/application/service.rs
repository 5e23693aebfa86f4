use std::path::Path;

use crate::domain::{parse_amount, Amount, Entry, ExpenseDate, Ledger};
use crate::storage::JsonStore;

use super::{AppError, MonthlySummary, MonthlyTotal};

/// Application service owning the loaded ledger and the store behind it.
/// This is the primary interface for any client (subcommands, interactive menu).
///
/// The ledger is loaded once on construction and written back in full after
/// every successful mutation. A mutation whose save fails is not applied.
pub struct ExpenseService {
    store: JsonStore,
    ledger: Ledger,
}

/// A validated expense ready to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: ExpenseDate,
    pub amount: Amount,
    pub category: String,
    pub description: String,
}

/// Result of adding an expense
#[derive(Debug, Clone)]
pub struct AddedExpense {
    pub date: ExpenseDate,
    pub position: usize,
    pub entry: Entry,
}

/// Result of deleting an expense
#[derive(Debug, Clone)]
pub struct DeletedExpense {
    pub date: ExpenseDate,
    pub position: usize,
    pub entry: Entry,
    /// The date had no entries left and was dropped from the ledger.
    pub date_removed: bool,
}

impl NewExpense {
    /// Validate raw user input. The date is checked before the amount; a
    /// blank date means today.
    pub fn parse(
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
    ) -> Result<Self, AppError> {
        Self::parse_with_today(date, amount, category, description, ExpenseDate::today())
    }

    pub fn parse_with_today(
        date: &str,
        amount: &str,
        category: &str,
        description: &str,
        today: ExpenseDate,
    ) -> Result<Self, AppError> {
        let date = ExpenseDate::parse_or(date, today)?;
        let amount = parse_amount(amount)?;
        Ok(Self::new(date, amount, category, description))
    }

    /// Build from already validated parts. Free-text fields are trimmed.
    pub fn new(date: ExpenseDate, amount: Amount, category: &str, description: &str) -> Self {
        Self {
            date,
            amount,
            category: category.trim().to_string(),
            description: description.trim().to_string(),
        }
    }
}

/// Parse a 1-based index typed by the user.
///
/// Integers too large for `i64` are still numbers, so they saturate and end
/// up out of range rather than being treated as non-numeric.
fn parse_index(input: &str) -> Result<i64, AppError> {
    let input = input.trim();
    if let Ok(index) = input.parse::<i64>() {
        return Ok(index);
    }

    let (negative, digits) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input.strip_prefix('+').unwrap_or(input)),
    };
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Ok(if negative { i64::MIN } else { i64::MAX })
    } else {
        Err(AppError::InvalidInput(input.to_string()))
    }
}

impl ExpenseService {
    /// Create a service over an already loaded ledger.
    pub fn new(store: JsonStore, ledger: Ledger) -> Self {
        Self { store, ledger }
    }

    /// Load the ledger behind `store`.
    pub fn open(store: JsonStore) -> Result<Self, AppError> {
        let ledger = store.load()?;
        Ok(Self::new(store, ledger))
    }

    /// Load the ledger file at `path` (missing file means empty ledger).
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        Self::open(JsonStore::new(path.as_ref()))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Add
    // ========================

    /// Append an expense under its date and persist.
    pub fn add_expense(&mut self, expense: NewExpense) -> Result<AddedExpense, AppError> {
        let NewExpense {
            date,
            amount,
            category,
            description,
        } = expense;
        let entry = Entry::new(amount, category, description);

        let mut next = self.ledger.clone();
        let position = next.add(date, entry.clone());
        self.commit(next)?;

        tracing::info!(%date, position, amount, "added expense");
        Ok(AddedExpense {
            date,
            position,
            entry,
        })
    }

    // ========================
    // Delete
    // ========================

    /// Look up the entries recorded for a date given as user input.
    /// Input that is not a valid date cannot match any bucket.
    pub fn find_bucket(&self, date: &str) -> Result<(ExpenseDate, &[Entry]), AppError> {
        let trimmed = date.trim();
        let key: ExpenseDate = trimmed
            .parse()
            .map_err(|_| AppError::DateNotFound(trimmed.to_string()))?;

        self.ledger
            .bucket(&key)
            .map(|entries| (key, entries))
            .ok_or_else(|| AppError::DateNotFound(trimmed.to_string()))
    }

    /// Delete the entry at the 1-based `index` under `date`, both given as
    /// user input. The date is looked up before the index is parsed.
    pub fn delete_expense(&mut self, date: &str, index: &str) -> Result<DeletedExpense, AppError> {
        let (key, entries) = self.find_bucket(date)?;
        let len = entries.len();

        let parsed = parse_index(index)?;
        let position = usize::try_from(parsed)
            .ok()
            .filter(|p| (1..=len).contains(p))
            .ok_or(AppError::InvalidNumber { index: parsed, len })?;

        self.delete_at(key, position)
    }

    /// Delete the entry at a known 1-based position.
    pub fn delete_at(
        &mut self,
        date: ExpenseDate,
        position: usize,
    ) -> Result<DeletedExpense, AppError> {
        let mut next = self.ledger.clone();
        let entry = next
            .remove(&date, position)
            .map_err(|e| AppError::from_remove(e, &date.to_string()))?;
        let date_removed = !next.contains_date(&date);
        self.commit(next)?;

        tracing::info!(%date, position, date_removed, "deleted expense");
        Ok(DeletedExpense {
            date,
            position,
            entry,
            date_removed,
        })
    }

    // ========================
    // Summary
    // ========================

    /// Totals per `YYYY-MM` month, ascending.
    pub fn monthly_summary(&self) -> MonthlySummary {
        let months = self
            .ledger
            .monthly_totals()
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect();
        MonthlySummary { months }
    }

    fn commit(&mut self, next: Ledger) -> Result<(), AppError> {
        self.store.save(&next)?;
        self.ledger = next;
        Ok(())
    }
}
