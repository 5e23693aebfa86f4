use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use super::{Amount, Entry, ExpenseDate};

/// All recorded expenses, bucketed by date.
///
/// Buckets keep insertion order, which is what 1-based positions refer to.
/// Dates iterate in chronological order. An emptied bucket is removed, so
/// every date present has at least one entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<ExpenseDate, Vec<Entry>>")]
pub struct Ledger {
    buckets: BTreeMap<ExpenseDate, Vec<Entry>>,
}

impl From<BTreeMap<ExpenseDate, Vec<Entry>>> for Ledger {
    fn from(mut buckets: BTreeMap<ExpenseDate, Vec<Entry>>) -> Self {
        buckets.retain(|_, entries| !entries.is_empty());
        Self { buckets }
    }
}

impl Serialize for Ledger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.buckets.serialize(serializer)
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct dates with at least one entry.
    pub fn date_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of entries across all dates.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Append an entry to the bucket for `date`, creating the bucket if needed.
    /// Returns the 1-based position of the new entry within its bucket.
    pub fn add(&mut self, date: ExpenseDate, entry: Entry) -> usize {
        let bucket = self.buckets.entry(date).or_default();
        bucket.push(entry);
        bucket.len()
    }

    pub fn contains_date(&self, date: &ExpenseDate) -> bool {
        self.buckets.contains_key(date)
    }

    /// Entries recorded for `date`, in insertion order.
    pub fn bucket(&self, date: &ExpenseDate) -> Option<&[Entry]> {
        self.buckets.get(date).map(Vec::as_slice)
    }

    /// Remove the entry at 1-based `position` under `date`.
    /// Later entries shift down by one; an emptied bucket is dropped.
    pub fn remove(&mut self, date: &ExpenseDate, position: usize) -> Result<Entry, RemoveError> {
        let bucket = self
            .buckets
            .get_mut(date)
            .ok_or(RemoveError::DateNotFound)?;

        if position == 0 || position > bucket.len() {
            return Err(RemoveError::PositionOutOfRange {
                position,
                len: bucket.len(),
            });
        }

        let removed = bucket.remove(position - 1);
        if bucket.is_empty() {
            self.buckets.remove(date);
        }
        Ok(removed)
    }

    /// Iterate over dates in chronological order with their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&ExpenseDate, &[Entry])> {
        self.buckets
            .iter()
            .map(|(date, entries)| (date, entries.as_slice()))
    }

    /// Sum of entry amounts per `YYYY-MM` month key, ordered by month.
    pub fn monthly_totals(&self) -> BTreeMap<String, Amount> {
        let mut totals: BTreeMap<String, Amount> = BTreeMap::new();

        for (date, entries) in &self.buckets {
            let sum: Amount = entries.iter().map(|e| e.amount).sum();
            *totals.entry(date.month_key()).or_insert(0.0) += sum;
        }

        totals
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveError {
    DateNotFound,
    PositionOutOfRange { position: usize, len: usize },
}

impl std::fmt::Display for RemoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoveError::DateNotFound => write!(f, "no expenses recorded for this date"),
            RemoveError::PositionOutOfRange { position, len } => {
                write!(f, "position {} is outside 1..={}", position, len)
            }
        }
    }
}

impl std::error::Error for RemoveError {}
