use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Amount;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense. The date it belongs to is the key of the
/// bucket holding it, not a field of the entry itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub amount: Amount,
    pub category: String,
    pub description: String,
}

impl Entry {
    pub fn new(amount: Amount, category: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Calendar date used as a ledger key.
///
/// Only the exact `YYYY-MM-DD` spelling is accepted, so the string form and
/// the chronological order of keys always agree. Serialized as that string,
/// which makes invalid keys in a persisted ledger a deserialization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseDate(NaiveDate);

impl ExpenseDate {
    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse `input`, falling back to `today` when the input is blank.
    pub fn parse_or(input: &str, today: ExpenseDate) -> Result<Self, ParseDateError> {
        let input = input.trim();
        if input.is_empty() {
            Ok(today)
        } else {
            input.parse()
        }
    }

    /// Parse `input`, falling back to the current local date when blank.
    pub fn parse_or_today(input: &str) -> Result<Self, ParseDateError> {
        Self::parse_or(input, Self::today())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The `YYYY-MM` prefix used to group entries by month.
    pub fn month_key(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }
}

impl FromStr for ExpenseDate {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date =
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ParseDateError::InvalidFormat)?;

        // chrono tolerates unpadded fields like "2024-3-5"
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(ParseDateError::InvalidFormat);
        }
        Ok(Self(date))
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl TryFrom<String> for ExpenseDate {
    type Error = ParseDateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpenseDate> for String {
    fn from(date: ExpenseDate) -> Self {
        date.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseDateError {
    InvalidFormat,
}

impl fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseDateError::InvalidFormat => write!(f, "date must be in YYYY-MM-DD format"),
        }
    }
}

impl std::error::Error for ParseDateError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> ExpenseDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_date() {
        let d = date("2024-03-05");
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(d.to_string(), "2024-03-05");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        for input in [
            "13/01/2024",
            "2024-13-01",
            "2024-02-30",
            "2024-3-5",
            "24-03-05",
            "2024-03-05 ",
            "2024/03/05",
            "yesterday",
        ] {
            assert_eq!(
                input.parse::<ExpenseDate>(),
                Err(ParseDateError::InvalidFormat),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_or_blank_uses_fallback() {
        let today = date("2025-06-01");
        assert_eq!(ExpenseDate::parse_or("", today), Ok(today));
        assert_eq!(ExpenseDate::parse_or("   ", today), Ok(today));
        assert_eq!(
            ExpenseDate::parse_or(" 2024-01-15 ", today),
            Ok(date("2024-01-15"))
        );
        assert!(ExpenseDate::parse_or("15-01-2024", today).is_err());
    }

    #[test]
    fn test_month_key() {
        assert_eq!(date("2024-01-15").month_key(), "2024-01");
        assert_eq!(date("1999-12-31").month_key(), "1999-12");
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(date("2023-12-31") < date("2024-01-01"));
        assert!(date("2024-01-09") < date("2024-01-10"));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&date("2024-03-05")).unwrap();
        assert_eq!(json, "\"2024-03-05\"");

        let parsed: ExpenseDate = serde_json::from_str("\"2024-03-05\"").unwrap();
        assert_eq!(parsed, date("2024-03-05"));

        assert!(serde_json::from_str::<ExpenseDate>("\"2024-3-5\"").is_err());
    }
}
