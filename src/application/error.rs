use thiserror::Error;

use crate::domain::{ParseAmountError, ParseDateError, RemoveError};

/// Errors surfaced by [`ExpenseService`](super::ExpenseService).
///
/// The display strings are the messages shown to the user, so the
/// interactive menu can print them as-is.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date format! Use YYYY-MM-DD.")]
    InvalidDate(#[from] ParseDateError),

    #[error("Invalid amount!")]
    InvalidAmount(#[from] ParseAmountError),

    #[error("No expenses found for this date.")]
    DateNotFound(String),

    #[error("Invalid input.")]
    InvalidInput(String),

    #[error("Invalid number.")]
    InvalidNumber { index: i64, len: usize },

    #[error("Storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    /// Validation and lookup failures leave the ledger untouched and the
    /// caller can keep going; storage failures cannot be recovered from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Storage(_))
    }

    pub(crate) fn from_remove(err: RemoveError, date: &str) -> Self {
        match err {
            RemoveError::DateNotFound => AppError::DateNotFound(date.to_string()),
            RemoveError::PositionOutOfRange { position, len } => {
                AppError::InvalidNumber {
                    index: i64::try_from(position).unwrap_or(i64::MAX),
                    len,
                }
            }
        }
    }
}
