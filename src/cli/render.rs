use std::io::{self, Write};

use crate::application::MonthlySummary;
use crate::domain::{display_amount, format_total, Entry, Ledger};

/// Every date in order, with its entries numbered from 1.
pub fn write_expenses<W: Write>(out: &mut W, ledger: &Ledger) -> io::Result<()> {
    if ledger.is_empty() {
        return writeln!(out, "No expenses recorded.");
    }

    for (date, entries) in ledger.iter() {
        writeln!(out)?;
        writeln!(out, "Date: {}", date)?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, entry_line(entry))?;
        }
    }
    Ok(())
}

/// The entries of a single date, numbered from 1 and unindented.
pub fn write_bucket<W: Write>(out: &mut W, entries: &[Entry]) -> io::Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, entry_line(entry))?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &MonthlySummary) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(out, "No expenses to summarize.");
    }

    writeln!(out)?;
    writeln!(out, "Monthly Expense Summary:")?;
    for month in &summary.months {
        writeln!(out, "{}: {}", month.month, format_total(month.total))?;
    }
    Ok(())
}

fn entry_line(entry: &Entry) -> String {
    format!(
        "Amount: {}, Category: {}, Description: {}",
        display_amount(entry.amount),
        entry.category,
        entry.description
    )
}
