use anyhow::Result;
use std::io::Write;

use crate::application::{ExpenseService, MonthlySummary};
use crate::domain::{display_amount, format_total};

/// Exporter for converting ledger data to CSV or JSON.
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export every entry to CSV, in listing order.
    /// `index` is the 1-based position within the entry's date.
    pub fn export_entries_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "index", "amount", "category", "description"])?;

        let mut count = 0;
        for (date, entries) in self.service.ledger().iter() {
            for (i, entry) in entries.iter().enumerate() {
                csv_writer.write_record(&[
                    date.to_string(),
                    (i + 1).to_string(),
                    display_amount(entry.amount),
                    entry.category.clone(),
                    entry.description.clone(),
                ])?;
                count += 1;
            }
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export monthly totals to CSV format
    pub fn export_summary_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let summary = self.service.monthly_summary();
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["month", "total"])?;
        for month in &summary.months {
            csv_writer.write_record([month.month.clone(), format_total(month.total)])?;
        }

        csv_writer.flush()?;
        Ok(summary.months.len())
    }

    /// Export monthly totals as a JSON array of `{month, total}`
    pub fn export_summary_json<W: Write>(&self, mut writer: W) -> Result<MonthlySummary> {
        let summary = self.service.monthly_summary();

        let json = serde_json::to_string_pretty(&summary.months)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(summary)
    }
}
