use std::io::{BufRead, Write};

use anyhow::Result;

use super::render;
use crate::application::{AppError, ExpenseService, NewExpense};
use crate::domain::{parse_amount, ExpenseDate};

const MENU: &str = "\
Personal Expense Tracker
1. Add Expense
2. View Expenses
3. Delete Expense
4. View Monthly Summary
5. Exit";

/// Numbered interactive menu over an [`ExpenseService`].
///
/// Invalid input is reported and the loop carries on; only storage failures
/// end it with an error. End of input is treated like choosing Exit.
pub struct Menu<'a, R, W> {
    service: &'a mut ExpenseService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a mut ExpenseService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{}", MENU)?;

            let Some(choice) = self.prompt("Choose an option: ")? else {
                writeln!(self.output)?;
                writeln!(self.output, "Goodbye!")?;
                return Ok(());
            };

            match choice.trim() {
                "1" => self.add()?,
                "2" => self.view()?,
                "3" => self.delete()?,
                "4" => self.summary()?,
                "5" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice. Please select from 1-5.")?,
            }
        }
    }

    fn add(&mut self) -> Result<()> {
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD) or leave blank for today: ")? else {
            return Ok(());
        };
        let date = ExpenseDate::parse_or_today(&date).map_err(AppError::from);
        let Some(date) = self.report(date)? else {
            return Ok(());
        };

        let Some(amount) = self.prompt("Enter expense amount: ")? else {
            return Ok(());
        };
        let amount = parse_amount(&amount).map_err(AppError::from);
        let Some(amount) = self.report(amount)? else {
            return Ok(());
        };

        let Some(category) = self.prompt("Enter expense category (e.g., Food, Transport): ")? else {
            return Ok(());
        };
        let Some(description) = self.prompt("Enter description (optional): ")? else {
            return Ok(());
        };

        let added = self
            .service
            .add_expense(NewExpense::new(date, amount, &category, &description));
        if self.report(added)?.is_some() {
            writeln!(self.output, "Expense added successfully!")?;
        }
        Ok(())
    }

    fn view(&mut self) -> Result<()> {
        render::write_expenses(&mut self.output, self.service.ledger())?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        self.view()?;

        writeln!(self.output)?;
        let Some(date) = self.prompt("Enter the date of the expense you want to delete (YYYY-MM-DD): ")?
        else {
            return Ok(());
        };

        let found = self
            .service
            .find_bucket(&date)
            .map(|(_, entries)| entries.to_vec());
        let Some(entries) = self.report(found)? else {
            return Ok(());
        };
        render::write_bucket(&mut self.output, &entries)?;

        let Some(index) = self.prompt("Enter the number of the expense to delete: ")? else {
            return Ok(());
        };
        let deleted = self.service.delete_expense(&date, &index);
        if self.report(deleted)?.is_some() {
            writeln!(self.output, "Expense deleted successfully!")?;
        }
        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        let summary = self.service.monthly_summary();
        render::write_summary(&mut self.output, &summary)?;
        Ok(())
    }

    /// Print `message` and read one line. `None` means end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(Some(line))
    }

    /// Show recoverable errors to the user and swallow them; anything else
    /// is passed up.
    fn report<T>(&mut self, result: Result<T, AppError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_recoverable() => {
                tracing::debug!(error = ?err, "rejected input");
                writeln!(self.output, "{}", err)?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
