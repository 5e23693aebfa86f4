use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{ExpenseService, NewExpense};
use crate::io::Exporter;
use crate::storage::DEFAULT_LEDGER_FILE;

mod menu;
pub mod render;

pub use menu::Menu;

/// Impensa - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "impensa")]
#[command(about = "A local-first personal expense tracker. Runs the interactive menu when no command is given.")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, env = "IMPENSA_FILE", default_value = DEFAULT_LEDGER_FILE, global = true)]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record an expense
    Add {
        /// Amount spent (e.g., "42.5" or "10")
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Category (e.g., "Food", "Transport")
        #[arg(short, long, default_value = "")]
        category: String,

        /// Description of the expense
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List all expenses grouped by date
    #[command(alias = "view")]
    List,

    /// Delete an expense by date and its number within that date
    Delete {
        /// Date of the expense (YYYY-MM-DD)
        date: String,

        /// Number of the expense as shown by `list`
        #[arg(allow_negative_numbers = true)]
        index: String,
    },

    /// Show total spending per month
    Summary {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export: entries, summary
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format: csv, json (default: csv; json only for summary)
        #[arg(long)]
        format: Option<String>,
    },

    /// Run the interactive menu
    Menu,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let mut service = ExpenseService::open_path(&self.file)?;

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Add {
                amount,
                date,
                category,
                description,
            } => {
                let expense = NewExpense::parse(
                    date.as_deref().unwrap_or(""),
                    &amount,
                    &category,
                    &description,
                )?;
                service.add_expense(expense)?;
                println!("Expense added successfully!");
            }

            Commands::List => {
                let mut out = io::stdout().lock();
                render::write_expenses(&mut out, service.ledger())?;
            }

            Commands::Delete { date, index } => {
                service.delete_expense(&date, &index)?;
                println!("Expense deleted successfully!");
            }

            Commands::Summary { format } => run_summary_command(&service, &format)?,

            Commands::Export {
                export_type,
                output,
                format,
            } => {
                run_export_command(&service, &export_type, output.as_deref(), format.as_deref())?
            }

            Commands::Menu => {
                let stdin = io::stdin();
                let mut menu = Menu::new(&mut service, stdin.lock(), io::stdout().lock());
                menu.run()?;
            }
        }

        Ok(())
    }
}

fn run_summary_command(service: &ExpenseService, format: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    let exporter = Exporter::new(service);

    match format {
        "table" => render::write_summary(&mut out, &service.monthly_summary())?,
        "json" => {
            exporter.export_summary_json(&mut out)?;
        }
        "csv" => {
            exporter.export_summary_csv(&mut out)?;
        }
        other => bail!("Invalid format '{}'. Valid formats: table, json, csv", other),
    }
    Ok(())
}

fn run_export_command(
    service: &ExpenseService,
    export_type: &str,
    output: Option<&Path>,
    format: Option<&str>,
) -> Result<()> {
    let exporter = Exporter::new(service);

    match (export_type, format.unwrap_or("csv")) {
        ("entries", "csv") => {
            let count = exporter.export_entries_csv(open_output(output)?)?;
            if output.is_some() {
                eprintln!("Exported {} entries", count);
            }
        }
        ("summary", "csv") => {
            let count = exporter.export_summary_csv(open_output(output)?)?;
            if output.is_some() {
                eprintln!("Exported {} monthly totals", count);
            }
        }
        ("summary", "json") => {
            let summary = exporter.export_summary_json(open_output(output)?)?;
            if output.is_some() {
                eprintln!("Exported {} monthly totals", summary.months.len());
            }
        }
        ("entries", other) => bail!("Invalid format '{}' for entries. Valid formats: csv", other),
        ("summary", other) => {
            bail!("Invalid format '{}' for summary. Valid formats: csv, json", other)
        }
        _ => bail!(
            "Unknown export type: {}. Valid types: entries, summary",
            export_type
        ),
    }

    Ok(())
}

/// The given file, or stdout when no path is set.
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
