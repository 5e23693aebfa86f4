use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::Ledger;

/// File name used when no ledger path is configured.
pub const DEFAULT_LEDGER_FILE: &str = "expenses.json";

const INDENT: &[u8] = b"    ";

/// Persists a whole [`Ledger`] as one pretty-printed JSON document.
///
/// There is no locking: two processes saving to the same file race and the
/// last write wins.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the ledger from disk.
    /// A missing file is an empty ledger; a malformed one is an error.
    pub fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "ledger file not found, starting empty");
            return Ok(Ledger::new());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read ledger file: {}", self.path.display()))?;
        let ledger: Ledger = serde_json::from_str(&data)
            .with_context(|| format!("Ledger file is corrupt: {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            dates = ledger.date_count(),
            entries = ledger.entry_count(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    /// Overwrite the file with the full ledger.
    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        let data = to_pretty_json(ledger)?;
        write_file(&self.path, &data)
            .with_context(|| format!("Failed to write ledger file: {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            entries = ledger.entry_count(),
            "saved ledger"
        );
        Ok(())
    }
}

impl Default for JsonStore {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_FILE)
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .context("Failed to serialize ledger")?;
    Ok(buf)
}

fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.flush()?;
    Ok(())
}
