//! CSV schedule file parsing.
//!
//! Reads a schedule CSV (header row of column names, then one record per
//! timestep) into a [`RawScheduleFile`] of string cells. Cells stay
//! unparsed here so the validator can report every numeric problem with
//! row/column context instead of failing on the first bad cell.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// One column of a schedule file, cells still in text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<String>,
}

/// An unvalidated schedule file: ordered columns of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScheduleFile {
    /// Origin path, when read from disk; display label otherwise.
    pub path: PathBuf,
    pub columns: Vec<RawColumn>,
}

impl RawScheduleFile {
    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Parses CSV text into a [`RawScheduleFile`].
///
/// The first record is the header; every following record must have the
/// same field count (ragged records are a structural error). `path` is
/// carried through for diagnostics only.
pub fn parse_schedule_csv_str(path: impl Into<PathBuf>, source: &str) -> Result<RawScheduleFile> {
    let path = path.into();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source.as_bytes());

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?
        .clone();

    let mut columns: Vec<RawColumn> = headers
        .iter()
        .map(|name| RawColumn {
            name: name.to_string(),
            cells: Vec::new(),
        })
        .collect();

    for (row_idx, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("failed to read row {} of {}", row_idx + 2, path.display()))?;
        anyhow::ensure!(
            record.len() == columns.len(),
            "row {} of {} has {} fields; header has {}",
            row_idx + 2,
            path.display(),
            record.len(),
            columns.len()
        );
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.cells.push(cell.to_string());
        }
    }

    Ok(RawScheduleFile { path, columns })
}
