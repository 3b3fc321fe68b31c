//! Schedule file loading and detailed-schedule output.

use std::path::{Path, PathBuf};

use crate::core::config::ScheduleConfig;
use crate::core::domain::{Schedule, ScheduleColumn, ScheduleFile};
use crate::parsing::csv_schedule::{parse_schedule_csv_str, RawScheduleFile};
use crate::preprocessing::validator::{ScheduleFileValidator, ValidationResult};
use crate::time::calendar::hours_in_year;

/// Error type for schedule file loading and output.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("schedule file not found: {path}")]
    MissingFile { path: PathBuf },

    #[error("failed to read schedule file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed schedule file {path}: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("schedule file validation failed with {} error(s)", .result.errors.len())]
    Validation { result: ValidationResult },

    #[error("schedules have differing lengths; cannot write combined output")]
    LengthMismatch,

    #[error("failed to write detailed schedule output {path}")]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Successful outcome of loading every schedule file of a run.
#[derive(Debug, Clone)]
pub struct ScheduleLoadResult {
    pub files: Vec<ScheduleFile>,
    /// The passing validation result, retained for its warnings.
    pub validation: ValidationResult,
}

/// Reads, validates, and converts external schedule files.
pub struct ScheduleFileLoader;

impl ScheduleFileLoader {
    /// Loads every referenced schedule file for one run.
    ///
    /// All files are read and validated together so duplicate columns
    /// across files are caught; any validation error fails the load with
    /// [`LoadError::Validation`] carrying the complete issue list.
    /// Warnings are logged and returned but never block the run.
    pub fn load(
        paths: &[PathBuf],
        year: i32,
        config: &ScheduleConfig,
    ) -> Result<ScheduleLoadResult, LoadError> {
        let mut raw_files = Vec::with_capacity(paths.len());
        for path in paths {
            raw_files.push(Self::read_raw(path)?);
        }

        let validation = ScheduleFileValidator::new(config, year).validate_files(&raw_files);
        for warning in &validation.warnings {
            log::warn!("{warning}");
        }
        if !validation.is_valid {
            return Err(LoadError::Validation { result: validation });
        }

        let files = raw_files
            .iter()
            .map(|raw| Self::convert(raw, year))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScheduleLoadResult { files, validation })
    }

    fn read_raw(path: &Path) -> Result<RawScheduleFile, LoadError> {
        if !path.is_file() {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_schedule_csv_str(path, &text).map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })
    }

    /// Converts a validated raw file into typed numeric columns.
    fn convert(raw: &RawScheduleFile, year: i32) -> Result<ScheduleFile, LoadError> {
        let steps_per_hour = raw.row_count() / hours_in_year(year);
        let mut columns = Vec::with_capacity(raw.columns.len());
        for column in &raw.columns {
            let values = column
                .cells
                .iter()
                .map(|cell| cell.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|e| LoadError::Malformed {
                    path: raw.path.clone(),
                    message: format!("column '{}': {e}", column.name),
                })?;
            columns.push(ScheduleColumn {
                name: column.name.clone(),
                values,
            });
        }
        Ok(ScheduleFile {
            path: raw.path.clone(),
            steps_per_hour,
            columns,
        })
    }
}

/// Writes the final per-end-use series as one combined CSV: a header of
/// schedule names, then one row per timestep.
///
/// All schedules must share one length (i.e. one year and resolution).
pub fn write_detailed_output(path: &Path, schedules: &[Schedule]) -> Result<(), LoadError> {
    let Some(first) = schedules.first() else {
        return Ok(());
    };
    if schedules.iter().any(|s| s.len() != first.len()) {
        return Err(LoadError::LengthMismatch);
    }

    let map_err = |source: csv::Error| LoadError::Output {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(map_err)?;
    writer
        .write_record(schedules.iter().map(|s| s.name()))
        .map_err(map_err)?;
    for row in 0..first.len() {
        writer
            .write_record(schedules.iter().map(|s| s.values()[row].to_string()))
            .map_err(map_err)?;
    }
    writer.flush().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
