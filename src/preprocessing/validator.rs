//! Schedule file validation with detailed error and warning reporting.
//!
//! Validates externally supplied CSV schedule files before any column is
//! accepted as a schedule: column vocabulary, duplicate detection across all
//! files of a run, row-count membership in the supported resolution set, and
//! per-cell numeric checks. All failures are collected so one pass reports
//! every structural problem; warnings are informational and never block a
//! run.

use serde::{Deserialize, Serialize};

use crate::core::config::{ColumnSemantics, ScheduleConfig};
use crate::parsing::csv_schedule::{RawColumn, RawScheduleFile};
use crate::time::calendar::{hours_in_year, SUPPORTED_STEPS_PER_HOUR};

/// Named validator failure kinds, one per distinct check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    UnrecognizedColumn,
    DuplicateColumn,
    InvalidRowCount,
    NonNumericValue,
    NegativeValue,
    MaxNotOne,
}

/// A single validation failure with file/column/row context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub file: String,
    pub column: Option<String>,
    /// 1-based data row (header excluded), where applicable.
    pub row: Option<usize>,
    pub message: String,
}

/// Outcome of one validation pass over all schedule files of a run.
///
/// Errors make `is_valid` false and are fatal to the run; warnings are
/// informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, issue: ValidationIssue) {
        self.is_valid = false;
        self.errors.push(issue);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// All errors of a given kind, for targeted assertions and reporting.
    pub fn errors_of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for externally supplied schedule files.
///
/// # Examples
///
/// ```
/// use ressched::core::ScheduleConfig;
/// use ressched::parsing::parse_schedule_csv_str;
/// use ressched::preprocessing::ScheduleFileValidator;
///
/// let config = ScheduleConfig::residential_defaults();
/// let file = parse_schedule_csv_str("schedules.csv", "occupants\n1.0\n").unwrap();
///
/// let result = ScheduleFileValidator::new(&config, 2007).validate_files(&[file]);
/// assert!(!result.is_valid); // 1 row is not a full year
/// ```
pub struct ScheduleFileValidator<'a> {
    config: &'a ScheduleConfig,
    year: i32,
}

impl<'a> ScheduleFileValidator<'a> {
    pub fn new(config: &'a ScheduleConfig, year: i32) -> Self {
        Self { config, year }
    }

    /// Validates one file in isolation. Duplicate-column detection across
    /// files requires [`Self::validate_files`].
    pub fn validate(&self, file: &RawScheduleFile) -> ValidationResult {
        self.validate_files(std::slice::from_ref(file))
    }

    /// Validates every file supplied for one run, collecting all failures.
    pub fn validate_files(&self, files: &[RawScheduleFile]) -> ValidationResult {
        let mut result = ValidationResult::new();
        let mut seen_columns: Vec<String> = Vec::new();

        for file in files {
            let file_label = file.path.display().to_string();

            self.check_row_count(file, &file_label, &mut result);

            for column in &file.columns {
                if !self.config.is_recognized(&column.name) {
                    result.add_error(ValidationIssue {
                        kind: IssueKind::UnrecognizedColumn,
                        file: file_label.clone(),
                        column: Some(column.name.clone()),
                        row: None,
                        message: format!(
                            "schedule column '{}' is not recognized",
                            column.name
                        ),
                    });
                    continue;
                }

                if seen_columns.contains(&column.name) {
                    result.add_error(ValidationIssue {
                        kind: IssueKind::DuplicateColumn,
                        file: file_label.clone(),
                        column: Some(column.name.clone()),
                        row: None,
                        message: format!(
                            "schedule column '{}' is specified more than once across the supplied files",
                            column.name
                        ),
                    });
                } else {
                    seen_columns.push(column.name.clone());
                }

                self.check_cells(column, &file_label, &mut result);
            }
        }

        result
    }

    fn check_row_count(
        &self,
        file: &RawScheduleFile,
        file_label: &str,
        result: &mut ValidationResult,
    ) {
        let rows = file.row_count();
        let hours = hours_in_year(self.year);
        let valid_counts: Vec<usize> = SUPPORTED_STEPS_PER_HOUR
            .iter()
            .map(|k| hours * k)
            .collect();

        if !valid_counts.contains(&rows) {
            let expected = valid_counts
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            result.add_error(ValidationIssue {
                kind: IssueKind::InvalidRowCount,
                file: file_label.to_string(),
                column: None,
                row: None,
                message: format!(
                    "found {rows} data rows; expected one of [{expected}] for year {}",
                    self.year
                ),
            });
        }
    }

    fn check_cells(&self, column: &RawColumn, file_label: &str, result: &mut ValidationResult) {
        let semantics = self
            .config
            .end_use(&column.name)
            .map(|spec| spec.semantics)
            .unwrap_or(ColumnSemantics::NonNegative);

        let mut max_value = f64::NEG_INFINITY;
        let mut all_numeric = !column.cells.is_empty();

        for (idx, cell) in column.cells.iter().enumerate() {
            let row = idx + 1;
            match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    if value < 0.0 {
                        result.add_error(ValidationIssue {
                            kind: IssueKind::NegativeValue,
                            file: file_label.to_string(),
                            column: Some(column.name.clone()),
                            row: Some(row),
                            message: format!(
                                "schedule value {value} for column '{}' must not be negative",
                                column.name
                            ),
                        });
                    }
                    max_value = max_value.max(value);
                }
                _ => {
                    all_numeric = false;
                    result.add_error(ValidationIssue {
                        kind: IssueKind::NonNumericValue,
                        file: file_label.to_string(),
                        column: Some(column.name.clone()),
                        row: Some(row),
                        message: format!(
                            "schedule value '{cell}' for column '{}' is not a finite number",
                            column.name
                        ),
                    });
                }
            }
        }

        // The peak check only means something once every cell parsed.
        if semantics == ColumnSemantics::Fraction && all_numeric && max_value != 1.0 {
            result.add_error(ValidationIssue {
                kind: IssueKind::MaxNotOne,
                file: file_label.to_string(),
                column: Some(column.name.clone()),
                row: None,
                message: format!(
                    "maximum value for column '{}' must be exactly 1, found {max_value}",
                    column.name
                ),
            });
        }
    }
}
