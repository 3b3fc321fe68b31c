//! Schedules, unavailable periods, and day-level override rules.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::time::calendar::{self, CalendarResult, SUPPORTED_STEPS_PER_HOUR};

/// How a schedule series was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStrategy {
    /// Read from an externally supplied dense CSV time series.
    File,
    /// Generated from smooth closed-form daily curves.
    Analytic,
    /// Composed from weekday/weekend hourly shapes and monthly scalars.
    MultiplierTable,
}

/// Reference back to the external file column a schedule was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileColumnRef {
    pub path: PathBuf,
    pub column: String,
}

/// Error type for schedule construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("schedule '{name}' has {len} values; expected {expected} for year {year}")]
    LengthMismatch {
        name: String,
        len: usize,
        expected: usize,
        year: i32,
    },

    #[error("unsupported resolution: {steps_per_hour} steps per hour")]
    UnsupportedResolution { steps_per_hour: usize },
}

/// Dense per-timestep intensity series for one building end-use over one
/// simulation year.
///
/// The length invariant (`hours_in_year(year) * steps_per_hour` values) is
/// checked at construction and holds for the life of the value. Override
/// application is a transform producing a new `Schedule`; the base series is
/// never mutated in place, so it stays inspectable in tests.
///
/// # Examples
///
/// ```
/// use ressched::core::{Schedule, ScheduleStrategy};
///
/// let schedule = Schedule::new(
///     "occupants",
///     vec![1.0; 8760],
///     1,
///     2007,
///     ScheduleStrategy::MultiplierTable,
/// )
/// .unwrap();
///
/// assert_eq!(schedule.len(), 8760);
/// assert_eq!(schedule.value_at(7, 4, 12).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    name: String,
    values: Vec<f64>,
    steps_per_hour: usize,
    year: i32,
    strategy: ScheduleStrategy,
    source: Option<FileColumnRef>,
}

impl Schedule {
    /// Creates a schedule, checking the length invariant for the given year
    /// and resolution.
    pub fn new(
        name: impl Into<String>,
        values: Vec<f64>,
        steps_per_hour: usize,
        year: i32,
        strategy: ScheduleStrategy,
    ) -> Result<Self, ScheduleError> {
        let name = name.into();
        if !SUPPORTED_STEPS_PER_HOUR.contains(&steps_per_hour) {
            return Err(ScheduleError::UnsupportedResolution { steps_per_hour });
        }
        let expected = calendar::hours_in_year(year) * steps_per_hour;
        if values.len() != expected {
            return Err(ScheduleError::LengthMismatch {
                name,
                len: values.len(),
                expected,
                year,
            });
        }
        Ok(Self {
            name,
            values,
            steps_per_hour,
            year,
            strategy,
            source: None,
        })
    }

    /// Attaches the originating file column for externally sourced series.
    pub fn with_source(mut self, source: FileColumnRef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn steps_per_hour(&self) -> usize {
        self.steps_per_hour
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn strategy(&self) -> ScheduleStrategy {
        self.strategy
    }

    pub fn source(&self) -> Option<&FileColumnRef> {
        self.source.as_ref()
    }

    /// Value of the first timestep of (month, day, hour).
    pub fn value_at(&self, month: u32, day: u32, hour: u32) -> CalendarResult<f64> {
        let idx = calendar::timestep_index(self.year, month, day, hour, self.steps_per_hour)?;
        Ok(self.values[idx])
    }

    /// Replaces the series while keeping all metadata; the replacement must
    /// have the same length. Used by override application.
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Self {
            values,
            ..self.clone()
        }
    }
}

/// Behavior of the target end-use during an unavailable period.
///
/// A closed three-value enumeration; absence of a mode in input data is
/// resolved to [`AvailabilityMode::Unavailable`] at parse time rather than
/// carried as an implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityMode {
    /// The end-use is off for the whole interval (schedule zeroed).
    #[default]
    Unavailable,
    /// The end-use is forced fully on for the whole interval.
    Available,
    /// The base schedule applies unchanged during the interval.
    FollowBaseSchedule,
}

/// A named calendar interval during which an end-use's normal schedule is
/// overridden.
///
/// Owned by the top-level building configuration and read-only here; this
/// crate only derives [`DayOverrideRule`]s from it. Hours bound the interval
/// as `[begin_hour, end_hour)` with `begin_hour` defaulting to the start of
/// the day (0) and `end_hour` to the end (24). An interval whose begin date
/// falls after its end date wraps across the December/January boundary and is
/// unrolled onto the single simulation year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailablePeriod {
    /// Label for diagnostics (e.g. "Vacancy", "Power Outage").
    pub name: String,
    /// Name of the end-use column this period targets.
    pub column_name: String,
    pub begin_month: u32,
    pub begin_day: u32,
    #[serde(default)]
    pub begin_hour: u32,
    pub end_month: u32,
    pub end_day: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default)]
    pub availability: AvailabilityMode,
}

fn default_end_hour() -> u32 {
    24
}

impl UnavailablePeriod {
    /// True iff the period covers the entire calendar year. End-uses whose
    /// capability record opts them out of overrides are still affected by a
    /// full-year period.
    pub fn spans_full_year(&self) -> bool {
        self.begin_month == 1
            && self.begin_day == 1
            && self.begin_hour == 0
            && self.end_month == 12
            && self.end_day == 31
            && self.end_hour == 24
    }
}

/// Single calendar-day, hour-range override derived from an unavailable
/// period.
///
/// A period spanning multiple days decomposes into one rule per day: the
/// first and last days carry partial hour ranges and interior days the full
/// 0..24 range. `value` is the intensity written over the base schedule for
/// every timestep in `[begin_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayOverrideRule {
    pub month: u32,
    pub day: u32,
    pub begin_hour: u32,
    pub end_hour: u32,
    pub value: f64,
}

/// One named column of a validated external schedule file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// A validated external CSV data source: an ordered sequence of named
/// columns sharing one sub-hourly resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleFile {
    pub path: PathBuf,
    pub steps_per_hour: usize,
    pub columns: Vec<ScheduleColumn>,
}

impl ScheduleFile {
    pub fn column(&self, name: &str) -> Option<&ScheduleColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}
