//! Schedule synthesis: strategy dispatch and base-series generation.
//!
//! Exactly one strategy produces the base series for an end-use per run. An
//! external file column, when present, is used exclusively; otherwise the
//! end-use's capability record selects smooth analytic generation or
//! weekday/weekend/monthly multiplier composition. Unavailable periods are
//! applied on top of the base series as a final, pure transform.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::core::config::{EndUseSpec, ScheduleConfig};
use crate::core::domain::{
    FileColumnRef, Schedule, ScheduleError, ScheduleFile, ScheduleStrategy, UnavailablePeriod,
};
use crate::algorithms::overrides::UnavailablePeriodResolver;
use crate::time::calendar::{self, CalendarError, SUPPORTED_STEPS_PER_HOUR};

/// Error type for schedule synthesis.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("end-use '{name}' is not in the configured vocabulary")]
    UnknownEndUse { name: String },

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Produces one [`Schedule`] per requested end-use from configuration,
/// validated external files, and unavailable periods.
///
/// Synthesis of different end-uses shares no mutable state; calls are
/// independent and may run sequentially or in parallel with identical
/// results.
///
/// # Examples
///
/// ```
/// use ressched::algorithms::ScheduleSynthesizer;
/// use ressched::core::ScheduleConfig;
///
/// let config = ScheduleConfig::residential_defaults();
/// let synthesizer = ScheduleSynthesizer::new(&config, 2007, 1).unwrap();
/// let schedule = synthesizer.synthesize("occupants", &[], &[]).unwrap();
///
/// assert_eq!(schedule.len(), 8760);
/// let peak = schedule.values().iter().cloned().fold(f64::MIN, f64::max);
/// assert_eq!(peak, 1.0);
/// ```
pub struct ScheduleSynthesizer<'a> {
    config: &'a ScheduleConfig,
    year: i32,
    steps_per_hour: usize,
}

impl<'a> ScheduleSynthesizer<'a> {
    pub fn new(
        config: &'a ScheduleConfig,
        year: i32,
        steps_per_hour: usize,
    ) -> Result<Self, ScheduleError> {
        if !SUPPORTED_STEPS_PER_HOUR.contains(&steps_per_hour) {
            return Err(ScheduleError::UnsupportedResolution { steps_per_hour });
        }
        Ok(Self {
            config,
            year,
            steps_per_hour,
        })
    }

    /// Synthesizes the schedule for one end-use.
    ///
    /// Strategy precedence: a file column with the end-use's name wins
    /// outright (a warning is logged if multiplier tables were also
    /// configured — they are ignored, never combined); otherwise the
    /// end-use's default strategy applies. Unavailable periods targeting
    /// the end-use are resolved and applied to the base series.
    pub fn synthesize(
        &self,
        end_use: &str,
        files: &[ScheduleFile],
        periods: &[UnavailablePeriod],
    ) -> Result<Schedule, SynthesisError> {
        let spec = self
            .config
            .end_use(end_use)
            .ok_or_else(|| SynthesisError::UnknownEndUse {
                name: end_use.to_string(),
            })?;

        let base = match self.find_file_column(end_use, files) {
            Some((file, column_idx)) => {
                if spec.weekday_multipliers.is_some()
                    || spec.weekend_multipliers.is_some()
                    || spec.monthly_multipliers.is_some()
                {
                    log::warn!(
                        "schedule file column '{end_use}' overrides the configured \
                         weekday/weekend/monthly multipliers; multipliers ignored"
                    );
                }
                let column = &file.columns[column_idx];
                Schedule::new(
                    end_use,
                    column.values.clone(),
                    file.steps_per_hour,
                    self.year,
                    ScheduleStrategy::File,
                )?
                .with_source(FileColumnRef {
                    path: file.path.clone(),
                    column: column.name.clone(),
                })
            }
            None => match spec.default_strategy {
                ScheduleStrategy::Analytic => self.analytic_schedule(spec)?,
                // An end-use that defaults to file input but has no file
                // column still gets a multiplier-table schedule.
                ScheduleStrategy::File | ScheduleStrategy::MultiplierTable => {
                    self.multiplier_schedule(spec)?
                }
            },
        };

        let resolver = UnavailablePeriodResolver::new(self.year);
        let rules = resolver.resolve_for_column(periods, end_use, spec)?;
        if rules.is_empty() {
            return Ok(base);
        }
        Ok(resolver.apply(&base, &rules)?)
    }

    fn find_file_column<'f>(
        &self,
        end_use: &str,
        files: &'f [ScheduleFile],
    ) -> Option<(&'f ScheduleFile, usize)> {
        files.iter().find_map(|file| {
            file.columns
                .iter()
                .position(|c| c.name == end_use)
                .map(|idx| (file, idx))
        })
    }

    /// Composes weekday/weekend hourly shapes with monthly scalars and
    /// normalizes the result so the annual peak is exactly 1.0.
    fn multiplier_schedule(&self, spec: &EndUseSpec) -> Result<Schedule, SynthesisError> {
        let weekday = spec.weekday_multipliers.unwrap_or([1.0; 24]);
        let weekend = spec.weekend_multipliers.unwrap_or(weekday);
        let monthly = spec.monthly_multipliers.unwrap_or([1.0; 12]);

        let mut values =
            Vec::with_capacity(calendar::hours_in_year(self.year) * self.steps_per_hour);
        for ordinal in 1..=calendar::days_in_year(self.year) {
            let (month, day) = calendar::date_from_day_of_year(self.year, ordinal)?;
            let date = NaiveDate::from_ymd_opt(self.year, month, day)
                .expect("ordinal days map to valid dates");
            let shape = if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                &weekend
            } else {
                &weekday
            };
            let month_mult = monthly[(month - 1) as usize];
            for hour in 0..24 {
                let value = shape[hour] * month_mult;
                for _ in 0..self.steps_per_hour {
                    values.push(value);
                }
            }
        }
        normalize_peak(&mut values);

        Ok(Schedule::new(
            &spec.name,
            values,
            self.steps_per_hour,
            self.year,
            ScheduleStrategy::MultiplierTable,
        )?)
    }

    /// Deterministic smooth generation: a raised-cosine double-peak daily
    /// curve (morning and evening) scaled by the monthly multiplier, then
    /// peak-normalized. No external data, no randomness.
    fn analytic_schedule(&self, spec: &EndUseSpec) -> Result<Schedule, SynthesisError> {
        let monthly = spec.monthly_multipliers.unwrap_or([1.0; 12]);

        let mut values =
            Vec::with_capacity(calendar::hours_in_year(self.year) * self.steps_per_hour);
        for ordinal in 1..=calendar::days_in_year(self.year) {
            let (month, _) = calendar::date_from_day_of_year(self.year, ordinal)?;
            let month_mult = monthly[(month - 1) as usize];
            for hour in 0..24 {
                for step in 0..self.steps_per_hour {
                    let t = hour as f64 + step as f64 / self.steps_per_hour as f64;
                    values.push(smooth_day_value(t) * month_mult);
                }
            }
        }
        normalize_peak(&mut values);

        Ok(Schedule::new(
            &spec.name,
            values,
            self.steps_per_hour,
            self.year,
            ScheduleStrategy::Analytic,
        )?)
    }
}

/// Continuous daily curve with a morning bump around 07:00 and a larger
/// evening bump around 19:00, on a 0.2 base load.
fn smooth_day_value(t_hours: f64) -> f64 {
    0.2 + 0.5 * bump(t_hours, 7.0, 3.0) + 0.8 * bump(t_hours, 19.0, 4.0)
}

/// Raised cosine centered at `center` with half-width `width`, zero outside.
fn bump(t: f64, center: f64, width: f64) -> f64 {
    let d = (t - center).abs();
    if d >= width {
        0.0
    } else {
        0.5 * (1.0 + (PI * d / width).cos())
    }
}

fn normalize_peak(values: &mut [f64]) {
    let peak = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if peak > 0.0 {
        for v in values.iter_mut() {
            *v /= peak;
        }
    }
}
