//! Operating schedules for whole-building energy simulation.
//!
//! This crate produces and validates the time-varying operating profiles
//! ("schedules") that drive a residential building simulation: fractional
//! intensity of occupancy, appliance use, lighting, ventilation, and similar
//! end-uses for every timestep of a simulation year. Schedules are either
//! synthesized from compact configuration (smooth analytic curves or
//! weekday/weekend/monthly multiplier tables) or supplied as dense CSV time
//! series, which are structurally and numerically validated before use.
//! Calendar-bounded unavailable periods (vacation, power outage) are applied
//! as overrides on top of any base schedule, with exact day/hour semantics
//! including December/January wraparound and leap years.
//!
//! # Overview
//!
//! - [`time::calendar`] — pure date/hour arithmetic and timestep indexing
//! - [`core`] — schedule and period domain models plus explicit
//!   [`core::ScheduleConfig`] (vocabulary, capabilities, multiplier tables)
//! - [`parsing`] — CSV schedule files and JSON unavailable-period lists
//! - [`preprocessing`] — collect-all schedule file validation
//! - [`algorithms`] — unavailable-period resolution and schedule synthesis
//! - [`services`] — derived metrics (annual equivalent full-load hours)
//! - [`io`] — multi-file loading and the combined detailed-schedule output
//!
//! # Example
//!
//! ```
//! use ressched::algorithms::ScheduleSynthesizer;
//! use ressched::core::{AvailabilityMode, ScheduleConfig, UnavailablePeriod};
//! use ressched::services::annual_equivalent_full_load_hrs;
//!
//! let config = ScheduleConfig::residential_defaults();
//! let synthesizer = ScheduleSynthesizer::new(&config, 2007, 1).unwrap();
//!
//! let vacancy = UnavailablePeriod {
//!     name: "Vacancy".to_string(),
//!     column_name: "occupants".to_string(),
//!     begin_month: 12,
//!     begin_day: 1,
//!     begin_hour: 0,
//!     end_month: 1,
//!     end_day: 31,
//!     end_hour: 24,
//!     availability: AvailabilityMode::Unavailable,
//! };
//!
//! let schedule = synthesizer.synthesize("occupants", &[], &[vacancy]).unwrap();
//! assert_eq!(schedule.value_at(12, 15, 12).unwrap(), 0.0);
//! assert!(annual_equivalent_full_load_hrs(&schedule) > 0.0);
//! ```

pub mod algorithms;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod time;

pub use crate::core::{
    AvailabilityMode, DayOverrideRule, Schedule, ScheduleConfig, ScheduleFile, ScheduleStrategy,
    UnavailablePeriod,
};
pub use algorithms::{ScheduleSynthesizer, UnavailablePeriodResolver};
pub use preprocessing::{ScheduleFileValidator, ValidationResult};
pub use services::annual_equivalent_full_load_hrs;
pub use time::calendar::CalendarError;
