//! Parsers for externally supplied schedule data.
//!
//! Two input formats feed this crate: dense CSV time series (one column per
//! end-use, one row per timestep) and JSON lists of unavailable periods.
//! Parsing here is purely structural; numeric and vocabulary checks belong
//! to [`crate::preprocessing::validator`].

pub mod csv_schedule;
pub mod periods_parser;


pub use csv_schedule::{parse_schedule_csv_str, RawColumn, RawScheduleFile};
pub use periods_parser::{parse_unavailable_periods_file, parse_unavailable_periods_str};
