//! High-level loading and output of schedule files.
//!
//! Loaders combine parsing, validation across the full set of files for a
//! run, and conversion to typed [`crate::core::ScheduleFile`] values. The
//! detailed-output writer materializes the final per-end-use series as a
//! single CSV for the simulation engine, once per run.

pub mod loaders;


pub use loaders::{write_detailed_output, LoadError, ScheduleFileLoader, ScheduleLoadResult};
