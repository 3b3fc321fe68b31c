//! Core domain models for building end-use schedules.
//!
//! This module defines the fundamental data structures used throughout the
//! crate: dense per-timestep schedule series, calendar-bounded unavailable
//! periods, the day-level override rules derived from them, and the explicit
//! configuration (column vocabulary, per-end-use capabilities) that drives
//! synthesis and validation.

pub mod config;
pub mod domain;

pub use config::*;
pub use domain::*;
