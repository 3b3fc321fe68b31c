//! Unavailable-period JSON parsing.
//!
//! Accepts either a top-level object holding an `unavailable_periods` array
//! or a bare array of period records. Missing `begin_hour`/`end_hour`
//! default to 0/24 and a missing `availability` resolves to `unavailable`
//! at parse time, so downstream code never sees an implicit mode.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::domain::UnavailablePeriod;

#[derive(Deserialize)]
struct PeriodsDocument {
    unavailable_periods: Vec<UnavailablePeriod>,
}

/// Parses unavailable periods from a JSON file.
pub fn parse_unavailable_periods_file(path: &Path) -> Result<Vec<UnavailablePeriod>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read unavailable periods file {}", path.display()))?;
    parse_unavailable_periods_str(&json)
        .with_context(|| format!("failed to parse unavailable periods file {}", path.display()))
}

/// Parses unavailable periods from a JSON string.
pub fn parse_unavailable_periods_str(json: &str) -> Result<Vec<UnavailablePeriod>> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("unavailable periods input is not valid JSON")?;

    let periods = if value.is_array() {
        Vec::<UnavailablePeriod>::deserialize(&value)
            .context("unavailable periods array has an invalid record")?
    } else {
        PeriodsDocument::deserialize(&value)
            .context("expected an 'unavailable_periods' array")?
            .unavailable_periods
    };

    Ok(periods)
}
