//! Derived schedule metrics.

use crate::core::domain::Schedule;

/// Annual equivalent full-load hours: the sum of all timestep values
/// weighted by the timestep duration in hours.
///
/// The metric is strategy-agnostic — two schedules with identical numeric
/// series yield identical values whether they came from a file, analytic
/// generation, or multiplier composition. An all-ones hourly schedule for a
/// non-leap year yields exactly 8760.0.
pub fn annual_equivalent_full_load_hrs(schedule: &Schedule) -> f64 {
    schedule.values().iter().sum::<f64>() / schedule.steps_per_hour() as f64
}
