pub mod calendar;

pub use calendar::{
    date_from_day_of_year, day_of_year, days_in_month, days_in_year, hours_in_year, is_leap_year,
    timestep_index, CalendarError, CalendarResult, SUPPORTED_STEPS_PER_HOUR,
};
