//! Unavailable-period resolution and application.
//!
//! An [`UnavailablePeriod`] is a calendar interval; resolution turns it into
//! one [`DayOverrideRule`] per covered day, handling partial boundary days
//! and intervals that wrap across the December/January boundary. Schedules
//! are single-year, so a wraparound period is unrolled onto the one
//! simulation calendar rather than split across years.
//!
//! When several periods target the same column, the observable contract per
//! hour is a single override value, not an accumulation: rules are coalesced
//! so no two emitted rules overlap, with the later-declared period winning
//! where values differ. For plain `Unavailable` periods this coincides with
//! the union and makes application idempotent; for mixed
//! `Unavailable`/`Available` overlaps the last-declared-wins choice is a
//! compatibility risk noted in DESIGN.md.

use std::collections::BTreeMap;

use crate::core::config::EndUseSpec;
use crate::core::domain::{AvailabilityMode, DayOverrideRule, Schedule, UnavailablePeriod};
use crate::time::calendar::{
    self, CalendarError, CalendarResult,
};

/// Resolver of unavailable periods into day-level override rules for one
/// simulation year.
///
/// Resolution depends only on (period, year) and has no side effects, so
/// results are safely memoizable by the caller.
#[derive(Debug, Clone, Copy)]
pub struct UnavailablePeriodResolver {
    year: i32,
}

impl UnavailablePeriodResolver {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Resolves a single period into ordered day rules.
    ///
    /// A `FollowBaseSchedule` period yields no rules: the base schedule
    /// already describes the wanted behavior.
    pub fn resolve(&self, period: &UnavailablePeriod) -> CalendarResult<Vec<DayOverrideRule>> {
        self.check_hours(period)?;

        let begin = calendar::day_of_year(self.year, period.begin_month, period.begin_day)?;
        let end = calendar::day_of_year(self.year, period.end_month, period.end_day)?;

        // Wraparound periods (begin after end) run to Dec 31 and resume at
        // Jan 1 of the same simulation calendar.
        let days: Vec<u32> = if begin <= end {
            (begin..=end).collect()
        } else {
            (begin..=calendar::days_in_year(self.year))
                .chain(1..=end)
                .collect()
        };

        let single_day = days.len() == 1;
        if single_day && period.begin_hour >= period.end_hour {
            return Err(CalendarError::InvalidHourRange {
                begin_hour: period.begin_hour,
                end_hour: period.end_hour,
            });
        }

        let value = match period.availability {
            AvailabilityMode::Unavailable => 0.0,
            AvailabilityMode::Available => 1.0,
            AvailabilityMode::FollowBaseSchedule => return Ok(Vec::new()),
        };

        let mut rules = Vec::with_capacity(days.len());
        for (i, &ordinal) in days.iter().enumerate() {
            let (month, day) = calendar::date_from_day_of_year(self.year, ordinal)?;
            let (begin_hour, end_hour) = if single_day {
                (period.begin_hour, period.end_hour)
            } else if i == 0 {
                (period.begin_hour, 24)
            } else if i == days.len() - 1 {
                (0, period.end_hour)
            } else {
                (0, 24)
            };
            rules.push(DayOverrideRule {
                month,
                day,
                begin_hour,
                end_hour,
                value,
            });
        }
        Ok(rules)
    }

    /// Resolves every period targeting `column` into a coalesced rule set.
    ///
    /// Periods are applied in declaration order into a per-day hour table
    /// (later writes win), then re-emitted as maximal constant-value runs,
    /// so the output never contains overlapping hour ranges. End-uses whose
    /// capability record opts out of overrides are skipped unless the
    /// period covers the entire year.
    pub fn resolve_for_column(
        &self,
        periods: &[UnavailablePeriod],
        column: &str,
        spec: &EndUseSpec,
    ) -> CalendarResult<Vec<DayOverrideRule>> {
        let mut day_slots: BTreeMap<u32, [Option<f64>; 24]> = BTreeMap::new();

        for period in periods.iter().filter(|p| p.column_name == column) {
            if !spec.supports_unavailable_override && !period.spans_full_year() {
                continue;
            }
            for rule in self.resolve(period)? {
                let ordinal = calendar::day_of_year(self.year, rule.month, rule.day)?;
                let slots = day_slots.entry(ordinal).or_insert([None; 24]);
                for hour in rule.begin_hour..rule.end_hour {
                    slots[hour as usize] = Some(rule.value);
                }
            }
        }

        let mut rules = Vec::new();
        for (ordinal, slots) in day_slots {
            let (month, day) = calendar::date_from_day_of_year(self.year, ordinal)?;
            let mut hour = 0u32;
            while hour < 24 {
                match slots[hour as usize] {
                    None => hour += 1,
                    Some(value) => {
                        let begin_hour = hour;
                        while hour < 24 && slots[hour as usize] == Some(value) {
                            hour += 1;
                        }
                        rules.push(DayOverrideRule {
                            month,
                            day,
                            begin_hour,
                            end_hour: hour,
                            value,
                        });
                    }
                }
            }
        }
        Ok(rules)
    }

    /// Applies resolved rules to a schedule, returning a new schedule.
    ///
    /// Every timestep whose hour falls inside a rule range is set to the
    /// rule's value. Application is idempotent.
    pub fn apply(&self, schedule: &Schedule, rules: &[DayOverrideRule]) -> CalendarResult<Schedule> {
        let steps = schedule.steps_per_hour();
        let mut values = schedule.values().to_vec();
        for rule in rules {
            for hour in rule.begin_hour..rule.end_hour {
                let base = calendar::timestep_index(self.year, rule.month, rule.day, hour, steps)?;
                for slot in values.iter_mut().skip(base).take(steps) {
                    *slot = rule.value;
                }
            }
        }
        Ok(schedule.with_values(values))
    }

    fn check_hours(&self, period: &UnavailablePeriod) -> CalendarResult<()> {
        if period.begin_hour > 23 {
            return Err(CalendarError::InvalidHour {
                hour: period.begin_hour,
                max: 23,
            });
        }
        if period.end_hour == 0 || period.end_hour > 24 {
            return Err(CalendarError::InvalidHour {
                hour: period.end_hour,
                max: 24,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ScheduleConfig;
    use crate::core::domain::ScheduleStrategy;
    use crate::services::metrics::annual_equivalent_full_load_hrs;
    use crate::time::calendar::hours_in_year;

    fn period(
        column: &str,
        begin: (u32, u32, u32),
        end: (u32, u32, u32),
        availability: AvailabilityMode,
    ) -> UnavailablePeriod {
        UnavailablePeriod {
            name: "Power Outage".to_string(),
            column_name: column.to_string(),
            begin_month: begin.0,
            begin_day: begin.1,
            begin_hour: begin.2,
            end_month: end.0,
            end_day: end.1,
            end_hour: end.2,
            availability,
        }
    }

    fn all_ones(name: &str, year: i32) -> Schedule {
        Schedule::new(
            name,
            vec![1.0; hours_in_year(year)],
            1,
            year,
            ScheduleStrategy::File,
        )
        .unwrap()
    }

    #[test]
    fn single_day_period_yields_one_rule() {
        let resolver = UnavailablePeriodResolver::new(2007);
        let p = period("occupants", (1, 1, 0), (1, 1, 5), AvailabilityMode::Unavailable);
        let rules = resolver.resolve(&p).unwrap();
        assert_eq!(
            rules,
            vec![DayOverrideRule {
                month: 1,
                day: 1,
                begin_hour: 0,
                end_hour: 5,
                value: 0.0
            }]
        );
    }

    #[test]
    fn multi_day_period_has_partial_first_and_last_days() {
        let resolver = UnavailablePeriodResolver::new(2007);
        let p = period("occupants", (1, 1, 5), (1, 3, 11), AvailabilityMode::Unavailable);
        let rules = resolver.resolve(&p).unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!((rules[0].begin_hour, rules[0].end_hour), (5, 24));
        assert_eq!((rules[1].begin_hour, rules[1].end_hour), (0, 24));
        assert_eq!((rules[2].begin_hour, rules[2].end_hour), (0, 11));
        assert_eq!((rules[2].month, rules[2].day), (1, 3));
    }

    #[test]
    fn rule_count_matches_day_span() {
        let resolver = UnavailablePeriodResolver::new(2007);
        let p = period("occupants", (3, 10, 0), (4, 2, 24), AvailabilityMode::Unavailable);
        let rules = resolver.resolve(&p).unwrap();
        // Mar 10 .. Apr 2 inclusive
        assert_eq!(rules.len(), 22 + 2);
    }

    #[test]
    fn wraparound_period_unrolls_onto_one_year() {
        let resolver = UnavailablePeriodResolver::new(2007);
        let p = period("occupants", (12, 1, 5), (1, 31, 12), AvailabilityMode::Unavailable);
        let rules = resolver.resolve(&p).unwrap();

        // 31 December days plus 31 January days
        assert_eq!(rules.len(), 62);
        assert_eq!((rules[0].month, rules[0].day), (12, 1));
        assert_eq!((rules[0].begin_hour, rules[0].end_hour), (5, 24));
        assert_eq!((rules[30].month, rules[30].day), (12, 31));
        assert_eq!((rules[30].begin_hour, rules[30].end_hour), (0, 24));
        assert_eq!((rules[31].month, rules[31].day), (1, 1));
        assert_eq!((rules[61].month, rules[61].day), (1, 31));
        assert_eq!((rules[61].begin_hour, rules[61].end_hour), (0, 12));

        // Exactly three distinct rule shapes: partial first, full interior,
        // partial last.
        let mut shapes: Vec<(u32, u32)> =
            rules.iter().map(|r| (r.begin_hour, r.end_hour)).collect();
        shapes.sort_unstable();
        shapes.dedup();
        assert_eq!(shapes, vec![(0, 12), (0, 24), (5, 24)]);
    }

    #[test]
    fn leap_day_is_covered_in_leap_years_only() {
        let p = period("refrigerator", (2, 1, 0), (3, 30, 24), AvailabilityMode::Unavailable);

        let leap_rules = UnavailablePeriodResolver::new(2012).resolve(&p).unwrap();
        assert!(leap_rules.iter().any(|r| r.month == 2 && r.day == 29));
        assert_eq!(leap_rules.len(), 29 + 30);

        let rules = UnavailablePeriodResolver::new(2007).resolve(&p).unwrap();
        assert!(!rules.iter().any(|r| r.month == 2 && r.day == 29));
        assert_eq!(rules.len(), 28 + 30);
    }

    #[test]
    fn invalid_dates_and_hours_are_calendar_errors() {
        let resolver = UnavailablePeriodResolver::new(2007);

        let bad_day = period("occupants", (4, 31, 0), (5, 2, 24), AvailabilityMode::Unavailable);
        assert!(matches!(
            resolver.resolve(&bad_day),
            Err(CalendarError::InvalidDate { .. })
        ));

        let empty_hours = period("occupants", (1, 1, 5), (1, 1, 5), AvailabilityMode::Unavailable);
        assert!(matches!(
            resolver.resolve(&empty_hours),
            Err(CalendarError::InvalidHourRange { .. })
        ));

        let bad_hour = period("occupants", (1, 1, 24), (1, 2, 24), AvailabilityMode::Unavailable);
        assert!(matches!(
            resolver.resolve(&bad_hour),
            Err(CalendarError::InvalidHour { .. })
        ));
    }

    #[test]
    fn follow_base_schedule_yields_no_rules() {
        let resolver = UnavailablePeriodResolver::new(2007);
        let p = period("natvent", (1, 1, 0), (6, 30, 24), AvailabilityMode::FollowBaseSchedule);
        assert!(resolver.resolve(&p).unwrap().is_empty());
    }

    #[test]
    fn available_mode_pins_schedule_to_one() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("natvent").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let mut base_values = vec![0.0; 8760];
        base_values[0] = 1.0;
        let base = Schedule::new("natvent", base_values, 1, 2007, ScheduleStrategy::File).unwrap();

        let p = period("natvent", (1, 1, 0), (6, 30, 24), AvailabilityMode::Available);
        let rules = resolver.resolve_for_column(&[p], "natvent", spec).unwrap();
        let result = resolver.apply(&base, &rules).unwrap();

        assert_eq!(result.value_at(3, 15, 12).unwrap(), 1.0);
        assert_eq!(result.value_at(7, 1, 0).unwrap(), 0.0);
    }

    #[test]
    fn overlapping_periods_coalesce_without_duplicate_hours() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("occupants").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let first = period("occupants", (1, 1, 0), (1, 31, 24), AvailabilityMode::Unavailable);
        let second = period("occupants", (1, 25, 0), (2, 28, 24), AvailabilityMode::Unavailable);
        let rules = resolver
            .resolve_for_column(&[first.clone(), second.clone()], "occupants", spec)
            .unwrap();

        // Jan 1 .. Feb 28, one full-day rule per day, no overlaps.
        assert_eq!(rules.len(), 31 + 28);
        assert!(rules
            .iter()
            .all(|r| (r.begin_hour, r.end_hour) == (0, 24) && r.value == 0.0));

        // Zeroed hours match applying the two periods separately.
        let base = all_ones("occupants", 2007);
        let combined = resolver.apply(&base, &rules).unwrap();
        let separate = {
            let a = resolver.apply(&base, &resolver.resolve(&first).unwrap()).unwrap();
            resolver.apply(&a, &resolver.resolve(&second).unwrap()).unwrap()
        };
        assert_eq!(combined.values(), separate.values());
    }

    #[test]
    fn later_declared_period_wins_on_overlap() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("natvent").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let off = period("natvent", (6, 1, 0), (6, 10, 24), AvailabilityMode::Unavailable);
        let on = period("natvent", (6, 5, 0), (6, 7, 24), AvailabilityMode::Available);
        let rules = resolver
            .resolve_for_column(&[off, on], "natvent", spec)
            .unwrap();

        let base = all_ones("natvent", 2007);
        let result = resolver.apply(&base, &rules).unwrap();
        assert_eq!(result.value_at(6, 4, 12).unwrap(), 0.0);
        assert_eq!(result.value_at(6, 6, 12).unwrap(), 1.0);
        assert_eq!(result.value_at(6, 9, 12).unwrap(), 0.0);
    }

    #[test]
    fn application_is_idempotent() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("occupants").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let p = period("occupants", (5, 10, 6), (5, 20, 18), AvailabilityMode::Unavailable);
        let rules = resolver.resolve_for_column(&[p], "occupants", spec).unwrap();

        let base = all_ones("occupants", 2007);
        let once = resolver.apply(&base, &rules).unwrap();
        let twice = resolver.apply(&once, &rules).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn exempt_end_use_ignores_partial_year_periods() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("refrigerator").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let vacancy = period("refrigerator", (1, 1, 0), (1, 31, 24), AvailabilityMode::Unavailable);
        let rules = resolver
            .resolve_for_column(&[vacancy], "refrigerator", spec)
            .unwrap();
        assert!(rules.is_empty());

        let year_round =
            period("refrigerator", (1, 1, 0), (12, 31, 24), AvailabilityMode::Unavailable);
        let rules = resolver
            .resolve_for_column(&[year_round], "refrigerator", spec)
            .unwrap();
        assert_eq!(rules.len(), 365);
    }

    #[test]
    fn outage_zeroes_hours_and_reduces_full_load_hours() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("occupants").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let p = period("occupants", (1, 1, 0), (1, 1, 5), AvailabilityMode::Unavailable);
        let rules = resolver.resolve_for_column(&[p], "occupants", spec).unwrap();
        let base = all_ones("occupants", 2007);
        let result = resolver.apply(&base, &rules).unwrap();

        for hour in 0..5 {
            assert_eq!(result.value_at(1, 1, hour).unwrap(), 0.0);
        }
        assert_eq!(result.value_at(1, 1, 5).unwrap(), 1.0);
        assert_eq!(
            annual_equivalent_full_load_hrs(&result),
            (hours_in_year(2007) - 5) as f64
        );
    }

    #[test]
    fn sub_hourly_application_covers_every_step_of_an_hour() {
        let config = ScheduleConfig::residential_defaults();
        let spec = config.end_use("occupants").unwrap();
        let resolver = UnavailablePeriodResolver::new(2007);

        let base = Schedule::new(
            "occupants",
            vec![1.0; 8760 * 4],
            4,
            2007,
            ScheduleStrategy::File,
        )
        .unwrap();
        let p = period("occupants", (1, 2, 3), (1, 2, 7), AvailabilityMode::Unavailable);
        let rules = resolver.resolve_for_column(&[p], "occupants", spec).unwrap();
        let result = resolver.apply(&base, &rules).unwrap();

        let zeroed: f64 = annual_equivalent_full_load_hrs(&base)
            - annual_equivalent_full_load_hrs(&result);
        assert_eq!(zeroed, 4.0);
    }
}
