//! Normalized, queryable view of one employee's constraints.
//!
//! Wraps an [`Employee`] for the duration of a run and answers the
//! three questions the assignment engine asks: can this employee work
//! here, how much do they want to, and how much capacity is left.
//!
//! # Preference Score
//! Sum of:
//! - [`DAY_WEIGHT`] if the date is preferred (weekday, specific date, or
//!   a date with its own preferred time) and the employee is available
//!   that date,
//! - [`TIME_WEIGHT`] if the slice overlaps the preferred time for that
//!   date by at least half of the slice's length,
//! - [`LENGTH_WEIGHT`] if the slice is no longer than the preferred
//!   shift length.
//!
//! A day match alone outranks time + length together, and a time match
//! outranks a length match.

use chrono::{Datelike, Duration, NaiveDate};

use super::{hours_to_duration, minutes_to_duration, Employee, TimeWindow};

/// Score for working on a preferred day or date.
pub const DAY_WEIGHT: i32 = 4;
/// Score for a slice inside the preferred time of day.
pub const TIME_WEIGHT: i32 = 2;
/// Score for a slice that fits the preferred shift length.
pub const LENGTH_WEIGHT: i32 = 1;

/// Read-only constraint queries over one employee.
#[derive(Debug, Clone, Copy)]
pub struct EmployeeConstraints<'a> {
    employee: &'a Employee,
    max_capacity: Duration,
    preferred_length: Option<Duration>,
}

impl<'a> EmployeeConstraints<'a> {
    /// Wraps an employee record.
    pub fn new(employee: &'a Employee) -> Self {
        Self {
            employee,
            max_capacity: hours_to_duration(employee.max_hours_per_month.max(0.0)),
            preferred_length: employee.preferred_shift_minutes.map(minutes_to_duration),
        }
    }

    /// The wrapped employee.
    pub fn employee(&self) -> &'a Employee {
        self.employee
    }

    /// Employee identifier.
    pub fn id(&self) -> &'a str {
        &self.employee.id
    }

    /// Monthly cap as a duration.
    pub fn max_capacity(&self) -> Duration {
        self.max_capacity
    }

    /// Whether the employee can work at all on `date`.
    ///
    /// False iff the weekday is unavailable or the date itself is.
    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.employee.unavailable_days.contains(&date.weekday())
            && !self.employee.unavailable_dates.contains(&date)
    }

    /// Whether the employee can work `window` on `date`.
    ///
    /// On top of [`is_available`](Self::is_available): `window` must not
    /// overlap any blocked range for the date, and must lie inside the
    /// available window for the date when one is set.
    pub fn is_available_for(&self, date: NaiveDate, window: &TimeWindow) -> bool {
        if !self.is_available(date) {
            return false;
        }
        if self
            .employee
            .blocked_times_on(date)
            .any(|blocked| blocked.overlaps(window))
        {
            return false;
        }
        self.employee
            .available_window_on(date)
            .map_or(true, |available| available.covers(window))
    }

    /// Whether `date` is a preferred day. Unavailability wins.
    pub fn prefers(&self, date: NaiveDate) -> bool {
        self.is_available(date)
            && (self.employee.preferred_days.contains(&date.weekday())
                || self.employee.preferred_dates.contains(&date)
                || self.employee.preferred_times_by_date.contains_key(&date))
    }

    /// Preference score for working `window` on `date`; higher is better.
    pub fn preference_score(&self, date: NaiveDate, window: &TimeWindow) -> i32 {
        let mut score = 0;

        if self.prefers(date) {
            score += DAY_WEIGHT;
        }

        if let Some(preferred) = self.employee.preferred_time_on(date) {
            // overlap >= duration / 2, kept in integer seconds
            let overlap = preferred.overlap_with(window).num_seconds();
            if overlap > 0 && overlap * 2 >= window.duration().num_seconds() {
                score += TIME_WEIGHT;
            }
        }

        if let Some(length) = self.preferred_length {
            if window.duration() <= length {
                score += LENGTH_WEIGHT;
            }
        }

        score
    }

    /// Capacity left given `current` assigned time. May be negative.
    pub fn remaining_capacity(&self, current: Duration) -> Duration {
        self.max_capacity - current
    }
}
