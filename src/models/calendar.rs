//! Time windows and the store operating calendar.
//!
//! # Time Model
//! Wall-clock times are `chrono::NaiveTime` within a single day. Windows
//! never cross midnight: a valid window has `start < end`.
//!
//! # Calendar Resolution
//! A date is an operating day iff:
//! - It has a date override with `Some(window)`, OR
//! - It has no override AND its weekday is open in the weekday table.
//!
//! An override of `None` closes the date regardless of the weekday table.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::StoreHours;
use crate::error::ConfigurationError;

/// A time interval [start, end) within one day.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: NaiveTime,
    /// Interval end (exclusive).
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Creates a window from whole hours and minutes, e.g. `hm(9, 0, 17, 30)`.
    ///
    /// Returns `None` if any component is out of range.
    pub fn hm(start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> Option<Self> {
        Some(Self {
            start: NaiveTime::from_hms_opt(start_h, start_m, 0)?,
            end: NaiveTime::from_hms_opt(end_h, end_m, 0)?,
        })
    }

    /// Whether `start < end`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether a time falls within this window.
    #[inline]
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the intersection with another window (zero if disjoint).
    pub fn overlap_with(&self, other: &Self) -> Duration {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if end > start {
            end - start
        } else {
            Duration::zero()
        }
    }
}

/// One operating day of the store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenDay {
    /// Calendar date.
    pub date: NaiveDate,
    /// Open window for that date.
    pub window: TimeWindow,
}

/// Operating calendar of one store for one month.
///
/// Holds only its inputs. [`open_days`](Self::open_days) builds a fresh
/// lazy iterator on each call, so the sequence is restartable.
#[derive(Debug, Clone, Copy)]
pub struct StoreCalendar<'a> {
    first: NaiveDate,
    month: u32,
    hours: &'a StoreHours,
}

impl<'a> StoreCalendar<'a> {
    /// Resolves the calendar for `year`-`month`.
    ///
    /// # Errors
    /// - [`ConfigurationError::InvalidMonth`] for a month outside 1..=12
    ///   or an unrepresentable year.
    /// - [`ConfigurationError::NoOpenDays`] if no date of the month
    ///   resolves to open, counting date overrides.
    pub fn new(year: i32, month: u32, hours: &'a StoreHours) -> Result<Self, ConfigurationError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(ConfigurationError::InvalidMonth { year, month })?;

        let calendar = Self { first, month, hours };

        if calendar.open_days().next().is_none() {
            return Err(ConfigurationError::NoOpenDays { year, month });
        }

        Ok(calendar)
    }

    /// Year of the calendar.
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month of the calendar (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// All dates of the month, open or not.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + 'a {
        let month = self.month;
        self.first
            .iter_days()
            .take_while(move |d| d.month() == month)
    }

    /// Operating days of the month in chronological order.
    pub fn open_days(&self) -> impl Iterator<Item = OpenDay> + 'a {
        let hours = self.hours;
        self.dates().filter_map(move |date| {
            hours
                .window_for(date)
                .map(|window| OpenDay { date, window })
        })
    }

    /// Total open time across the month.
    pub fn open_time(&self) -> Duration {
        self.open_days()
            .fold(Duration::zero(), |acc, d| acc + d.window.duration())
    }
}

/// Largest whole-second count a `Duration` can hold.
const MAX_SECONDS: i64 = i64::MAX / 1000;

/// Converts fractional hours to a duration at second precision.
///
/// Non-finite input maps to zero. Values beyond the `Duration` range
/// saturate to [`Duration::MAX`] / [`Duration::MIN`], so a very large cap
/// behaves as unlimited.
pub fn hours_to_duration(hours: f64) -> Duration {
    if !hours.is_finite() {
        return Duration::zero();
    }
    let seconds = (hours * 3600.0).round();
    if seconds.abs() >= MAX_SECONDS as f64 {
        return saturated(seconds < 0.0);
    }
    Duration::try_seconds(seconds as i64).unwrap_or_else(|| saturated(seconds < 0.0))
}

/// Converts whole minutes to a duration, saturating out of range.
pub fn minutes_to_duration(minutes: i64) -> Duration {
    Duration::try_minutes(minutes).unwrap_or_else(|| saturated(minutes < 0))
}

fn saturated(negative: bool) -> Duration {
    if negative {
        Duration::MIN
    } else {
        Duration::MAX
    }
}

/// Converts a duration to fractional hours.
pub fn duration_hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 3600.0
}
