//! Employee model.
//!
//! Employees are the resources shifts are assigned to. Each carries a
//! monthly hours cap (hard), day/date/time availability (hard), and
//! day/date/time/length preferences (soft).
//!
//! # Precedence
//! Unavailability always beats preference. A weekday listed in both
//! `preferred_days` and `unavailable_days` is unavailable; this is
//! resolved silently, never reported as an error.
//!
//! Time windows can be given per weekday or per date. A date entry
//! replaces the weekday entry for the same concern (available window,
//! preferred window). Blocked ranges accumulate: both the weekday block
//! and the date block apply.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::TimeWindow;

/// An employee that can be assigned shifts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    /// Unique employee identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Monthly hours cap (hours, >= 0).
    pub max_hours_per_month: f64,
    /// Preferred shift length in minutes (> 0 when set).
    #[serde(default)]
    pub preferred_shift_minutes: Option<i64>,
    /// Weekdays the employee likes to work.
    #[serde(default)]
    pub preferred_days: HashSet<Weekday>,
    /// Weekdays the employee cannot work.
    #[serde(default)]
    pub unavailable_days: HashSet<Weekday>,
    /// Preferred time of day.
    #[serde(default)]
    pub preferred_time_window: Option<TimeWindow>,
    /// Specific dates the employee likes to work.
    #[serde(default)]
    pub preferred_dates: BTreeSet<NaiveDate>,
    /// Specific dates the employee cannot work.
    #[serde(default)]
    pub unavailable_dates: BTreeSet<NaiveDate>,
    /// Per-weekday time ranges the employee cannot work.
    #[serde(default)]
    pub unavailable_times: HashMap<Weekday, TimeWindow>,
    /// Per-weekday window the employee must work inside.
    #[serde(default)]
    pub available_times: HashMap<Weekday, TimeWindow>,
    /// Per-weekday preferred time; overrides `preferred_time_window`.
    #[serde(default)]
    pub preferred_times: HashMap<Weekday, TimeWindow>,
    /// Time ranges blocked on specific dates.
    #[serde(default)]
    pub unavailable_times_by_date: BTreeMap<NaiveDate, TimeWindow>,
    /// Window the employee must work inside on specific dates.
    #[serde(default)]
    pub available_times_by_date: BTreeMap<NaiveDate, TimeWindow>,
    /// Preferred time on specific dates; the date also counts as preferred.
    #[serde(default)]
    pub preferred_times_by_date: BTreeMap<NaiveDate, TimeWindow>,
}

impl Employee {
    /// Default monthly cap for a new employee (hours).
    pub const DEFAULT_MAX_HOURS: f64 = 160.0;

    /// Creates an employee with default cap and no preferences.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            max_hours_per_month: Self::DEFAULT_MAX_HOURS,
            preferred_shift_minutes: None,
            preferred_days: HashSet::new(),
            unavailable_days: HashSet::new(),
            preferred_time_window: None,
            preferred_dates: BTreeSet::new(),
            unavailable_dates: BTreeSet::new(),
            unavailable_times: HashMap::new(),
            available_times: HashMap::new(),
            preferred_times: HashMap::new(),
            unavailable_times_by_date: BTreeMap::new(),
            available_times_by_date: BTreeMap::new(),
            preferred_times_by_date: BTreeMap::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the monthly hours cap.
    pub fn with_max_hours(mut self, hours: f64) -> Self {
        self.max_hours_per_month = hours;
        self
    }

    /// Sets the preferred shift length (minutes).
    pub fn with_preferred_shift_minutes(mut self, minutes: i64) -> Self {
        self.preferred_shift_minutes = Some(minutes);
        self
    }

    /// Adds a preferred weekday.
    pub fn with_preferred_day(mut self, day: Weekday) -> Self {
        self.preferred_days.insert(day);
        self
    }

    /// Adds an unavailable weekday.
    pub fn with_unavailable_day(mut self, day: Weekday) -> Self {
        self.unavailable_days.insert(day);
        self
    }

    /// Sets the preferred time of day.
    pub fn with_preferred_time(mut self, window: TimeWindow) -> Self {
        self.preferred_time_window = Some(window);
        self
    }

    /// Adds a preferred date.
    pub fn with_preferred_date(mut self, date: NaiveDate) -> Self {
        self.preferred_dates.insert(date);
        self
    }

    /// Adds an unavailable date.
    pub fn with_unavailable_date(mut self, date: NaiveDate) -> Self {
        self.unavailable_dates.insert(date);
        self
    }

    /// Blocks a time range on a weekday (replaces any existing range).
    pub fn with_unavailable_time(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.unavailable_times.insert(day, window);
        self
    }

    /// Limits work on a weekday to `window`.
    pub fn with_available_time(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.available_times.insert(day, window);
        self
    }

    /// Sets the preferred time for one weekday.
    pub fn with_preferred_time_on(mut self, day: Weekday, window: TimeWindow) -> Self {
        self.preferred_times.insert(day, window);
        self
    }

    /// Blocks a time range on one date.
    pub fn with_unavailable_time_on_date(mut self, date: NaiveDate, window: TimeWindow) -> Self {
        self.unavailable_times_by_date.insert(date, window);
        self
    }

    /// Limits work on one date to `window`.
    pub fn with_available_time_on_date(mut self, date: NaiveDate, window: TimeWindow) -> Self {
        self.available_times_by_date.insert(date, window);
        self
    }

    /// Sets the preferred time for one date.
    pub fn with_preferred_time_on_date(mut self, date: NaiveDate, window: TimeWindow) -> Self {
        self.preferred_times_by_date.insert(date, window);
        self
    }

    /// Blocked time range for a weekday, if any.
    pub fn unavailable_time_on(&self, day: Weekday) -> Option<&TimeWindow> {
        self.unavailable_times.get(&day)
    }

    /// Blocked time ranges on `date`: the weekday block, then the date block.
    pub fn blocked_times_on(&self, date: NaiveDate) -> impl Iterator<Item = &TimeWindow> {
        self.unavailable_time_on(date.weekday())
            .into_iter()
            .chain(self.unavailable_times_by_date.get(&date))
    }

    /// Window the employee must work inside on `date`, if limited.
    pub fn available_window_on(&self, date: NaiveDate) -> Option<&TimeWindow> {
        self.available_times_by_date
            .get(&date)
            .or_else(|| self.available_times.get(&date.weekday()))
    }

    /// Preferred time on `date`: date entry, then weekday entry, then the
    /// general preferred window.
    pub fn preferred_time_on(&self, date: NaiveDate) -> Option<&TimeWindow> {
        self.preferred_times_by_date
            .get(&date)
            .or_else(|| self.preferred_times.get(&date.weekday()))
            .or(self.preferred_time_window.as_ref())
    }

    /// Display label: name, or id if unnamed.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
