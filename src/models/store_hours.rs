//! Store operating hours.
//!
//! A weekday table (Monday = 0 .. Sunday = 6) plus per-date overrides.
//! Overrides win over the weekday table: `Some(window)` opens the date
//! with those hours, `None` closes it.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TimeWindow;

/// Hours for one weekday.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayHours {
    /// Whether the store opens on this weekday.
    pub is_open: bool,
    /// Opening time (inclusive).
    pub open: NaiveTime,
    /// Closing time (exclusive).
    pub close: NaiveTime,
}

impl DayHours {
    /// An open day with the given hours.
    pub fn open(open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            is_open: true,
            open,
            close,
        }
    }

    /// A closed day.
    pub fn closed() -> Self {
        Self {
            is_open: false,
            open: NaiveTime::MIN,
            close: NaiveTime::MIN,
        }
    }

    /// Open window, or `None` if closed.
    pub fn window(&self) -> Option<TimeWindow> {
        self.is_open.then(|| TimeWindow::new(self.open, self.close))
    }
}

impl Default for DayHours {
    fn default() -> Self {
        Self::closed()
    }
}

/// Store operating hours for a scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreHours {
    /// Weekday table, indexed by `Weekday::num_days_from_monday()`.
    pub days: [DayHours; 7],
    /// Date-specific hours; `None` = closed that date.
    #[serde(default)]
    pub date_overrides: BTreeMap<NaiveDate, Option<TimeWindow>>,
}

impl StoreHours {
    /// Creates a table with every day closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a weekday with the given hours.
    pub fn set_hours(&mut self, day: Weekday, open: NaiveTime, close: NaiveTime) {
        self.days[day.num_days_from_monday() as usize] = DayHours::open(open, close);
    }

    /// Builder: opens a weekday with the given hours.
    pub fn with_hours(mut self, day: Weekday, open: NaiveTime, close: NaiveTime) -> Self {
        self.set_hours(day, open, close);
        self
    }

    /// Closes a weekday.
    pub fn set_closed(&mut self, day: Weekday) {
        self.days[day.num_days_from_monday() as usize] = DayHours::closed();
    }

    /// Overrides the hours of a specific date.
    pub fn set_hours_for_date(&mut self, date: NaiveDate, open: NaiveTime, close: NaiveTime) {
        self.date_overrides
            .insert(date, Some(TimeWindow::new(open, close)));
    }

    /// Marks a specific date as closed.
    pub fn set_closed_for_date(&mut self, date: NaiveDate) {
        self.date_overrides.insert(date, None);
    }

    /// Removes a date override, falling back to the weekday table.
    pub fn remove_date_override(&mut self, date: NaiveDate) {
        self.date_overrides.remove(&date);
    }

    /// Hours configured for a weekday.
    pub fn day(&self, day: Weekday) -> &DayHours {
        &self.days[day.num_days_from_monday() as usize]
    }

    /// Whether any weekday is open.
    pub fn has_open_weekday(&self) -> bool {
        self.days.iter().any(|d| d.is_open)
    }

    /// Resolved open window for a date (override first, then weekday).
    pub fn window_for(&self, date: NaiveDate) -> Option<TimeWindow> {
        match self.date_overrides.get(&date) {
            Some(over) => *over,
            None => self.day(date.weekday()).window(),
        }
    }

    /// Whether the store is open on a date.
    pub fn is_open_on(&self, date: NaiveDate) -> bool {
        self.window_for(date).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_default_is_closed() {
        let hours = StoreHours::new();
        assert!(!hours.has_open_weekday());
        assert!(hours.day(Weekday::Mon).window().is_none());
    }

    #[test]
    fn test_weekday_table() {
        let hours = StoreHours::new()
            .with_hours(Weekday::Mon, t(9), t(17))
            .with_hours(Weekday::Sat, t(10), t(14));

        assert!(hours.has_open_weekday());
        assert_eq!(
            hours.day(Weekday::Sat).window(),
            Some(TimeWindow::new(t(10), t(14)))
        );
        assert!(!hours.day(Weekday::Sun).is_open);

        // 2024-03-04 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert!(hours.is_open_on(monday));
        assert!(!hours.is_open_on(monday.succ_opt().unwrap()));
    }

    #[test]
    fn test_override_precedence() {
        let mut hours = StoreHours::new().with_hours(Weekday::Mon, t(9), t(17));
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        hours.set_closed_for_date(monday);
        hours.set_hours_for_date(tuesday, t(12), t(16));
        assert!(!hours.is_open_on(monday));
        assert_eq!(hours.window_for(tuesday), Some(TimeWindow::new(t(12), t(16))));

        hours.remove_date_override(monday);
        assert_eq!(hours.window_for(monday), Some(TimeWindow::new(t(9), t(17))));
    }

    #[test]
    fn test_set_closed() {
        let mut hours = StoreHours::new().with_hours(Weekday::Mon, t(9), t(17));
        hours.set_closed(Weekday::Mon);
        assert!(!hours.has_open_weekday());
    }

    #[test]
    fn test_json_shape() {
        let mut hours = StoreHours::new().with_hours(Weekday::Mon, t(9), t(17));
        hours.set_closed_for_date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());

        let json = serde_json::to_value(&hours).unwrap();
        assert_eq!(json["days"][0]["is_open"], true);
        assert_eq!(json["days"][0]["open"], "09:00:00");
        assert!(json["date_overrides"]["2024-03-04"].is_null());

        let back: StoreHours = serde_json::from_value(json).unwrap();
        assert_eq!(back, hours);
    }
}
