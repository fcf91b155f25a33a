//! Schedule (solution) model.
//!
//! A schedule is the ordered list of shifts generated for one month.
//! Every slice of every open day appears exactly once, either assigned
//! to an employee or left unfilled. Per-day and per-employee views are
//! projections recomputed from `shifts`; nothing else is stored.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{duration_hours, TimeWindow};

/// A shift on one date, assigned or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shift {
    /// Calendar date.
    pub date: NaiveDate,
    /// Start time (inclusive).
    pub start: NaiveTime,
    /// End time (exclusive).
    pub end: NaiveTime,
    /// Assigned employee; `None` = uncovered slot.
    pub employee_id: Option<String>,
}

impl Shift {
    /// Creates an assigned shift.
    pub fn assigned(date: NaiveDate, window: TimeWindow, employee_id: impl Into<String>) -> Self {
        Self {
            date,
            start: window.start,
            end: window.end,
            employee_id: Some(employee_id.into()),
        }
    }

    /// Creates an uncovered shift.
    pub fn unfilled(date: NaiveDate, window: TimeWindow) -> Self {
        Self {
            date,
            start: window.start,
            end: window.end,
            employee_id: None,
        }
    }

    /// Time window of this shift.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Duration (end - start).
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an employee is assigned.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.employee_id.is_some()
    }

    /// Whether this shift is assigned to `employee_id`.
    pub fn is_for(&self, employee_id: &str) -> bool {
        self.employee_id.as_deref() == Some(employee_id)
    }
}

/// A complete monthly schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Schedule {
    /// Year.
    pub year: i32,
    /// Month (1..=12).
    pub month: u32,
    /// Shifts in chronological order (date, then start).
    pub shifts: Vec<Shift>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            shifts: Vec::new(),
        }
    }

    /// Appends a shift.
    ///
    /// Callers append in chronological order; the engine always does.
    pub fn add_shift(&mut self, shift: Shift) {
        debug_assert!(self
            .shifts
            .last()
            .map_or(true, |last| (last.date, last.start) <= (shift.date, shift.start)));
        self.shifts.push(shift);
    }

    /// Shifts grouped by date, each group in start order.
    pub fn by_day(&self) -> BTreeMap<NaiveDate, Vec<&Shift>> {
        let mut days: BTreeMap<NaiveDate, Vec<&Shift>> = BTreeMap::new();
        for s in &self.shifts {
            days.entry(s.date).or_default().push(s);
        }
        days
    }

    /// Shifts on one date.
    pub fn shifts_on(&self, date: NaiveDate) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.date == date).collect()
    }

    /// Shifts assigned to one employee, in order.
    pub fn by_employee(&self, employee_id: &str) -> Vec<&Shift> {
        self.shifts.iter().filter(|s| s.is_for(employee_id)).collect()
    }

    /// Total assigned time per employee (filled shifts only).
    pub fn hours_allocated(&self) -> BTreeMap<String, Duration> {
        let mut totals: BTreeMap<String, Duration> = BTreeMap::new();
        for s in &self.shifts {
            if let Some(id) = &s.employee_id {
                let entry = totals.entry(id.clone()).or_insert_with(Duration::zero);
                *entry += s.duration();
            }
        }
        totals
    }

    /// Total hours assigned to one employee.
    pub fn total_hours_for_employee(&self, employee_id: &str) -> f64 {
        let total = self
            .by_employee(employee_id)
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.duration());
        duration_hours(total)
    }

    /// Uncovered shifts.
    pub fn unfilled(&self) -> impl Iterator<Item = &Shift> {
        self.shifts.iter().filter(|s| !s.is_filled())
    }

    /// Number of shifts.
    pub fn shift_count(&self) -> usize {
        self.shifts.len()
    }

    /// Whether every shift is assigned.
    pub fn is_fully_covered(&self) -> bool {
        self.shifts.iter().all(Shift::is_filled)
    }
}

/// A slice that no eligible employee could take.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct UncoveredSlot {
    /// Date of the slice.
    pub date: NaiveDate,
    /// Slice window.
    pub window: TimeWindow,
}

/// Run-level list of unfilled slices.
///
/// Partial coverage is a warning, not an error: the schedule is still
/// returned and this report tells the caller what to flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageReport {
    /// Unfilled slices in chronological order.
    pub unfilled: Vec<UncoveredSlot>,
}

impl CoverageReport {
    /// Records an unfilled slice.
    pub fn record(&mut self, date: NaiveDate, window: TimeWindow) {
        self.unfilled.push(UncoveredSlot { date, window });
    }

    /// Whether every slice was filled.
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }

    /// Total uncovered time.
    pub fn uncovered_time(&self) -> Duration {
        self.unfilled
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.window.duration())
    }

    /// Dates with at least one unfilled slice.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.unfilled.iter().map(|s| s.date).collect();
        dates.dedup();
        dates
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleOutcome {
    /// Generated schedule.
    pub schedule: Schedule,
    /// Slices left unfilled.
    pub coverage: CoverageReport,
}
