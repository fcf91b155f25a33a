//! Input validation for rostering runs.
//!
//! Checks structural integrity of store hours, roster, and run policy
//! before any assignment work. Detects:
//! - Duplicate or empty employee IDs
//! - Negative or non-finite monthly caps
//! - Malformed time windows (`start >= end`)
//! - Shift lengths that are non-positive or longer than a day
//!
//! All issues are collected, not just the first.
//!
//! Overlapping `preferred_days` and `unavailable_days` is deliberately
//! not an issue: unavailability wins.

use chrono::Weekday;
use std::collections::HashSet;
use std::fmt;

use crate::config::SchedulerConfig;
use crate::models::{Employee, StoreHours, TimeWindow};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two employees share the same ID.
    DuplicateId,
    /// An employee has an empty ID.
    EmptyId,
    /// Monthly cap is negative, NaN, or infinite.
    NegativeMaxHours,
    /// A time window has `start >= end`.
    InvalidTimeWindow,
    /// A shift length is out of range.
    InvalidShiftLength,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Validates the inputs of a rostering run.
///
/// Checks:
/// 1. Run policy: positive default shift length, non-negative minimum,
///    both at most [`SchedulerConfig::MAX_SHIFT_MINUTES`]
/// 2. Store weekday hours: open days have `open < close`
/// 3. Store date overrides: open overrides have `start < end`
/// 4. Employee IDs are non-empty and unique
/// 5. Monthly caps are finite and >= 0
/// 6. Preferred shift lengths are in `1..=MAX_SHIFT_MINUTES`
/// 7. Every employee time window (preferred, available, unavailable;
///    general, per weekday, per date) has `start < end`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    store_hours: &StoreHours,
    employees: &[Employee],
    config: &SchedulerConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    validate_config(config, &mut errors);
    validate_store_hours(store_hours, &mut errors);

    let mut ids = HashSet::new();
    for (pos, emp) in employees.iter().enumerate() {
        if emp.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyId,
                format!("Employee at position {pos} has no ID"),
            ));
        } else if !ids.insert(emp.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate employee ID: {}", emp.id),
            ));
        }

        validate_employee(emp, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

const MAX_MINUTES: i64 = SchedulerConfig::MAX_SHIFT_MINUTES;

fn validate_config(config: &SchedulerConfig, errors: &mut Vec<ValidationError>) {
    if !(1..=MAX_MINUTES).contains(&config.default_shift_minutes) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidShiftLength,
            format!(
                "Default shift length must be in 1..={MAX_MINUTES} min, got {} min",
                config.default_shift_minutes
            ),
        ));
    }
    if !(0..=MAX_MINUTES).contains(&config.min_shift_minutes) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidShiftLength,
            format!(
                "Minimum shift length must be in 0..={MAX_MINUTES} min, got {} min",
                config.min_shift_minutes
            ),
        ));
    }
}

fn validate_store_hours(store_hours: &StoreHours, errors: &mut Vec<ValidationError>) {
    for day in WEEKDAYS {
        let hours = store_hours.day(day);
        if hours.is_open && hours.open >= hours.close {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeWindow,
                format!(
                    "Store hours for {day} open at {} but close at {}",
                    hours.open, hours.close
                ),
            ));
        }
    }

    for (date, window) in &store_hours.date_overrides {
        if let Some(w) = window {
            check_window(w, || format!("Store hours override for {date}"), errors);
        }
    }
}

fn validate_employee(emp: &Employee, errors: &mut Vec<ValidationError>) {
    if !emp.max_hours_per_month.is_finite() || emp.max_hours_per_month < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeMaxHours,
            format!(
                "Employee '{}' has invalid max hours per month: {}",
                emp.id, emp.max_hours_per_month
            ),
        ));
    }

    if let Some(minutes) = emp.preferred_shift_minutes {
        if !(1..=MAX_MINUTES).contains(&minutes) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidShiftLength,
                format!(
                    "Employee '{}' preferred shift length must be in 1..={MAX_MINUTES} min, got {minutes} min",
                    emp.id
                ),
            ));
        }
    }

    if let Some(w) = &emp.preferred_time_window {
        check_window(w, || format!("Employee '{}' preferred time", emp.id), errors);
    }

    // Fixed weekday order keeps the error list deterministic
    for day in WEEKDAYS {
        let weekly = [
            ("unavailable", emp.unavailable_times.get(&day)),
            ("available", emp.available_times.get(&day)),
            ("preferred", emp.preferred_times.get(&day)),
        ];
        for (what, window) in weekly {
            if let Some(w) = window {
                check_window(w, || format!("Employee '{}' {what} time on {day}", emp.id), errors);
            }
        }
    }

    let by_date = [
        ("unavailable", &emp.unavailable_times_by_date),
        ("available", &emp.available_times_by_date),
        ("preferred", &emp.preferred_times_by_date),
    ];
    for (what, windows) in by_date {
        for (date, w) in windows {
            check_window(w, || format!("Employee '{}' {what} time on {date}", emp.id), errors);
        }
    }
}

fn check_window(
    window: &TimeWindow,
    context: impl FnOnce() -> String,
    errors: &mut Vec<ValidationError>,
) {
    if !window.is_valid() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeWindow,
            format!(
                "{} starts at {} but ends at {}",
                context(),
                window.start,
                window.end
            ),
        ));
    }
}
