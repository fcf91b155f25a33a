//! Greedy shift assignment engine.
//!
//! # Algorithm
//!
//! 1. Validate inputs and resolve the store calendar for the month.
//! 2. For each open day, slice the open window into shift-sized slices.
//! 3. For each slice, build the pool of eligible employees: available on
//!    the date and time, with remaining monthly capacity >= slice length.
//! 4. Empty pool: emit an unfilled shift and record it in the coverage
//!    report. Otherwise assign to the best-ranked candidate
//!    (see [`ranking`](super::ranking)) and add the slice to their
//!    running hours.
//!
//! Single pass, no backtracking: an early assignment is never revisited,
//! even when it leaves a later slice unfilled.
//!
//! # Complexity
//! O(d * s * e) where d=open days, s=slices/day, e=employees.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ranking::{self, Candidate};
use crate::config::SchedulerConfig;
use crate::error::ConfigurationError;
use crate::models::{
    duration_hours, CoverageReport, Employee, EmployeeConstraints, Schedule, ScheduleOutcome,
    Shift, StoreCalendar, StoreHours, TimeWindow,
};
use crate::slicing::ShiftSlicer;
use crate::validation::validate_input;

/// Input container for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Target year.
    pub year: i32,
    /// Target month (1..=12).
    pub month: u32,
    /// Store operating hours.
    pub store_hours: StoreHours,
    /// Roster, in tie-break order.
    pub employees: Vec<Employee>,
    /// Run policy.
    #[serde(default)]
    pub config: SchedulerConfig,
}

impl ScheduleRequest {
    /// Creates a request with the default policy.
    pub fn new(year: i32, month: u32, store_hours: StoreHours, employees: Vec<Employee>) -> Self {
        Self {
            year,
            month,
            store_hours,
            employees,
            config: SchedulerConfig::default(),
        }
    }

    /// Sets the run policy.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }
}

/// Per-employee assigned time for one run, indexed by roster position.
#[derive(Debug)]
struct RunningHours {
    assigned: Vec<Duration>,
}

impl RunningHours {
    fn new(roster_len: usize) -> Self {
        Self {
            assigned: vec![Duration::zero(); roster_len],
        }
    }

    fn get(&self, index: usize) -> Duration {
        self.assigned[index]
    }

    fn add(&mut self, index: usize, duration: Duration) {
        self.assigned[index] += duration;
    }
}

/// Greedy, deterministic shift assignment engine.
///
/// Holds only the run policy. All per-run state is created inside
/// [`generate`](Self::generate), so one engine can serve concurrent runs.
///
/// # Example
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use u_roster::models::{Employee, StoreHours};
/// use u_roster::scheduler::AssignmentEngine;
///
/// let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let five = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
/// let hours = StoreHours::new().with_hours(Weekday::Mon, nine, five);
/// let roster = vec![
///     Employee::new("A").with_max_hours(40.0),
///     Employee::new("B").with_max_hours(40.0),
/// ];
///
/// let outcome = AssignmentEngine::new().generate(2024, 3, &hours, &roster).unwrap();
/// // 4 Mondays in March 2024, two 4h slices each
/// assert_eq!(outcome.schedule.shift_count(), 8);
/// assert!(outcome.coverage.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AssignmentEngine {
    config: SchedulerConfig,
}

impl AssignmentEngine {
    /// Creates an engine with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the run policy.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Run policy.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Generates the schedule for `year`-`month`.
    ///
    /// # Errors
    /// [`ConfigurationError`] if the inputs fail validation, the month is
    /// invalid, or the store has no open days that month. No shifts are
    /// produced in that case.
    pub fn generate(
        &self,
        year: i32,
        month: u32,
        store_hours: &StoreHours,
        employees: &[Employee],
    ) -> Result<ScheduleOutcome, ConfigurationError> {
        let span = tracing::info_span!("generate_schedule", year, month, roster = employees.len());
        let _guard = span.enter();

        validate_input(store_hours, employees, &self.config).map_err(|errors| {
            tracing::error!(issues = errors.len(), "Rejected scheduling input");
            ConfigurationError::InvalidInput(errors)
        })?;

        let calendar = StoreCalendar::new(year, month, store_hours).inspect_err(|e| {
            tracing::error!(error = %e, "Cannot resolve store calendar");
        })?;

        let constraints: Vec<EmployeeConstraints<'_>> =
            employees.iter().map(EmployeeConstraints::new).collect();
        let slicer = ShiftSlicer::from_config(&self.config);
        let target = self.config.default_shift();

        let mut running = RunningHours::new(employees.len());
        let mut schedule = Schedule::new(year, month);
        let mut coverage = CoverageReport::default();

        for day in calendar.open_days() {
            let slices = slicer.slice(day.window, target);
            tracing::debug!(date = %day.date, slices = slices.len(), "Slicing open day");

            for slice in slices {
                match select_employee(&constraints, &running, day.date, &slice) {
                    Some(index) => {
                        running.add(index, slice.duration());
                        schedule.add_shift(Shift::assigned(day.date, slice, constraints[index].id()));
                    }
                    None => {
                        tracing::debug!(
                            date = %day.date,
                            start = %slice.start,
                            end = %slice.end,
                            "No eligible employee for slice"
                        );
                        coverage.record(day.date, slice);
                        schedule.add_shift(Shift::unfilled(day.date, slice));
                    }
                }
            }
        }

        if !coverage.is_complete() {
            tracing::warn!(
                unfilled = coverage.unfilled.len(),
                uncovered_hours = duration_hours(coverage.uncovered_time()),
                "Schedule leaves slices uncovered"
            );
        }
        tracing::info!(
            shifts = schedule.shift_count(),
            unfilled = coverage.unfilled.len(),
            "Schedule generated"
        );

        Ok(ScheduleOutcome { schedule, coverage })
    }

    /// Generates from a request, using the request's policy.
    pub fn schedule_request(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleOutcome, ConfigurationError> {
        let engine = Self {
            config: request.config,
        };
        engine.generate(
            request.year,
            request.month,
            &request.store_hours,
            &request.employees,
        )
    }
}

/// Picks the roster index to take `slice` on `date`, if anyone can.
fn select_employee(
    constraints: &[EmployeeConstraints<'_>],
    running: &RunningHours,
    date: NaiveDate,
    slice: &TimeWindow,
) -> Option<usize> {
    let length = slice.duration();

    let pool: Vec<Candidate> = constraints
        .iter()
        .enumerate()
        .filter(|(i, c)| {
            c.is_available_for(date, slice) && c.remaining_capacity(running.get(*i)) >= length
        })
        .map(|(i, c)| Candidate::new(i, c.preference_score(date, slice), running.get(i)))
        .collect();

    ranking::select_best(&pool).map(|c| c.roster_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveTime, Weekday};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    /// Mon–Fri 09:00–17:00.
    fn weekday_store() -> StoreHours {
        let mut hours = StoreHours::new();
        for day in &WEEKDAYS[..5] {
            hours.set_hours(*day, t(9), t(17));
        }
        hours
    }

    /// Weekday store open only Mon 4 – Fri 8 March 2024.
    fn one_week_store() -> StoreHours {
        let mut hours = weekday_store();
        for day in 1..=31 {
            if !(4..=8).contains(&day) {
                hours.set_closed_for_date(d(day));
            }
        }
        hours
    }

    fn assignee(shift: &Shift) -> Option<&str> {
        shift.employee_id.as_deref()
    }

    fn assert_invariants(outcome: &ScheduleOutcome, store: &StoreHours, roster: &[Employee]) {
        let schedule = &outcome.schedule;

        // Coverage: each open day is partitioned by its shifts
        let calendar = StoreCalendar::new(schedule.year, schedule.month, store).unwrap();
        let by_day = schedule.by_day();
        assert_eq!(by_day.len(), calendar.open_days().count());
        for day in calendar.open_days() {
            let shifts = &by_day[&day.date];
            assert_eq!(shifts[0].start, day.window.start);
            assert_eq!(shifts[shifts.len() - 1].end, day.window.end);
            for pair in shifts.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
            }
        }

        // Capacity and availability
        let allocated = schedule.hours_allocated();
        for emp in roster {
            let c = EmployeeConstraints::new(emp);
            let total = allocated.get(&emp.id).copied().unwrap_or_else(Duration::zero);
            assert!(total <= c.max_capacity(), "{} over cap", emp.id);
            for s in schedule.by_employee(&emp.id) {
                assert!(c.is_available_for(s.date, &s.window()), "{} unavailable", emp.id);
            }
        }

        // Coverage report mirrors unfilled shifts
        let unfilled: Vec<_> = schedule.unfilled().map(|s| (s.date, s.window())).collect();
        let reported: Vec<_> = outcome
            .coverage
            .unfilled
            .iter()
            .map(|u| (u.date, u.window))
            .collect();
        assert_eq!(unfilled, reported);
    }

    #[test]
    fn test_balanced_week() {
        let store = one_week_store();
        let roster = vec![
            Employee::new("A").with_max_hours(40.0),
            Employee::new("B").with_max_hours(40.0),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let schedule = &outcome.schedule;

        assert_eq!(schedule.shift_count(), 10);
        assert!(outcome.coverage.is_complete());
        let hours = schedule.hours_allocated();
        assert_eq!(hours["A"], Duration::hours(20));
        assert_eq!(hours["B"], Duration::hours(20));
        // Alternates: A takes mornings, B afternoons
        for day in schedule.by_day().values() {
            assert_eq!(assignee(day[0]), Some("A"));
            assert_eq!(assignee(day[1]), Some("B"));
        }
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_month_caps_leave_remainder_unfilled() {
        let store = weekday_store();
        let roster = vec![
            Employee::new("A").with_max_hours(40.0),
            Employee::new("B").with_max_hours(40.0),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let hours = outcome.schedule.hours_allocated();

        // 21 weekdays * 2 slices = 42 slices; 20 can be filled
        assert_eq!(outcome.schedule.shift_count(), 42);
        assert_eq!(hours["A"], Duration::hours(40));
        assert_eq!(hours["B"], Duration::hours(40));
        assert_eq!(outcome.coverage.unfilled.len(), 22);
        assert_eq!(outcome.coverage.uncovered_time(), Duration::hours(88));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_unavailable_monday_goes_to_other_employee() {
        let store = weekday_store();
        let roster = vec![
            Employee::new("A").with_unavailable_day(Weekday::Mon),
            Employee::new("B"),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        for s in &outcome.schedule.shifts {
            if s.date.weekday() == Weekday::Mon {
                assert_eq!(assignee(s), Some("B"));
            }
        }
        assert!(outcome.coverage.is_complete());
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_unavailable_monday_without_cover_is_unfilled() {
        let store = weekday_store();
        let roster = vec![Employee::new("A").with_unavailable_day(Weekday::Mon)];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let mondays: Vec<_> = outcome
            .schedule
            .shifts
            .iter()
            .filter(|s| s.date.weekday() == Weekday::Mon)
            .collect();
        assert_eq!(mondays.len(), 8); // 4 Mondays, 2 slices each
        assert!(mondays.iter().all(|s| !s.is_filled()));
        assert_eq!(outcome.coverage.dates(), vec![d(4), d(11), d(18), d(25)]);
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_cap_reached_mid_month() {
        let store = weekday_store();
        let roster = vec![
            Employee::new("A").with_max_hours(12.0),
            Employee::new("B").with_max_hours(160.0),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let a_shifts = outcome.schedule.by_employee("A");
        assert_eq!(a_shifts.len(), 3);
        assert!((outcome.schedule.total_hours_for_employee("A") - 12.0).abs() < 1e-10);

        // After A's last shift, every slice goes to B
        let last_a = a_shifts[a_shifts.len() - 1];
        let after: Vec<_> = outcome
            .schedule
            .shifts
            .iter()
            .filter(|s| (s.date, s.start) > (last_a.date, last_a.start))
            .collect();
        assert!(!after.is_empty());
        assert!(after.iter().all(|s| assignee(s) == Some("B")));
        assert!(outcome.coverage.is_complete());
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_exact_capacity_fit() {
        let store = one_week_store();
        let roster = vec![Employee::new("A").with_max_hours(4.0)];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        assert_eq!(outcome.schedule.by_employee("A").len(), 1);
        assert_eq!(outcome.coverage.unfilled.len(), 9);
    }

    #[test]
    fn test_zero_cap_never_assigned() {
        let store = one_week_store();
        let roster = vec![Employee::new("A").with_max_hours(0.0), Employee::new("B")];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        assert!(outcome.schedule.by_employee("A").is_empty());
        assert_eq!(outcome.schedule.by_employee("B").len(), 10);
    }

    #[test]
    fn test_preferred_day_dominates_balance() {
        let store = one_week_store();
        let roster = vec![
            Employee::new("A"),
            Employee::new("B").with_preferred_day(Weekday::Tue),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let tuesday = outcome.schedule.shifts_on(d(5));
        assert!(tuesday.iter().all(|s| assignee(s) == Some("B")));
    }

    #[test]
    fn test_load_balancing_after_preference() {
        let store = weekday_store();
        let roster = vec![
            Employee::new("A").with_preferred_day(Weekday::Mon),
            Employee::new("B"),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        // Fri 1: A, B. Mon 4: A, A (preference). Tue 5: B is behind → B, B.
        let friday: Vec<_> = outcome.schedule.shifts_on(d(1)).into_iter().map(assignee).collect();
        let monday: Vec<_> = outcome.schedule.shifts_on(d(4)).into_iter().map(assignee).collect();
        let tuesday: Vec<_> = outcome.schedule.shifts_on(d(5)).into_iter().map(assignee).collect();
        assert_eq!(friday, vec![Some("A"), Some("B")]);
        assert_eq!(monday, vec![Some("A"), Some("A")]);
        assert_eq!(tuesday, vec![Some("B"), Some("B")]);
    }

    #[test]
    fn test_preferred_time_windows() {
        let store = one_week_store();
        let roster = vec![
            Employee::new("A").with_preferred_time(TimeWindow::new(t(13), t(17))),
            Employee::new("B").with_preferred_time(TimeWindow::new(t(9), t(13))),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        for day in outcome.schedule.by_day().values() {
            assert_eq!(assignee(day[0]), Some("B"));
            assert_eq!(assignee(day[1]), Some("A"));
        }
    }

    #[test]
    fn test_unavailable_time_range_respected() {
        let store = one_week_store();
        let roster = vec![
            Employee::new("A").with_unavailable_time(Weekday::Wed, TimeWindow::new(t(8), t(12))),
            Employee::new("B"),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let wednesday: Vec<_> = outcome.schedule.shifts_on(d(6)).into_iter().map(assignee).collect();
        assert_eq!(wednesday[0], Some("B"));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_unavailable_date_respected() {
        let store = one_week_store();
        let roster = vec![Employee::new("A").with_unavailable_date(d(6))];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        assert_eq!(outcome.coverage.dates(), vec![d(6)]);
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_empty_roster_leaves_everything_unfilled() {
        let store = one_week_store();
        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &[]).unwrap();
        assert_eq!(outcome.schedule.shift_count(), 10);
        assert_eq!(outcome.coverage.unfilled.len(), 10);
        assert!(outcome.schedule.hours_allocated().is_empty());
    }

    #[test]
    fn test_custom_shift_lengths() {
        let store = one_week_store();
        let roster = vec![Employee::new("A"), Employee::new("B"), Employee::new("C")];
        let config = SchedulerConfig::new()
            .with_default_shift_minutes(180)
            .with_min_shift_minutes(60);

        let outcome = AssignmentEngine::new()
            .with_config(config)
            .generate(2024, 3, &store, &roster)
            .unwrap();
        // 8h → 3h + 3h + 2h
        let monday = outcome.schedule.shifts_on(d(4));
        assert_eq!(monday.len(), 3);
        assert_eq!(monday[2].duration(), Duration::hours(2));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_deterministic() {
        let store = weekday_store();
        let roster = vec![
            Employee::new("A").with_max_hours(50.0).with_preferred_day(Weekday::Fri),
            Employee::new("B").with_max_hours(30.0).with_unavailable_day(Weekday::Wed),
            Employee::new("C")
                .with_max_hours(70.0)
                .with_preferred_time(TimeWindow::new(t(13), t(17))),
        ];
        let engine = AssignmentEngine::new();

        let first = engine.generate(2024, 3, &store, &roster).unwrap();
        let second = engine.generate(2024, 3, &store, &roster).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first.schedule).unwrap(),
            serde_json::to_string(&second.schedule).unwrap()
        );
    }

    #[test]
    fn test_no_open_days_is_error() {
        let roster = vec![Employee::new("A")];
        let err = AssignmentEngine::new()
            .generate(2024, 3, &StoreHours::new(), &roster)
            .unwrap_err();
        assert_eq!(err, ConfigurationError::NoOpenDays { year: 2024, month: 3 });
    }

    #[test]
    fn test_override_only_open_day_is_scheduled() {
        let saturday = d(9);
        let mut store = StoreHours::new();
        store.set_hours_for_date(saturday, t(10), t(14));
        let roster = vec![Employee::new("A")];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        assert_eq!(outcome.schedule.shift_count(), 1);
        let shift = &outcome.schedule.shifts[0];
        assert_eq!(shift.date, saturday);
        assert_eq!(shift.window(), TimeWindow::new(t(10), t(14)));
        assert_eq!(assignee(shift), Some("A"));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_huge_cap_acts_as_unlimited() {
        let store = weekday_store();
        let roster = vec![
            Employee::new("A").with_max_hours(1e13),
            Employee::new("B").with_max_hours(f64::MAX),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        assert!(outcome.coverage.is_complete());
        let hours = outcome.schedule.hours_allocated();
        assert_eq!(hours["A"] + hours["B"], Duration::hours(8 * 21));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_oversized_shift_lengths_are_rejected() {
        let roster = vec![Employee::new("A").with_preferred_shift_minutes(i64::MAX)];
        let engine = AssignmentEngine::new()
            .with_config(SchedulerConfig::new().with_default_shift_minutes(i64::MAX / 2));

        let err = engine.generate(2024, 3, &weekday_store(), &roster).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidInput(ref issues) if issues.len() == 2));

        let request: ScheduleRequest = serde_json::from_value(serde_json::json!({
            "year": 2024,
            "month": 3,
            "store_hours": weekday_store(),
            "employees": [],
            "config": {"default_shift_minutes": 4611686018427387903_i64}
        }))
        .unwrap();
        assert!(matches!(
            AssignmentEngine::new().schedule_request(&request),
            Err(ConfigurationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_available_window_limits_assignment() {
        let store = one_week_store();
        let roster = vec![
            Employee::new("A").with_available_time(Weekday::Mon, TimeWindow::new(t(13), t(17))),
            Employee::new("B").with_available_time_on_date(d(5), TimeWindow::new(t(9), t(13))),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let monday: Vec<_> = outcome.schedule.shifts_on(d(4)).into_iter().map(assignee).collect();
        let tuesday: Vec<_> = outcome.schedule.shifts_on(d(5)).into_iter().map(assignee).collect();
        // Monday morning: A is limited to afternoons, so B; afternoon is A's
        assert_eq!(monday, vec![Some("B"), Some("A")]);
        // Tuesday afternoon: B is limited to the morning that date
        assert_eq!(tuesday[1], Some("A"));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_available_window_without_cover_is_unfilled() {
        let store = one_week_store();
        let roster =
            vec![Employee::new("A").with_available_time_on_date(d(6), TimeWindow::new(t(9), t(12)))];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        // 09-13 is not inside 09-12, and neither is 13-17
        assert_eq!(outcome.coverage.dates(), vec![d(6)]);
        assert_eq!(outcome.coverage.unfilled.len(), 2);
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_date_blocked_time_respected() {
        let store = one_week_store();
        let roster = vec![
            Employee::new("A").with_unavailable_time_on_date(d(7), TimeWindow::new(t(15), t(16))),
            Employee::new("B"),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let thursday: Vec<_> = outcome.schedule.shifts_on(d(7)).into_iter().map(assignee).collect();
        assert_eq!(thursday[1], Some("B"));
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_per_day_preferred_times() {
        let store = one_week_store();
        let afternoon = TimeWindow::new(t(13), t(17));
        let roster = vec![
            Employee::new("A").with_preferred_time_on(Weekday::Wed, afternoon),
            Employee::new("B").with_preferred_time_on_date(d(8), afternoon),
        ];

        let outcome = AssignmentEngine::new().generate(2024, 3, &store, &roster).unwrap();
        let wednesday: Vec<_> = outcome.schedule.shifts_on(d(6)).into_iter().map(assignee).collect();
        let friday: Vec<_> = outcome.schedule.shifts_on(d(8)).into_iter().map(assignee).collect();
        assert_eq!(wednesday[1], Some("A"));
        // A preferred time on a date makes the whole date preferred
        assert_eq!(friday, vec![Some("B"), Some("B")]);
        assert_invariants(&outcome, &store, &roster);
    }

    #[test]
    fn test_invalid_roster_is_error() {
        let roster = vec![Employee::new("A").with_max_hours(-1.0)];
        let err = AssignmentEngine::new()
            .generate(2024, 3, &weekday_store(), &roster)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidInput(ref issues) if issues.len() == 1));
    }

    #[test]
    fn test_invalid_month_is_error() {
        let err = AssignmentEngine::new()
            .generate(2024, 13, &weekday_store(), &[])
            .unwrap_err();
        assert_eq!(err, ConfigurationError::InvalidMonth { year: 2024, month: 13 });
    }

    #[test]
    fn test_schedule_request_from_json() {
        let request: ScheduleRequest = serde_json::from_value(serde_json::json!({
            "year": 2024,
            "month": 3,
            "store_hours": {
                "days": [
                    {"is_open": true, "open": "09:00:00", "close": "15:00:00"},
                    {"is_open": false, "open": "00:00:00", "close": "00:00:00"},
                    {"is_open": false, "open": "00:00:00", "close": "00:00:00"},
                    {"is_open": false, "open": "00:00:00", "close": "00:00:00"},
                    {"is_open": false, "open": "00:00:00", "close": "00:00:00"},
                    {"is_open": false, "open": "00:00:00", "close": "00:00:00"},
                    {"is_open": false, "open": "00:00:00", "close": "00:00:00"}
                ]
            },
            "employees": [
                {"id": "A", "name": "Ann", "max_hours_per_month": 100},
                {"id": "B", "name": "Ben", "max_hours_per_month": 100}
            ],
            "config": {"default_shift_minutes": 180}
        }))
        .unwrap();

        let outcome = AssignmentEngine::new().schedule_request(&request).unwrap();
        // 4 Mondays, 6h each → two 3h slices
        assert_eq!(outcome.schedule.shift_count(), 8);
        assert_eq!(outcome.schedule.hours_allocated()["A"], Duration::hours(12));
        assert_eq!(outcome.schedule.hours_allocated()["B"], Duration::hours(12));

        let json = serde_json::to_value(&outcome.schedule).unwrap();
        assert_eq!(json["shifts"][0]["date"], "2024-03-04");
        assert_eq!(json["shifts"][0]["employee_id"], "A");
    }

    #[test]
    fn test_random_rosters_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..25 {
            let mut store = StoreHours::new();
            for day in WEEKDAYS {
                if rng.random_bool(0.7) {
                    let open = rng.random_range(6..12);
                    let close = rng.random_range(open + 1..=22);
                    store.set_hours(day, t(open), t(close));
                }
            }
            if !store.has_open_weekday() {
                store.set_hours(Weekday::Sat, t(10), t(16));
            }

            let roster: Vec<Employee> = (0..rng.random_range(0..6))
                .map(|i| {
                    let mut e = Employee::new(format!("E{i}"))
                        .with_max_hours(rng.random_range(0..120) as f64);
                    for day in WEEKDAYS {
                        if rng.random_bool(0.2) {
                            e = e.with_unavailable_day(day);
                        }
                        if rng.random_bool(0.2) {
                            e = e.with_preferred_day(day);
                        }
                        if rng.random_bool(0.15) {
                            let start = rng.random_range(6..20);
                            let end = rng.random_range(start + 1..=23);
                            e = if rng.random_bool(0.5) {
                                e.with_available_time(day, TimeWindow::new(t(start), t(end)))
                            } else {
                                e.with_unavailable_time(day, TimeWindow::new(t(start), t(end)))
                            };
                        }
                    }
                    e
                })
                .collect();

            let config = SchedulerConfig::new()
                .with_default_shift_minutes(rng.random_range(2..=8) * 60)
                .with_min_shift_minutes(rng.random_range(0..=3) * 60);
            let engine = AssignmentEngine::new().with_config(config);

            let outcome = engine.generate(2024, 5, &store, &roster).unwrap();
            assert_invariants(&outcome, &store, &roster);
            assert_eq!(outcome, engine.generate(2024, 5, &store, &roster).unwrap());

            let totals: BTreeMap<_, _> = outcome.schedule.hours_allocated();
            assert!(totals.keys().all(|id| roster.iter().any(|e| &e.id == id)));
        }
    }
}
