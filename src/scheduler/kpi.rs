//! Schedule quality metrics (KPIs).
//!
//! Computes the post-generation summary a caller shows to the user:
//! how much of the month is covered and how evenly hours are spread.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled hours | Total length of all shifts |
//! | Filled / unfilled hours | Split by whether a shift is assigned |
//! | Coverage rate | filled / scheduled |
//! | Utilization | Assigned hours / monthly cap, per employee |
//! | Hour spread | max - min assigned hours across the roster |

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{duration_hours, Employee, Schedule};

/// Schedule summary indicators.
///
/// All hour values are fractional hours.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Total shift hours (filled + unfilled).
    pub scheduled_hours: f64,
    /// Hours assigned to an employee.
    pub filled_hours: f64,
    /// Hours left uncovered.
    pub unfilled_hours: f64,
    /// Fraction of scheduled hours that are filled (0.0..1.0).
    pub coverage_rate: f64,
    /// Assigned hours per roster employee (0 for unassigned ones).
    pub hours_by_employee: BTreeMap<String, f64>,
    /// Assigned hours / monthly cap per roster employee.
    pub utilization_by_employee: BTreeMap<String, f64>,
    /// Mean utilization across the roster.
    pub avg_utilization: f64,
    /// Difference between the most and least assigned hours.
    pub hour_spread: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and the roster it was built from.
    ///
    /// # Arguments
    /// * `schedule` - The generated schedule.
    /// * `employees` - The roster (for caps and zero-hour employees).
    pub fn calculate(schedule: &Schedule, employees: &[Employee]) -> Self {
        let mut scheduled_hours = 0.0;
        let mut unfilled_hours = 0.0;
        for shift in &schedule.shifts {
            let hours = duration_hours(shift.duration());
            scheduled_hours += hours;
            if !shift.is_filled() {
                unfilled_hours += hours;
            }
        }
        let filled_hours = scheduled_hours - unfilled_hours;

        let allocated = schedule.hours_allocated();
        let mut hours_by_employee = BTreeMap::new();
        let mut utilization_by_employee = BTreeMap::new();
        for emp in employees {
            let hours = allocated
                .get(&emp.id)
                .map(|d| duration_hours(*d))
                .unwrap_or(0.0);
            let utilization = if emp.max_hours_per_month > 0.0 {
                hours / emp.max_hours_per_month
            } else {
                0.0
            };
            hours_by_employee.insert(emp.id.clone(), hours);
            utilization_by_employee.insert(emp.id.clone(), utilization);
        }

        let avg_utilization = if utilization_by_employee.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_employee.values().sum();
            sum / utilization_by_employee.len() as f64
        };

        let hour_spread = {
            let max = hours_by_employee.values().copied().fold(f64::MIN, f64::max);
            let min = hours_by_employee.values().copied().fold(f64::MAX, f64::min);
            if hours_by_employee.is_empty() {
                0.0
            } else {
                max - min
            }
        };

        let coverage_rate = if scheduled_hours <= 0.0 {
            1.0
        } else {
            filled_hours / scheduled_hours
        };

        Self {
            scheduled_hours,
            filled_hours,
            unfilled_hours,
            coverage_rate,
            hours_by_employee,
            utilization_by_employee,
            avg_utilization,
            hour_spread,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_spread_hours: f64) -> bool {
        self.coverage_rate >= min_coverage && self.hour_spread <= max_spread_hours
    }
}
