//! Rostering domain models.
//!
//! Provides the data types for describing a monthly rostering problem
//! (store hours, employees and their constraints) and its solution
//! (shifts, schedule, coverage report).
//!
//! # Domain Mappings
//!
//! | u-roster | Retail | Clinic | Warehouse |
//! |----------|--------|--------|-----------|
//! | StoreHours | Opening hours | Clinic hours | Dock hours |
//! | Employee | Sales associate | Nurse | Picker |
//! | Shift | Till shift | Ward shift | Pick shift |
//! | Schedule | Monthly rota | Duty roster | Shift plan |

mod calendar;
mod constraint;
mod employee;
mod schedule;
mod store_hours;

pub use calendar::{
    duration_hours, hours_to_duration, minutes_to_duration, OpenDay, StoreCalendar, TimeWindow,
};
pub use constraint::{EmployeeConstraints, DAY_WEIGHT, LENGTH_WEIGHT, TIME_WEIGHT};
pub use employee::Employee;
pub use schedule::{CoverageReport, Schedule, ScheduleOutcome, Shift, UncoveredSlot};
pub use store_hours::{DayHours, StoreHours};
