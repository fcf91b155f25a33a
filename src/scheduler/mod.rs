//! Greedy shift assignment and schedule KPIs.
//!
//! # Algorithm
//!
//! `AssignmentEngine` walks the month's open days in order, slices each
//! day, and hands every slice to the best-ranked eligible employee. It is
//! deterministic and single-pass, not optimal: full coverage and perfect
//! balance are best-effort.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes coverage and hour distribution for display.
//!
//! # References
//!
//! - Ernst et al. (2004), "Staff scheduling and rostering: A review of
//!   applications, methods and models"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 13

mod engine;
mod kpi;
pub mod ranking;

pub use engine::{AssignmentEngine, ScheduleRequest};
pub use kpi::ScheduleKpi;
