//! Monthly shift rostering for the U-Engine ecosystem.
//!
//! Turns store operating hours and an employee roster into a month of
//! shifts that cover the store's open hours while respecting each
//! employee's availability and monthly hours cap, and leaning toward
//! their preferred days, times, and shift lengths.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `StoreHours`, `StoreCalendar`,
//!   `Employee`, `EmployeeConstraints`, `Shift`, `Schedule`,
//!   `CoverageReport`
//! - **`slicing`**: `ShiftSlicer`, splitting an open window into shifts
//! - **`scheduler`**: `AssignmentEngine` (greedy allocator) and `ScheduleKpi`
//! - **`validation`**: Input integrity checks (IDs, caps, time windows)
//! - **`config`**: Run policy (`SchedulerConfig`)
//! - **`error`**: `ConfigurationError`
//!
//! # Architecture
//!
//! Pure and synchronous: one call in, one `ScheduleOutcome` out. No I/O
//! and no shared mutable state, so concurrent runs never interfere.
//! Events are emitted through `tracing`; installing a subscriber is up
//! to the host.

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod slicing;
pub mod validation;
