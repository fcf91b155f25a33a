//! Shift slicing.
//!
//! Decomposes one day's open window into candidate shift windows.
//!
//! # Algorithm
//!
//! For a window of length `L` and target length `d`:
//! 1. If `L <= d`, emit the whole window as one slice.
//! 2. Otherwise emit `floor(L / d)` full slices left to right.
//! 3. A remainder shorter than the minimum shift length is merged into
//!    the last full slice; a longer one becomes its own trailing slice.
//!
//! Slices always partition the window: no gaps, no overlaps.

use chrono::Duration;

use crate::config::SchedulerConfig;
use crate::models::TimeWindow;

/// Splits open windows into shift-sized slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSlicer {
    min_shift: Duration,
}

impl ShiftSlicer {
    /// Creates a slicer with the given minimum trailing slice length.
    pub fn new(min_shift: Duration) -> Self {
        Self { min_shift }
    }

    /// Creates a slicer from a run policy.
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.min_shift())
    }

    /// Minimum trailing slice length.
    pub fn min_shift(&self) -> Duration {
        self.min_shift
    }

    /// Slices `window` into shifts of length `target`.
    ///
    /// A `target` under one second (including non-positive ones) yields
    /// the whole window as one slice. An invalid (empty) window yields no
    /// slices.
    pub fn slice(&self, window: TimeWindow, target: Duration) -> Vec<TimeWindow> {
        if !window.is_valid() {
            return Vec::new();
        }

        let total = window.duration();
        if target < Duration::seconds(1) || total <= target {
            return vec![window];
        }

        let full = total.num_seconds() / target.num_seconds();
        let remainder = total - target * full as i32;

        let mut slices = Vec::with_capacity(full as usize + 1);
        let mut cursor = window.start;
        for _ in 0..full {
            let end = cursor + target;
            slices.push(TimeWindow::new(cursor, end));
            cursor = end;
        }

        if remainder > Duration::zero() {
            if remainder < self.min_shift {
                if let Some(last) = slices.last_mut() {
                    last.end = window.end;
                }
            } else {
                slices.push(TimeWindow::new(cursor, window.end));
            }
        }

        slices
    }
}

impl Default for ShiftSlicer {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}
