//! Run policy for schedule generation.
//!
//! Lengths are whole minutes so the config stays plain serde data.
//! Missing fields fall back to [`SchedulerConfig::default`], which makes
//! partial JSON configs valid.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::models::minutes_to_duration;

/// Policy constants for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Target slice length (minutes).
    pub default_shift_minutes: i64,
    /// Shortest trailing slice emitted on its own (minutes).
    /// Shorter remainders are merged into the previous slice.
    pub min_shift_minutes: i64,
}

impl SchedulerConfig {
    /// Default target slice length: 4 hours.
    pub const DEFAULT_SHIFT_MINUTES: i64 = 240;
    /// Default minimum slice length: 2 hours.
    pub const MIN_SHIFT_MINUTES: i64 = 120;
    /// Longest accepted length: one full day, since windows never cross
    /// midnight.
    pub const MAX_SHIFT_MINUTES: i64 = 24 * 60;

    /// Creates the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target slice length (minutes).
    pub fn with_default_shift_minutes(mut self, minutes: i64) -> Self {
        self.default_shift_minutes = minutes;
        self
    }

    /// Sets the minimum slice length (minutes).
    pub fn with_min_shift_minutes(mut self, minutes: i64) -> Self {
        self.min_shift_minutes = minutes;
        self
    }

    /// Target slice length.
    pub fn default_shift(&self) -> Duration {
        minutes_to_duration(self.default_shift_minutes)
    }

    /// Minimum slice length.
    pub fn min_shift(&self) -> Duration {
        minutes_to_duration(self.min_shift_minutes)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_shift_minutes: Self::DEFAULT_SHIFT_MINUTES,
            min_shift_minutes: Self::MIN_SHIFT_MINUTES,
        }
    }
}
