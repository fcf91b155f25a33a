//! Candidate ranking for slice assignment.
//!
//! Rules are applied in sequence; each later rule only breaks ties left
//! by the earlier ones:
//! 1. Highest preference score
//! 2. Fewest hours assigned so far in the run (load balancing)
//! 3. Earliest roster position (deterministic final tie-breaker)
//!
//! Ranking is a pure comparison over plain candidate records, so the
//! same pool always yields the same winner.

use chrono::Duration;
use std::cmp::Ordering;

/// An eligible employee for one slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Position in the input roster.
    pub roster_index: usize,
    /// Preference score for the slice (higher = better).
    pub score: i32,
    /// Time assigned so far in the run.
    pub assigned: Duration,
}

impl Candidate {
    /// Creates a candidate record.
    pub fn new(roster_index: usize, score: i32, assigned: Duration) -> Self {
        Self {
            roster_index,
            score,
            assigned,
        }
    }
}

/// Orders candidates best-first.
///
/// `Ordering::Less` means `a` ranks ahead of `b`.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.assigned.cmp(&b.assigned))
        .then_with(|| a.roster_index.cmp(&b.roster_index))
}

/// Returns the best-ranked candidate, or `None` for an empty pool.
pub fn select_best(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().min_by(|a, b| compare(a, b))
}
