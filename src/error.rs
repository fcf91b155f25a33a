//! Fatal configuration errors.
//!
//! Every variant is raised before any assignment work begins. Partial
//! coverage is not an error; see [`CoverageReport`](crate::models::CoverageReport).

use thiserror::Error;

use crate::validation::ValidationError;

/// A problem with the run's inputs that prevents generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// Month outside 1..=12 or year not representable.
    #[error("invalid target month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// The store is closed every day of the target month.
    #[error("store has no open days in {year}-{month:02}")]
    NoOpenDays { year: i32, month: u32 },

    /// Input records failed validation.
    #[error("invalid scheduling input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

impl ConfigurationError {
    /// Validation issues carried by this error (empty for other variants).
    pub fn issues(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl From<Vec<ValidationError>> for ConfigurationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
