//! Error type for scheduling calls.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failure of a single scheduling call.
///
/// Every variant aborts the call; no partial schedule is returned.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A job record is malformed.
    #[error("invalid job '{job_id}': {field} {reason}")]
    Validation {
        job_id: String,
        field: &'static str,
        reason: String,
    },

    /// The printer constraints are malformed.
    #[error("invalid printer constraints: {field} {reason}")]
    Config { field: &'static str, reason: String },

    /// A job can never be admitted to any batch.
    #[error("job '{job_id}' cannot be batched: volume {volume} exceeds max_volume {max_volume}")]
    Scheduling {
        job_id: String,
        volume: f64,
        max_volume: f64,
    },

    /// Batch durations add up to more than `i64::MAX` minutes.
    #[error("total_time overflows at batch {batch}")]
    TimeOverflow { batch: usize },

    /// Raw input is not well-formed JSON, or its envelope has the wrong shape.
    #[error("malformed input: {0}")]
    Input(#[from] serde_json::Error),
}

impl From<ValidationError> for ScheduleError {
    fn from(err: ValidationError) -> Self {
        if err.kind.is_config() {
            ScheduleError::Config {
                field: err.field,
                reason: err.message,
            }
        } else {
            ScheduleError::Validation {
                job_id: err.entity_id,
                field: err.field,
                reason: err.message,
            }
        }
    }
}
