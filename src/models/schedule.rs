//! Schedule (solution) model.
//!
//! A schedule is the linear print order of all jobs plus the total machine
//! time needed to run the batches that order was built from.

use serde::{Deserialize, Serialize};

use super::Batch;
use crate::error::ScheduleError;

/// A complete print schedule.
///
/// `print_order` is the concatenation of batches in formation order.
/// `total_time` is the sum of batch durations (minutes).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Job IDs in print order.
    pub print_order: Vec<String>,
    /// Total machine time (minutes).
    pub total_time: i64,
}

/// A problem found when auditing a schedule against its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related job ID, or empty when the violation concerns the whole schedule.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// An input job is absent from the print order.
    MissingJob,
    /// A job ID appears more than once in the print order.
    DuplicateJob,
    /// The print order names a job that was not in the input.
    UnknownJob,
    /// A replayed batch exceeds the printer's volume or item limit.
    CapacityExceeded,
    /// Batch members are not in sort-key order (input order on ties).
    OrderViolation,
    /// `total_time` disagrees with the replayed batch durations.
    TimeMismatch,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }

    /// Creates a missing job violation.
    pub fn missing_job(job_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        let message = format!("Job '{job_id}' is not in the print order");
        Self::new(ViolationType::MissingJob, job_id, message)
    }

    /// Creates a duplicate job violation.
    pub fn duplicate_job(job_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        let message = format!("Job '{job_id}' appears more than once");
        Self::new(ViolationType::DuplicateJob, job_id, message)
    }

    /// Creates an unknown job violation.
    pub fn unknown_job(job_id: impl Into<String>) -> Self {
        let job_id = job_id.into();
        let message = format!("Job '{job_id}' is not an input job");
        Self::new(ViolationType::UnknownJob, job_id, message)
    }

    /// Creates a capacity exceeded violation.
    pub fn capacity_exceeded(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::CapacityExceeded, job_id, message)
    }

    /// Creates a batch order violation.
    pub fn out_of_order(job_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::OrderViolation, job_id, message)
    }

    /// Creates a violation for batch durations that overflow `i64`.
    pub fn time_overflow(actual: i64) -> Self {
        Self::new(
            ViolationType::TimeMismatch,
            "",
            format!("total_time is {actual}, batches add up to more than {}", i64::MAX),
        )
    }

    /// Creates a total time mismatch violation.
    pub fn time_mismatch(expected: i64, actual: i64) -> Self {
        Self::new(
            ViolationType::TimeMismatch,
            "",
            format!("total_time is {actual}, batches add up to {expected}"),
        )
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule by flattening batches in formation order.
    ///
    /// # Errors
    /// [`ScheduleError::TimeOverflow`] if the batch durations do not fit `i64`.
    pub fn from_batches(batches: &[Batch]) -> Result<Self, ScheduleError> {
        let total_time = batches
            .iter()
            .enumerate()
            .try_fold(0i64, |total, (index, b)| {
                total
                    .checked_add(b.duration)
                    .ok_or(ScheduleError::TimeOverflow { batch: index })
            })?;

        Ok(Self {
            print_order: batches
                .iter()
                .flat_map(|b| b.job_ids.iter().cloned())
                .collect(),
            total_time,
        })
    }

    /// Sum of batch durations, `None` on overflow.
    pub fn total_time_of(batches: &[Batch]) -> Option<i64> {
        batches
            .iter()
            .try_fold(0i64, |total, b| total.checked_add(b.duration))
    }

    /// Number of scheduled jobs.
    pub fn job_count(&self) -> usize {
        self.print_order.len()
    }

    /// Zero-based print position of a job.
    pub fn position_of(&self, job_id: &str) -> Option<usize> {
        self.print_order.iter().position(|id| id == job_id)
    }

    /// Whether a job is in the print order.
    pub fn contains(&self, job_id: &str) -> bool {
        self.position_of(job_id).is_some()
    }

    /// Serializes to the `{"print_order": [...], "total_time": n}` record.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Like [`Schedule::to_json`], indented.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
