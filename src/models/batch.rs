//! Batch model.
//!
//! A batch is a group of jobs the printer runs together in one machine run.
//! Its duration is that of its slowest member.

use serde::{Deserialize, Serialize};

use super::PrintJob;

/// One machine run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Member job IDs in scan (sorted-key) order.
    pub job_ids: Vec<String>,
    /// Combined member volume.
    pub used_volume: f64,
    /// Longest member print time (minutes).
    pub duration: i64,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a job, updating volume and duration.
    pub fn push(&mut self, job: &PrintJob) {
        self.job_ids.push(job.id.clone());
        self.used_volume += job.volume;
        self.duration = self.duration.max(job.print_time);
    }

    /// Number of member jobs.
    #[inline]
    pub fn len(&self) -> usize {
        self.job_ids.len()
    }

    /// Whether the batch has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.job_ids.is_empty()
    }
}
