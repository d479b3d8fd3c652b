//! Print job model.
//!
//! A print job is a single model to be printed. Jobs are grouped into
//! batches that the printer runs concurrently.

use serde::{Deserialize, Serialize};

/// A 3D-printing job to be scheduled.
///
/// # Units
/// `volume` is in the same unit as [`PrinterConstraints::max_volume`]
/// (typically cm³). `print_time` is in minutes.
///
/// [`PrinterConstraints::max_volume`]: super::PrinterConstraints::max_volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintJob {
    /// Unique job identifier.
    pub id: String,
    /// Build volume occupied by the model.
    pub volume: f64,
    /// Scheduling priority (lower = printed earlier).
    pub priority: i64,
    /// Estimated print duration (minutes).
    pub print_time: i64,
}

impl PrintJob {
    /// Creates a new job with the given ID and zeroed fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            volume: 0.0,
            priority: 0,
            print_time: 0,
        }
    }

    /// Sets the build volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the estimated print time (minutes).
    pub fn with_print_time(mut self, print_time: i64) -> Self {
        self.print_time = print_time;
        self
    }

    /// Sort key: priority first, then shortest print time.
    #[inline]
    pub fn sort_key(&self) -> (i64, i64) {
        (self.priority, self.print_time)
    }
}
