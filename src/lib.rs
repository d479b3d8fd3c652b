//! Batch scheduling for 3D-printing job queues.
//!
//! Assigns a linear print order to a set of print jobs and computes the
//! total machine time, grouping jobs into batches that respect the
//! printer's combined-volume and item-count limits.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `PrintJob`, `PrinterConstraints`, `Batch`,
//!   `Schedule`, `Violation`
//! - **`scheduler`**: `BatchScheduler` (greedy batch fill) and `BatchKpi`
//! - **`validation`**: Input integrity checks and schedule auditing
//! - **`records`**: Field-checked conversion of raw JSON records
//! - **`error`**: `ScheduleError`
//!
//! # Example
//!
//! ```
//! use u_print_batch::models::{PrintJob, PrinterConstraints};
//!
//! let jobs = vec![
//!     PrintJob::new("M1").with_volume(250.0).with_priority(1).with_print_time(180),
//!     PrintJob::new("M2").with_volume(200.0).with_priority(1).with_print_time(150),
//!     PrintJob::new("M3").with_volume(180.0).with_priority(2).with_print_time(120),
//! ];
//! let schedule = u_print_batch::schedule(&jobs, &PrinterConstraints::new(300.0, 2)).unwrap();
//! assert_eq!(schedule.print_order, vec!["M2", "M1", "M3"]);
//! assert_eq!(schedule.total_time, 450);
//! ```

pub mod error;
pub mod models;
pub mod records;
pub mod scheduler;
pub mod validation;

pub use error::ScheduleError;

use models::{PrintJob, PrinterConstraints, Schedule};
use scheduler::BatchScheduler;

/// Schedules jobs with a default [`BatchScheduler`].
pub fn schedule(
    jobs: &[PrintJob],
    constraints: &PrinterConstraints,
) -> Result<Schedule, ScheduleError> {
    BatchScheduler::new().schedule(jobs, constraints)
}
