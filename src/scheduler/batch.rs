//! Greedy capacity-constrained batch scheduler.
//!
//! # Algorithm
//!
//! 1. Stable-sort jobs by `(priority, print_time)`, both ascending.
//! 2. Start an empty batch and scan the remaining pool in sorted order,
//!    admitting every job that still fits the volume and item limits.
//! 3. Emit the batch (its IDs in scan order, its duration = slowest member),
//!    drop its members from the pool, and repeat until the pool is empty.
//!
//! A pass that admits nothing means the remaining jobs can never be printed
//! under the given constraints; the scheduler fails instead of looping.
//!
//! # Complexity
//! O(n²) worst case: every pass rescans the remaining pool.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::error::ScheduleError;
use crate::models::{Batch, PrintJob, PrinterConstraints, Schedule};
use crate::records;
use crate::validation::{constraint_errors, job_errors};

/// Input container for scheduling.
///
/// Mirrors the `{"jobs": [...], "constraints": {...}}` input record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRequest {
    /// Jobs to schedule, in input order.
    pub jobs: Vec<PrintJob>,
    /// Printer capacity limits.
    pub constraints: PrinterConstraints,
}

impl ScheduleRequest {
    /// Creates a new schedule request.
    pub fn new(jobs: Vec<PrintJob>, constraints: PrinterConstraints) -> Self {
        Self { jobs, constraints }
    }

    /// Parses a request from its JSON record.
    ///
    /// A missing or mistyped constraint field is a [`ScheduleError::Config`],
    /// a missing or mistyped job field a [`ScheduleError::Validation`];
    /// [`ScheduleError::Input`] is left for malformed JSON.
    pub fn from_json(input: &str) -> Result<Self, ScheduleError> {
        let (jobs, constraints) = records::request_from_json(input)?;
        Ok(Self { jobs, constraints })
    }

    /// Replaces the constraints.
    pub fn with_constraints(mut self, constraints: PrinterConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// Greedy batch scheduler for a single printer.
///
/// Stateless: one instance can serve any number of independent calls,
/// from any thread.
///
/// # Example
///
/// ```
/// use u_print_batch::models::{PrintJob, PrinterConstraints};
/// use u_print_batch::scheduler::BatchScheduler;
///
/// let jobs = vec![
///     PrintJob::new("M1").with_volume(100.0).with_priority(1).with_print_time(120),
///     PrintJob::new("M2").with_volume(150.0).with_priority(1).with_print_time(90),
///     PrintJob::new("M3").with_volume(120.0).with_priority(1).with_print_time(150),
/// ];
/// let constraints = PrinterConstraints::new(300.0, 2);
///
/// let schedule = BatchScheduler::new().schedule(&jobs, &constraints).unwrap();
/// assert_eq!(schedule.print_order, vec!["M2", "M1", "M3"]);
/// assert_eq!(schedule.total_time, 270);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchScheduler;

impl BatchScheduler {
    /// Creates a new scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Computes the print order and total machine time.
    ///
    /// # Errors
    /// - [`ScheduleError::Config`] for invalid constraints (checked first)
    /// - [`ScheduleError::Validation`] for an invalid job
    /// - [`ScheduleError::Scheduling`] when a job can never fit a batch
    /// - [`ScheduleError::TimeOverflow`] when batch durations sum past `i64::MAX`
    pub fn schedule(
        &self,
        jobs: &[PrintJob],
        constraints: &PrinterConstraints,
    ) -> Result<Schedule, ScheduleError> {
        let batches = self.plan(jobs, constraints)?;
        let schedule = Schedule::from_batches(&batches)?;
        debug!(
            "scheduled {} job(s) in {} batch(es), total_time={}",
            schedule.job_count(),
            batches.len(),
            schedule.total_time
        );
        Ok(schedule)
    }

    /// Schedules from a request.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<Schedule, ScheduleError> {
        self.schedule(&request.jobs, &request.constraints)
    }

    /// Forms the batches in print order.
    ///
    /// Same errors as [`BatchScheduler::schedule`], which flattens this,
    /// except `TimeOverflow`: batch durations are never summed here.
    pub fn plan(
        &self,
        jobs: &[PrintJob],
        constraints: &PrinterConstraints,
    ) -> Result<Vec<Batch>, ScheduleError> {
        if let Some(err) = constraint_errors(constraints).into_iter().next() {
            return Err(err.into());
        }
        if let Some(err) = job_errors(jobs).into_iter().next() {
            return Err(err.into());
        }

        // `sort_by_key` is stable: equal keys keep input order.
        let mut pool: Vec<&PrintJob> = jobs.iter().collect();
        pool.sort_by_key(|job| job.sort_key());

        let mut batches = Vec::new();
        while !pool.is_empty() {
            let mut batch = Batch::new();
            let mut skipped = Vec::with_capacity(pool.len());

            for job in pool {
                if constraints.admits(batch.used_volume, batch.len(), job.volume) {
                    trace!("batch {}: admit '{}'", batches.len(), job.id);
                    batch.push(job);
                } else {
                    trace!("batch {}: skip '{}'", batches.len(), job.id);
                    skipped.push(job);
                }
            }

            if batch.is_empty() {
                if let Some(blocking) = skipped.first() {
                    warn!(
                        "job '{}' (volume {}) exceeds max_volume {}; {} job(s) unscheduled",
                        blocking.id,
                        blocking.volume,
                        constraints.max_volume,
                        skipped.len()
                    );
                    return Err(ScheduleError::Scheduling {
                        job_id: blocking.id.clone(),
                        volume: blocking.volume,
                        max_volume: constraints.max_volume,
                    });
                }
            }

            debug!(
                "batch {}: {} job(s), volume {}, duration {}",
                batches.len(),
                batch.len(),
                batch.used_volume,
                batch.duration
            );
            batches.push(batch);
            pool = skipped;
        }

        Ok(batches)
    }
}
