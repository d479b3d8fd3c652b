//! Input validation and schedule auditing.
//!
//! Checks the integrity of print jobs and printer constraints before
//! scheduling. Detects:
//! - Empty or duplicate job IDs
//! - Negative or non-finite volumes
//! - Negative print times
//! - Non-positive volume limits and zero item limits
//!
//! [`check_schedule`] audits a finished schedule against its input by
//! replaying the greedy-fill rule over the print order.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::models::{Batch, PrintJob, PrinterConstraints, Schedule, Violation};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending job ID (empty for constraint errors).
    pub entity_id: String,
    /// Offending record field.
    pub field: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A job has an empty ID.
    EmptyId,
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job volume is below zero.
    NegativeVolume,
    /// A job volume is NaN or infinite.
    NonFiniteVolume,
    /// A job print time is below zero.
    NegativePrintTime,
    /// `max_volume` is zero, negative, or not finite.
    NonPositiveMaxVolume,
    /// `max_items` is zero.
    ZeroMaxItems,
}

impl ValidationErrorKind {
    /// Whether this kind concerns the printer constraints rather than a job.
    pub fn is_config(self) -> bool {
        matches!(
            self,
            ValidationErrorKind::NonPositiveMaxVolume | ValidationErrorKind::ZeroMaxItems
        )
    }
}

impl ValidationError {
    /// Creates a job-level error.
    pub fn job(
        kind: ValidationErrorKind,
        job_id: impl Into<String>,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: job_id.into(),
            field,
            message: message.into(),
        }
    }

    /// Creates a constraint-level error.
    pub fn constraint(
        kind: ValidationErrorKind,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            entity_id: String::new(),
            field,
            message: message.into(),
        }
    }
}

/// Validates printer constraints.
pub fn validate_constraints(constraints: &PrinterConstraints) -> ValidationResult {
    into_result(constraint_errors(constraints))
}

/// Every constraint issue, in field order.
pub(crate) fn constraint_errors(constraints: &PrinterConstraints) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !constraints.max_volume.is_finite() || constraints.max_volume <= 0.0 {
        errors.push(ValidationError::constraint(
            ValidationErrorKind::NonPositiveMaxVolume,
            "max_volume",
            format!("must be a positive number, got {}", constraints.max_volume),
        ));
    }

    if constraints.max_items < 1 {
        errors.push(ValidationError::constraint(
            ValidationErrorKind::ZeroMaxItems,
            "max_items",
            "must be at least 1, got 0",
        ));
    }

    errors
}

/// Validates print jobs.
///
/// Checks:
/// 1. Every job has a non-empty ID
/// 2. No duplicate job IDs
/// 3. Volumes are finite and non-negative
/// 4. Print times are non-negative
pub fn validate_jobs(jobs: &[PrintJob]) -> ValidationResult {
    into_result(job_errors(jobs))
}

/// Every job issue, in input order.
pub(crate) fn job_errors(jobs: &[PrintJob]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if job.id.is_empty() {
            errors.push(ValidationError::job(
                ValidationErrorKind::EmptyId,
                "",
                "id",
                "must not be empty",
            ));
        } else if !ids.insert(job.id.as_str()) {
            errors.push(ValidationError::job(
                ValidationErrorKind::DuplicateId,
                &job.id,
                "id",
                "is used by more than one job",
            ));
        }

        if !job.volume.is_finite() {
            errors.push(ValidationError::job(
                ValidationErrorKind::NonFiniteVolume,
                &job.id,
                "volume",
                format!("must be a finite number, got {}", job.volume),
            ));
        } else if job.volume < 0.0 {
            errors.push(ValidationError::job(
                ValidationErrorKind::NegativeVolume,
                &job.id,
                "volume",
                format!("must be non-negative, got {}", job.volume),
            ));
        }

        if job.print_time < 0 {
            errors.push(ValidationError::job(
                ValidationErrorKind::NegativePrintTime,
                &job.id,
                "print_time",
                format!("must be non-negative, got {}", job.print_time),
            ));
        }
    }

    errors
}

/// Validates constraints and jobs together.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues,
/// constraint errors first.
pub fn validate_input(jobs: &[PrintJob], constraints: &PrinterConstraints) -> ValidationResult {
    let mut errors = constraint_errors(constraints);
    errors.extend(job_errors(jobs));
    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Audits a schedule against the jobs and constraints it was built from.
///
/// Replays batches by walking the print order and closing a batch at the
/// first job that does not fit. Because every skipped job failed to fit
/// an earlier, smaller prefix of its pass, this reproduces the formed
/// batches exactly.
///
/// Reports:
/// 1. Input jobs missing from the print order
/// 2. IDs printed more than once
/// 3. IDs not among the input jobs
/// 4. Batches over the volume or item limit
/// 5. Batch members out of `(priority, print_time)` order, or equal-key
///    members out of input order
/// 6. `total_time` differing from the sum of replayed batch durations
pub fn check_schedule(
    jobs: &[PrintJob],
    constraints: &PrinterConstraints,
    schedule: &Schedule,
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let by_id: HashMap<&str, (usize, &PrintJob)> = jobs
        .iter()
        .enumerate()
        .map(|(index, j)| (j.id.as_str(), (index, j)))
        .collect();

    let mut seen = HashSet::new();
    let mut ordered = Vec::with_capacity(schedule.print_order.len());
    for id in &schedule.print_order {
        if !seen.insert(id.as_str()) {
            violations.push(Violation::duplicate_job(id));
            continue;
        }
        match by_id.get(id.as_str()) {
            Some(&(_, job)) => ordered.push(job),
            None => violations.push(Violation::unknown_job(id)),
        }
    }

    for job in jobs {
        if !seen.contains(job.id.as_str()) {
            violations.push(Violation::missing_job(&job.id));
        }
    }

    let batches = replay_batches(&ordered, constraints);
    for batch in &batches {
        if batch.used_volume > constraints.max_volume || batch.len() > constraints.max_items {
            let first = batch.job_ids.first().cloned().unwrap_or_default();
            violations.push(Violation::capacity_exceeded(
                first,
                format!(
                    "Batch of {} job(s) uses volume {} (max {}, max items {})",
                    batch.len(),
                    batch.used_volume,
                    constraints.max_volume,
                    constraints.max_items
                ),
            ));
        }
    }

    for batch in &batches {
        // (sort key, input position) must strictly increase within a batch
        let ranks: Vec<(&str, (i64, i64), usize)> = batch
            .job_ids
            .iter()
            .filter_map(|id| by_id.get(id.as_str()))
            .map(|&(index, job)| (job.id.as_str(), job.sort_key(), index))
            .collect();
        for pair in ranks.windows(2) {
            let (prev_id, prev_key, prev_index) = pair[0];
            let (id, key, index) = pair[1];
            if (key, index) < (prev_key, prev_index) {
                violations.push(Violation::out_of_order(
                    id,
                    format!("Job '{id}' is printed after '{prev_id}' in the same batch"),
                ));
            }
        }
    }

    match Schedule::total_time_of(&batches) {
        Some(expected) if expected == schedule.total_time => {}
        Some(expected) => {
            violations.push(Violation::time_mismatch(expected, schedule.total_time));
        }
        None => violations.push(Violation::time_overflow(schedule.total_time)),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Splits an ordered job sequence into greedy-fill batches.
///
/// A job that alone exceeds the volume limit still forms its own batch so
/// the capacity check can report it.
fn replay_batches(ordered: &[&PrintJob], constraints: &PrinterConstraints) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut current = Batch::new();

    for job in ordered {
        if !current.is_empty()
            && !constraints.admits(current.used_volume, current.len(), job.volume)
        {
            batches.push(std::mem::take(&mut current));
        }
        current.push(job);
    }

    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViolationType;

    fn job(id: &str, volume: f64, priority: i64, print_time: i64) -> PrintJob {
        PrintJob::new(id)
            .with_volume(volume)
            .with_priority(priority)
            .with_print_time(print_time)
    }

    fn sample_jobs() -> Vec<PrintJob> {
        vec![
            job("M1", 100.0, 1, 120),
            job("M2", 150.0, 1, 90),
            job("M3", 120.0, 1, 150),
        ]
    }

    fn sample_constraints() -> PrinterConstraints {
        PrinterConstraints::new(300.0, 2)
    }

    fn sample_schedule() -> Schedule {
        Schedule {
            print_order: vec!["M2".into(), "M1".into(), "M3".into()],
            total_time: 270,
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_jobs(), &sample_constraints()).is_ok());
    }

    #[test]
    fn test_duplicate_job_id() {
        let jobs = vec![job("M1", 10.0, 1, 10), job("M1", 20.0, 1, 20)];
        let errors = validate_jobs(&jobs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.entity_id == "M1"));
    }

    #[test]
    fn test_empty_id() {
        let errors = validate_jobs(&[job("", 10.0, 1, 10)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyId);
        assert_eq!(errors[0].field, "id");
    }

    #[test]
    fn test_negative_volume() {
        let errors = validate_jobs(&[job("M1", -1.0, 1, 10)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeVolume);
        assert_eq!(errors[0].field, "volume");
    }

    #[test]
    fn test_nan_volume() {
        let errors = validate_jobs(&[job("M1", f64::NAN, 1, 10)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonFiniteVolume);
    }

    #[test]
    fn test_negative_print_time() {
        let errors = validate_jobs(&[job("M1", 10.0, 1, -5)]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativePrintTime);
        assert_eq!(errors[0].to_string(), "print_time must be non-negative, got -5");
    }

    #[test]
    fn test_zero_volume_and_time_allowed() {
        assert!(validate_jobs(&[job("M1", 0.0, 1, 0)]).is_ok());
    }

    #[test]
    fn test_invalid_constraints() {
        let errors = validate_constraints(&PrinterConstraints::new(0.0, 0)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind.is_config()));

        let errors = validate_constraints(&PrinterConstraints::new(f64::NAN, 1)).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveMaxVolume);

        let errors =
            validate_constraints(&PrinterConstraints::new(f64::INFINITY, 1)).unwrap_err();
        assert_eq!(errors[0].field, "max_volume");
    }

    #[test]
    fn test_multiple_errors_constraints_first() {
        let jobs = vec![job("", -1.0, 1, -1)];
        let errors = validate_input(&jobs, &PrinterConstraints::new(-5.0, 1)).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors[0].kind.is_config());
    }

    #[test]
    fn test_check_schedule_ok() {
        assert!(check_schedule(&sample_jobs(), &sample_constraints(), &sample_schedule()).is_ok());
    }

    #[test]
    fn test_check_schedule_missing_and_unknown() {
        let schedule = Schedule {
            print_order: vec!["M2".into(), "M1".into(), "M9".into()],
            total_time: 120,
        };
        let violations =
            check_schedule(&sample_jobs(), &sample_constraints(), &schedule).unwrap_err();
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::UnknownJob && v.entity_id == "M9"));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::MissingJob && v.entity_id == "M3"));
    }

    #[test]
    fn test_check_schedule_duplicate() {
        let mut schedule = sample_schedule();
        schedule.print_order.push("M3".into());
        let violations =
            check_schedule(&sample_jobs(), &sample_constraints(), &schedule).unwrap_err();
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::DuplicateJob));
    }

    #[test]
    fn test_check_schedule_time_mismatch() {
        let mut schedule = sample_schedule();
        schedule.total_time = 300;
        let violations =
            check_schedule(&sample_jobs(), &sample_constraints(), &schedule).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::TimeMismatch);
    }

    #[test]
    fn test_check_schedule_oversized_job() {
        let jobs = vec![job("BIG", 400.0, 1, 60)];
        let schedule = Schedule {
            print_order: vec!["BIG".into()],
            total_time: 60,
        };
        let violations = check_schedule(&jobs, &sample_constraints(), &schedule).unwrap_err();
        assert_eq!(violations[0].violation_type, ViolationType::CapacityExceeded);
        assert_eq!(violations[0].entity_id, "BIG");
    }

    #[test]
    fn test_check_schedule_batch_order() {
        // M1 has a longer print time than M2 but is listed first in the batch
        let schedule = Schedule {
            print_order: vec!["M1".into(), "M2".into(), "M3".into()],
            total_time: 270,
        };
        let violations =
            check_schedule(&sample_jobs(), &sample_constraints(), &schedule).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::OrderViolation);
        assert_eq!(violations[0].entity_id, "M2");
    }

    #[test]
    fn test_check_schedule_tie_keeps_input_order() {
        let jobs = vec![job("Z", 10.0, 1, 60), job("A", 10.0, 1, 60)];
        let constraints = PrinterConstraints::new(100.0, 2);
        let in_order = Schedule {
            print_order: vec!["Z".into(), "A".into()],
            total_time: 60,
        };
        assert!(check_schedule(&jobs, &constraints, &in_order).is_ok());

        let swapped = Schedule {
            print_order: vec!["A".into(), "Z".into()],
            total_time: 60,
        };
        let violations = check_schedule(&jobs, &constraints, &swapped).unwrap_err();
        assert_eq!(violations[0].violation_type, ViolationType::OrderViolation);
    }

    #[test]
    fn test_check_schedule_time_overflow() {
        let jobs = vec![job("A", 200.0, 1, i64::MAX), job("B", 200.0, 1, i64::MAX)];
        let schedule = Schedule {
            print_order: vec!["A".into(), "B".into()],
            total_time: -2,
        };
        let violations = check_schedule(&jobs, &sample_constraints(), &schedule).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::TimeMismatch);
    }

    #[test]
    fn test_replay_batches() {
        let jobs = sample_jobs();
        let ordered = vec![&jobs[1], &jobs[0], &jobs[2]];
        let batches = replay_batches(&ordered, &sample_constraints());
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].job_ids, vec!["M2", "M1"]);
        assert_eq!(batches[0].duration, 120);
        assert_eq!(batches[1].job_ids, vec!["M3"]);
    }
}
