//! Raw input records.
//!
//! Converts loosely typed JSON records into [`PrintJob`] and
//! [`PrinterConstraints`], reporting a missing or mistyped field as a
//! field-level error instead of a parser error:
//! - job fields → [`ScheduleError::Validation`]
//! - constraint fields → [`ScheduleError::Config`]
//!
//! Range checks (negative volume, zero items, ...) stay in
//! [`crate::validation`]; this layer only checks presence and type, except
//! for `max_items`, whose negative values cannot be represented afterwards.

use serde::de::Error as _;
use serde_json::{Map, Value};

use crate::error::ScheduleError;
use crate::models::{PrintJob, PrinterConstraints};

/// Parses the `{"jobs": [...], "constraints": {...}}` envelope.
///
/// Constraints are converted before any job. Input that is not valid JSON,
/// or whose envelope has the wrong shape, is reported as
/// [`ScheduleError::Input`].
pub fn request_from_json(
    input: &str,
) -> Result<(Vec<PrintJob>, PrinterConstraints), ScheduleError> {
    let value: Value = serde_json::from_str(input)?;
    let envelope = value
        .as_object()
        .ok_or_else(|| envelope_error("request must be a JSON object"))?;

    let constraints = envelope
        .get("constraints")
        .ok_or_else(|| envelope_error("missing field `constraints`"))?;
    let constraints = constraints_from_value(constraints)?;

    let jobs = envelope
        .get("jobs")
        .and_then(Value::as_array)
        .ok_or_else(|| envelope_error("field `jobs` must be an array"))?;
    let jobs = jobs
        .iter()
        .enumerate()
        .map(|(index, record)| job_from_value(record, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok((jobs, constraints))
}

/// Converts one job record.
///
/// `index` names the record in errors when it has no usable `id`
/// (rendered as `#<index>`).
pub fn job_from_value(record: &Value, index: usize) -> Result<PrintJob, ScheduleError> {
    let fallback_id = format!("#{index}");
    let Some(fields) = record.as_object() else {
        return Err(job_error(fallback_id, "record", "must be a JSON object"));
    };

    let id = match fields.get("id") {
        None | Some(Value::Null) => return Err(job_error(fallback_id, "id", "is missing")),
        Some(Value::String(id)) => id.clone(),
        Some(other) => {
            return Err(job_error(
                fallback_id,
                "id",
                format!("must be a string, got {other}"),
            ))
        }
    };

    let volume =
        number_field(fields, "volume").map_err(|reason| job_error(&id, "volume", reason))?;
    let priority =
        integer_field(fields, "priority").map_err(|reason| job_error(&id, "priority", reason))?;
    let print_time = integer_field(fields, "print_time")
        .map_err(|reason| job_error(&id, "print_time", reason))?;

    Ok(PrintJob {
        id,
        volume,
        priority,
        print_time,
    })
}

/// Converts the constraints record.
pub fn constraints_from_value(record: &Value) -> Result<PrinterConstraints, ScheduleError> {
    let Some(fields) = record.as_object() else {
        return Err(config_error("constraints", "must be a JSON object"));
    };

    let max_volume =
        number_field(fields, "max_volume").map_err(|reason| config_error("max_volume", reason))?;

    let max_items = match fields.get("max_items") {
        None | Some(Value::Null) => return Err(config_error("max_items", "is missing")),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_i64()) {
            (Some(items), _) => usize::try_from(items)
                .map_err(|_| config_error("max_items", format!("is too large, got {items}")))?,
            (None, Some(items)) => {
                return Err(config_error(
                    "max_items",
                    format!("must be at least 1, got {items}"),
                ))
            }
            _ => {
                return Err(config_error(
                    "max_items",
                    format!("must be an integer, got {n}"),
                ))
            }
        },
        Some(other) => {
            return Err(config_error(
                "max_items",
                format!("must be an integer, got {other}"),
            ))
        }
    };

    Ok(PrinterConstraints::new(max_volume, max_items))
}

fn number_field(fields: &Map<String, Value>, name: &str) -> Result<f64, String> {
    match fields.get(name) {
        None | Some(Value::Null) => Err("is missing".into()),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("must be a number, got {n}")),
        Some(other) => Err(format!("must be a number, got {other}")),
    }
}

fn integer_field(fields: &Map<String, Value>, name: &str) -> Result<i64, String> {
    match fields.get(name) {
        None | Some(Value::Null) => Err("is missing".into()),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| format!("must be an integer in i64 range, got {n}")),
        Some(other) => Err(format!("must be an integer, got {other}")),
    }
}

fn job_error(
    job_id: impl Into<String>,
    field: &'static str,
    reason: impl Into<String>,
) -> ScheduleError {
    ScheduleError::Validation {
        job_id: job_id.into(),
        field,
        reason: reason.into(),
    }
}

fn config_error(field: &'static str, reason: impl Into<String>) -> ScheduleError {
    ScheduleError::Config {
        field,
        reason: reason.into(),
    }
}

fn envelope_error(message: &str) -> ScheduleError {
    ScheduleError::Input(serde_json::Error::custom(message))
}
