//! Batch plan quality metrics (KPIs).
//!
//! Computes machine-usage indicators from a formed batch plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total Time | Sum of batch durations |
//! | Avg Items | Mean members per batch |
//! | Avg Volume Fill | Mean of used_volume / max_volume |
//! | Idle Time | Sum of (batch duration - member print time) over all members |
//!
//! Idle time measures how long finished models sit in the printer waiting
//! for the slowest member of their batch.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Batch, PrintJob, PrinterConstraints};

/// Batch plan performance indicators.
///
/// Time values are in minutes and saturate at `i64::MAX`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchKpi {
    /// Number of machine runs.
    pub batch_count: usize,
    /// Total machine time.
    pub total_time: i64,
    /// Mean jobs per batch.
    pub avg_items: f64,
    /// Mean volume fill ratio (0.0..=1.0).
    pub avg_volume_fill: f64,
    /// Member time spent waiting for the slowest job of the batch.
    pub idle_time: i64,
}

impl BatchKpi {
    /// Computes KPIs from a batch plan.
    ///
    /// # Arguments
    /// * `batches` - The plan, as returned by `BatchScheduler::plan`.
    /// * `jobs` - The input jobs (for member print times).
    /// * `constraints` - The printer limits the plan was formed under.
    pub fn calculate(
        batches: &[Batch],
        jobs: &[PrintJob],
        constraints: &PrinterConstraints,
    ) -> Self {
        let print_times: HashMap<&str, i64> =
            jobs.iter().map(|j| (j.id.as_str(), j.print_time)).collect();

        let batch_count = batches.len();
        let total_time = batches
            .iter()
            .fold(0i64, |total, b| total.saturating_add(b.duration));

        let idle_time = batches
            .iter()
            .flat_map(|b| {
                b.job_ids
                    .iter()
                    .filter_map(|id| print_times.get(id.as_str()))
                    .map(move |&t| b.duration - t)
            })
            .fold(0i64, i64::saturating_add);

        let (avg_items, avg_volume_fill) = if batch_count == 0 {
            (0.0, 0.0)
        } else {
            let items: usize = batches.iter().map(Batch::len).sum();
            let fill: f64 = batches
                .iter()
                .map(|b| b.used_volume / constraints.max_volume)
                .sum();
            (
                items as f64 / batch_count as f64,
                fill / batch_count as f64,
            )
        };

        Self {
            batch_count,
            total_time,
            avg_items,
            avg_volume_fill,
            idle_time,
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_idle_time: i64, min_volume_fill: f64) -> bool {
        self.idle_time <= max_idle_time && self.avg_volume_fill >= min_volume_fill
    }
}
