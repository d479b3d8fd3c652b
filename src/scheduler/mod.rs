//! Greedy batch scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `BatchScheduler` sorts jobs by priority then print time and repeatedly
//! fills batches greedily up to the printer's volume and item limits. It is
//! not optimal, but it is deterministic and preserves priority order.
//!
//! # KPI
//!
//! `BatchKpi` computes batch count, fill ratio, and idle machine time for a
//! formed plan.

mod batch;
mod kpi;

pub use batch::{BatchScheduler, ScheduleRequest};
pub use kpi::BatchKpi;
