//! Print scheduling domain models.
//!
//! Provides the data types for describing a print queue and the schedule
//! produced for it.
//!
//! | Type | Role |
//! |------|------|
//! | PrintJob | One model to print |
//! | PrinterConstraints | Per-batch volume and item limits |
//! | Batch | Jobs printed together in one run |
//! | Schedule | Print order and total machine time |

mod batch;
mod constraints;
mod job;
mod schedule;

pub use batch::Batch;
pub use constraints::PrinterConstraints;
pub use job::PrintJob;
pub use schedule::{Schedule, Violation, ViolationType};
