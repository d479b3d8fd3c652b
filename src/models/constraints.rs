//! Printer capacity constraints.

use serde::{Deserialize, Serialize};

/// Per-batch capacity limits of a printer.
///
/// Shared read-only across a whole scheduling call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrinterConstraints {
    /// Maximum combined volume of one batch.
    pub max_volume: f64,
    /// Maximum number of jobs in one batch.
    pub max_items: usize,
}

impl PrinterConstraints {
    /// Creates constraints with the given limits.
    pub fn new(max_volume: f64, max_items: usize) -> Self {
        Self {
            max_volume,
            max_items,
        }
    }

    /// Sets the volume limit.
    pub fn with_max_volume(mut self, max_volume: f64) -> Self {
        self.max_volume = max_volume;
        self
    }

    /// Sets the item limit.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Whether a job of `volume` can join a batch holding `used_volume`
    /// across `member_count` jobs.
    #[inline]
    pub fn admits(&self, used_volume: f64, member_count: usize, volume: f64) -> bool {
        used_volume + volume <= self.max_volume && member_count < self.max_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_builder() {
        let c = PrinterConstraints::new(300.0, 2)
            .with_max_volume(500.0)
            .with_max_items(4);
        assert_eq!(c.max_volume, 500.0);
        assert_eq!(c.max_items, 4);
    }

    #[test]
    fn test_admits() {
        let c = PrinterConstraints::new(300.0, 2);
        assert!(c.admits(0.0, 0, 300.0)); // exactly full
        assert!(!c.admits(150.0, 1, 151.0));
        assert!(!c.admits(100.0, 2, 10.0)); // item limit
    }

    #[test]
    fn test_constraints_from_record() {
        let c: PrinterConstraints =
            serde_json::from_str(r#"{"max_volume": 300, "max_items": 2}"#).unwrap();
        assert_eq!(c, PrinterConstraints::new(300.0, 2));
    }
}
