//! Covered/total field counters.

use serde::{Deserialize, Serialize};

/// Field counters of one coverage run.
///
/// Every counted field bumps `total`; fields reached by at least one document
/// also bump `covered`, so `covered <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTally {
    pub covered: u64,
    pub total: u64,
}

impl FieldTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one field
    pub fn record(&mut self, hit: bool) {
        self.total += 1;
        if hit {
            self.covered += 1;
        }
    }

    /// Fold another tally into this one
    pub fn absorb(&mut self, other: FieldTally) {
        self.covered += other.covered;
        self.total += other.total;
    }

    /// covered / total × 100, rounded to two decimals
    ///
    /// A tally with no fields has nothing to cover and reports `0.0`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            tracing::warn!("no fields were counted; reporting 0% coverage");
            return 0.0;
        }
        let raw = self.covered as f64 / self.total as f64 * 100.0;
        (raw * 100.0).round() / 100.0
    }
}
