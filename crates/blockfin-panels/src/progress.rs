//! Bounded progress value and tick cadence

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const PROGRESS_MAX: f64 = 100.0;

/// Progress in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    pub const ZERO: Progress = Progress(0.0);

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Add a non-negative increment; the result is clamped to exactly 100
    pub fn advance(self, increment: f64) -> Progress {
        let increment = if increment.is_finite() { increment.max(0.0) } else { 0.0 };
        Progress((self.0 + increment).min(PROGRESS_MAX))
    }

    pub fn is_complete(&self) -> bool {
        self.0 >= PROGRESS_MAX
    }
}

/// How a panel's timer advances
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickConfig {
    /// Time between ticks
    pub interval: Duration,
    /// Upper bound of the random increment added per tick
    pub max_increment: f64,
}

impl TickConfig {
    pub const fn new(interval_ms: u64, max_increment: f64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            max_increment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_clamps_to_exactly_100() {
        let p = Progress::ZERO.advance(60.0).advance(55.5);
        assert_eq!(p.value(), 100.0);
        assert!(p.is_complete());
    }

    #[test]
    fn test_advance_is_monotonic() {
        let p = Progress::ZERO.advance(12.5);
        assert_eq!(p.advance(-4.0), p);
        assert_eq!(p.advance(f64::NAN), p);
        assert!(p.advance(0.1) > p);
        assert!(!p.is_complete());
    }
}
