//! Interval derivation
//!
//! Turns consecutive sample pairs into labeled [`Interval`]s:
//! - pairs on different calendar days are skipped (overnight gaps never count)
//! - elapsed time is capped at the configured maximum gap
//! - the interval carries the opening sample's state and height

use crate::config::DeskConfig;
use crate::types::{Interval, Sample};

/// Deriver for standing/sitting intervals
pub struct IntervalDeriver {
    max_gap_minutes: f64,
}

impl Default for IntervalDeriver {
    fn default() -> Self {
        Self::new(&DeskConfig::default())
    }
}

impl IntervalDeriver {
    pub fn new(config: &DeskConfig) -> Self {
        Self {
            max_gap_minutes: config.max_gap_minutes,
        }
    }

    /// Derive intervals from samples in input order.
    ///
    /// `n` samples yield at most `n - 1` intervals; empty and single-sample
    /// inputs yield none.
    pub fn derive(&self, samples: &[Sample]) -> Vec<Interval> {
        samples
            .windows(2)
            .filter_map(|pair| self.derive_pair(&pair[0], &pair[1]))
            .collect()
    }

    fn derive_pair(&self, current: &Sample, next: &Sample) -> Option<Interval> {
        if current.date() != next.date() {
            log::debug!(
                "skipping day boundary {} -> {}",
                current.timestamp,
                next.timestamp
            );
            return None;
        }

        let elapsed = elapsed_minutes(current, next);
        if elapsed <= 0.0 {
            // Out-of-order or duplicate timestamps flow into the totals as-is.
            log::warn!(
                "non-increasing timestamps {} -> {} ({elapsed:.2} min)",
                current.timestamp,
                next.timestamp
            );
        }

        Some(Interval {
            start: current.timestamp,
            end: next.timestamp,
            duration_minutes: elapsed.min(self.max_gap_minutes),
            is_standing: current.is_standing,
            height_mm: current.height_mm,
        })
    }
}

/// Minutes from `current` to `next`, negative when `next` is earlier
fn elapsed_minutes(current: &Sample, next: &Sample) -> f64 {
    let delta = next.timestamp - current.timestamp;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 60_000_000.0,
        None => delta.num_milliseconds() as f64 / 60_000.0,
    }
}
