//! Daily aggregation
//!
//! Buckets intervals by the calendar date of their start and accumulates the
//! standing and sitting totals for each day.

use crate::types::{DailyStats, Interval};

/// Aggregator folding intervals into [`DailyStats`]
pub struct DailyAggregator;

impl DailyAggregator {
    /// Aggregate intervals by day.
    ///
    /// Only dates that start at least one interval appear in the result.
    pub fn aggregate(intervals: &[Interval]) -> DailyStats {
        let mut daily = DailyStats::new();
        for interval in intervals {
            daily.day_mut(interval.date()).add(interval.clone());
        }
        daily
    }
}
