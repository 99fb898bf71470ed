//! Report data shaping
//!
//! Flattens [`DailyStats`] into the per-day rows the chart renderer consumes:
//! bar values for the daily totals and timeline segments positioned by hour
//! of day.

use crate::types::{DailyStats, DayAggregate};
use chrono::{NaiveDate, Timelike};
use serde::Serialize;

/// One bar of the daily timeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSegment {
    /// Hour of day the interval starts at (minutes as a fraction, seconds ignored)
    pub start_hour: f64,
    pub duration_hours: f64,
    pub is_standing: bool,
}

/// Chart row for a single day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    /// Short axis label, e.g. `Mon 01/15`
    pub label: String,
    pub standing_minutes: f64,
    pub sitting_minutes: f64,
    pub segments: Vec<TimelineSegment>,
}

impl DayReport {
    fn from_aggregate(date: NaiveDate, day: &DayAggregate) -> Self {
        let segments = day
            .intervals
            .iter()
            .map(|interval| TimelineSegment {
                start_hour: interval.start.hour() as f64 + interval.start.minute() as f64 / 60.0,
                duration_hours: interval.duration_minutes / 60.0,
                is_standing: interval.is_standing,
            })
            .collect();

        Self {
            date,
            label: date.format("%a %m/%d").to_string(),
            standing_minutes: day.standing_minutes,
            sitting_minutes: day.sitting_minutes,
            segments,
        }
    }
}

/// Chronologically ordered chart rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportData {
    pub days: Vec<DayReport>,
}

impl ReportData {
    pub fn from_daily(daily: &DailyStats) -> Self {
        Self {
            days: daily
                .iter()
                .map(|(date, day)| DayReport::from_aggregate(*date, day))
                .collect(),
        }
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.days.iter().map(|d| d.label.clone()).collect()
    }

    /// Largest single bar value, at least 1 so axes never collapse
    pub fn max_minutes(&self) -> f64 {
        self.days
            .iter()
            .flat_map(|d| [d.standing_minutes, d.sitting_minutes])
            .fold(1.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }
}
