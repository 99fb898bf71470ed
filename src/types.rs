//! Core types for the desk usage pipeline
//!
//! This module defines the data structures that flow through each stage:
//! raw samples, derived intervals, and per-day aggregates.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// One height measurement read from the input log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Local wall-clock time of the measurement
    pub timestamp: NaiveDateTime,
    /// Desk height (millimeters)
    pub height_mm: i32,
    /// Whether the height is at or above the standing threshold
    pub is_standing: bool,
}

impl Sample {
    /// Create a sample, classifying it against `standing_threshold_mm`
    pub fn new(timestamp: NaiveDateTime, height_mm: i32, standing_threshold_mm: i32) -> Self {
        Self {
            timestamp,
            height_mm,
            is_standing: height_mm >= standing_threshold_mm,
        }
    }

    /// Calendar date of the measurement
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Span between two consecutive same-day samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Elapsed minutes, capped at the configured maximum gap
    pub duration_minutes: f64,
    /// State of the sample that opened the interval
    pub is_standing: bool,
    /// Height of the sample that opened the interval
    pub height_mm: i32,
}

impl Interval {
    /// Calendar date the interval is accounted to
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// Standing/sitting totals and intervals for one calendar day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayAggregate {
    pub standing_minutes: f64,
    pub sitting_minutes: f64,
    /// Intervals in derivation order
    pub intervals: Vec<Interval>,
}

impl DayAggregate {
    /// Fold an interval into the day's totals
    pub fn add(&mut self, interval: Interval) {
        if interval.is_standing {
            self.standing_minutes += interval.duration_minutes;
        } else {
            self.sitting_minutes += interval.duration_minutes;
        }
        self.intervals.push(interval);
    }

    pub fn total_minutes(&self) -> f64 {
        self.standing_minutes + self.sitting_minutes
    }
}

/// Day aggregates keyed by calendar date, iterated in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    days: BTreeMap<NaiveDate, DayAggregate>,
}

impl DailyStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate for `date`, created empty on first access
    pub fn day_mut(&mut self, date: NaiveDate) -> &mut DayAggregate {
        self.days.entry(date).or_default()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&DayAggregate> {
        self.days.get(date)
    }

    /// Dates present, oldest first
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.days.keys().copied().collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, NaiveDate, DayAggregate> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_standing_minutes(&self) -> f64 {
        self.days.values().map(|d| d.standing_minutes).sum()
    }

    pub fn total_sitting_minutes(&self) -> f64 {
        self.days.values().map(|d| d.sitting_minutes).sum()
    }
}

impl<'a> IntoIterator for &'a DailyStats {
    type Item = (&'a NaiveDate, &'a DayAggregate);
    type IntoIter = btree_map::Iter<'a, NaiveDate, DayAggregate>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}
