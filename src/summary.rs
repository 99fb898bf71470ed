//! Usage summary
//!
//! Overall standing/sitting statistics across all tracked days. Building a
//! summary from an empty dataset is an error rather than a division by zero.

use crate::error::DeskError;
use crate::types::DailyStats;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 50;

/// Totals, shares and per-day averages over the tracked days
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub days_tracked: usize,
    pub total_standing_minutes: f64,
    pub total_sitting_minutes: f64,
    pub standing_percentage: f64,
    pub sitting_percentage: f64,
    pub avg_standing_minutes_per_day: f64,
    pub avg_sitting_minutes_per_day: f64,
}

impl UsageSummary {
    /// Compute the summary.
    ///
    /// Returns [`DeskError::EmptyDataset`] when no day was aggregated and
    /// [`DeskError::NoStandingData`] when the tracked time sums to zero.
    pub fn from_daily(daily: &DailyStats) -> Result<Self, DeskError> {
        let (first_day, last_day) = match (daily.first_date(), daily.last_date()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(DeskError::EmptyDataset),
        };

        let days_tracked = daily.len();
        let total_standing = daily.total_standing_minutes();
        let total_sitting = daily.total_sitting_minutes();
        let total = total_standing + total_sitting;

        if total <= 0.0 {
            return Err(DeskError::NoStandingData);
        }

        Ok(Self {
            first_day,
            last_day,
            days_tracked,
            total_standing_minutes: total_standing,
            total_sitting_minutes: total_sitting,
            standing_percentage: 100.0 * total_standing / total,
            sitting_percentage: 100.0 * total_sitting / total,
            avg_standing_minutes_per_day: total_standing / days_tracked as f64,
            avg_sitting_minutes_per_day: total_sitting / days_tracked as f64,
        })
    }
}

impl fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "STANDING DESK USAGE SUMMARY")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "Date range: {} to {}", self.first_day, self.last_day)?;
        writeln!(f, "Total days tracked: {}", self.days_tracked)?;
        writeln!(f)?;
        writeln!(
            f,
            "Total standing time: {:.0} min ({:.1} hours)",
            self.total_standing_minutes,
            self.total_standing_minutes / 60.0
        )?;
        writeln!(
            f,
            "Total sitting time:  {:.0} min ({:.1} hours)",
            self.total_sitting_minutes,
            self.total_sitting_minutes / 60.0
        )?;
        writeln!(f)?;
        writeln!(f, "Standing percentage: {:.1}%", self.standing_percentage)?;
        writeln!(f, "Sitting percentage:  {:.1}%", self.sitting_percentage)?;
        writeln!(f)?;
        writeln!(f, "Average per day:")?;
        writeln!(f, "  Standing: {:.0} min", self.avg_standing_minutes_per_day)?;
        writeln!(f, "  Sitting:  {:.0} min", self.avg_sitting_minutes_per_day)?;
        write!(f, "{rule}")
    }
}
