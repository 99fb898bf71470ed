//! Pipeline orchestration
//!
//! Runs the stages in order and hands the results to the reporting side:
//! 1. CsvLoader - Read samples from the height log
//! 2. IntervalDeriver - Pair consecutive same-day samples into intervals
//! 3. DailyAggregator - Fold intervals into per-day totals

use crate::aggregator::DailyAggregator;
use crate::config::DeskConfig;
use crate::deriver::IntervalDeriver;
use crate::error::DeskError;
use crate::loader::CsvLoader;
use crate::report::ReportData;
use crate::summary::UsageSummary;
use crate::types::{DailyStats, Interval, Sample};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeskAnalysis {
    pub samples: Vec<Sample>,
    pub intervals: Vec<Interval>,
    pub daily: DailyStats,
}

impl DeskAnalysis {
    /// Overall statistics; fails on an empty dataset
    pub fn summary(&self) -> Result<UsageSummary, DeskError> {
        UsageSummary::from_daily(&self.daily)
    }

    /// Chart rows in chronological order
    pub fn report(&self) -> ReportData {
        ReportData::from_daily(&self.daily)
    }
}

/// Load → derive → aggregate, configured once
pub struct DeskPipeline {
    loader: CsvLoader,
    deriver: IntervalDeriver,
}

impl Default for DeskPipeline {
    fn default() -> Self {
        Self::with_config(DeskConfig::default())
    }
}

impl DeskPipeline {
    /// Build a pipeline for `config`.
    ///
    /// Fails with [`DeskError::InvalidConfig`] when the config does not
    /// validate; a NaN gap cap would otherwise disable capping.
    pub fn new(config: DeskConfig) -> Result<Self, DeskError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: DeskConfig) -> Self {
        Self {
            loader: CsvLoader::new(config),
            deriver: IntervalDeriver::new(&config),
        }
    }

    /// Run the pipeline over a CSV file
    pub fn process_file(&self, path: &Path) -> Result<DeskAnalysis, DeskError> {
        let samples = self.loader.load(path)?;
        Ok(self.process_samples(samples))
    }

    /// Run the pipeline over CSV content from any reader
    pub fn process_reader<R: Read>(&self, reader: R) -> Result<DeskAnalysis, DeskError> {
        let samples = self.loader.parse(reader)?;
        Ok(self.process_samples(samples))
    }

    /// Derive and aggregate already loaded samples
    pub fn process_samples(&self, samples: Vec<Sample>) -> DeskAnalysis {
        let intervals = self.deriver.derive(&samples);
        let daily = DailyAggregator::aggregate(&intervals);
        log::debug!(
            "{} samples -> {} intervals over {} days",
            samples.len(),
            intervals.len(),
            daily.len()
        );

        DeskAnalysis {
            samples,
            intervals,
            daily,
        }
    }
}

/// Analyze a CSV file in one call.
///
/// # Example
/// ```ignore
/// let analysis = analyze_file(Path::new("desk.csv"), &DeskConfig::default())?;
/// println!("{}", analysis.summary()?);
/// ```
pub fn analyze_file(path: &Path, config: &DeskConfig) -> Result<DeskAnalysis, DeskError> {
    DeskPipeline::new(*config)?.process_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn sample_csv() -> &'static str {
        "timestamp,height_mm\n\
         2024-01-15T09:00:00,850\n\
         2024-01-15T09:10:00,950\n\
         2024-01-15T10:20:00,850\n\
         2024-01-16T08:00:00,1020\n\
         2024-01-16T08:30:00,700\n\
         2024-01-16T09:00:00,700\n"
    }

    #[test]
    fn test_process_reader() {
        let analysis = DeskPipeline::default()
            .process_reader(sample_csv().as_bytes())
            .unwrap();

        assert_eq!(analysis.samples.len(), 6);
        // the overnight pair is dropped
        assert_eq!(analysis.intervals.len(), 4);

        let d1 = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        assert_eq!(analysis.daily.dates(), vec![d1, d2]);

        let day1 = analysis.daily.get(&d1).unwrap();
        assert_eq!(day1.sitting_minutes, 10.0);
        assert_eq!(day1.standing_minutes, 60.0);

        let day2 = analysis.daily.get(&d2).unwrap();
        assert_eq!(day2.standing_minutes, 30.0);
        assert_eq!(day2.sitting_minutes, 30.0);
    }

    #[test]
    fn test_summary_and_report() {
        let analysis = DeskPipeline::default()
            .process_reader(sample_csv().as_bytes())
            .unwrap();

        let summary = analysis.summary().unwrap();
        assert_eq!(summary.days_tracked, 2);
        assert_eq!(summary.total_standing_minutes, 90.0);
        assert_eq!(summary.total_sitting_minutes, 40.0);

        let report = analysis.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.days[0].segments.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let pipeline = DeskPipeline::default();
        let a = pipeline.process_reader(sample_csv().as_bytes()).unwrap();
        let b = pipeline.process_reader(sample_csv().as_bytes()).unwrap();

        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a.daily).unwrap(),
            serde_json::to_string(&b.daily).unwrap()
        );
    }

    #[test]
    fn test_cross_day_pair_is_empty_dataset() {
        let csv = "timestamp,height_mm\n\
                   2024-01-15T17:00:00,1000\n\
                   2024-01-16T09:00:00,700\n";
        let analysis = DeskPipeline::default()
            .process_reader(csv.as_bytes())
            .unwrap();

        assert!(analysis.intervals.is_empty());
        assert!(analysis.daily.is_empty());
        assert!(matches!(analysis.summary(), Err(DeskError::EmptyDataset)));
    }

    #[test]
    fn test_single_sample_is_empty_dataset() {
        let csv = "timestamp,height_mm\n2024-01-15T17:00:00,1000\n";
        let analysis = DeskPipeline::default()
            .process_reader(csv.as_bytes())
            .unwrap();

        assert!(analysis.intervals.is_empty());
        assert!(matches!(analysis.summary(), Err(DeskError::EmptyDataset)));
    }

    #[test]
    fn test_analyze_file_validates_config() {
        let config = DeskConfig::new(900, -5.0);
        let result = analyze_file(Path::new("desk.csv"), &config);
        assert!(matches!(result, Err(DeskError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_rejects_nan_max_gap() {
        let config = DeskConfig::new(900, f64::NAN);
        assert!(matches!(
            DeskPipeline::new(config),
            Err(DeskError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_new_accepts_custom_config() {
        let csv = "timestamp,height_mm\n\
                   2024-01-15T09:00:00,950\n\
                   2024-01-15T11:00:00,950\n";
        let analysis = DeskPipeline::new(DeskConfig::new(900, 30.0))
            .unwrap()
            .process_reader(csv.as_bytes())
            .unwrap();

        assert_eq!(analysis.intervals[0].duration_minutes, 30.0);
    }
}
