//! Desk Usage - Standing desk usage analysis
//!
//! Turns a time-series log of desk heights into standing/sitting time through
//! a deterministic pipeline: CSV loading → interval derivation → daily
//! aggregation → summary and chart reporting.
//!
//! ## Modules
//!
//! - **Pipeline**: Load samples, derive capped same-day intervals, aggregate per day
//! - **Reporting**: Shape chart rows, render the PNG, compute the usage summary

pub mod aggregator;
pub mod chart;
pub mod config;
pub mod deriver;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod types;

pub use config::{DeskConfig, MAX_GAP_MINUTES, STANDING_THRESHOLD_MM};
pub use error::DeskError;
pub use pipeline::{analyze_file, DeskAnalysis, DeskPipeline};
pub use report::ReportData;
pub use summary::UsageSummary;
pub use types::{DailyStats, DayAggregate, Interval, Sample};

/// Crate version shown by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
