//! CSV loading
//!
//! Reads a desk height log into an ordered sequence of [`Sample`]s. The input
//! must carry a `timestamp` column (ISO-8601 date-time) and a `height_mm`
//! column (integer millimeters); any other columns are ignored. Samples keep
//! file order and are never filtered, deduplicated or sorted.

use crate::config::DeskConfig;
use crate::error::DeskError;
use crate::types::Sample;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Name of the timestamp column
pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Name of the height column
pub const HEIGHT_COLUMN: &str = "height_mm";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

#[derive(Debug, Deserialize)]
struct RawRecord {
    timestamp: String,
    height_mm: String,
}

/// Loader for CSV height logs
pub struct CsvLoader {
    config: DeskConfig,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new(DeskConfig::default())
    }
}

impl CsvLoader {
    pub fn new(config: DeskConfig) -> Self {
        Self { config }
    }

    /// Load samples from a file.
    ///
    /// Fails with [`DeskError::InputNotFound`] before any parsing when the path
    /// does not exist.
    pub fn load(&self, path: &Path) -> Result<Vec<Sample>, DeskError> {
        if !path.exists() {
            return Err(DeskError::InputNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let samples = self.parse(file)?;
        log::info!("loaded {} samples from {}", samples.len(), path.display());
        Ok(samples)
    }

    /// Parse samples from any CSV reader.
    ///
    /// The first malformed record aborts the whole load.
    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<Sample>, DeskError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(|e| csv_error(0, e))?.clone();
        for column in [TIMESTAMP_COLUMN, HEIGHT_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(DeskError::MissingColumn(column.to_string()));
            }
        }

        let mut samples = Vec::new();

        // Blank lines are skipped and quoted fields may span lines, so the
        // file line comes from the record itself.
        for (idx, result) in reader.records().enumerate() {
            let record_no = idx + 1;
            let record = result.map_err(|e| csv_error(record_no, e))?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(record_no as u64 + 1);

            let raw: RawRecord =
                record
                    .deserialize(Some(&headers))
                    .map_err(|e| DeskError::MalformedRecord {
                        record: record_no,
                        line,
                        reason: csv_kind_reason(e.into_kind()),
                    })?;

            let timestamp =
                parse_timestamp(&raw.timestamp).ok_or_else(|| DeskError::MalformedRecord {
                    record: record_no,
                    line,
                    reason: format!("invalid timestamp '{}'", raw.timestamp),
                })?;

            let height_mm: i32 = raw
                .height_mm
                .parse()
                .map_err(|_| DeskError::MalformedRecord {
                    record: record_no,
                    line,
                    reason: format!("invalid height '{}'", raw.height_mm),
                })?;

            samples.push(Sample::new(
                timestamp,
                height_mm,
                self.config.standing_threshold_mm,
            ));
        }

        Ok(samples)
    }
}

/// Load samples from `path` with the given config
pub fn load_samples(path: &Path, config: &DeskConfig) -> Result<Vec<Sample>, DeskError> {
    CsvLoader::new(*config).load(path)
}

/// Parse an ISO-8601 timestamp into local wall-clock time.
///
/// Offsets (`Z`, `+01:00`, `+0100`) are accepted and dropped after conversion
/// to the timestamp's own local time. A bare date means midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.naive_local());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn csv_error(record: usize, err: csv::Error) -> DeskError {
    let line = err.position().map(|p| p.line()).unwrap_or(record as u64 + 1);
    match err.into_kind() {
        csv::ErrorKind::Io(e) => DeskError::Io(e),
        kind => DeskError::MalformedRecord {
            record,
            line,
            reason: csv_kind_reason(kind),
        },
    }
}

fn csv_kind_reason(kind: csv::ErrorKind) -> String {
    match kind {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        csv::ErrorKind::Utf8 { err, .. } => format!("invalid UTF-8: {err}"),
        other => format!("{other:?}"),
    }
}
