//! JSON output for analysis reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::analysis::AnalysisReport;

/// Errors that can occur during JSON output operations.
#[derive(Error, Debug)]
pub enum JsonOutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for JSON output operations.
pub type JsonOutputResult<T> = Result<T, JsonOutputError>;

/// Writer for JSON-formatted analysis reports.
pub struct JsonReportWriter;

impl JsonReportWriter {
    /// Write a report to a JSON file.
    pub fn write_to_file<P: AsRef<Path>>(
        report: &AnalysisReport,
        path: P,
    ) -> JsonOutputResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string_pretty(report)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize a report to a pretty JSON string.
    pub fn to_json_string(report: &AnalysisReport) -> JsonOutputResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Serialize a report to a compact JSON string.
    pub fn to_json_compact(report: &AnalysisReport) -> JsonOutputResult<String> {
        Ok(serde_json::to_string(report)?)
    }
}
