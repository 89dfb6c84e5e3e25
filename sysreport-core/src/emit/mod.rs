//! Report emitters
//!
//! Each renderer is a pure function of the finished [`SystemReport`]:
//! - `json` - full structured document
//! - `metrics` - flat `key:value` lines
//! - `codequality` - defect list for code-quality ingestion

pub mod codequality;
pub mod json;
pub mod metrics;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ReportError;
use crate::types::SystemReport;

/// Report documents written for every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Metrics,
    CodeQuality,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [
        ReportFormat::Json,
        ReportFormat::Metrics,
        ReportFormat::CodeQuality,
    ];

    /// File name used inside the output directory
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Json => "system_report.json",
            ReportFormat::Metrics => "metrics.txt",
            ReportFormat::CodeQuality => "codequality.json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "metrics" | "txt" => Ok(ReportFormat::Metrics),
            "codequality" | "code-quality" => Ok(ReportFormat::CodeQuality),
            other => Err(format!(
                "Unknown report format '{}'. Valid formats: json, metrics, codequality",
                other
            )),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Metrics => write!(f, "metrics"),
            ReportFormat::CodeQuality => write!(f, "codequality"),
        }
    }
}

/// Render a report in the given format
pub fn render(report: &SystemReport, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Json => json::render(report),
        ReportFormat::Metrics => Ok(metrics::render(report)),
        ReportFormat::CodeQuality => codequality::render(report),
    }
}

/// Write every report document into `out_dir`, creating it if needed.
///
/// Returns the written paths in [`ReportFormat::ALL`] order.
pub fn write_all(report: &SystemReport, out_dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for format in ReportFormat::ALL {
        let path = out_dir.join(format.file_name());
        let content = render(report, format)?;
        fs::write(&path, content).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), %format, "report written");
        written.push(path);
    }

    Ok(written)
}
