use std::path::PathBuf;
use thiserror::Error;

/// Violations of the scoring preconditions
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The same check name was added twice in one run
    #[error("check '{0}' was already added to this run")]
    DuplicateCheck(String),
}

/// Failures while writing report artifacts
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot create report directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize {document}")]
    Serialize {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
