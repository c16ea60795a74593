use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised by the load → filter → aggregate pipeline.
///
/// None of these are retried; they propagate to the caller, which decides
/// whether to abort a single view or the whole load.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not map to a known reader.
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    /// The document as a whole is unreadable (not a JSON array, corrupt
    /// Parquet footer, undecodable CSV header).
    #[error("malformed source: {0}")]
    Malformed(String),

    /// A required field identifier is absent from the header / schema.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A row carries a malformed timestamp, number or flag.
    #[error("row {row}, column '{column}': cannot parse '{value}' ({reason})")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    /// The query range has `start > end`.
    #[error("invalid range: start {start} is after end {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A weekday or month label outside the canonical domain.
    #[error("row {row}: unknown {domain} '{value}'")]
    UnknownCategory {
        row: usize,
        domain: &'static str,
        value: String,
    },
}

impl PipelineError {
    pub(crate) fn parse(
        row: usize,
        column: &'static str,
        value: &str,
        reason: impl Into<String>,
    ) -> Self {
        PipelineError::Parse {
            row,
            column,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
