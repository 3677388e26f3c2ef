use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors: fatal, the binary exits with status 1
// ---------------------------------------------------------------------------

/// Failure to produce the initial dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file is missing or could not be opened.
    #[error("could not open data file '{}'", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file opened but its CSV content is unreadable.
    #[error("CSV row {row}: {source}")]
    Parse {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// The file opened but its JSON content is unreadable or has the wrong shape.
    #[error("JSON dataset: {0}")]
    Json(String),
}

// ---------------------------------------------------------------------------
// Script errors
// ---------------------------------------------------------------------------

/// Failure of the script run as a whole.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The operations script is missing or could not be opened.
    #[error("could not open operations file '{}'", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the script or writing the report failed partway through.
    #[error("script I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A single script line that could not be applied.
///
/// Always recovered by the interpreter: the line is reported as malformed and the
/// working dataset is left as it was before the line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("operation '{op}' is missing its {what} argument")]
    MissingArgument { op: &'static str, what: &'static str },

    #[error("record {row} has no '{field}' column")]
    MissingField { field: String, row: usize },

    #[error("'{value}' is not a valid {expected}")]
    NotANumber {
        value: String,
        expected: &'static str,
    },

    #[error("integer overflow while summing '{field}'")]
    Overflow { field: String },
}
