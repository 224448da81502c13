use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failures while reading the book file, writing the results file or loading settings.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} is a directory", path.display())]
    IsADirectory { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("the file has no header row")]
    MissingHeader,

    /// A row whose field count differs from the fixed book schema.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {column} value {value:?} is not a number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: published year {value:?} is not a whole number")]
    InvalidYear { line: u64, value: String },

    #[error("page count {value:?} for {title:?} is not a whole number")]
    InvalidPageCount { title: String, value: String },

    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DataError {
    /// Classify an I/O failure on `path` into one of the file-access kinds.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => DataError::NotFound { path },
            io::ErrorKind::PermissionDenied => DataError::PermissionDenied { path },
            _ => DataError::Io { path, source },
        }
    }

    /// Whether this is one of the file-access kinds, as opposed to a fault in
    /// the file's contents.
    pub fn is_file_access(&self) -> bool {
        matches!(
            self,
            DataError::NotFound { .. }
                | DataError::IsADirectory { .. }
                | DataError::PermissionDenied { .. }
        )
    }

    /// One-line message shown to the user before returning to the menu.
    pub fn user_message(&self) -> String {
        match self {
            DataError::NotFound { .. } => {
                "ERROR: File not found. Please ensure the correct file is being used.".to_string()
            }
            DataError::IsADirectory { .. } => {
                "ERROR: The name entered is a directory. Please ensure a valid file is entered"
                    .to_string()
            }
            DataError::PermissionDenied { .. } => {
                "ERROR: Permission denied. Please ensure the correct file is being used."
                    .to_string()
            }
            other => format!("ERROR: {other}"),
        }
    }
}

/// Inputs a statistic is undefined for.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    #[error("no values to summarise")]
    EmptyInput,

    #[error("correlation is undefined when a sequence has zero variance")]
    ZeroVariance,

    #[error("sequences differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// Mode requested on a sequence containing nothing but the missing-value zero.
    #[error("every value is missing")]
    OnlyMissingValues,
}
