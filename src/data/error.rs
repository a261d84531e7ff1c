use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading the pubs dataset.
///
/// `Clone` because a failed load is memoized and handed out on every access.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The file is missing, unreadable, not valid CSV, or lacks a required column.
    #[error("dataset unavailable ({}): {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// A cell could not be coerced to the type its column requires.
    #[error("invalid data in row {row}, column '{column}': '{value}' is not a number")]
    InvalidData {
        row: usize,
        column: String,
        value: String,
    },
}

impl DataError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        DataError::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
