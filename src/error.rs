use std::path::PathBuf;

use thiserror::Error;

/// Failures of a conversion. Carried inside `anyhow::Error` so callers can
/// recover the kind with `downcast_ref`.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed GPX in {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("degenerate input: {0}")]
    Degenerate(String),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConvertError::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn degenerate(reason: impl ToString) -> Self {
        ConvertError::Degenerate(reason.to_string())
    }
}

/// Returns the `ConvertError` carried by an `anyhow::Error`, if any.
pub fn kind_of(err: &anyhow::Error) -> Option<&ConvertError> {
    err.downcast_ref::<ConvertError>()
}
