use std::path::Path;

use thiserror::Error;

/// Errors from the fallible surfaces (storage, config, JSON bridge).
/// The metrics pipeline itself never fails.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("json encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        CoreError::Io { path: path.display().to_string(), source }
    }

    pub(crate) fn from_path_error(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        CoreError::Parse {
            path: e.path().to_string(),
            message: e.into_inner().to_string(),
        }
    }
}
