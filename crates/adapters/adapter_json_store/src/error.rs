//! JSON store error type wrapping IO and serde failures.

use venuebook_domain::error::VenuebookError;

/// Errors originating from the file-backed store.
#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    /// Reading or writing a file failed.
    #[error("failed to access {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file did not hold the expected JSON.
    #[error("invalid JSON in {path}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl JsonStoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.display().to_string(),
            source,
        }
    }
}

impl From<JsonStoreError> for VenuebookError {
    fn from(err: JsonStoreError) -> Self {
        Self::Storage(Box::new(err))
    }
}
