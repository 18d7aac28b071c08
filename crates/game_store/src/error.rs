use std::path::PathBuf;

use thiserror::Error;

/// Failures inside a store. These are logged at the [`crate::GameStore`]
/// boundary and never handed to the engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("saved game {0} not found")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Convert a store result into the trait's sentinel form, logging failures.
pub(crate) fn logged<T>(what: &str, result: StoreResult<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, "{what} failed");
            None
        }
    }
}
