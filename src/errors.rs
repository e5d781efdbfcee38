//! Error types shared by the session layer and the console front end.

use thiserror::Error;

/// Errors raised while opening the store session or running one of the
/// demonstration operations against it.
///
/// Backend failures are passed through untouched: retry and recovery policy
/// belongs to the storage client library, not to this demo.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error(transparent)]
    Store(#[from] object_store::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
