use thiserror::Error;

/// Errors returned by the history store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The history file exists but cannot be parsed. Fatal: continuing with
    /// an empty history would re-process every profile ever screened.
    #[error("history file {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
