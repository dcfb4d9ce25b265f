use thiserror::Error;

/// Errors returned by the chat-completion client.
///
/// These stay internal to the crate: [`crate::ProfileScreener::screen`]
/// converts every failure into a fail-closed verdict.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completions API returned a non-2xx status.
    #[error("completions API returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with no choices or empty content.
    #[error("completions API returned an empty response")]
    EmptyResponse,
}
