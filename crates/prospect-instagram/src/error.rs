use thiserror::Error;

/// Errors returned by the Instagram Graph API client.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 429 or a Graph API throttling error code (4, 17, 32).
    #[error("rate limited by the Graph API: {message}")]
    RateLimited { message: String },

    /// The Graph API returned an error envelope that is not a throttle.
    #[error("Graph API error (code {code}): {message}")]
    ApiError { code: i64, message: String },

    /// Business Discovery could not resolve the profile: private account,
    /// non-Business/Creator account, or deleted.
    #[error("profile @{username} is not available via business discovery")]
    ProfileUnavailable { username: String },
}
