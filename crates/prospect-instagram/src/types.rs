//! Typed wire shapes for the Graph API endpoints this crate calls.
//!
//! Responses are deserialized at the boundary immediately after each call;
//! unknown shapes surface as deserialization errors rather than flowing
//! through the pipeline as loose JSON.

use serde::Deserialize;

/// Envelope returned when querying `/{ig-user-id}?fields=business_discovery...`.
#[derive(Debug, Deserialize)]
pub struct BusinessDiscoveryEnvelope {
    pub business_discovery: Option<BusinessDiscovery>,
}

/// Public metrics of a Business/Creator profile.
#[derive(Debug, Deserialize)]
pub struct BusinessDiscovery {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub media_count: u64,
    #[serde(default)]
    pub media: Option<MediaList>,
}

#[derive(Debug, Deserialize)]
pub struct MediaList {
    #[serde(default)]
    pub data: Vec<MediaMetrics>,
}

/// Per-post interaction counts used for the engagement computation.
#[derive(Debug, Deserialize)]
pub struct MediaMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

/// Response of `/ig_hashtag_search`.
#[derive(Debug, Deserialize)]
pub struct HashtagSearchResponse {
    #[serde(default)]
    pub data: Vec<HashtagNode>,
}

#[derive(Debug, Deserialize)]
pub struct HashtagNode {
    pub id: String,
}

/// One page of `/{hashtag-id}/recent_media`.
#[derive(Debug, Deserialize)]
pub struct RecentMediaResponse {
    #[serde(default)]
    pub data: Vec<HashtagMedia>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
pub struct HashtagMedia {
    pub id: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
}

/// Graph API cursor block attached to paged responses.
#[derive(Debug, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub cursors: Option<Cursors>,
    /// Full URL of the next page; absent on the last page.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Cursors {
    #[serde(default)]
    pub after: Option<String>,
}

/// Error envelope the Graph API wraps failures in.
#[derive(Debug, Deserialize)]
pub struct GraphErrorEnvelope {
    pub error: GraphError,
}

#[derive(Debug, Deserialize)]
pub struct GraphError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub error_subcode: Option<i64>,
}
