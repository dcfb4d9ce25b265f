//! HTTP client for the Instagram Graph API.
//!
//! Wraps `reqwest` with Graph-specific error handling, access-token
//! management, and typed response deserialization. Non-2xx responses are
//! classified through the Graph error envelope so throttling (codes 4, 17,
//! 32 or HTTP 429) is distinguishable from application-level errors.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::InstagramError;
use crate::types::{
    BusinessDiscovery, BusinessDiscoveryEnvelope, GraphErrorEnvelope, HashtagSearchResponse,
    RecentMediaResponse,
};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0/";

/// Graph error codes that signal throttling rather than a hard failure.
const THROTTLE_CODES: [i64; 3] = [4, 17, 32];

/// Graph error code for an object that cannot be queried — what Business
/// Discovery returns for private or non-Business/Creator accounts.
const UNSUPPORTED_REQUEST_CODE: i64 = 110;

/// Client for the Instagram Graph API.
///
/// Holds the HTTP client, access token, and the Business account id the
/// calls are made as. Use [`InstagramClient::new`] for production or
/// [`InstagramClient::with_base_url`] to point at a mock server in tests.
pub struct InstagramClient {
    client: Client,
    access_token: String,
    ig_user_id: String,
    base_url: Url,
}

impl InstagramClient {
    /// Creates a new client pointed at the production Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: &str,
        ig_user_id: &str,
        timeout_secs: u64,
    ) -> Result<Self, InstagramError> {
        Self::with_base_url(access_token, ig_user_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InstagramError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        access_token: &str,
        ig_user_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("prospect/0.1 (influencer-prospection)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InstagramError::ApiError {
            code: 0,
            message: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            ig_user_id: ig_user_id.to_owned(),
            base_url,
        })
    }

    /// Fetches a profile's public metrics via Business Discovery.
    ///
    /// Queries `/{ig-user-id}?fields=business_discovery.username(NAME){...}`
    /// with the 10 most recent posts' interaction counts for the engagement
    /// computation.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::ProfileUnavailable`] if the username is private,
    ///   deleted, or not a Business/Creator account.
    /// - [`InstagramError::RateLimited`] on throttling.
    /// - [`InstagramError::Http`] on network failure or 5xx.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn business_discovery(
        &self,
        username: &str,
    ) -> Result<BusinessDiscovery, InstagramError> {
        let fields = format!(
            "business_discovery.username({username})\
             {{username,name,biography,followers_count,media_count,\
             media.limit(10){{like_count,comments_count}}}}"
        );
        let path = self.ig_user_id.clone();
        let url = self.build_url(&path, &[("fields", fields)])?;

        let body = match self.request_json(url, &format!("business_discovery(@{username})")).await
        {
            Err(InstagramError::ApiError {
                code: UNSUPPORTED_REQUEST_CODE,
                ..
            }) => {
                return Err(InstagramError::ProfileUnavailable {
                    username: username.to_owned(),
                })
            }
            other => other?,
        };

        let envelope: BusinessDiscoveryEnvelope =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: format!("business_discovery(@{username})"),
                source: e,
            })?;

        envelope
            .business_discovery
            .ok_or_else(|| InstagramError::ProfileUnavailable {
                username: username.to_owned(),
            })
    }

    /// Resolves a hashtag name to its Graph API node id.
    ///
    /// Returns `Ok(None)` if the hashtag does not exist.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::RateLimited`] on throttling.
    /// - [`InstagramError::Http`] on network failure or 5xx.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn hashtag_search(&self, tag: &str) -> Result<Option<String>, InstagramError> {
        let url = self.build_url(
            "ig_hashtag_search",
            &[
                ("user_id", self.ig_user_id.clone()),
                ("q", tag.to_owned()),
            ],
        )?;
        let body = self.request_json(url, &format!("ig_hashtag_search(#{tag})")).await?;

        let response: HashtagSearchResponse =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: format!("ig_hashtag_search(#{tag})"),
                source: e,
            })?;

        Ok(response.data.into_iter().next().map(|node| node.id))
    }

    /// Fetches one page of recent media for a hashtag.
    ///
    /// Pass the `after` cursor from the previous page's `paging` block to
    /// continue; `None` fetches the first page.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::RateLimited`] on throttling.
    /// - [`InstagramError::Http`] on network failure or 5xx.
    /// - [`InstagramError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn recent_media(
        &self,
        hashtag_id: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<RecentMediaResponse, InstagramError> {
        let mut params: Vec<(&str, String)> = vec![
            ("user_id", self.ig_user_id.clone()),
            ("fields", "id,caption,permalink".to_owned()),
            ("limit", limit.to_string()),
        ];
        if let Some(cursor) = after {
            params.push(("after", cursor.to_owned()));
        }

        let url = self.build_url(&format!("{hashtag_id}/recent_media"), &params)?;
        let body = self
            .request_json(url, &format!("recent_media({hashtag_id})"))
            .await?;

        serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
            context: format!("recent_media({hashtag_id})"),
            source: e,
        })
    }

    fn build_url<S: AsRef<str>>(
        &self,
        path: &str,
        params: &[(&str, S)],
    ) -> Result<Url, InstagramError> {
        let mut url = self.base_url.join(path).map_err(|e| InstagramError::ApiError {
            code: 0,
            message: format!("invalid request path '{path}': {e}"),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", &self.access_token);
            for (key, value) in params {
                pairs.append_pair(key, value.as_ref());
            }
        }
        Ok(url)
    }

    /// Performs the GET request and returns the parsed JSON body.
    ///
    /// 5xx responses surface as [`InstagramError::Http`] so the retry layer
    /// treats them as transient; other non-2xx responses are classified
    /// through the Graph error envelope.
    async fn request_json(
        &self,
        url: Url,
        context: &str,
    ) -> Result<serde_json::Value, InstagramError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(InstagramError::RateLimited {
                message: format!("HTTP 429 from {context}"),
            });
        }

        if status.is_server_error() {
            if let Err(e) = response.error_for_status_ref() {
                return Err(InstagramError::Http(e));
            }
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::classify_error(&text, status));
        }

        serde_json::from_str(&text).map_err(|e| InstagramError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    fn classify_error(body: &str, status: StatusCode) -> InstagramError {
        match serde_json::from_str::<GraphErrorEnvelope>(body) {
            Ok(envelope) => {
                let error = envelope.error;
                if THROTTLE_CODES.contains(&error.code) {
                    InstagramError::RateLimited {
                        message: error.message,
                    }
                } else {
                    InstagramError::ApiError {
                        code: error.code,
                        message: error.message,
                    }
                }
            }
            Err(_) => InstagramError::ApiError {
                code: i64::from(status.as_u16()),
                message: "unrecognized error response body".to_owned(),
            },
        }
    }
}
