use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    /// Instagram Graph API access token. `None` means collection is not
    /// configured; the runner refuses to start without the credential pair.
    pub instagram_access_token: Option<String>,
    /// Instagram Business account id the Graph API calls are made as.
    pub instagram_user_id: Option<String>,
    /// OpenAI API key. `None` degrades screening to the keyword heuristic.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub data_dir: PathBuf,
    pub seeds_path: PathBuf,
    pub log_level: String,
    pub min_followers: u64,
    pub min_engagement_rate: f64,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub inter_request_delay_ms: u64,
    pub max_pages_per_hashtag: usize,
    pub max_profiles_per_hashtag: usize,
}

impl AppConfig {
    /// True when both Instagram credentials are present.
    #[must_use]
    pub fn instagram_configured(&self) -> bool {
        self.instagram_access_token.is_some() && self.instagram_user_id.is_some()
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "instagram_access_token",
                &self.instagram_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "instagram_user_id",
                &self.instagram_user_id.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("openai_model", &self.openai_model)
            .field("data_dir", &self.data_dir)
            .field("seeds_path", &self.seeds_path)
            .field("log_level", &self.log_level)
            .field("min_followers", &self.min_followers)
            .field("min_engagement_rate", &self.min_engagement_rate)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("max_pages_per_hashtag", &self.max_pages_per_hashtag)
            .field("max_profiles_per_hashtag", &self.max_profiles_per_hashtag)
            .finish()
    }
}
