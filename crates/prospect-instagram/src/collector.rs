//! Candidate collection from seed usernames and hashtags.
//!
//! The sweep is deliberately tolerant: one seed or hashtag failing must not
//! abort collection for the rest. Failures are logged with the source and
//! recorded in the outcome so the run summary can report them.

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use regex::Regex;

use prospect_core::{engagement_rate, Platform, ProfileCandidate, ProfileId, SeedsFile};

use crate::client::InstagramClient;
use crate::error::InstagramError;
use crate::pagination::next_cursor;
use crate::retry::retry_with_backoff;
use crate::types::BusinessDiscovery;

/// Usernames shorter than this are almost always truncated caption noise.
const MIN_MENTION_LEN: usize = 3;

/// Media fetched per hashtag page.
const MEDIA_PAGE_LIMIT: u32 = 50;

/// Knobs for a collection sweep, taken from [`prospect_core::AppConfig`].
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub inter_request_delay_ms: u64,
    /// Continuation-cursor pages followed per hashtag before traversal stops.
    pub max_pages_per_hashtag: usize,
    /// New profiles looked up per hashtag.
    pub max_profiles_per_hashtag: usize,
}

/// What a sweep produced: candidates plus the per-source failures that were
/// skipped along the way.
#[derive(Debug)]
pub struct CollectionOutcome {
    /// Collected candidates, sorted by follower count descending.
    pub candidates: Vec<ProfileCandidate>,
    pub errors: Vec<String>,
}

/// Sweeps seed usernames and hashtags into profile candidates.
pub struct CandidateCollector {
    client: InstagramClient,
    config: CollectorConfig,
    seen: HashSet<String>,
    mention_re: Regex,
}

impl CandidateCollector {
    #[must_use]
    pub fn new(client: InstagramClient, config: CollectorConfig) -> Self {
        Self {
            client,
            config,
            seen: HashSet::new(),
            mention_re: Regex::new(r"@([A-Za-z0-9_.]+)").expect("valid regex"),
        }
    }

    /// Collects candidates from every seed account and hashtag in `seeds`.
    ///
    /// Network or API errors on one source are logged and recorded; the
    /// sweep continues with the remaining sources. Profiles that Business
    /// Discovery cannot resolve (private, non-Business) are skipped quietly.
    pub async fn collect(&mut self, seeds: &SeedsFile) -> CollectionOutcome {
        let mut candidates = Vec::new();
        let mut errors = Vec::new();

        tracing::info!(
            seed_accounts = seeds.seed_accounts.len(),
            hashtags = seeds.hashtags.len(),
            "starting collection sweep"
        );

        for username in &seeds.seed_accounts {
            match self.lookup_candidate(username, "seed_list").await {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(
                        username = %username,
                        stage = "collecting",
                        error = %e,
                        "seed account lookup failed — skipping"
                    );
                    errors.push(format!("seed @{username}: {e}"));
                }
            }
            self.pause().await;
        }

        for tag in &seeds.hashtags {
            match self.collect_hashtag(tag).await {
                Ok(mut from_tag) => {
                    tracing::info!(hashtag = %tag, count = from_tag.len(), "hashtag swept");
                    candidates.append(&mut from_tag);
                }
                Err(e) => {
                    tracing::warn!(
                        hashtag = %tag,
                        stage = "collecting",
                        error = %e,
                        "hashtag sweep failed — skipping"
                    );
                    errors.push(format!("hashtag #{tag}: {e}"));
                }
            }
        }

        candidates.sort_by(|a, b| b.followers.cmp(&a.followers));

        tracing::info!(
            found = candidates.len(),
            errors = errors.len(),
            "collection sweep finished"
        );

        CollectionOutcome { candidates, errors }
    }

    /// Sweeps one hashtag: resolve its id, page through recent media, and
    /// look up every new `@mention` found in captions.
    async fn collect_hashtag(
        &mut self,
        tag: &str,
    ) -> Result<Vec<ProfileCandidate>, InstagramError> {
        let Some(hashtag_id) = self.with_retry(|| self.client.hashtag_search(tag)).await? else {
            tracing::debug!(hashtag = %tag, "hashtag not found");
            return Ok(Vec::new());
        };

        let mut usernames: Vec<String> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.config.max_pages_per_hashtag {
                tracing::debug!(
                    hashtag = %tag,
                    max_pages = self.config.max_pages_per_hashtag,
                    "page limit reached — stopping traversal"
                );
                break;
            }
            if page_count > 1 {
                self.pause().await;
            }

            let page = self
                .with_retry(|| {
                    self.client
                        .recent_media(&hashtag_id, MEDIA_PAGE_LIMIT, cursor.as_deref())
                })
                .await?;

            for media in &page.data {
                if let Some(caption) = &media.caption {
                    for mention in self.extract_mentions(caption) {
                        if !usernames.contains(&mention) {
                            usernames.push(mention);
                        }
                    }
                }
            }

            if usernames.len() >= self.config.max_profiles_per_hashtag {
                break;
            }

            cursor = next_cursor(page.paging.as_ref());
            if cursor.is_none() {
                break;
            }
        }

        usernames.truncate(self.config.max_profiles_per_hashtag);

        let mut candidates = Vec::new();
        for username in usernames {
            match self.lookup_candidate(&username, tag).await {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(e) => {
                    // One mentioned profile failing is not a hashtag failure.
                    tracing::debug!(
                        username = %username,
                        hashtag = %tag,
                        error = %e,
                        "mentioned profile lookup failed — skipping"
                    );
                }
            }
            self.pause().await;
        }

        Ok(candidates)
    }

    /// Looks up one username via Business Discovery with retries.
    ///
    /// Returns `Ok(None)` for duplicates within the sweep and for profiles
    /// Business Discovery cannot resolve.
    async fn lookup_candidate(
        &mut self,
        username: &str,
        source: &str,
    ) -> Result<Option<ProfileCandidate>, InstagramError> {
        let id = ProfileId::new(Platform::Instagram, username);
        if id.username.len() < MIN_MENTION_LEN || !self.seen.insert(id.username.clone()) {
            return Ok(None);
        }

        let lookup = self
            .with_retry(|| self.client.business_discovery(&id.username))
            .await;

        match lookup {
            Ok(discovery) => Ok(Some(Self::candidate_from_discovery(&discovery, source))),
            Err(InstagramError::ProfileUnavailable { username }) => {
                tracing::debug!(username = %username, "profile not available via business discovery");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn candidate_from_discovery(discovery: &BusinessDiscovery, source: &str) -> ProfileCandidate {
        let media: &[crate::types::MediaMetrics] = discovery
            .media
            .as_ref()
            .map_or(&[], |list| list.data.as_slice());

        let post_count = media.len();
        let total_likes: u64 = media.iter().map(|m| m.like_count).sum();
        let total_comments: u64 = media.iter().map(|m| m.comments_count).sum();

        let rate = engagement_rate(
            total_likes,
            total_comments,
            post_count,
            discovery.followers_count,
        );
        let (avg_likes, avg_comments) = if post_count == 0 {
            (0, 0)
        } else {
            (
                total_likes / post_count as u64,
                total_comments / post_count as u64,
            )
        };

        let id = ProfileId::new(Platform::Instagram, &discovery.username);
        let profile_url = Platform::Instagram.canonical_url(&id.username);

        ProfileCandidate {
            name: discovery
                .name
                .clone()
                .unwrap_or_else(|| discovery.username.clone()),
            followers: discovery.followers_count,
            engagement_rate: rate,
            avg_likes,
            avg_comments,
            bio: discovery.biography.clone().unwrap_or_default(),
            profile_url,
            source: source.to_owned(),
            collected_at: Utc::now(),
            id,
        }
    }

    fn extract_mentions(&self, caption: &str) -> Vec<String> {
        self.mention_re
            .captures_iter(caption)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_lowercase())
            .filter(|m| m.len() >= MIN_MENTION_LEN)
            .collect()
    }

    async fn with_retry<T, F, Fut>(&self, operation: F) -> Result<T, InstagramError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, InstagramError>>,
    {
        retry_with_backoff(
            self.config.max_retries,
            self.config.retry_backoff_base_ms,
            operation,
        )
        .await
    }

    async fn pause(&self) {
        if self.config.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.inter_request_delay_ms)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> CandidateCollector {
        let client = InstagramClient::with_base_url("token", "123", 5, "http://localhost:9")
            .expect("client construction should not fail");
        CandidateCollector::new(
            client,
            CollectorConfig {
                max_retries: 0,
                retry_backoff_base_ms: 0,
                inter_request_delay_ms: 0,
                max_pages_per_hashtag: 1,
                max_profiles_per_hashtag: 5,
            },
        )
    }

    #[test]
    fn mentions_are_extracted_lowercased() {
        let c = collector();
        let mentions =
            c.extract_mentions("Loving this journey with @Maria.Fit and @wellness_ana! #fit");
        assert_eq!(mentions, vec!["maria.fit", "wellness_ana"]);
    }

    #[test]
    fn short_mentions_are_dropped() {
        let c = collector();
        assert!(c.extract_mentions("thanks @ab for the tag").is_empty());
    }

    #[test]
    fn caption_without_mentions_yields_nothing() {
        let c = collector();
        assert!(c.extract_mentions("no handles here, just #hashtags").is_empty());
    }

    #[test]
    fn engagement_uses_recent_media() {
        let discovery = BusinessDiscovery {
            username: "Maria.Fit".to_owned(),
            name: Some("Maria".to_owned()),
            biography: Some("sharing my journey".to_owned()),
            followers_count: 10_000,
            media_count: 42,
            media: Some(crate::types::MediaList {
                data: (0..10)
                    .map(|_| crate::types::MediaMetrics {
                        like_count: 270,
                        comments_count: 30,
                    })
                    .collect(),
            }),
        };
        let candidate = CandidateCollector::candidate_from_discovery(&discovery, "seed_list");
        assert_eq!(candidate.id.username, "maria.fit");
        assert!((candidate.engagement_rate - 3.0).abs() < f64::EPSILON);
        assert_eq!(candidate.avg_likes, 270);
        assert_eq!(candidate.avg_comments, 30);
        assert_eq!(candidate.source, "seed_list");
    }

    #[test]
    fn zero_followers_candidate_has_zero_engagement() {
        let discovery = BusinessDiscovery {
            username: "ghost".to_owned(),
            name: None,
            biography: None,
            followers_count: 0,
            media_count: 0,
            media: None,
        };
        let candidate = CandidateCollector::candidate_from_discovery(&discovery, "seed_list");
        assert!((candidate.engagement_rate).abs() < f64::EPSILON);
        assert_eq!(candidate.avg_likes, 0);
    }
}
