use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social platforms a profile identifier can belong to.
///
/// Live collection only runs against Instagram; the other variants keep
/// history rows written by earlier revisions readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Youtube,
}

impl Platform {
    /// Canonical public profile URL for a username on this platform.
    #[must_use]
    pub fn canonical_url(self, username: &str) -> String {
        match self {
            Platform::Instagram => format!("https://www.instagram.com/{username}/"),
            Platform::Tiktok => format!("https://www.tiktok.com/@{username}"),
            Platform::Youtube => format!("https://www.youtube.com/@{username}"),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Instagram => write!(f, "instagram"),
            Platform::Tiktok => write!(f, "tiktok"),
            Platform::Youtube => write!(f, "youtube"),
        }
    }
}

/// Unique profile identifier: platform plus normalized username.
///
/// Usernames are lowercased and stripped of a leading `@` so the same profile
/// always maps to the same history key regardless of how a caption or seed
/// list spelled it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId {
    pub platform: Platform,
    pub username: String,
}

impl ProfileId {
    #[must_use]
    pub fn new(platform: Platform, username: &str) -> Self {
        Self {
            platform,
            username: username.trim().trim_start_matches('@').to_lowercase(),
        }
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.platform, self.username)
    }
}

/// Influencer size class by follower count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfluencerSize {
    Nano,
    Micro,
    Small,
    Medium,
    Big,
    Mega,
}

impl InfluencerSize {
    #[must_use]
    pub fn from_followers(followers: u64) -> Self {
        match followers {
            0..=9_999 => InfluencerSize::Nano,
            10_000..=49_999 => InfluencerSize::Micro,
            50_000..=99_999 => InfluencerSize::Small,
            100_000..=499_999 => InfluencerSize::Medium,
            500_000..=999_999 => InfluencerSize::Big,
            _ => InfluencerSize::Mega,
        }
    }
}

/// A profile discovered by collection, not yet filtered or screened.
///
/// Immutable once built: the collector computes engagement from the recent
/// media it saw and the filter/screener only read from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCandidate {
    pub id: ProfileId,
    /// Display name as reported by the platform.
    pub name: String,
    pub followers: u64,
    /// Average interactions per recent post over follower count, as a percentage.
    pub engagement_rate: f64,
    pub avg_likes: u64,
    pub avg_comments: u64,
    pub bio: String,
    pub profile_url: String,
    /// Seed username or hashtag that produced this candidate.
    pub source: String,
    pub collected_at: DateTime<Utc>,
}

impl ProfileCandidate {
    #[must_use]
    pub fn size(&self) -> InfluencerSize {
        InfluencerSize::from_followers(self.followers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_id_normalizes_username() {
        let id = ProfileId::new(Platform::Instagram, " @Maria.Fit ");
        assert_eq!(id.username, "maria.fit");
        assert_eq!(id.to_string(), "instagram:maria.fit");
    }

    #[test]
    fn same_profile_different_spelling_is_equal() {
        let a = ProfileId::new(Platform::Instagram, "@WellnessJourney");
        let b = ProfileId::new(Platform::Instagram, "wellnessjourney");
        assert_eq!(a, b);
    }

    #[test]
    fn canonical_urls_per_platform() {
        assert_eq!(
            Platform::Instagram.canonical_url("maria"),
            "https://www.instagram.com/maria/"
        );
        assert_eq!(
            Platform::Tiktok.canonical_url("maria"),
            "https://www.tiktok.com/@maria"
        );
    }

    #[test]
    fn size_classes_match_follower_ranges() {
        assert_eq!(InfluencerSize::from_followers(500), InfluencerSize::Nano);
        assert_eq!(InfluencerSize::from_followers(10_000), InfluencerSize::Micro);
        assert_eq!(InfluencerSize::from_followers(49_999), InfluencerSize::Micro);
        assert_eq!(InfluencerSize::from_followers(75_000), InfluencerSize::Small);
        assert_eq!(
            InfluencerSize::from_followers(250_000),
            InfluencerSize::Medium
        );
        assert_eq!(InfluencerSize::from_followers(600_000), InfluencerSize::Big);
        assert_eq!(
            InfluencerSize::from_followers(2_000_000),
            InfluencerSize::Mega
        );
    }
}
