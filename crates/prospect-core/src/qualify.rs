//! Numeric qualification filter applied to collected candidates.
//!
//! Pure and deterministic: given the same candidate and thresholds the
//! outcome is always the same. History-based deduplication is a separate
//! concern handled by the runner against the store.

use crate::candidate::ProfileCandidate;

/// Minimum follower count and engagement rate a candidate must meet.
///
/// These vary across revisions of the prospection criteria, so they are
/// configuration, not constants.
#[derive(Debug, Clone, Copy)]
pub struct QualificationThresholds {
    pub min_followers: u64,
    /// Percentage, e.g. `2.5` for 2.5%.
    pub min_engagement_rate: f64,
}

/// Average interactions per post over follower count, as a percentage,
/// rounded to two decimals.
///
/// Zero followers or zero posts yield `0.0` — such profiles are never
/// qualified, which also rules out division by zero.
#[must_use]
pub fn engagement_rate(
    total_likes: u64,
    total_comments: u64,
    post_count: usize,
    followers: u64,
) -> f64 {
    if post_count == 0 || followers == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let avg = (total_likes + total_comments) as f64 / post_count as f64;
    #[allow(clippy::cast_precision_loss)]
    let rate = avg / followers as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Returns `true` iff the candidate meets both thresholds.
///
/// Candidates with zero followers never qualify.
#[must_use]
pub fn qualifies(candidate: &ProfileCandidate, thresholds: &QualificationThresholds) -> bool {
    candidate.followers > 0
        && candidate.followers >= thresholds.min_followers
        && candidate.engagement_rate >= thresholds.min_engagement_rate
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::candidate::{Platform, ProfileId};

    fn candidate(followers: u64, engagement: f64) -> ProfileCandidate {
        ProfileCandidate {
            id: ProfileId::new(Platform::Instagram, "testuser"),
            name: "Test User".to_owned(),
            followers,
            engagement_rate: engagement,
            avg_likes: 0,
            avg_comments: 0,
            bio: String::new(),
            profile_url: Platform::Instagram.canonical_url("testuser"),
            source: "seed_list".to_owned(),
            collected_at: Utc::now(),
        }
    }

    fn thresholds() -> QualificationThresholds {
        QualificationThresholds {
            min_followers: 10_000,
            min_engagement_rate: 2.5,
        }
    }

    #[test]
    fn three_hundred_interactions_over_ten_thousand_is_three_percent() {
        // 300 avg interactions per post at 10k followers = 3.0%
        assert!((engagement_rate(2_500, 500, 10, 10_000) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_hundred_interactions_over_ten_thousand_is_two_percent() {
        assert!((engagement_rate(1_800, 200, 10, 10_000) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_followers_rate_is_zero() {
        assert!((engagement_rate(500, 100, 10, 0)).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_posts_rate_is_zero() {
        assert!((engagement_rate(0, 0, 0, 10_000)).abs() < f64::EPSILON);
    }

    #[test]
    fn qualifying_candidate_passes() {
        assert!(qualifies(&candidate(10_000, 3.0), &thresholds()));
    }

    #[test]
    fn engagement_below_minimum_fails() {
        assert!(!qualifies(&candidate(10_000, 2.0), &thresholds()));
    }

    #[test]
    fn followers_below_minimum_fails() {
        assert!(!qualifies(&candidate(9_999, 5.0), &thresholds()));
    }

    #[test]
    fn zero_followers_never_qualifies() {
        let t = QualificationThresholds {
            min_followers: 0,
            min_engagement_rate: 0.0,
        };
        assert!(!qualifies(&candidate(0, 0.0), &t));
    }

    #[test]
    fn boundary_values_qualify() {
        assert!(qualifies(&candidate(10_000, 2.5), &thresholds()));
    }
}
