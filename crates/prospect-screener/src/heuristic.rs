//! Keyword heuristic used when no classifier API key is configured.
//!
//! Scores the bio against two marker lists: commercial markers push a
//! profile toward "not a real person", journey markers push it toward a
//! recommendation. Deliberately conservative — it only recommends when
//! journey markers are present and no commercial marker fires.

use prospect_core::{ProfileCandidate, ScreeningVerdict};

/// Bio substrings that mark shops, brands, and professionals selling services.
const COMMERCIAL_MARKERS: &[&str] = &[
    "shop",
    "store",
    "official page",
    "discount",
    "promo code",
    "free shipping",
    "delivery",
    "nutritionist",
    "dietitian",
    "personal trainer",
    "coach",
    "consulting",
    "clinic",
    "book now",
    "link in bio to buy",
];

/// Bio substrings that mark a personal journey account.
const JOURNEY_MARKERS: &[&str] = &[
    "journey",
    "my story",
    "weight loss",
    "losing weight",
    "transformation",
    "before and after",
    "day by day",
    "real life",
    "self care",
    "mom of",
    "lifestyle",
];

/// Screens a candidate from bio text alone.
#[must_use]
pub fn screen_basic(candidate: &ProfileCandidate) -> ScreeningVerdict {
    let bio = candidate.bio.to_lowercase();

    let commercial_hits = COMMERCIAL_MARKERS
        .iter()
        .filter(|marker| bio.contains(*marker))
        .count();
    let journey_hits = JOURNEY_MARKERS
        .iter()
        .filter(|marker| bio.contains(*marker))
        .count();

    let is_real_person = commercial_hits == 0;
    let recommended = is_real_person && journey_hits > 0;

    let authenticity = if is_real_person {
        60 + u8::try_from(journey_hits.min(4) * 10).unwrap_or(40)
    } else {
        20
    };
    let potential = if recommended { authenticity } else { 10 };

    let rationale = if !is_real_person {
        "bio matches commercial/professional markers".to_owned()
    } else if recommended {
        format!("bio matches {journey_hits} journey marker(s); no commercial markers")
    } else {
        "no journey markers in bio; heuristic cannot recommend".to_owned()
    };

    ScreeningVerdict {
        is_real_person,
        recommended,
        authenticity_score: authenticity,
        partnership_potential: potential,
        // Keyword matching is weak evidence; keep the confidence low so
        // downstream consumers can tell it apart from classifier verdicts.
        confidence: 30,
        rationale,
        tags: vec!["heuristic".to_owned()],
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use prospect_core::{Platform, ProfileId};

    use super::*;

    fn candidate(bio: &str) -> ProfileCandidate {
        ProfileCandidate {
            id: ProfileId::new(Platform::Instagram, "someone"),
            name: "Someone".to_owned(),
            followers: 15_000,
            engagement_rate: 3.0,
            avg_likes: 400,
            avg_comments: 50,
            bio: bio.to_owned(),
            profile_url: Platform::Instagram.canonical_url("someone"),
            source: "seed_list".to_owned(),
            collected_at: Utc::now(),
        }
    }

    #[test]
    fn journey_bio_is_recommended() {
        let v = screen_basic(&candidate("Documenting my weight loss journey, one day at a time"));
        assert!(v.is_real_person);
        assert!(v.recommended);
        assert_eq!(v.confidence, 30);
    }

    #[test]
    fn commercial_bio_is_rejected() {
        let v = screen_basic(&candidate("Official store — promo code SAVE20, free shipping"));
        assert!(!v.is_real_person);
        assert!(!v.recommended);
    }

    #[test]
    fn neutral_bio_is_not_recommended() {
        let v = screen_basic(&candidate("Living in São Paulo"));
        assert!(v.is_real_person);
        assert!(!v.recommended);
    }

    #[test]
    fn professional_bio_is_rejected_even_with_journey_words() {
        let v = screen_basic(&candidate("Personal trainer helping you with your journey"));
        assert!(!v.is_real_person);
        assert!(!v.recommended);
    }
}
