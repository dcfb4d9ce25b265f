//! Screening prompt construction.

use prospect_core::ProfileCandidate;

/// Pins the assistant to the analyst role and a JSON-only reply.
pub const SYSTEM_PROMPT: &str = "You are an expert at vetting social media \
profiles for influencer marketing partnerships. Reply with a single valid \
JSON object only — no markdown, no commentary.";

/// Builds the user message for one candidate.
///
/// Bio text is truncated so an adversarial or rambling bio cannot blow up
/// the token budget.
#[must_use]
pub fn build_screening_prompt(candidate: &ProfileCandidate) -> String {
    let bio: String = candidate.bio.chars().take(500).collect();
    let bio = if bio.is_empty() {
        "not available".to_owned()
    } else {
        bio
    };

    format!(
        "Analyze this {platform} profile and decide whether it belongs to a REAL \
PERSON with partnership potential for a health & wellness brand.\n\
\n\
PROFILE:\n\
- Username: @{username}\n\
- Name: {name}\n\
- Followers: {followers}\n\
- Engagement rate: {engagement:.2}%\n\
- Bio: {bio}\n\
\n\
CRITERIA:\n\
1. We want real people sharing their own lives, not commercial pages, shops, \
or professionals selling services (nutritionists, coaches, trainers).\n\
2. Ideal: people documenting a genuine wellness or weight-loss journey.\n\
3. Smaller accounts with authentic engagement beat big polished ones.\n\
\n\
Reply with ONLY this JSON object:\n\
{{\n\
    \"is_real_person\": true | false,\n\
    \"recommended\": true | false,\n\
    \"authenticity_score\": 0-100,\n\
    \"partnership_potential\": 0-100,\n\
    \"confidence\": 0-100,\n\
    \"rationale\": \"brief explanation\",\n\
    \"tags\": [\"relevant\", \"tags\"]\n\
}}",
        platform = candidate.id.platform,
        username = candidate.id.username,
        name = candidate.name,
        followers = candidate.followers,
        engagement = candidate.engagement_rate,
        bio = bio,
    )
}
