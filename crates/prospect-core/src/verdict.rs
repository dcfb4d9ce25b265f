use serde::{Deserialize, Serialize};

/// Marker rationale used when the classification service returned something
/// that could not be parsed into a verdict.
pub const UNPARSEABLE_RATIONALE: &str = "unparseable screening response";

/// Structured output of the screening step for one candidate.
///
/// Attached to a candidate after screening and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningVerdict {
    /// Whether the profile belongs to a real person rather than a
    /// commercial page, shop, or professional selling services.
    pub is_real_person: bool,
    pub recommended: bool,
    /// 0–100: how authentic the profile reads.
    pub authenticity_score: u8,
    /// 0–100: partnership potential for the brand.
    pub partnership_potential: u8,
    /// 0–100: the classifier's own confidence in this verdict.
    pub confidence: u8,
    pub rationale: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ScreeningVerdict {
    /// Fail-closed verdict: not a recommendation, zero scores.
    ///
    /// Used when the classification call failed or its response was
    /// malformed, so one bad classification never aborts the batch.
    #[must_use]
    pub fn rejected(rationale: impl Into<String>) -> Self {
        Self {
            is_real_person: false,
            recommended: false,
            authenticity_score: 0,
            partnership_potential: 0,
            confidence: 0,
            rationale: rationale.into(),
            tags: Vec::new(),
        }
    }

    /// Fail-closed verdict carrying the unparseable-response marker.
    #[must_use]
    pub fn unparseable() -> Self {
        Self::rejected(UNPARSEABLE_RATIONALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_verdict_is_not_recommended() {
        let v = ScreeningVerdict::rejected("api call failed");
        assert!(!v.recommended);
        assert!(!v.is_real_person);
        assert_eq!(v.authenticity_score, 0);
        assert_eq!(v.rationale, "api call failed");
    }

    #[test]
    fn unparseable_verdict_carries_marker() {
        let v = ScreeningVerdict::unparseable();
        assert!(!v.recommended);
        assert_eq!(v.rationale, UNPARSEABLE_RATIONALE);
    }
}
