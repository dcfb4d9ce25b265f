//! Tolerant parsing of classifier replies into verdicts.
//!
//! Models wrap JSON in markdown fences or pad it with prose often enough
//! that strict parsing would reject a meaningful share of replies. Parsing
//! here peels fences, then falls back to the outermost brace-delimited
//! block. Anything still unparseable becomes the fail-closed verdict — a
//! malformed reply must never abort the batch.

use serde::Deserialize;

use prospect_core::ScreeningVerdict;

/// Verdict as the classifier writes it. Missing fields default to the
/// rejecting value so partial JSON fails closed.
#[derive(Debug, Deserialize)]
struct VerdictWire {
    #[serde(default)]
    is_real_person: bool,
    #[serde(default)]
    recommended: bool,
    #[serde(default)]
    authenticity_score: i64,
    #[serde(default)]
    partnership_potential: i64,
    #[serde(default)]
    confidence: i64,
    #[serde(default)]
    rationale: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Parses a raw reply into a verdict.
///
/// Returns the unparseable-response verdict when no JSON object can be
/// extracted.
#[must_use]
pub fn parse_verdict(raw: &str) -> ScreeningVerdict {
    let cleaned = strip_code_fences(raw);

    let wire = serde_json::from_str::<VerdictWire>(cleaned.trim())
        .ok()
        .or_else(|| {
            extract_json_object(&cleaned)
                .and_then(|block| serde_json::from_str::<VerdictWire>(block).ok())
        });

    match wire {
        Some(wire) => ScreeningVerdict {
            is_real_person: wire.is_real_person,
            recommended: wire.recommended,
            authenticity_score: clamp_score(wire.authenticity_score),
            partnership_potential: clamp_score(wire.partnership_potential),
            confidence: clamp_score(wire.confidence),
            rationale: wire.rationale,
            tags: wire.tags,
        },
        None => {
            tracing::warn!(
                reply = raw.chars().take(120).collect::<String>(),
                "classifier reply could not be parsed — failing closed"
            );
            ScreeningVerdict::unparseable()
        }
    }
}

/// Removes a leading ```/```json fence pair if present.
fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_owned();
    }

    let inner: &str = trimmed
        .trim_start_matches("```")
        .trim_start_matches("json")
        .trim_start_matches("JSON");
    match inner.find("```") {
        Some(end) => inner[..end].trim().to_owned(),
        None => inner.trim().to_owned(),
    }
}

/// Slices the outermost `{...}` block out of prose-padded replies.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}
