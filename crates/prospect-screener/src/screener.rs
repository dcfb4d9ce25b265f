//! The screening entry point used by the runner.

use prospect_core::{ProfileCandidate, ScreeningVerdict};

use crate::client::OpenAiClient;
use crate::heuristic::screen_basic;
use crate::parse::parse_verdict;
use crate::prompt::{build_screening_prompt, SYSTEM_PROMPT};

/// Screens candidates through the classifier, or through the keyword
/// heuristic when no client is configured.
///
/// `screen` is infallible by design: an API failure or unparseable reply
/// becomes a fail-closed verdict so one bad classification never aborts the
/// batch. The caller is responsible for invoking it at most once per
/// candidate per run — every call spends classification budget.
pub struct ProfileScreener {
    client: Option<OpenAiClient>,
}

impl ProfileScreener {
    /// Screener backed by the classification service.
    #[must_use]
    pub fn new(client: OpenAiClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Heuristic-only screener for runs without an API key.
    #[must_use]
    pub fn heuristic_only() -> Self {
        Self { client: None }
    }

    /// True when verdicts come from the classification service.
    #[must_use]
    pub fn uses_classifier(&self) -> bool {
        self.client.is_some()
    }

    pub async fn screen(&self, candidate: &ProfileCandidate) -> ScreeningVerdict {
        let Some(client) = &self.client else {
            return screen_basic(candidate);
        };

        let prompt = build_screening_prompt(candidate);
        match client.chat_completion(SYSTEM_PROMPT, &prompt).await {
            Ok(reply) => {
                let verdict = parse_verdict(&reply);
                tracing::info!(
                    candidate = %candidate.id,
                    recommended = verdict.recommended,
                    confidence = verdict.confidence,
                    "candidate screened"
                );
                verdict
            }
            Err(e) => {
                tracing::warn!(
                    candidate = %candidate.id,
                    stage = "screening",
                    error = %e,
                    "classification call failed — failing closed"
                );
                ScreeningVerdict::rejected(format!("screening call failed: {e}"))
            }
        }
    }
}
