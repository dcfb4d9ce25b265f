//! The prospection run state machine.
//!
//! `INIT → COLLECTING → FILTERING → SCREENING → REPORTING → DONE`, with
//! `FAILED` reachable from any stage. Per-item failures (one seed, one
//! candidate) are logged and skipped; only store-level failures abort the
//! run. Collector and screener sit behind traits so the runner can be
//! tested against stubs with an in-memory-like store in a temp directory.

use async_trait::async_trait;

use prospect_core::{
    qualifies, ProfileCandidate, QualificationThresholds, RunSummary, ScreeningVerdict, SeedsFile,
};
use prospect_instagram::{CandidateCollector, CollectionOutcome};
use prospect_screener::ProfileScreener;
use prospect_store::{ApprovedRecord, HistoryStore, StoreError};

/// Stages of one prospection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Init,
    Collecting,
    Filtering,
    Screening,
    Reporting,
    Done,
    Failed,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunStage::Init => "init",
            RunStage::Collecting => "collecting",
            RunStage::Filtering => "filtering",
            RunStage::Screening => "screening",
            RunStage::Reporting => "reporting",
            RunStage::Done => "done",
            RunStage::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Candidate collection seam. The production impl sweeps the Graph API.
#[async_trait]
pub trait Collect {
    async fn collect(&mut self, seeds: &SeedsFile) -> CollectionOutcome;
}

#[async_trait]
impl Collect for CandidateCollector {
    async fn collect(&mut self, seeds: &SeedsFile) -> CollectionOutcome {
        CandidateCollector::collect(self, seeds).await
    }
}

/// Screening seam. The production impl calls the classification service.
#[async_trait]
pub trait Screen {
    async fn screen(&self, candidate: &ProfileCandidate) -> ScreeningVerdict;
}

#[async_trait]
impl Screen for ProfileScreener {
    async fn screen(&self, candidate: &ProfileCandidate) -> ScreeningVerdict {
        ProfileScreener::screen(self, candidate).await
    }
}

/// What a run produced: the summary counters and the records approved in
/// this run (already persisted unless the run was dry).
pub struct RunOutcome {
    pub summary: RunSummary,
    pub approved: Vec<ApprovedRecord>,
    pub stage: RunStage,
}

pub struct ProspectionRunner<'a, C, S> {
    collector: C,
    screener: S,
    store: &'a mut HistoryStore,
    thresholds: QualificationThresholds,
    target_count: usize,
    dry_run: bool,
    stage: RunStage,
}

impl<'a, C: Collect, S: Screen> ProspectionRunner<'a, C, S> {
    pub fn new(
        collector: C,
        screener: S,
        store: &'a mut HistoryStore,
        thresholds: QualificationThresholds,
        target_count: usize,
        dry_run: bool,
    ) -> Self {
        Self {
            collector,
            screener,
            store,
            thresholds,
            target_count,
            dry_run,
            stage: RunStage::Init,
        }
    }

    fn transition(&mut self, next: RunStage) {
        tracing::info!(from = %self.stage, to = %next, "run stage transition");
        self.stage = next;
    }

    /// Executes the run through the screening stage.
    ///
    /// Candidates are screened highest-followers-first until the target
    /// count is approved or the pool is exhausted. Every screened candidate
    /// is persisted immediately; a crash after N approvals keeps all N.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the history store cannot be written — the
    /// one failure class that aborts a run.
    pub async fn run(&mut self, seeds: &SeedsFile) -> Result<RunOutcome, StoreError> {
        let started = std::time::Instant::now();
        let mut summary = RunSummary {
            date: chrono::Utc::now().format("%Y-%m-%d").to_string(),
            ..RunSummary::default()
        };

        self.transition(RunStage::Collecting);
        let CollectionOutcome { candidates, errors } = self.collector.collect(seeds).await;
        summary.found = candidates.len();
        summary.errors = errors;

        self.transition(RunStage::Filtering);
        let survivors = self.filter(candidates, &mut summary);
        tracing::info!(
            found = summary.found,
            already_seen = summary.already_seen,
            below_threshold = summary.below_threshold,
            qualified = survivors.len(),
            "filtering finished"
        );

        self.transition(RunStage::Screening);
        let approved = match self.screen_batch(survivors, &mut summary).await {
            Ok(approved) => approved,
            Err(e) => {
                self.transition(RunStage::Failed);
                return Err(e);
            }
        };
        summary.approved = approved.len();

        self.transition(RunStage::Reporting);
        summary.elapsed_seconds = started.elapsed().as_secs_f64();

        Ok(RunOutcome {
            summary,
            approved,
            stage: self.stage,
        })
    }

    /// Drops already-processed ids, then applies the numeric thresholds.
    ///
    /// History is checked first so `already_seen` and `below_threshold`
    /// count disjoint sets.
    fn filter(
        &self,
        candidates: Vec<ProfileCandidate>,
        summary: &mut RunSummary,
    ) -> Vec<ProfileCandidate> {
        let mut survivors = Vec::new();
        for candidate in candidates {
            if self.store.has_been_processed(&candidate.id) {
                summary.already_seen += 1;
                tracing::debug!(id = %candidate.id, "already processed — skipping");
            } else if !qualifies(&candidate, &self.thresholds) {
                summary.below_threshold += 1;
                tracing::debug!(
                    id = %candidate.id,
                    followers = candidate.followers,
                    engagement = candidate.engagement_rate,
                    "below thresholds — skipping"
                );
            } else {
                survivors.push(candidate);
            }
        }
        survivors
    }

    /// Screens survivors one at a time, persisting every outcome.
    ///
    /// Each candidate is screened at most once: the pool holds no
    /// duplicates (collector dedup + history filter) and every screened id
    /// goes straight into the store.
    async fn screen_batch(
        &mut self,
        survivors: Vec<ProfileCandidate>,
        summary: &mut RunSummary,
    ) -> Result<Vec<ApprovedRecord>, StoreError> {
        let mut approved = Vec::new();

        for candidate in survivors {
            if approved.len() >= self.target_count {
                tracing::info!(
                    target = self.target_count,
                    "target count reached — stopping screening"
                );
                break;
            }

            let verdict = self.screener.screen(&candidate).await;
            summary.screened += 1;

            if self.dry_run {
                tracing::info!(
                    id = %candidate.id,
                    approved = verdict.recommended,
                    "dry run — outcome not persisted"
                );
                if verdict.recommended {
                    approved.push(ApprovedRecord::new(candidate, verdict));
                }
            } else if verdict.recommended {
                let record = ApprovedRecord::new(candidate, verdict);
                self.store.record_approved(&record)?;
                self.store
                    .mark_processed(&record.candidate, true, &record.verdict)?;
                tracing::info!(id = %record.candidate.id, "candidate approved and persisted");
                approved.push(record);
            } else {
                self.store.mark_processed(&candidate, false, &verdict)?;
                tracing::debug!(id = %candidate.id, rationale = %verdict.rationale, "candidate rejected");
            }
        }

        Ok(approved)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod runner_test;
