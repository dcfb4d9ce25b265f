//! The `run` command: wire config, store, collector, and screener into a
//! prospection run, then write reports and print the summary.

use anyhow::Context;

use prospect_core::{load_seeds, AppConfig, QualificationThresholds};
use prospect_instagram::{CandidateCollector, CollectorConfig, InstagramClient};
use prospect_screener::{OpenAiClient, ProfileScreener};
use prospect_store::HistoryStore;

use crate::report;
use crate::OutputFormat;

pub mod runner;

use runner::{ProspectionRunner, RunOutcome, RunStage};

pub async fn execute(
    config: &AppConfig,
    count: usize,
    format: OutputFormat,
    dry_run: bool,
) -> anyhow::Result<()> {
    tracing::info!(stage = %RunStage::Init, target = count, dry_run, "starting prospection run");

    // Missing collection credentials are fatal at startup: without them the
    // run cannot produce anything.
    let (Some(token), Some(ig_user_id)) = (
        config.instagram_access_token.as_deref(),
        config.instagram_user_id.as_deref(),
    ) else {
        anyhow::bail!(
            "Instagram credentials are not configured; set INSTAGRAM_ACCESS_TOKEN and INSTAGRAM_USER_ID"
        );
    };

    let seeds = load_seeds(&config.seeds_path).context("failed to load seeds file")?;

    // Store corruption aborts here, before any collection spend or writes.
    let mut store =
        HistoryStore::open(&config.data_dir).context("history store is unavailable")?;

    let client = InstagramClient::new(token, ig_user_id, config.request_timeout_secs)?;
    let collector = CandidateCollector::new(
        client,
        CollectorConfig {
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
            inter_request_delay_ms: config.inter_request_delay_ms,
            max_pages_per_hashtag: config.max_pages_per_hashtag,
            max_profiles_per_hashtag: config.max_profiles_per_hashtag,
        },
    );

    let screener = match config.openai_api_key.as_deref() {
        Some(key) => ProfileScreener::new(OpenAiClient::new(
            key,
            &config.openai_model,
            config.request_timeout_secs,
        )?),
        None => {
            tracing::warn!("OPENAI_API_KEY not set — screening falls back to the keyword heuristic");
            ProfileScreener::heuristic_only()
        }
    };

    let thresholds = QualificationThresholds {
        min_followers: config.min_followers,
        min_engagement_rate: config.min_engagement_rate,
    };

    let mut runner =
        ProspectionRunner::new(collector, screener, &mut store, thresholds, count, dry_run);
    let outcome = runner.run(&seeds).await.context("prospection run failed")?;

    if dry_run {
        tracing::info!("dry run — skipping report files");
    } else {
        let written = report::write_reports(&config.data_dir, format, &outcome)
            .context("failed to write reports")?;
        for path in written {
            println!("wrote {}", path.display());
        }
    }
    tracing::info!(stage = %RunStage::Done, "prospection run finished");

    print_summary(&outcome);
    Ok(())
}

fn print_summary(outcome: &RunOutcome) {
    let s = &outcome.summary;
    println!();
    println!("Prospection summary — {}", s.date);
    println!("  found:            {}", s.found);
    println!("  already seen:     {}", s.already_seen);
    println!("  below thresholds: {}", s.below_threshold);
    println!("  screened:         {}", s.screened);
    println!("  approved:         {}", s.approved);
    println!("  elapsed:          {:.1}s", s.elapsed_seconds);

    if !s.errors.is_empty() {
        println!("  partial failures: {}", s.errors.len());
        for error in &s.errors {
            println!("    - {error}");
        }
    }

    if !outcome.approved.is_empty() {
        println!();
        println!("Approved profiles:");
        for record in &outcome.approved {
            let c = &record.candidate;
            println!(
                "  @{:<24} {:>9} followers  {:>5.2}% eng  [{}]",
                c.id.username, c.followers, c.engagement_rate, c.source
            );
        }
    }
}
