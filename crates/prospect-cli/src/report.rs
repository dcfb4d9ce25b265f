//! Report writers for finished runs: JSON, CSV, and Markdown under the
//! data directory, named `prospects_<date>.<ext>`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use prospect_core::{ProfileCandidate, RunSummary, ScreeningVerdict};
use prospect_store::csv;

use crate::run::runner::RunOutcome;
use crate::OutputFormat;

#[derive(Serialize)]
struct ReportFile<'a> {
    summary: &'a RunSummary,
    influencers: Vec<ReportEntry<'a>>,
}

#[derive(Serialize)]
struct ReportEntry<'a> {
    profile: &'a ProfileCandidate,
    verdict: &'a ScreeningVerdict,
    approved_at: DateTime<Utc>,
}

/// Writes the selected report format(s) and returns the written paths.
///
/// # Errors
///
/// Returns an error if a report file cannot be serialized or written.
pub fn write_reports(
    data_dir: &Path,
    format: OutputFormat,
    outcome: &RunOutcome,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(data_dir)?;

    let date = &outcome.summary.date;
    let mut written = Vec::new();

    if matches!(format, OutputFormat::Json | OutputFormat::All) {
        let path = data_dir.join(format!("prospects_{date}.json"));
        std::fs::write(&path, render_json(outcome)?)?;
        written.push(path);
    }

    if matches!(format, OutputFormat::Csv | OutputFormat::All) {
        let path = data_dir.join(format!("prospects_{date}.csv"));
        std::fs::write(&path, render_csv(outcome))?;
        written.push(path);
    }

    if matches!(format, OutputFormat::Markdown | OutputFormat::All) {
        let path = data_dir.join(format!("prospects_{date}.md"));
        std::fs::write(&path, render_markdown(outcome))?;
        written.push(path);
    }

    Ok(written)
}

fn render_json(outcome: &RunOutcome) -> anyhow::Result<String> {
    let report = ReportFile {
        summary: &outcome.summary,
        influencers: outcome
            .approved
            .iter()
            .map(|record| ReportEntry {
                profile: &record.candidate,
                verdict: &record.verdict,
                approved_at: record.approved_at,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_csv(outcome: &RunOutcome) -> String {
    let mut lines = vec![
        "name,platform,username,url,followers,engagement_rate,avg_likes,bio,source,approved_at"
            .to_owned(),
    ];

    for record in &outcome.approved {
        let c = &record.candidate;
        lines.push(csv::row(&[
            c.name.clone(),
            c.id.platform.to_string(),
            c.id.username.clone(),
            c.profile_url.clone(),
            c.followers.to_string(),
            format!("{:.2}", c.engagement_rate),
            c.avg_likes.to_string(),
            c.bio.chars().take(100).collect(),
            c.source.clone(),
            record.approved_at.format("%Y-%m-%d %H:%M").to_string(),
        ]));
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}

fn render_markdown(outcome: &RunOutcome) -> String {
    let s = &outcome.summary;
    let mut lines = vec![
        format!("# Prospection Report — {}", s.date),
        String::new(),
        "## Summary".to_owned(),
        String::new(),
        "| Metric | Value |".to_owned(),
        "|--------|-------|".to_owned(),
        format!("| Found | {} |", s.found),
        format!("| Already seen | {} |", s.already_seen),
        format!("| Below thresholds | {} |", s.below_threshold),
        format!("| Screened | {} |", s.screened),
        format!("| Approved | {} |", s.approved),
        format!("| Elapsed | {:.1}s |", s.elapsed_seconds),
        String::new(),
    ];

    if !outcome.approved.is_empty() {
        lines.push("## Approved Influencers".to_owned());
        lines.push(String::new());
        lines.push("| # | Name | Username | Followers | Engagement | Source |".to_owned());
        lines.push("|---|------|----------|-----------|------------|--------|".to_owned());
        for (i, record) in outcome.approved.iter().enumerate() {
            let c = &record.candidate;
            lines.push(format!(
                "| {} | {} | @{} | {} | {:.2}% | {} |",
                i + 1,
                c.name,
                c.id.username,
                c.followers,
                c.engagement_rate,
                c.source
            ));
        }
        lines.push(String::new());

        for (i, record) in outcome.approved.iter().enumerate() {
            let c = &record.candidate;
            let v = &record.verdict;
            lines.push(format!("### {}. {}", i + 1, c.name));
            lines.push(String::new());
            lines.push(format!("- **URL:** {}", c.profile_url));
            lines.push(format!("- **Followers:** {}", c.followers));
            lines.push(format!("- **Engagement rate:** {:.2}%", c.engagement_rate));
            lines.push(format!("- **Authenticity:** {}/100", v.authenticity_score));
            lines.push(format!(
                "- **Partnership potential:** {}/100",
                v.partnership_potential
            ));
            lines.push(format!("- **Rationale:** {}", v.rationale));
            if !c.bio.is_empty() {
                let bio: String = c.bio.chars().take(200).collect();
                lines.push(format!("- **Bio:** {bio}"));
            }
            lines.push(String::new());
        }
    }

    if !s.errors.is_empty() {
        lines.push("## Partial Failures".to_owned());
        lines.push(String::new());
        for error in &s.errors {
            lines.push(format!("- {error}"));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
