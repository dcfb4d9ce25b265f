use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prospect_core::{ProfileCandidate, ProfileId, ScreeningVerdict};

use crate::csv;
use crate::error::StoreError;

const HISTORY_FILE: &str = "processed_profiles.json";
const APPROVED_FILE: &str = "approved_influencers.csv";

const CSV_HEADER: &str = "approved_at,name,username,platform,url,followers,\
engagement_rate,is_real_person,authenticity_score,partnership_potential,\
confidence,rationale,source";

/// One screened profile as stored in the history index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedEntry {
    pub id: ProfileId,
    pub name: String,
    pub processed_at: DateTime<Utc>,
    pub approved: bool,
    pub verdict: ScreeningVerdict,
}

/// On-disk shape of `processed_profiles.json`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryFile {
    last_updated: Option<DateTime<Utc>>,
    total_processed: usize,
    total_approved: usize,
    #[serde(default)]
    profiles: BTreeMap<String, ProcessedEntry>,
}

/// An approved profile headed for the CSV.
#[derive(Debug, Clone)]
pub struct ApprovedRecord {
    pub candidate: ProfileCandidate,
    pub verdict: ScreeningVerdict,
    pub approved_at: DateTime<Utc>,
}

impl ApprovedRecord {
    #[must_use]
    pub fn new(candidate: ProfileCandidate, verdict: ScreeningVerdict) -> Self {
        Self {
            candidate,
            verdict,
            approved_at: Utc::now(),
        }
    }

    fn csv_fields(&self) -> Vec<String> {
        let c = &self.candidate;
        let v = &self.verdict;
        vec![
            self.approved_at.format("%Y-%m-%d %H:%M").to_string(),
            c.name.clone(),
            c.id.username.clone(),
            c.id.platform.to_string(),
            c.profile_url.clone(),
            c.followers.to_string(),
            format!("{:.2}", c.engagement_rate),
            v.is_real_person.to_string(),
            v.authenticity_score.to_string(),
            v.partnership_potential.to_string(),
            v.confidence.to_string(),
            v.rationale.clone(),
            c.source.clone(),
        ]
    }
}

/// History statistics for the `stats` command.
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub total_processed: usize,
    pub total_approved: usize,
    pub approval_rate: f64,
    /// platform → (processed, approved)
    pub by_platform: BTreeMap<String, (usize, usize)>,
}

/// Flat-file store of processed and approved profiles.
///
/// Only ever written by the single active runner; every mutation persists
/// immediately so an interrupted run keeps everything it already wrote.
pub struct HistoryStore {
    history_path: PathBuf,
    approved_path: PathBuf,
    history: HistoryFile,
}

impl HistoryStore {
    /// Opens the store under `data_dir`, creating the directory if needed.
    ///
    /// A missing history file is an empty history (first run). An existing
    /// file that cannot be read or parsed is fatal.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Io`] if the directory cannot be created or the file
    ///   cannot be read.
    /// - [`StoreError::Corrupt`] if the history file exists but does not
    ///   parse.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(data_dir).map_err(|e| StoreError::Io {
            path: data_dir.display().to_string(),
            source: e,
        })?;

        let history_path = data_dir.join(HISTORY_FILE);
        let approved_path = data_dir.join(APPROVED_FILE);

        let history = if history_path.exists() {
            let content = std::fs::read_to_string(&history_path).map_err(|e| StoreError::Io {
                path: history_path.display().to_string(),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: history_path.display().to_string(),
                source: e,
            })?
        } else {
            HistoryFile::default()
        };

        tracing::info!(
            path = %history_path.display(),
            processed = history.profiles.len(),
            "history loaded"
        );

        Ok(Self {
            history_path,
            approved_path,
            history,
        })
    }

    #[must_use]
    pub fn has_been_processed(&self, id: &ProfileId) -> bool {
        self.history.profiles.contains_key(&id.to_string())
    }

    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.history.profiles.len()
    }

    #[must_use]
    pub fn approved_count(&self) -> usize {
        self.history
            .profiles
            .values()
            .filter(|p| p.approved)
            .count()
    }

    /// Records one screened profile and persists the index.
    ///
    /// Idempotent: marking an already-present id is a no-op, so a profile
    /// id appears in the index at most once.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the index cannot be written.
    pub fn mark_processed(
        &mut self,
        candidate: &ProfileCandidate,
        approved: bool,
        verdict: &ScreeningVerdict,
    ) -> Result<(), StoreError> {
        let key = candidate.id.to_string();
        if self.history.profiles.contains_key(&key) {
            tracing::debug!(id = %key, "already in history — mark_processed is a no-op");
            return Ok(());
        }

        self.history.profiles.insert(
            key,
            ProcessedEntry {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                processed_at: Utc::now(),
                approved,
                verdict: verdict.clone(),
            },
        );
        self.save_history()
    }

    /// Appends one approved record to the CSV and flushes it.
    ///
    /// Skips (with a warning) ids whose approval is already in the index,
    /// so an approved record is only ever added once per identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the CSV cannot be written.
    pub fn record_approved(&mut self, record: &ApprovedRecord) -> Result<(), StoreError> {
        let key = record.candidate.id.to_string();
        if self
            .history
            .profiles
            .get(&key)
            .is_some_and(|entry| entry.approved)
        {
            tracing::warn!(id = %key, "approval already recorded — skipping duplicate CSV row");
            return Ok(());
        }

        let write_header = !self.approved_path.exists();
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.approved_path)
            .map_err(|e| StoreError::Io {
                path: self.approved_path.display().to_string(),
                source: e,
            })?;

        let mut buffer = String::new();
        if write_header {
            buffer.push_str(CSV_HEADER);
            buffer.push('\n');
        }
        buffer.push_str(&csv::row(&record.csv_fields()));
        buffer.push('\n');

        file.write_all(buffer.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| StoreError::Io {
                path: self.approved_path.display().to_string(),
                source: e,
            })?;

        tracing::debug!(id = %key, "approved record appended");
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let total = self.history.profiles.len();
        let approved = self.approved_count();

        let mut by_platform: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for entry in self.history.profiles.values() {
            let counts = by_platform.entry(entry.id.platform.to_string()).or_default();
            counts.0 += 1;
            if entry.approved {
                counts.1 += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)]
        let approval_rate = if total == 0 {
            0.0
        } else {
            approved as f64 / total as f64 * 100.0
        };

        StoreStats {
            total_processed: total,
            total_approved: approved,
            approval_rate,
            by_platform,
        }
    }

    /// Rewrites the JSON index atomically: write a sibling temp file, then
    /// rename over the original so a crash never leaves a half-written index.
    fn save_history(&mut self) -> Result<(), StoreError> {
        self.history.last_updated = Some(Utc::now());
        self.history.total_processed = self.history.profiles.len();
        self.history.total_approved = self
            .history
            .profiles
            .values()
            .filter(|p| p.approved)
            .count();

        let serialized =
            serde_json::to_string_pretty(&self.history).map_err(|e| StoreError::Corrupt {
                path: self.history_path.display().to_string(),
                source: e,
            })?;

        let tmp_path = self.history_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, serialized).map_err(|e| StoreError::Io {
            path: tmp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, &self.history_path).map_err(|e| StoreError::Io {
            path: self.history_path.display().to_string(),
            source: e,
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;
