//! Core types and configuration for the influencer prospection pipeline.
//!
//! Holds the domain model (candidates, verdicts, run summaries), the
//! qualification filter, and configuration loading (env vars + seeds file).
//! No I/O beyond reading config files; network and persistence live in the
//! sibling crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod candidate;
pub mod config;
pub mod qualify;
pub mod seeds;
pub mod verdict;

pub use app_config::AppConfig;
pub use candidate::{InfluencerSize, Platform, ProfileCandidate, ProfileId};
pub use config::{load_app_config, load_app_config_from_env};
pub use qualify::{engagement_rate, qualifies, QualificationThresholds};
pub use seeds::{load_seeds, SeedsFile};
pub use verdict::ScreeningVerdict;

/// Counters reported at the end of a prospection run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run date as `YYYY-MM-DD`.
    pub date: String,
    /// Candidates returned by the collector.
    pub found: usize,
    /// Candidates dropped because their id was already in the history store.
    pub already_seen: usize,
    /// Candidates dropped by the follower/engagement thresholds.
    pub below_threshold: usize,
    /// Candidates sent to the screener.
    pub screened: usize,
    /// Candidates approved and persisted.
    pub approved: usize,
    /// Per-item failures that were logged and skipped.
    pub errors: Vec<String>,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seeds file {path}: {source}")]
    SeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seeds file: {0}")]
    SeedsFileParse(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
