//! Instagram Graph API client and candidate collector.
//!
//! Wraps the Graph API's Business Discovery and hashtag endpoints with typed
//! responses, bounded retries with exponential back-off, and cursor-based
//! pagination capped at a configured page limit. The collector sweeps seed
//! usernames and hashtags into [`prospect_core::ProfileCandidate`]s,
//! continuing past per-source failures.

pub mod client;
pub mod collector;
pub mod error;
pub mod pagination;
pub mod types;

mod retry;

pub use client::InstagramClient;
pub use collector::{CandidateCollector, CollectionOutcome, CollectorConfig};
pub use error::InstagramError;
