//! Durable history of processed and approved profiles.
//!
//! Two flat files under the data directory:
//!
//! - `processed_profiles.json` — every profile ever screened, keyed by
//!   `platform:username`, with its verdict snapshot. Read at the start of a
//!   run; rewritten after every mutation so a crash mid-run loses nothing.
//! - `approved_influencers.csv` — append-only list of approved profiles.
//!   Rows are never rewritten or removed.
//!
//! An existing-but-unreadable history file is a fatal
//! [`StoreError::Corrupt`]: silently starting from an empty history would
//! re-screen (and re-spend) every profile ever processed.

pub mod csv;
pub mod error;
pub mod history;

pub use error::StoreError;
pub use history::{ApprovedRecord, HistoryStore, ProcessedEntry, StoreStats};
