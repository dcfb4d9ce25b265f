//! Candidate screening against a chat-completion classifier.
//!
//! Sends a candidate's profile text and metrics to the classification
//! service and parses the reply into a
//! [`prospect_core::ScreeningVerdict`]. Screening is fail-closed and never
//! aborts a batch: API failures and unparseable replies both come back as
//! non-recommendations. Without an API key the keyword heuristic takes
//! over so a run can still rank candidates.

pub mod client;
pub mod error;
pub mod heuristic;
pub mod parse;
pub mod prompt;
pub mod screener;

pub use client::OpenAiClient;
pub use error::ScreenerError;
pub use screener::ProfileScreener;
