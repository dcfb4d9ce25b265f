//! Graph API cursor-based pagination.
//!
//! Paged endpoints return a `paging` block with an `after` cursor and, while
//! more pages exist, a `next` URL. The cursor alone is not a continuation
//! signal: the API keeps echoing `after` on the final page, so traversal
//! must stop when `next` disappears.

use crate::types::Paging;

/// Extracts the continuation cursor for the next page.
///
/// Returns `None` if the paging block is absent, the `next` URL is missing
/// (last page reached), or no `after` cursor is present.
#[must_use]
pub fn next_cursor(paging: Option<&Paging>) -> Option<String> {
    let paging = paging?;
    paging.next.as_ref()?;
    paging.cursors.as_ref()?.after.clone()
}
