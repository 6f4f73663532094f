// Notes & Bookmarks: filter resolution, title resolution, record lifecycle, HTTP handlers.
// Services own validation order and outcome mapping; stores own persistence.

pub mod bookmarks;
pub mod extract;
pub mod filter;
pub mod handlers;
pub mod notes;
pub mod title;

use uuid::Uuid;

/// Path ids that are not UUIDs can never name a record, so they read as not-found.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
