//! Common types used throughout `devconnect`.
//!
//! Identifiers for the three document collections (users, profiles, posts)
//! and their embedded entries, plus the small author view that profiles and
//! posts carry for their owner.

mod identity;

pub use identity::Author;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier of a registered user.
pub type UserId = Uuid;

/// Identifier of a profile document.
pub type ProfileId = Uuid;

/// Identifier of a post document.
pub type PostId = Uuid;

/// Identifier of an embedded entry (experience, education, like).
pub type EntryId = Uuid;

/// Point in time stored on documents.
pub type Timestamp = DateTime<Utc>;

/// Generates a fresh random identifier.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Returns the current time.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Parses an identifier from a path segment.
///
/// Returns `None` for anything that is not a well-formed UUID, so callers can
/// treat a malformed identifier the same way as an unknown one.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
