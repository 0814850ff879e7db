//! Social features for DevConnect.
//!
//! This crate provides:
//! - **Profiles**: one developer profile per user, with experience and
//!   education histories and social links, updated through sparse patches
//! - **Posts**: short text posts carrying a snapshot of their author, and
//!   the likes users leave on them
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use devconnect_social::{AuthorSnapshot, PostStore, ProfilePatch, ProfileStore};
//! use devconnect_storage::MemoryBackend;
//! use devconnect_types::new_id;
//!
//! let backend = Arc::new(MemoryBackend::new());
//! let profiles = ProfileStore::new(backend.clone());
//! let posts = PostStore::new(backend);
//! let alice = new_id();
//!
//! let patch = ProfilePatch {
//!     status: Some("Developer".into()),
//!     skills: Some(ProfilePatch::split_skills("rust, sql")),
//!     ..Default::default()
//! };
//! let profile = profiles.upsert(alice, &patch).unwrap();
//! assert_eq!(profile.skills, vec!["rust", "sql"]);
//!
//! let author = AuthorSnapshot::new("Alice", "https://www.gravatar.com/avatar/x");
//! let post = posts.create(alice, author, "hello").unwrap();
//! let likes = posts.like(post.id, alice).unwrap();
//! assert_eq!(likes.len(), 1);
//! ```

mod error;
mod post;
mod post_store;
mod profile;
mod profile_store;

pub use error::{Result, SocialError};
pub use post::{AuthorSnapshot, Like, Post};
pub use post_store::PostStore;
pub use profile::{
    Education, Experience, NewEducation, NewExperience, Profile, ProfilePatch, Social,
    SocialPatch,
};
pub use profile_store::ProfileStore;
