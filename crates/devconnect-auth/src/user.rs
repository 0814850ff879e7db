//! User account types.

use devconnect_types::{Author, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A registered user, as persisted.
///
/// Carries the password hash, so it is never handed to API callers
/// directly; see [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Normalized email address (unique).
    pub email: String,
    /// Argon2id PHC string.
    #[serde(rename = "password")]
    pub password_hash: String,
    /// Avatar URL derived from the email.
    pub avatar: String,
    /// When the account was created.
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

impl User {
    /// Create a new user record with a fresh identifier.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let avatar = avatar_url(&email);
        Self {
            id: devconnect_types::new_id(),
            name,
            email,
            password_hash,
            avatar,
            created_at: devconnect_types::now(),
        }
    }

    /// Returns the user without the password hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            created_at: self.created_at,
        }
    }
}

/// A user as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Unique user ID.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub avatar: String,
    /// When the account was created.
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

impl PublicUser {
    /// Name and avatar snapshot for embedding in profiles and posts.
    pub fn author(&self) -> Author {
        Author::new(self.id, self.name.clone(), self.avatar.clone())
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Derive the Gravatar URL for an email.
///
/// The digest is SHA-256 over the normalized address; Gravatar falls back to
/// the "mystery person" image when no avatar is registered.
pub fn avatar_url(email: &str) -> String {
    let digest = Sha256::digest(normalize_email(email).as_bytes());
    format!(
        "https://www.gravatar.com/avatar/{}?s=200&r=pg&d=mm",
        hex::encode(digest)
    )
}
