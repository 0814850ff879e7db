//! Authentication for DevConnect.
//!
//! This crate provides:
//! - **Credential Store**: user registration, lookup and password checks
//! - **Password hashing**: salted Argon2id hashes
//! - **Token Service**: signed, time-limited bearer tokens carrying a user id
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use devconnect_auth::{CredentialStore, JwtTokenService, TokenService};
//! use devconnect_storage::MemoryBackend;
//!
//! let store = CredentialStore::new(Arc::new(MemoryBackend::new()));
//! let tokens = JwtTokenService::new("secret");
//!
//! let user = store.register("Alice", "a@x.com", "secret1").unwrap();
//! let token = tokens.issue(user.id).unwrap();
//!
//! assert_eq!(tokens.verify(&token).unwrap(), user.id);
//! ```

mod error;
mod password;
mod store;
mod token;
mod user;

pub use error::{AuthError, Result};
pub use password::{hash_password, verify_password};
pub use store::CredentialStore;
pub use token::{Claims, ClaimsUser, JwtTokenService, TokenService, TOKEN_TTL_SECS};
pub use user::{avatar_url, normalize_email, PublicUser, User};
