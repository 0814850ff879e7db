//! Error types for social operations.

use devconnect_auth::AuthError;
use devconnect_storage::StorageError;
use devconnect_types::{PostId, UserId};
use thiserror::Error;

/// Errors that can occur during profile and post operations.
#[derive(Debug, Error)]
pub enum SocialError {
    /// The user has no profile.
    #[error("profile not found for user {user_id}")]
    ProfileNotFound { user_id: UserId },

    /// Post not found.
    #[error("post not found: {id}")]
    PostNotFound { id: PostId },

    /// The user does not own the post.
    #[error("user {user_id} is not the author of post {post_id}")]
    NotAuthor { post_id: PostId, user_id: UserId },

    /// The user already likes the post.
    #[error("post already liked: {post_id}")]
    AlreadyLiked { post_id: PostId },

    /// The user does not like the post.
    #[error("post not liked: {post_id}")]
    NotLiked { post_id: PostId },

    /// A required field is missing or empty.
    #[error("validation error: {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Deleting the owning account failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for social operations.
pub type Result<T> = std::result::Result<T, SocialError>;
