//! Post and like types.

use devconnect_types::{Author, PostId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Author name and avatar copied onto a post when it is created.
///
/// Later changes to the account do not reach existing posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSnapshot {
    pub name: String,
    pub avatar: String,
}

impl AuthorSnapshot {
    pub fn new(name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

impl From<Author> for AuthorSnapshot {
    fn from(author: Author) -> Self {
        Self {
            name: author.name,
            avatar: author.avatar,
        }
    }
}

/// A like left on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: devconnect_types::EntryId,
    pub user: UserId,
}

/// A text post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: PostId,
    pub user: UserId,
    pub text: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

impl Post {
    /// Create a post with no likes.
    pub fn new(user: UserId, author: AuthorSnapshot, text: String) -> Self {
        Self {
            id: devconnect_types::new_id(),
            user,
            text,
            name: author.name,
            avatar: author.avatar,
            likes: Vec::new(),
            created_at: devconnect_types::now(),
        }
    }

    /// Whether `user_id` likes this post.
    pub fn is_liked_by(&self, user_id: UserId) -> bool {
        self.likes.iter().any(|like| like.user == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use devconnect_types::new_id;

    #[test]
    fn test_post_wire_format() {
        let user = new_id();
        let post = Post::new(user, AuthorSnapshot::new("Alice", "a.png"), "hello".into());

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["text"], "hello");
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["avatar"], "a.png");
        assert_eq!(json["user"], user.to_string());
        assert_eq!(json["likes"], serde_json::json!([]));
        assert!(json.get("_id").is_some());
        assert!(json.get("date").is_some());
    }

    #[test]
    fn test_snapshot_from_author() {
        let snapshot: AuthorSnapshot = Author::new(new_id(), "Bob", "b.png").into();
        assert_eq!(snapshot, AuthorSnapshot::new("Bob", "b.png"));
    }
}
