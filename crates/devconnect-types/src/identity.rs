//! Author view embedded in profile and post responses.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Name and avatar of a user, as shown next to their content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// The user's identifier.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Avatar URL.
    pub avatar: String,
}

impl Author {
    /// Creates a new author view.
    pub fn new(id: UserId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_wire_format() {
        let id = crate::new_id();
        let author = Author::new(id, "Alice", "https://www.gravatar.com/avatar/x");

        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["_id"], id.to_string());
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["avatar"], "https://www.gravatar.com/avatar/x");
    }
}
