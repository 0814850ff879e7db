//! Post storage.

use devconnect_storage::{Collection, DocumentBackend};
use devconnect_types::{PostId, UserId};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::{Result, SocialError};
use crate::post::{AuthorSnapshot, Like, Post};

const POSTS: &str = "posts";

/// Stores posts and their likes.
#[derive(Debug)]
pub struct PostStore {
    posts: Collection<Post>,
    /// Serializes read-modify-write cycles on a post.
    write_lock: Mutex<()>,
}

impl PostStore {
    /// Create a store on top of a document backend.
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            posts: Collection::new(backend, POSTS),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a post.
    pub fn create(&self, user_id: UserId, author: AuthorSnapshot, text: &str) -> Result<Post> {
        if text.trim().is_empty() {
            return Err(SocialError::Validation {
                field: "text",
                message: "Text is required",
            });
        }

        let post = Post::new(user_id, author, text.to_string());
        self.posts.insert(&post.id.to_string(), &post)?;

        tracing::info!(post_id = %post.id, user_id = %user_id, "Post created");
        Ok(post)
    }

    /// List all posts, newest first.
    pub fn list_all(&self) -> Result<Vec<Post>> {
        let mut posts = self.posts.all()?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    /// Get a post by ID.
    pub fn get_by_id(&self, id: PostId) -> Result<Post> {
        self.posts
            .get(&id.to_string())?
            .ok_or(SocialError::PostNotFound { id })
    }

    /// Delete a post. Only its author may do so.
    pub fn delete(&self, id: PostId, user_id: UserId) -> Result<()> {
        let _guard = self.write_lock.lock();

        let post = self.get_by_id(id)?;
        if post.user != user_id {
            return Err(SocialError::NotAuthor {
                post_id: id,
                user_id,
            });
        }
        self.posts.remove(&id.to_string())?;

        tracing::info!(post_id = %id, user_id = %user_id, "Post deleted");
        Ok(())
    }

    /// Like a post, returning the updated likes, most recent first.
    pub fn like(&self, id: PostId, user_id: UserId) -> Result<Vec<Like>> {
        self.update(id, |post| {
            if post.is_liked_by(user_id) {
                return Err(SocialError::AlreadyLiked { post_id: id });
            }
            post.likes.insert(
                0,
                Like {
                    id: devconnect_types::new_id(),
                    user: user_id,
                },
            );
            Ok(())
        })
    }

    /// Remove the user's like from a post, returning the updated likes.
    pub fn unlike(&self, id: PostId, user_id: UserId) -> Result<Vec<Like>> {
        self.update(id, |post| {
            if !post.is_liked_by(user_id) {
                return Err(SocialError::NotLiked { post_id: id });
            }
            post.likes.retain(|like| like.user != user_id);
            Ok(())
        })
    }

    fn update<F>(&self, id: PostId, f: F) -> Result<Vec<Like>>
    where
        F: FnOnce(&mut Post) -> Result<()>,
    {
        let _guard = self.write_lock.lock();

        let mut post = self.get_by_id(id)?;
        f(&mut post)?;
        self.posts.insert(&id.to_string(), &post)?;

        tracing::debug!(post_id = %id, likes = post.likes.len(), "Likes updated");
        Ok(post.likes)
    }
}
