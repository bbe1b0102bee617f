//! Process-local repository used when no database is configured.

use super::post_repo::PostRepository;
use crate::error::{AppError, Result};
use crate::models::Post;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Ordered in-memory store. Iteration order is ascending id.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<BTreeMap<i32, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `posts`, stored as given.
    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let posts = posts.into_iter().map(|post| (post.id, post)).collect();
        Self {
            posts: RwLock::new(posts),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>> {
        Ok(self.posts.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(AppError::Conflict(format!("post {} already exists", post.id)));
        }
        posts.insert(post.id, post.clone());
        tracing::debug!(post_id = post.id, "post inserted");
        Ok(post)
    }

    async fn save(&self, mut post: Post) -> Result<Post> {
        let mut posts = self.posts.write().await;
        if let Some(previous) = posts.get(&post.id) {
            let next = previous
                .version
                .unwrap_or(0)
                .checked_add(1)
                .ok_or_else(|| AppError::Internal(format!("post {} version exhausted", post.id)))?;
            post.version = Some(next);
        }
        posts.insert(post.id, post.clone());
        tracing::debug!(post_id = post.id, version = ?post.version, "post saved");
        Ok(post)
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        let removed = self.posts.write().await.remove(&id);
        tracing::debug!(post_id = id, removed = removed.is_some(), "post delete");
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.posts.read().await.len() as i64)
    }
}
