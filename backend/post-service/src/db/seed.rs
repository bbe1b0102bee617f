//! Startup seeding from a JSON fixture.
//!
//! Accepts either a bare array of posts or an object of the form
//! `{"posts": [...]}`. Seeding only happens when the repository is empty.

use super::post_repo::PostRepository;
use crate::models::Post;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    List(Vec<Post>),
    Wrapped { posts: Vec<Post> },
}

impl SeedFile {
    fn into_posts(self) -> Vec<Post> {
        match self {
            SeedFile::List(posts) | SeedFile::Wrapped { posts } => posts,
        }
    }
}

/// Load posts from `path` into `repo` if it holds no posts yet.
///
/// Returns the number of posts inserted. Duplicate ids in the file are an error.
pub async fn seed_from_file(repo: &dyn PostRepository, path: &Path) -> Result<usize> {
    let existing = repo.count().await.context("Failed to count existing posts")?;
    if existing > 0 {
        tracing::info!(existing, "Repository already populated, skipping seed");
        return Ok(0);
    }

    let raw = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let posts = serde_json::from_slice::<SeedFile>(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?
        .into_posts();

    let total = posts.len();
    for post in posts {
        let id = post.id;
        repo.insert(post)
            .await
            .with_context(|| format!("Failed to insert seeded post {id}"))?;
    }

    tracing::info!(count = total, path = %path.display(), "Seeded posts");
    Ok(total)
}
