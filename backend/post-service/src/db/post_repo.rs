use crate::error::{AppError, Result};
use crate::models::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

/// Persistence operations the HTTP layer relies on.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in repository iteration order (ascending id)
    async fn find_all(&self) -> Result<Vec<Post>>;

    /// Look up a single post; `None` when no post has this id
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>>;

    /// Store a new post. Fails with `AppError::Conflict` when the id is taken.
    async fn insert(&self, post: Post) -> Result<Post>;

    /// Insert or overwrite a post and return the stored record.
    /// Overwriting bumps `version`; a version that cannot be bumped is an error.
    async fn save(&self, post: Post) -> Result<Post>;

    /// Remove a post. Removing an absent id is not an error.
    async fn delete_by_id(&self, id: i32) -> Result<()>;

    /// Number of stored posts
    async fn count(&self) -> Result<i64>;
}

/// Shared handle injected into handlers
pub type SharedPostRepository = Arc<dyn PostRepository>;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, title, body, version
            FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, title, body, version
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn insert(&self, post: Post) -> Result<Post> {
        let inserted = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, user_id, title, body, version)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO NOTHING
            RETURNING id, user_id, title, body, version
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.version)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("post {} already exists", post.id)))?;

        tracing::debug!(post_id = inserted.id, "post inserted");
        Ok(inserted)
    }

    async fn save(&self, post: Post) -> Result<Post> {
        let saved = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, user_id, title, body, version)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                title = EXCLUDED.title,
                body = EXCLUDED.body,
                version = COALESCE(posts.version, 0) + 1
            WHERE COALESCE(posts.version, 0) < 2147483647
            RETURNING id, user_id, title, body, version
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.version)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Internal(format!("post {} version exhausted", post.id)))?;

        tracing::debug!(post_id = saved.id, version = ?saved.version, "post saved");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> Result<()> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(post_id = id, rows = result.rows_affected(), "post delete");
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
