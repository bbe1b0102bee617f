/// Data models for post-service
///
/// `Post` is both the wire shape (camelCase JSON) and the row shape of the
/// `posts` table.
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single post record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "body must not be empty"))]
    pub body: String,
    /// Optimistic-concurrency token; null until the post is first updated.
    #[serde(default)]
    pub version: Option<i32>,
}

impl Post {
    pub fn new(id: i32, user_id: i32, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            user_id,
            title: title.into(),
            body: body.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Apply the editable fields of `changes` onto this stored post.
    ///
    /// Identity and ownership stay with the stored record.
    pub fn merged_with(&self, changes: Post) -> Post {
        Post {
            id: self.id,
            user_id: self.user_id,
            title: changes.title,
            body: changes.body,
            version: changes.version,
        }
    }
}
