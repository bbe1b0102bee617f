//! Shared fixtures for post-service HTTP tests
//!
//! Provides a mockall-generated repository, the two canonical posts and an
//! app builder wired the same way as the binary.
#![allow(dead_code)]

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use async_trait::async_trait;
use post_service::db::{PostRepository, SharedPostRepository};
use post_service::{handlers, Post, Result};
use std::sync::Arc;

mockall::mock! {
    pub PostRepo {}

    #[async_trait]
    impl PostRepository for PostRepo {
        async fn find_all(&self) -> Result<Vec<Post>>;
        async fn find_by_id(&self, id: i32) -> Result<Option<Post>>;
        async fn insert(&self, post: Post) -> Result<Post>;
        async fn save(&self, post: Post) -> Result<Post>;
        async fn delete_by_id(&self, id: i32) -> Result<()>;
        async fn count(&self) -> Result<i64>;
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        Post::new(1, 1, "Hello, World!", "This is my first post."),
        Post::new(2, 1, "Second Post", "This is my second post."),
    ]
}

pub fn post_json(post: &Post) -> serde_json::Value {
    serde_json::json!({
        "id": post.id,
        "userId": post.user_id,
        "title": post.title,
        "body": post.body,
        "version": post.version,
    })
}

pub async fn init_app(
    repo: impl PostRepository + 'static,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let repo: SharedPostRepository = Arc::new(repo);

    test::init_service(
        App::new()
            .app_data(web::Data::new(repo))
            .configure(handlers::configure),
    )
    .await
}
