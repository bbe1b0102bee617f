/// Post handlers - HTTP endpoints for post operations
use crate::db::{PostRepository, SharedPostRepository};
use crate::error::{AppError, Result};
use crate::metrics::observe;
use crate::models::Post;
use actix_web::{web, HttpResponse};
use validator::Validate;

fn not_found(post_id: i32) -> AppError {
    AppError::NotFound(format!("post {post_id}"))
}

/// List all posts
pub async fn list_posts(repo: web::Data<SharedPostRepository>) -> Result<HttpResponse> {
    let posts = observe("list", repo.find_all().await)?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
pub async fn get_post(
    repo: web::Data<SharedPostRepository>,
    post_id: web::Path<i32>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let result = repo
        .find_by_id(post_id)
        .await
        .and_then(|post| post.ok_or_else(|| not_found(post_id)));

    let post = observe("get", result)?;
    Ok(HttpResponse::Ok().json(post))
}

/// Create a new post
///
/// Title and body must be non-empty. Any client-supplied version is dropped.
/// An id that is already taken answers 409 and leaves the stored post alone.
pub async fn create_post(
    repo: web::Data<SharedPostRepository>,
    req: web::Json<Post>,
) -> Result<HttpResponse> {
    let mut post = req.into_inner();

    if let Err(errors) = post.validate() {
        tracing::warn!(post_id = post.id, "Rejected invalid post: {}", errors);
        return observe("create", Err(errors.into()));
    }
    post.version = None;

    let created = observe("create", repo.insert(post).await)?;
    tracing::info!(post_id = created.id, user_id = created.user_id, "Post created");

    Ok(HttpResponse::Created().json(created))
}

/// Update an existing post
///
/// The stored id and owner are kept; title, body and version come from the request.
pub async fn update_post(
    repo: web::Data<SharedPostRepository>,
    post_id: web::Path<i32>,
    req: web::Json<Post>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let result = apply_update(repo.get_ref().as_ref(), post_id, req.into_inner()).await;

    let saved = observe("update", result)?;
    tracing::info!(post_id = saved.id, version = ?saved.version, "Post updated");

    Ok(HttpResponse::Ok().json(saved))
}

async fn apply_update(repo: &dyn PostRepository, post_id: i32, changes: Post) -> Result<Post> {
    let existing = repo
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| not_found(post_id))?;

    repo.save(existing.merged_with(changes)).await
}

/// Delete a post
///
/// Deleting an id that does not exist still answers 204.
pub async fn delete_post(
    repo: web::Data<SharedPostRepository>,
    post_id: web::Path<i32>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    observe("delete", repo.delete_by_id(post_id).await)?;
    tracing::info!(post_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}
