/// End-to-end flows against the in-memory repository
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{init_app, post_json, sample_posts};
use post_service::db::InMemoryPostRepository;
use post_service::Post;

#[actix_web::test]
async fn post_lifecycle() {
    let app = init_app(InMemoryPostRepository::new()).await;

    let created = Post::new(10, 3, "Draft", "First draft");
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_json(&created))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Post = test::read_body_json(resp).await;
    assert_eq!(body.version, None);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts/10").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Post = test::read_body_json(resp).await;
    assert_eq!(body, created);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/posts/10")
            .set_json(post_json(&Post::new(10, 3, "Final", "Final text")))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Post = test::read_body_json(resp).await;
    assert_eq!(body.title, "Final");
    assert_eq!(body.version, Some(1));

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/posts/10").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts/10").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_preserves_repository_order() {
    let app = init_app(InMemoryPostRepository::with_posts(sample_posts())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<Post> = test::read_body_json(resp).await;
    assert_eq!(body, sample_posts());
}

#[actix_web::test]
async fn create_cannot_take_over_an_existing_post() {
    let app = init_app(InMemoryPostRepository::with_posts(sample_posts())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/posts")
            .set_json(post_json(&Post::new(1, 99, "Mine now", "Replaced body")))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/posts/1").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Post = test::read_body_json(resp).await;
    assert_eq!(body, sample_posts().remove(0));
}

#[actix_web::test]
async fn every_stored_post_is_returned_field_for_field() {
    let app = init_app(InMemoryPostRepository::with_posts(sample_posts())).await;

    for post in sample_posts() {
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/posts/{}", post.id))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, post_json(&post));
    }
}

#[actix_web::test]
async fn deleting_absent_post_still_returns_no_content() {
    let app = init_app(InMemoryPostRepository::with_posts(sample_posts())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri("/api/posts/404").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    let body: Vec<Post> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 2);
}

#[actix_web::test]
async fn health_endpoints_report_ready_store() {
    let app = init_app(InMemoryPostRepository::with_posts(sample_posts())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["service"], "post-service");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health/live").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/health/ready").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["repository"]["status"], "healthy");
    assert_eq!(body["repository"]["message"], "2 posts stored");
}

#[actix_web::test]
async fn metrics_endpoint_exposes_post_counters() {
    let app = init_app(InMemoryPostRepository::with_posts(sample_posts())).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/posts").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("post_operations_total"));
    assert!(text.contains(r#"operation="list""#));
}
