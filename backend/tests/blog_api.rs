mod support;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use support::api;
use tokio::sync::Mutex;
use tower::ServiceExt;

static INTEGRATION_GUARD: Mutex<()> = Mutex::const_new(());

#[tokio::test]
async fn immediate_second_mutation_is_rate_limited() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let user = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &user).await;
    let cookie = format!("sid={}", session.id);

    let payload = json!({ "title": "first", "text_body": "body" });
    let response = app
        .clone()
        .oneshot(api::post_json("/blog/create-blog", &payload, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = json!({ "title": "second", "text_body": "body" });
    let response = app
        .clone()
        .oneshot(api::post_json("/blog/create-blog", &payload, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().get("retry-after").is_some());
    let body = api::response_json(response).await;
    assert_eq!(body["code"], "RATE_LIMITED");

    // Only the admitted request produced a blog.
    let response = app
        .clone()
        .oneshot(api::get("/blog/my-blogs", Some(&cookie)))
        .await
        .unwrap();
    let body = api::response_json(response).await;
    assert_eq!(body["data"].as_array().map(|a| a.len()), Some(1));
    assert_eq!(body["data"][0]["title"], "first");
}

#[tokio::test]
async fn rate_limit_is_per_session_not_per_user() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let user = support::seed_user(&pool).await;
    let first = support::seed_session(&pool, &user).await;
    let second = support::seed_session(&pool, &user).await;

    let payload = json!({ "title": "from first", "text_body": "body" });
    let response = app
        .clone()
        .oneshot(api::post_json(
            "/blog/create-blog",
            &payload,
            Some(&format!("sid={}", first.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = json!({ "title": "from second", "text_body": "body" });
    let response = app
        .clone()
        .oneshot(api::post_json(
            "/blog/create-blog",
            &payload,
            Some(&format!("sid={}", second.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn feed_reads_are_not_rate_limited() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let user = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &user).await;
    let cookie = format!("sid={}", session.id);

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(api::get("/blog/get-blogs", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn edit_requires_ownership() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let owner = support::seed_user(&pool).await;
    let stranger = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &stranger).await;
    let blog = support::seed_blog(&pool, owner.id, "not yours", Utc::now()).await;

    let payload = json!({
        "blog_id": blog.id,
        "data": { "title": "hijacked", "text_body": "nope" },
    });
    let response = app
        .oneshot(api::post_json(
            "/blog/edit-blog",
            &payload,
            Some(&format!("sid={}", session.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn edit_inside_the_window_returns_the_previous_snapshot() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let owner = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &owner).await;
    let blog =
        support::seed_blog(&pool, owner.id, "original", Utc::now() - Duration::minutes(5)).await;

    let payload = json!({
        "blog_id": blog.id,
        "data": { "title": "revised", "text_body": "revised body" },
    });
    let response = app
        .clone()
        .oneshot(api::post_json(
            "/blog/edit-blog",
            &payload,
            Some(&format!("sid={}", session.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = api::response_json(response).await;
    assert_eq!(body["message"], "Blog updated successfully");
    assert_eq!(body["data"]["title"], "original");

    // A fresh session avoids the mutation limiter for the readback.
    let reader = support::seed_session(&pool, &owner).await;
    let response = app
        .oneshot(api::get(
            "/blog/my-blogs",
            Some(&format!("sid={}", reader.id)),
        ))
        .await
        .unwrap();
    let body = api::response_json(response).await;
    assert_eq!(body["data"][0]["title"], "revised");
}

#[tokio::test]
async fn edit_outside_the_window_is_forbidden() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let owner = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &owner).await;
    let blog =
        support::seed_blog(&pool, owner.id, "too old", Utc::now() - Duration::minutes(31)).await;

    let payload = json!({
        "blog_id": blog.id,
        "data": { "title": "late edit", "text_body": "body" },
    });
    let response = app
        .oneshot(api::post_json(
            "/blog/edit-blog",
            &payload,
            Some(&format!("sid={}", session.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn delete_works_regardless_of_age_and_hides_the_blog() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let owner = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &owner).await;
    let blog =
        support::seed_blog(&pool, owner.id, "ancient", Utc::now() - Duration::days(365)).await;

    let payload = json!({ "blog_id": blog.id });
    let response = app
        .clone()
        .oneshot(api::post_json(
            "/blog/delete-blog",
            &payload,
            Some(&format!("sid={}", session.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = api::response_json(response).await;
    assert_eq!(body["message"], "Delete successful");
    assert_eq!(body["data"]["title"], "ancient");

    // Deleted blogs look missing to a second delete.
    let second = support::seed_session(&pool, &owner).await;
    let response = app
        .clone()
        .oneshot(api::post_json(
            "/blog/delete-blog",
            &payload,
            Some(&format!("sid={}", second.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(api::get(
            "/blog/my-blogs",
            Some(&format!("sid={}", second.id)),
        ))
        .await
        .unwrap();
    let body = api::response_json(response).await;
    assert_eq!(body["message"], "No more blogs");
}

#[tokio::test]
async fn feed_shows_followed_authors_newest_first() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let viewer = support::seed_user(&pool).await;
    let author = support::seed_user(&pool).await;
    let outsider = support::seed_user(&pool).await;
    support::seed_follow(&pool, viewer.id, author.id).await;

    let base = Utc::now() - Duration::hours(1);
    support::seed_blog(&pool, author.id, "older", base).await;
    support::seed_blog(&pool, author.id, "newer", base + Duration::minutes(10)).await;
    support::seed_blog(&pool, outsider.id, "unfollowed", base + Duration::minutes(20)).await;

    let session = support::seed_session(&pool, &viewer).await;
    let cookie = format!("sid={}", session.id);
    let response = app
        .clone()
        .oneshot(api::get("/blog/get-blogs", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = api::response_json(response).await;
    assert_eq!(body["message"], "Read success");
    assert_eq!(body["data"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(body["data"][0]["title"], "newer");
    assert_eq!(body["data"][1]["title"], "older");

    // Past the last page the feed reports exhaustion, not an error.
    let response = app
        .oneshot(api::get("/blog/get-blogs?skip=50", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = api::response_json(response).await;
    assert_eq!(body["message"], "No more blogs");
}

#[tokio::test]
async fn create_blog_validates_the_payload() {
    let _guard = INTEGRATION_GUARD.lock().await;
    let pool = support::test_pool().await;
    support::reset_db(&pool).await;
    let app = api::build_app(pool.clone());

    let user = support::seed_user(&pool).await;
    let session = support::seed_session(&pool, &user).await;
    let cookie = format!("sid={}", session.id);

    let payload = json!({ "title": "", "text_body": "" });
    let response = app
        .oneshot(api::post_json("/blog/create-blog", &payload, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = api::response_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
