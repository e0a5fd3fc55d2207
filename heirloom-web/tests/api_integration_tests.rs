//! Integration tests for the archive API endpoints

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::util::ServiceExt;

use heirloom_web::storage::FilesystemStore;
use heirloom_web::AppState;

/// Test helper: create test app with in-memory database and temp storage
async fn create_test_app() -> (axum::Router, sqlx::SqlitePool, tempfile::TempDir) {
    let pool = sqlx::SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    heirloom_common::db::create_content_items_table(&pool)
        .await
        .expect("Failed to initialize database schema");

    let media_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FilesystemStore::new(media_dir.path(), "/media");
    store.ensure_destinations().await.unwrap();

    let state = AppState::new(pool.clone(), Arc::new(store));
    let app = heirloom_web::build_router(state, media_dir.path());

    (app, pool, media_dir)
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool, _media) = create_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "heirloom-web");
}

#[tokio::test]
async fn test_submit_memory_and_list_by_alias() {
    let (app, _pool, _media) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "/api/memories",
            json!({
                "category": "letters",
                "title": "Test Letter",
                "body_text": "Dear mother...",
                "occurred_on": "1952-03-01",
                "contributor_name": "Emma"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["category"], "letter");
    assert!(created["id"].is_string());

    // The alias also works as a listing filter
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/items?category=letters")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let listing = response_json(response).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["items"][0]["category"], "letter");
    assert_eq!(listing["items"][0]["title"], "Test Letter");
    assert_eq!(listing["items"][0]["occurred_on"], "1952-03-01");
    assert_eq!(listing["items"][0]["contributor_name"], "Emma");
}

#[tokio::test]
async fn test_submit_memory_requires_title() {
    let (app, pool, _media) = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/api/memories",
            json!({
                "category": "anecdote",
                "title": "",
                "body_text": "A story with no title"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM content_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_submit_memory_rejects_malformed_date() {
    let (app, _pool, _media) = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "/api/memories",
            json!({
                "category": "anecdote",
                "title": "Dated story",
                "occurred_on": "sometime in March"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

/// Hand-built multipart body for the upload and recording endpoints
fn multipart_body(boundary: &str, fields: &[(&str, &str)], file: Option<(&str, &str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((name, filename, content_type, data)) = file {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn test_upload_with_photo_lands_in_photos_destination() {
    let (app, _pool, media_dir) = create_test_app().await;

    let boundary = "heirloom-test-boundary";
    let body = multipart_body(
        boundary,
        &[("category", "photo"), ("title", "Family photo")],
        Some(("file", "photo.jpg", "image/jpeg", b"jpeg bytes")),
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/uploads")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["category"], "photo");

    // Listed with the image asset
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/items?category=photos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listing = response_json(response).await;
    assert_eq!(listing["count"], 1);
    let item = &listing["items"][0];
    assert_eq!(item["asset_kind"], "image");
    let url = item["asset_url"].as_str().unwrap();
    assert!(url.starts_with("/media/photos/"), "{url}");
    assert!(url.ends_with("-photo.jpg"), "{url}");

    // The blob exists where ServeDir serves it from
    let key = url.strip_prefix("/media/photos/").unwrap();
    assert!(media_dir.path().join("photos").join(key).exists());
}

#[tokio::test]
async fn test_recording_submission_defaults_title() {
    let (app, _pool, _media) = create_test_app().await;

    let boundary = "heirloom-test-boundary";
    let body = multipart_body(
        boundary,
        &[("title", ""), ("duration_seconds", "7")],
        Some(("audio", "blob", "audio/webm", b"webm bytes")),
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/recordings")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = response_json(response).await;
    assert_eq!(created["category"], "audio_recording");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/items?category=recordings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listing = response_json(response).await;
    assert_eq!(listing["count"], 1);
    let item = &listing["items"][0];
    assert_eq!(item["title"], "Audio Recording");
    assert_eq!(item["asset_kind"], "audio");
    assert_eq!(item["duration_seconds"], 7);
    let url = item["asset_url"].as_str().unwrap();
    assert!(url.starts_with("/media/audio/recording-"), "{url}");
    assert!(url.ends_with(".webm"), "{url}");
}

#[tokio::test]
async fn test_timeline_groups_by_year() {
    let (app, _pool, _media) = create_test_app().await;

    for (title, date) in [
        ("Arrival", "1948-05-02"),
        ("First harvest", "1948-10-19"),
        ("The wedding", "1953-06-30"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "/api/memories",
                json!({ "category": "anecdote", "title": title, "occurred_on": date }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/timeline")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let years = response_json(response).await;
    let years = years.as_array().unwrap();
    assert_eq!(years.len(), 2);
    assert_eq!(years[0]["year"], 1948);
    assert_eq!(years[0]["items"].as_array().unwrap().len(), 2);
    assert_eq!(years[1]["year"], 1953);
}
