//! HTTP API Scenario Tests
//!
//! Drives the full router (middleware included) with in-process requests:
//! - Success bodies carry `result: true`
//! - Failures share one JSON error shape
//! - Media lifecycle follows the owning tweet

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use microblog::http_server::{HttpServer, HttpServerConfig};
use microblog::service::SocialService;
use microblog::store::{SeedUser, Store};

// =============================================================================
// Helper Functions
// =============================================================================

const BOUNDARY: &str = "microblog-test-boundary";

fn setup_router() -> Router {
    let store = Store::in_memory().unwrap();
    store
        .reset_and_seed(&[
            SeedUser::new(1, "Ann", "t1"),
            SeedUser::new(2, "Ben", "t2"),
            SeedUser::new(3, "Cid", "t3"),
        ])
        .unwrap();
    HttpServer::new(HttpServerConfig::default(), SocialService::new(store)).router()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    key: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("api-key", key);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let (status, bytes) = send(router, request).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn upload(router: &Router, key: &str, filename: &str, data: &[u8]) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/medias")
        .header("api-key", key)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(filename, "image/png", data)))
        .unwrap();

    let (status, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn assert_error(body: &Value, code: u16, error_type: &str) {
    assert_eq!(body["result"], false);
    assert_eq!(body["code"], code);
    assert_eq!(body["error_type"], error_type);
    assert!(body["error_message"].is_string());
}

// =============================================================================
// Like / Unlike Scenario
// =============================================================================

#[tokio::test]
async fn test_like_unlike_scenario() {
    let router = setup_router();

    let (status, body) = call(
        &router,
        "POST",
        "/api/tweets",
        Some("t1"),
        Some(json!({"tweet_data": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"result": true, "tweet_id": 1}));

    let (status, body) = call(&router, "POST", "/api/tweets/1/likes", Some("t2"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"result": true}));

    let (status, body) = call(&router, "GET", "/api/tweets", Some("t1"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], true);
    let tweet = &body["tweets"][0];
    assert_eq!(tweet["content"], "hello");
    assert_eq!(tweet["author"], json!({"id": 1, "name": "Ann"}));
    assert_eq!(tweet["like_count"], 1);
    assert_eq!(tweet["likes"], json!([{"user_id": 2, "name": "Ben"}]));

    let (status, body) = call(&router, "DELETE", "/api/tweets/1/likes", Some("t2"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, body) = call(&router, "GET", "/api/tweets", Some("t1"), None).await;
    assert_eq!(body["tweets"][0]["like_count"], 0);
    assert_eq!(body["tweets"][0]["likes"], json!([]));
}

#[tokio::test]
async fn test_double_like_conflicts() {
    let router = setup_router();
    call(&router, "POST", "/api/tweets", Some("t1"), Some(json!({"tweet_data": "x"}))).await;
    call(&router, "POST", "/api/tweets/1/likes", Some("t2"), None).await;

    let (status, body) = call(&router, "POST", "/api/tweets/1/likes", Some("t2"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, 409, "Conflict");

    let (status, body) = call(&router, "DELETE", "/api/tweets/1/likes", Some("t3"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, 409, "Conflict");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_like_requests() {
    let router = setup_router();
    call(&router, "POST", "/api/tweets", Some("t1"), Some(json!({"tweet_data": "hot"}))).await;

    let mut tasks = Vec::new();
    for key in ["t1", "t2", "t3"] {
        for _ in 0..4 {
            let router = router.clone();
            tasks.push(tokio::spawn(async move {
                call(&router, "POST", "/api/tweets/1/likes", Some(key), None).await.0
            }));
        }
    }

    let mut created = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::CONFLICT),
        }
    }
    assert_eq!(created, 3);

    let (_, body) = call(&router, "GET", "/api/tweets", Some("t1"), None).await;
    assert_eq!(body["tweets"][0]["like_count"], 3);
    assert_eq!(body["tweets"][0]["likes"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Error Shape Tests
// =============================================================================

#[tokio::test]
async fn test_missing_and_unknown_keys_are_unauthenticated() {
    let router = setup_router();

    let (status, body) = call(&router, "GET", "/api/tweets", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, 401, "Unauthenticated");

    let (status, body) = call(&router, "GET", "/api/tweets", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_error(&body, 401, "Unauthenticated");
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let router = setup_router();
    let request = Request::builder()
        .method("GET")
        .uri("/api/users/me")
        .header("authorization", "Bearer t2")
        .body(Body::empty())
        .unwrap();

    let (status, bytes) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["user"]["name"], "Ben");
}

#[tokio::test]
async fn test_unknown_tweet_is_not_found() {
    let router = setup_router();

    let (status, body) = call(&router, "POST", "/api/tweets/99/likes", Some("t1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "NotFound");

    let (status, body) = call(&router, "DELETE", "/api/tweets/99", Some("t1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "NotFound");
}

#[tokio::test]
async fn test_deleting_foreign_tweet_is_not_found() {
    let router = setup_router();
    call(&router, "POST", "/api/tweets", Some("t1"), Some(json!({"tweet_data": "mine"}))).await;

    let (status, _) = call(&router, "DELETE", "/api/tweets/1", Some("t2"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(&router, "GET", "/api/tweets", Some("t1"), None).await;
    assert_eq!(body["tweets"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_and_path_are_bad_requests() {
    let router = setup_router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/tweets")
        .header("api-key", "t1")
        .header("content-type", "application/json")
        .body(Body::from("{\"tweet_data\": "))
        .unwrap();
    let (status, bytes) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_error(&body, 400, "BadRequest");

    let (status, body) = call(&router, "GET", "/api/users/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 400, "BadRequest");
}

// =============================================================================
// Follow Tests
// =============================================================================

#[tokio::test]
async fn test_follow_lifecycle() {
    let router = setup_router();

    let (status, body) = call(&router, "POST", "/api/users/2/follow", Some("t1"), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"result": true}));

    let (status, body) = call(&router, "POST", "/api/users/2/follow", Some("t1"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, 409, "Conflict");

    let (status, body) = call(&router, "GET", "/api/users/2", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["user"],
        json!({"id": 2, "name": "Ben", "followers": [{"id": 1, "name": "Ann"}], "following": []})
    );

    let (_, body) = call(&router, "GET", "/api/users/me", Some("t1"), None).await;
    assert_eq!(body["user"]["following"], json!([{"id": 2, "name": "Ben"}]));

    let (status, _) = call(&router, "DELETE", "/api/users/2/follow", Some("t1"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&router, "DELETE", "/api/users/2/follow", Some("t1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "NotFound");
}

#[tokio::test]
async fn test_self_follow_and_unknown_user() {
    let router = setup_router();

    let (status, body) = call(&router, "POST", "/api/users/1/follow", Some("t1"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 400, "BadRequest");

    let (status, body) = call(&router, "POST", "/api/users/42/follow", Some("t1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "NotFound");

    let (status, _) = call(&router, "GET", "/api/users/42", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Feed Ranking Tests
// =============================================================================

#[tokio::test]
async fn test_feed_ranks_by_follower_likes() {
    let router = setup_router();

    // Ben and Cid follow Ann.
    call(&router, "POST", "/api/users/1/follow", Some("t2"), None).await;
    call(&router, "POST", "/api/users/1/follow", Some("t3"), None).await;

    for text in ["first", "second", "third"] {
        call(&router, "POST", "/api/tweets", Some("t1"), Some(json!({"tweet_data": text}))).await;
    }
    call(&router, "POST", "/api/tweets/3/likes", Some("t2"), None).await;
    call(&router, "POST", "/api/tweets/3/likes", Some("t3"), None).await;
    call(&router, "POST", "/api/tweets/2/likes", Some("t2"), None).await;

    let (_, body) = call(&router, "GET", "/api/tweets", Some("t1"), None).await;
    let order: Vec<i64> = body["tweets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(order, vec![3, 2, 1]);
}

// =============================================================================
// Media Tests
// =============================================================================

#[tokio::test]
async fn test_media_upload_attach_and_cleanup() {
    let router = setup_router();

    let (status, body) = upload(&router, "t1", "cat.png", b"\x89PNGdata").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"result": true, "media_id": 1}));

    let request = Request::builder()
        .method("GET")
        .uri("/api/medias/1")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/png");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNGdata");

    let (status, _) = call(
        &router,
        "POST",
        "/api/tweets",
        Some("t1"),
        Some(json!({"tweet_data": "look", "tweet_media_ids": [1]})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call(&router, "GET", "/api/tweets", Some("t2"), None).await;
    assert_eq!(body["tweets"][0]["attachments"], json!(["/api/medias/1"]));

    let (status, _) = call(&router, "DELETE", "/api/tweets/1", Some("t1"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = call(&router, "GET", "/api/medias/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "NotFound");
}

#[tokio::test]
async fn test_media_attachment_rules() {
    let router = setup_router();
    upload(&router, "t1", "a.png", b"a").await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/tweets",
        Some("t1"),
        Some(json!({"tweet_data": "x", "tweet_media_ids": [5]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, 404, "NotFound");

    call(
        &router,
        "POST",
        "/api/tweets",
        Some("t1"),
        Some(json!({"tweet_data": "x", "tweet_media_ids": [1]})),
    )
    .await;
    let (status, body) = call(
        &router,
        "POST",
        "/api/tweets",
        Some("t2"),
        Some(json!({"tweet_data": "y", "tweet_media_ids": [1]})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, 409, "Conflict");
}

#[tokio::test]
async fn test_upload_requires_key_and_file() {
    let router = setup_router();

    let request = Request::builder()
        .method("POST")
        .uri("/api/medias")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body("a.png", "image/png", b"a")))
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let empty = format!("--{}--\r\n", BOUNDARY);
    let request = Request::builder()
        .method("POST")
        .uri("/api/medias")
        .header("api-key", "t1")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(empty))
        .unwrap();
    let (status, bytes) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_error(&body, 400, "BadRequest");
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = setup_router();
    let (status, body) = call(&router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
