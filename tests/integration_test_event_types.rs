mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send_json(app: &TestApp, method: &str, uri: &str, body: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    ).await.unwrap()
}

async fn send_get(app: &TestApp, uri: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_create_provisions_default_availability() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({
        "name": "30min",
        "duration": 30
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;

    assert_eq!(body["bookingUrl"], "/book/30min");
    assert!(body["availability_id"].is_string(), "A default availability must be attached");

    let res = send_get(&app, "/api/v1/availability").await;
    let list = parse_body(res).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1, "Exactly one availability should be provisioned");
    assert_eq!(list[0]["name"], "Default Availability");
    assert_eq!(list[0]["timezone"], "UTC");

    let intervals = list[0]["intervals"].as_array().unwrap();
    assert_eq!(intervals.len(), 7);
    for (i, interval) in intervals.iter().enumerate() {
        assert_eq!(interval["day_of_week"], i as i64 + 1);
        assert_eq!(interval["start_time"], "14:00:00");
        assert_eq!(interval["end_time"], "22:00:00");
    }
}

#[tokio::test]
async fn test_second_event_type_reuses_default() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "first", "duration": 30})).await;
    let first = parse_body(res).await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "second", "duration": 60})).await;
    let second = parse_body(res).await;

    assert_eq!(first["availability_id"], second["availability_id"]);

    let res = send_get(&app, "/api/v1/availability").await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_explicit_availability_is_used() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/availability", json!({
        "name": "Mornings",
        "intervals": [{ "day_of_week": 1, "start_time": "08:00:00", "end_time": "11:00:00" }]
    })).await;
    let availability_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({
        "name": "morning-sync",
        "duration": 15,
        "availability_id": availability_id
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["availability_id"], availability_id.as_str());

    // No extra availability provisioned.
    let res = send_get(&app, "/api/v1/availability").await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_availability_rejected() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({
        "name": "orphan",
        "duration": 30,
        "availability_id": "does-not-exist"
    })).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_name_conflict() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "taken", "duration": 30})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "taken", "duration": 45})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_name_and_duration_validation() {
    let app = TestApp::new().await;

    for name in ["Bad Name", "UPPER", "trailing-", ""] {
        let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": name, "duration": 30})).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "name '{}' must be rejected", name);
    }

    for duration in [0, -5, 1441] {
        let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "ok-name", "duration": duration})).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "duration {} must be rejected", duration);
    }
}

#[tokio::test]
async fn test_get_by_slug_with_name_fallback() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({
        "name": "legacy-call",
        "duration": 30,
        "url_slug": "legacy"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Direct slug match.
    let res = send_get(&app, "/api/v1/event-types/slug/legacy").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["name"], "legacy-call");
    assert_eq!(body["bookingUrl"], "/book/legacy");

    // No slug match, but the name still resolves.
    let res = send_get(&app, "/api/v1/event-types/slug/legacy-call").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["name"], "legacy-call");

    let res = send_get(&app, "/api/v1/event-types/slug/ghost").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_raw_rows() {
    let app = TestApp::new().await;

    send_json(&app, "POST", "/api/v1/event-types", json!({"name": "older", "duration": 30})).await;
    send_json(&app, "POST", "/api/v1/event-types", json!({"name": "newer", "duration": 30})).await;

    let res = send_get(&app, "/api/v1/event-types").await;
    let body = parse_body(res).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["name"], "newer");
    assert!(list[0].get("bookingUrl").is_none(), "list() returns raw rows without bookingUrl");
}

#[tokio::test]
async fn test_update_name_collision() {
    let app = TestApp::new().await;

    send_json(&app, "POST", "/api/v1/event-types", json!({"name": "alpha", "duration": 30})).await;
    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "beta", "duration": 30})).await;
    let beta_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_json(&app, "PUT", &format!("/api/v1/event-types/{}", beta_id), json!({"name": "alpha"})).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Keeping its own name is not a collision.
    let res = send_json(&app, "PUT", &format!("/api/v1/event-types/{}", beta_id), json!({"name": "beta", "duration": 45})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["duration"], 45);
}

#[tokio::test]
async fn test_update_clears_availability_with_explicit_null() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "clearable", "duration": 30})).await;
    let body = parse_body(res).await;
    let id = body["id"].as_str().unwrap().to_string();
    assert!(body["availability_id"].is_string());

    let res = send_json(&app, "PUT", &format!("/api/v1/event-types/{}", id), json!({"availability_id": null})).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(parse_body(res).await["availability_id"].is_null());
}

#[tokio::test]
async fn test_empty_update_rejected() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "target", "duration": 30})).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_json(&app, "PUT", &format!("/api/v1/event-types/{}", id), json!({})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_returns_snapshot_and_message() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "doomed", "duration": 30})).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/v1/event-types/{}", id)).body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["message"].as_str().unwrap().contains("doomed"));
    assert_eq!(body["data"]["name"], "doomed");

    let res = send_get(&app, &format!("/api/v1/event-types/{}", id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
