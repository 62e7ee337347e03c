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

async fn send_delete(app: &TestApp, uri: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_availability_delete_clears_event_type_reference() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/availability", json!({
        "name": "Shared",
        "intervals": [{ "day_of_week": 1, "start_time": "09:00:00", "end_time": "12:00:00" }]
    })).await;
    let availability_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({
        "name": "linked",
        "duration": 30,
        "availability_id": availability_id
    })).await;
    let event_type_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_delete(&app, &format!("/api/v1/availability/{}", availability_id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    // The event type survives with its reference cleared.
    let res = send_get(&app, &format!("/api/v1/event-types/{}", event_type_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(parse_body(res).await["availability_id"].is_null());
}

#[tokio::test]
async fn test_availability_delete_removes_intervals() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/availability", json!({
        "name": "With Intervals",
        "intervals": [
            { "day_of_week": 1, "start_time": "09:00:00", "end_time": "12:00:00" },
            { "day_of_week": 2, "start_time": "09:00:00", "end_time": "12:00:00" }
        ]
    })).await;
    let availability_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_delete(&app, &format!("/api/v1/availability/{}", availability_id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM availability_intervals")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "Interval rows must cascade with their parent");
}

#[tokio::test]
async fn test_event_type_delete_cascades_bookings() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "doomed", "duration": 30})).await;
    let event_type_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_json(&app, "POST", "/api/v1/bookings", json!({
        "event_type_id": event_type_id,
        "client_email": "a@b.com",
        "name": "Client",
        "start_time": "2025-01-15T10:00:00Z",
        "end_time": "2025-01-15T10:30:00Z",
        "date": "2025-01-15"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_delete(&app, &format!("/api/v1/event-types/{}", event_type_id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send_get(&app, &format!("/api/v1/bookings/{}", booking_id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_orphaned_booking_enrichment_degrades_gracefully() {
    let app = TestApp::new().await;

    let res = send_json(&app, "POST", "/api/v1/event-types", json!({"name": "keeper", "duration": 30})).await;
    let event_type_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = send_json(&app, "POST", "/api/v1/bookings", json!({
        "event_type_id": event_type_id,
        "client_email": "a@b.com",
        "name": "Client",
        "start_time": "2025-01-15T10:00:00Z",
        "end_time": "2025-01-15T10:30:00Z",
        "date": "2025-01-15"
    })).await;
    let booking_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // Clear the event type's availability; the booking still reads fine
    // and falls back to UTC.
    let res = send_json(&app, "PUT", &format!("/api/v1/event-types/{}", event_type_id),
        json!({"availability_id": null})).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send_get(&app, &format!("/api/v1/bookings/{}", booking_id)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["timezone"], "UTC");
    assert_eq!(body["event_type"]["name"], "keeper");
}
