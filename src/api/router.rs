use axum::{
    body::Body,
    extract::Request,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, booking, event_type, health};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Availability schedules
        .route("/api/v1/availability", get(availability::list_availability).post(availability::create_availability))
        .route("/api/v1/availability/{id}", get(availability::get_availability).put(availability::update_availability).delete(availability::delete_availability))

        // Event types
        .route("/api/v1/event-types", get(event_type::list_event_types).post(event_type::create_event_type))
        .route("/api/v1/event-types/{id}", get(event_type::get_event_type).put(event_type::update_event_type).delete(event_type::delete_event_type))
        .route("/api/v1/event-types/slug/{slug}", get(event_type::get_event_type_by_slug))
        .route("/api/v1/event-types/{id}/bookings", get(booking::list_bookings_by_event_type))

        // Bookings
        .route("/api/v1/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/api/v1/bookings/{id}", get(booking::get_booking).put(booking::update_booking).delete(booking::delete_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
