use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateBookingRequest, EventTypeBookingsQuery, UpdateBookingRequest},
    responses::{BookingResponse, EventTypeSummary},
};
use crate::domain::models::booking::{Booking, BookingFilter, NewBookingParams};
use crate::domain::services::{defaults, validation::validate_booking_status};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

/// Best-effort join of presentation context onto a booking. Enrichment
/// must never fail the primary operation: any lookup problem is logged
/// and the bare row goes out instead.
async fn enrich(state: &AppState, mut booking: Booking) -> BookingResponse {
    if booking.meeting_link.is_none() {
        booking.meeting_link = Some(defaults::DEFAULT_MEETING_LINK.to_string());
    }

    let event_type = match state.event_type_repo.find_by_id(&booking.event_type_id).await {
        Ok(found) => found,
        Err(e) => {
            warn!("Enrichment failed for booking {}: {}", booking.id, e);
            None
        }
    };

    let timezone = match event_type.as_ref().and_then(|et| et.availability_id.clone()) {
        Some(availability_id) => match state.availability_repo.find_by_id(&availability_id).await {
            Ok(Some(availability)) => availability.timezone,
            Ok(None) => defaults::DEFAULT_TIMEZONE.to_string(),
            Err(e) => {
                warn!("Enrichment failed for booking {}: {}", booking.id, e);
                defaults::DEFAULT_TIMEZONE.to_string()
            }
        },
        None => defaults::DEFAULT_TIMEZONE.to_string(),
    };

    BookingResponse {
        event_type: event_type.as_ref().map(EventTypeSummary::from),
        timezone,
        location: defaults::DEFAULT_LOCATION.to_string(),
        booking,
    }
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Check order is deliberate and load-bearing: existence, then
    // conflict, then time ordering. A request that is both ill-ordered
    // and conflicting reports the conflict.
    state.event_type_repo.find_by_id(&payload.event_type_id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;

    let overlaps = state.booking_repo
        .count_overlapping(&payload.event_type_id, payload.date, payload.start_time, payload.end_time, None)
        .await?;
    if overlaps > 0 {
        return Err(AppError::Conflict("Time slot is already booked".into()));
    }

    if payload.start_time >= payload.end_time {
        return Err(AppError::Validation("start_time must be before end_time".into()));
    }

    if let Some(status) = &payload.booking_status {
        validate_booking_status(status)?;
    }

    let booking = Booking::new(NewBookingParams {
        event_type_id: payload.event_type_id,
        client_email: payload.client_email,
        name: payload.name,
        start_time: payload.start_time,
        end_time: payload.end_time,
        date: payload.date,
        additional_notes: payload.additional_notes,
        meeting_link: payload.meeting_link,
        booking_status: payload.booking_status,
    });

    let created = state.booking_repo.create(&booking).await?;
    info!("Booking created: {} for event type {}", created.id, created.event_type_id);

    Ok(Json(enrich(&state, created).await))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<BookingFilter>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list(&filter).await?;

    let mut responses = Vec::with_capacity(bookings.len());
    for booking in bookings {
        responses.push(enrich(&state, booking).await);
    }

    Ok(Json(responses))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    Ok(Json(enrich(&state, booking).await))
}

pub async fn list_bookings_by_event_type(
    State(state): State<Arc<AppState>>,
    Path(event_type_id): Path<String>,
    Query(query): Query<EventTypeBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    state.event_type_repo.find_by_id(&event_type_id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;

    let filter = BookingFilter {
        event_type_id: Some(event_type_id),
        date: query.date,
        booking_status: query.booking_status,
        client_email: None,
    };
    let bookings = state.booking_repo.list(&filter).await?;

    let mut responses = Vec::with_capacity(bookings.len());
    for booking in bookings {
        responses.push(enrich(&state, booking).await);
    }

    Ok(Json(responses))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::Validation("No fields provided for update".into()));
    }

    let mut booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let reschedule = payload.touches_schedule();

    if let Some(event_type_id) = payload.event_type_id {
        state.event_type_repo.find_by_id(&event_type_id).await?
            .ok_or(AppError::NotFound("Event type not found".into()))?;
        booking.event_type_id = event_type_id;
    }
    if let Some(client_email) = payload.client_email { booking.client_email = client_email; }
    if let Some(name) = payload.name { booking.name = name; }
    if let Some(notes) = payload.additional_notes { booking.additional_notes = Some(notes); }
    if let Some(meeting_link) = payload.meeting_link { booking.meeting_link = Some(meeting_link); }
    if let Some(status) = payload.booking_status {
        validate_booking_status(&status)?;
        booking.booking_status = status;
    }
    if let Some(start_time) = payload.start_time { booking.start_time = start_time; }
    if let Some(end_time) = payload.end_time { booking.end_time = end_time; }
    if let Some(date) = payload.date { booking.date = date; }

    if reschedule {
        // Conflict check against the merged values, excluding this
        // booking's own row so an unchanged range passes.
        let overlaps = state.booking_repo
            .count_overlapping(
                &booking.event_type_id,
                booking.date,
                booking.start_time,
                booking.end_time,
                Some(&booking.id),
            )
            .await?;
        if overlaps > 0 {
            return Err(AppError::Conflict("Time slot is already booked".into()));
        }

        if booking.start_time >= booking.end_time {
            return Err(AppError::Validation("start_time must be before end_time".into()));
        }
    }

    booking.updated_at = chrono::Utc::now();
    let updated = state.booking_repo.update(&booking).await?;
    info!("Booking updated: {}", updated.id);

    Ok(Json(enrich(&state, updated).await))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    state.booking_repo.delete(&id).await?;
    info!("Booking deleted: {}", id);

    Ok(Json(serde_json::json!({
        "message": "Booking deleted",
        "data": booking
    })))
}
