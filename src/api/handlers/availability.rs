use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateAvailabilityRequest, UpdateAvailabilityRequest},
    responses::AvailabilityResponse,
};
use crate::domain::models::availability::{Availability, AvailabilityInterval, IntervalSpec};
use crate::domain::services::validation::validate_intervals;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

fn build_intervals(availability_id: &str, specs: &[IntervalSpec]) -> Vec<AvailabilityInterval> {
    specs
        .iter()
        .map(|spec| {
            AvailabilityInterval::new(
                availability_id.to_string(),
                spec.day_of_week,
                spec.start_time,
                spec.end_time,
            )
        })
        .collect()
}

async fn load_with_intervals(
    state: &AppState,
    availability: Availability,
) -> Result<AvailabilityResponse, AppError> {
    let intervals = state.availability_repo.list_intervals(&availability.id).await?;
    Ok(AvailabilityResponse { availability, intervals })
}

pub async fn create_availability(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_intervals(&payload.intervals)?;

    let availability = Availability::new(payload.name, payload.timezone);
    let intervals = build_intervals(&availability.id, &payload.intervals);

    state.availability_repo.create(&availability, &intervals).await?;
    info!("Availability created: {} ({} intervals)", availability.id, intervals.len());

    Ok(Json(load_with_intervals(&state, availability).await?))
}

pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let availability = state.availability_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Availability not found".into()))?;

    Ok(Json(load_with_intervals(&state, availability).await?))
}

pub async fn list_availability(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let availabilities = state.availability_repo.list().await?;

    let mut responses = Vec::with_capacity(availabilities.len());
    for availability in availabilities {
        responses.push(load_with_intervals(&state, availability).await?);
    }

    Ok(Json(responses))
}

pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::Validation("No fields provided for update".into()));
    }

    let mut availability = state.availability_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Availability not found".into()))?;

    if let Some(name) = payload.name { availability.name = name; }
    if let Some(timezone) = payload.timezone { availability.timezone = timezone; }
    availability.updated_at = Utc::now();

    // An intervals field in the payload, even an empty list, replaces the
    // whole set; absence leaves the existing intervals alone.
    let new_intervals = match &payload.intervals {
        Some(specs) => {
            validate_intervals(specs)?;
            Some(build_intervals(&availability.id, specs))
        }
        None => None,
    };

    state.availability_repo.update(&availability, new_intervals.as_deref()).await?;
    info!("Availability updated: {}", availability.id);

    Ok(Json(load_with_intervals(&state, availability).await?))
}

pub async fn delete_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let availability = state.availability_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Availability not found".into()))?;

    let snapshot = load_with_intervals(&state, availability).await?;
    state.availability_repo.delete(&id).await?;
    info!("Availability deleted: {}", id);

    Ok(Json(serde_json::json!({
        "message": "Availability deleted",
        "data": snapshot
    })))
}
