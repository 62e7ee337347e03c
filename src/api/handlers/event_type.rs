use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateEventTypeRequest, UpdateEventTypeRequest},
    responses::EventTypeResponse,
};
use crate::domain::models::event_type::{EventType, NewEventTypeParams};
use crate::domain::services::{defaults, validation::{validate_duration, validate_event_type_name}};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_event_type(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_event_type_name(&payload.name)?;
    validate_duration(payload.duration)?;

    if state.event_type_repo.find_by_name(&payload.name).await?.is_some() {
        return Err(AppError::Conflict(format!("Event type '{}' already exists", payload.name)));
    }

    let created = match payload.availability_id {
        Some(availability_id) => {
            state.availability_repo.find_by_id(&availability_id).await?
                .ok_or(AppError::NotFound("Availability not found".into()))?;

            let event_type = EventType::new(NewEventTypeParams {
                name: payload.name,
                description: payload.description,
                duration: payload.duration,
                url_slug: payload.url_slug,
                availability_id: Some(availability_id),
            });
            state.event_type_repo.create(&event_type).await?
        }
        None => match state.availability_repo.find_default().await? {
            Some(default) => {
                let event_type = EventType::new(NewEventTypeParams {
                    name: payload.name,
                    description: payload.description,
                    duration: payload.duration,
                    url_slug: payload.url_slug,
                    availability_id: Some(default.id),
                });
                state.event_type_repo.create(&event_type).await?
            }
            None => {
                // First event type on a fresh system: provision the
                // fallback schedule and the event type together, so a
                // failed provisioning leaves neither behind.
                let (availability, intervals) = defaults::default_availability();
                info!("Provisioning default availability {}", availability.id);

                let event_type = EventType::new(NewEventTypeParams {
                    name: payload.name,
                    description: payload.description,
                    duration: payload.duration,
                    url_slug: payload.url_slug,
                    availability_id: Some(availability.id.clone()),
                });
                state.event_type_repo
                    .create_with_availability(&event_type, &availability, &intervals)
                    .await?
            }
        },
    };

    info!("Event type created: {}", created.name);
    Ok(Json(EventTypeResponse::from(created)))
}

pub async fn get_event_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_type = state.event_type_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;

    Ok(Json(EventTypeResponse::from(event_type)))
}

pub async fn get_event_type_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Older records predate url_slug, so fall back to matching on name.
    let event_type = match state.event_type_repo.find_by_slug(&slug).await? {
        Some(event_type) => event_type,
        None => state.event_type_repo.find_by_name(&slug).await?
            .ok_or_else(|| AppError::NotFound(format!("Event type '{}' not found", slug)))?,
    };

    Ok(Json(EventTypeResponse::from(event_type)))
}

pub async fn list_event_types(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let event_types = state.event_type_repo.list().await?;
    Ok(Json(event_types))
}

pub async fn update_event_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEventTypeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_empty() {
        return Err(AppError::Validation("No fields provided for update".into()));
    }

    let mut event_type = state.event_type_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;

    if let Some(name) = payload.name {
        if name != event_type.name {
            validate_event_type_name(&name)?;
            if let Some(existing) = state.event_type_repo.find_by_name(&name).await? {
                if existing.id != event_type.id {
                    return Err(AppError::Conflict(format!("Event type '{}' already exists", name)));
                }
            }
            event_type.name = name;
        }
    }
    if let Some(description) = payload.description { event_type.description = Some(description); }
    if let Some(duration) = payload.duration {
        validate_duration(duration)?;
        event_type.duration = duration;
    }
    if let Some(url_slug) = payload.url_slug { event_type.url_slug = Some(url_slug); }
    match payload.availability_id {
        Some(Some(availability_id)) => {
            state.availability_repo.find_by_id(&availability_id).await?
                .ok_or(AppError::NotFound("Availability not found".into()))?;
            event_type.availability_id = Some(availability_id);
        }
        // Explicit null clears the reference.
        Some(None) => event_type.availability_id = None,
        None => {}
    }
    event_type.updated_at = Utc::now();

    let updated = state.event_type_repo.update(&event_type).await?;
    info!("Event type updated: {}", updated.name);

    Ok(Json(EventTypeResponse::from(updated)))
}

pub async fn delete_event_type(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_type = state.event_type_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Event type not found".into()))?;

    state.event_type_repo.delete(&id).await?;
    info!("Event type deleted: {} (bookings cascaded)", event_type.name);

    Ok(Json(serde_json::json!({
        "message": format!("Event type '{}' and its bookings deleted", event_type.name),
        "data": event_type
    })))
}
