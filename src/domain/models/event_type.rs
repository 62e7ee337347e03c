use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A bookable meeting template. Holds a weak reference to an
/// availability: deleting that availability clears the reference
/// without touching the event type.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventType {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub url_slug: Option<String>,
    // Reserved for future multi-user support, never populated today.
    pub user_id: Option<String>,
    pub availability_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventTypeParams {
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub url_slug: Option<String>,
    pub availability_id: Option<String>,
}

impl EventType {
    pub fn new(params: NewEventTypeParams) -> Self {
        let now = Utc::now();
        let url_slug = params.url_slug.or_else(|| Some(params.name.clone()));

        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            description: params.description,
            duration: params.duration,
            url_slug,
            user_id: None,
            availability_id: params.availability_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn booking_url(&self) -> String {
        format!("/book/{}", self.url_slug.as_deref().unwrap_or(&self.name))
    }
}
