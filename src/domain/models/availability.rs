use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::FromRow;

/// A named weekly template of open windows. Owns its intervals; deleting
/// it cascades them and clears any event type reference pointing at it.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Availability {
    pub id: String,
    pub name: String,
    pub timezone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Availability {
    pub fn new(name: String, timezone: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            timezone: timezone.unwrap_or_else(|| "UTC".to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// One open window on a specific weekday (1 = Monday .. 7 = Sunday).
/// Never exists without a parent availability.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AvailabilityInterval {
    pub id: String,
    pub availability_id: String,
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AvailabilityInterval {
    pub fn new(availability_id: String, day_of_week: i32, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            availability_id,
            day_of_week,
            start_time,
            end_time,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Caller-supplied interval shape, validated before any row is written.
#[derive(Debug, Deserialize, Clone)]
pub struct IntervalSpec {
    pub day_of_week: i32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}
