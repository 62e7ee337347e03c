use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// Every allowed booking status. Cancelled bookings keep their row but
/// stop participating in conflict detection.
pub const BOOKING_STATUSES: [&str; 4] = ["confirmed", "pending", "cancelled", "completed"];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub event_type_id: String,
    pub client_email: String,
    pub name: String,
    pub additional_notes: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: NaiveDate,
    pub meeting_link: Option<String>,
    pub booking_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub event_type_id: String,
    pub client_email: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub date: NaiveDate,
    pub additional_notes: Option<String>,
    pub meeting_link: Option<String>,
    pub booking_status: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            event_type_id: params.event_type_id,
            client_email: params.client_email,
            name: params.name,
            additional_notes: params.additional_notes,
            start_time: params.start_time,
            end_time: params.end_time,
            date: params.date,
            meeting_link: params.meeting_link,
            booking_status: params.booking_status.unwrap_or_else(|| STATUS_CONFIRMED.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Optional filters for booking list queries. Absent fields match everything.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct BookingFilter {
    pub event_type_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub booking_status: Option<String>,
    pub client_email: Option<String>,
}
