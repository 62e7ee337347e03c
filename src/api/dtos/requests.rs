use crate::domain::models::availability::IntervalSpec;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

// Wraps the inner value so that an absent field and an explicit `null`
// deserialize differently: None = leave unchanged, Some(None) = clear.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
pub struct CreateAvailabilityRequest {
    pub name: String,
    pub timezone: Option<String>,
    #[serde(default)]
    pub intervals: Vec<IntervalSpec>,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub intervals: Option<Vec<IntervalSpec>>,
}

impl UpdateAvailabilityRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.timezone.is_none() && self.intervals.is_none()
    }
}

#[derive(Deserialize)]
pub struct CreateEventTypeRequest {
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub url_slug: Option<String>,
    pub availability_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateEventTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub url_slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub availability_id: Option<Option<String>>,
}

impl UpdateEventTypeRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.duration.is_none()
            && self.url_slug.is_none()
            && self.availability_id.is_none()
    }
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
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

#[derive(Deserialize)]
pub struct UpdateBookingRequest {
    pub event_type_id: Option<String>,
    pub client_email: Option<String>,
    pub name: Option<String>,
    pub additional_notes: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub date: Option<NaiveDate>,
    pub meeting_link: Option<String>,
    pub booking_status: Option<String>,
}

impl UpdateBookingRequest {
    pub fn is_empty(&self) -> bool {
        self.event_type_id.is_none()
            && self.client_email.is_none()
            && self.name.is_none()
            && self.additional_notes.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.date.is_none()
            && self.meeting_link.is_none()
            && self.booking_status.is_none()
    }

    /// Any of these fields changing requires the conflict check to re-run.
    pub fn touches_schedule(&self) -> bool {
        self.event_type_id.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
            || self.date.is_some()
    }
}

#[derive(Deserialize)]
pub struct EventTypeBookingsQuery {
    pub date: Option<NaiveDate>,
    pub booking_status: Option<String>,
}
