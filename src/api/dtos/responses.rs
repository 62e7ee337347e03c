use crate::domain::models::{
    availability::{Availability, AvailabilityInterval},
    booking::Booking,
    event_type::EventType,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    #[serde(flatten)]
    pub availability: Availability,
    pub intervals: Vec<AvailabilityInterval>,
}

#[derive(Debug, Serialize)]
pub struct EventTypeResponse {
    #[serde(flatten)]
    pub event_type: EventType,
    #[serde(rename = "bookingUrl")]
    pub booking_url: String,
}

impl From<EventType> for EventTypeResponse {
    fn from(event_type: EventType) -> Self {
        let booking_url = event_type.booking_url();
        Self { event_type, booking_url }
    }
}

#[derive(Debug, Serialize)]
pub struct EventTypeSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration: i32,
    pub url_slug: Option<String>,
}

impl From<&EventType> for EventTypeSummary {
    fn from(event_type: &EventType) -> Self {
        Self {
            id: event_type.id.clone(),
            name: event_type.name.clone(),
            description: event_type.description.clone(),
            duration: event_type.duration,
            url_slug: event_type.url_slug.clone(),
        }
    }
}

/// A booking joined with presentation context. `event_type` is None when
/// enrichment could not complete; the booking itself is always intact.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub event_type: Option<EventTypeSummary>,
    pub timezone: String,
    pub location: String,
}
