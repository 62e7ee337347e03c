use crate::domain::models::availability::{Availability, AvailabilityInterval};
use chrono::NaiveTime;

pub const DEFAULT_AVAILABILITY_NAME: &str = "Default Availability";
pub const DEFAULT_TIMEZONE: &str = "UTC";

// Presentation-only conveniences attached to booking responses; neither
// is stored state.
pub const DEFAULT_LOCATION: &str = "Google Meet";
pub const DEFAULT_MEETING_LINK: &str = "https://meet.google.com/placeholder";

/// Builds the fallback availability provisioned when an event type is
/// created without one and none exists yet: UTC, with an identical
/// 14:00-22:00 window on every day of the week.
pub fn default_availability() -> (Availability, Vec<AvailabilityInterval>) {
    let availability = Availability::new(
        DEFAULT_AVAILABILITY_NAME.to_string(),
        Some(DEFAULT_TIMEZONE.to_string()),
    );

    let start = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
    let end = NaiveTime::from_hms_opt(22, 0, 0).unwrap();

    let intervals = (1..=7)
        .map(|day| AvailabilityInterval::new(availability.id.clone(), day, start, end))
        .collect();

    (availability, intervals)
}
