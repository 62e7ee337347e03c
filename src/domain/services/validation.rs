use crate::domain::models::availability::IntervalSpec;
use crate::domain::models::booking::BOOKING_STATUSES;
use crate::error::AppError;

pub const MAX_DURATION_MINUTES: i32 = 1440;

/// Checks every interval before anything touches the database, so a bad
/// interval rejects the whole write with no partial state.
pub fn validate_intervals(intervals: &[IntervalSpec]) -> Result<(), AppError> {
    for interval in intervals {
        if !(1..=7).contains(&interval.day_of_week) {
            return Err(AppError::Validation(format!(
                "day_of_week must be between 1 (Monday) and 7 (Sunday), got {}",
                interval.day_of_week
            )));
        }
        if interval.start_time >= interval.end_time {
            return Err(AppError::Validation(format!(
                "Interval start_time must be before end_time ({} >= {})",
                interval.start_time, interval.end_time
            )));
        }
    }
    Ok(())
}

/// Event type names double as URL slugs, so they must be lowercase kebab:
/// alphanumeric segments separated by single hyphens.
pub fn validate_event_type_name(name: &str) -> Result<(), AppError> {
    let valid = !name.is_empty()
        && !name.starts_with('-')
        && !name.ends_with('-')
        && !name.contains("--")
        && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid {
        return Err(AppError::Validation(format!(
            "Event type name '{}' must be lowercase-kebab (e.g. '30min' or 'intro-call')",
            name
        )));
    }
    Ok(())
}

pub fn validate_duration(duration: i32) -> Result<(), AppError> {
    if duration <= 0 || duration > MAX_DURATION_MINUTES {
        return Err(AppError::Validation(format!(
            "duration must be between 1 and {} minutes, got {}",
            MAX_DURATION_MINUTES, duration
        )));
    }
    Ok(())
}

pub fn validate_booking_status(status: &str) -> Result<(), AppError> {
    if !BOOKING_STATUSES.contains(&status) {
        return Err(AppError::Validation(format!(
            "booking_status must be one of {:?}, got '{}'",
            BOOKING_STATUSES, status
        )));
    }
    Ok(())
}
