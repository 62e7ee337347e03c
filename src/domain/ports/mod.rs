use crate::domain::models::{
    availability::{Availability, AvailabilityInterval},
    booking::{Booking, BookingFilter},
    event_type::EventType,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Inserts the availability and all of its intervals as one transaction.
    async fn create(&self, availability: &Availability, intervals: &[AvailabilityInterval]) -> Result<(), AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Availability>, AppError>;
    async fn list(&self) -> Result<Vec<Availability>, AppError>;
    /// Intervals sorted by (day_of_week, start_time).
    async fn list_intervals(&self, availability_id: &str) -> Result<Vec<AvailabilityInterval>, AppError>;
    /// Field updates and, when `intervals` is given (even empty), full
    /// replacement of the interval set, all in one transaction.
    async fn update(&self, availability: &Availability, intervals: Option<&[AvailabilityInterval]>) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// The oldest-created availability, used as the fallback for event
    /// types created without one. Never provisions anything itself.
    async fn find_default(&self) -> Result<Option<Availability>, AppError>;
}

#[async_trait]
pub trait EventTypeRepository: Send + Sync {
    async fn create(&self, event_type: &EventType) -> Result<EventType, AppError>;
    /// Provisions a fresh availability (with its intervals) and the event
    /// type referencing it in a single transaction, so a failed
    /// provisioning never leaves a dangling event type.
    async fn create_with_availability(
        &self,
        event_type: &EventType,
        availability: &Availability,
        intervals: &[AvailabilityInterval],
    ) -> Result<EventType, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventType>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<EventType>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<EventType>, AppError>;
    async fn list(&self) -> Result<Vec<EventType>, AppError>;
    async fn update(&self, event_type: &EventType) -> Result<EventType, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Ordered by (date desc, start_time desc).
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Half-open overlap count for the conflict pre-check: bookings on the
    /// same event type and date, not cancelled, with
    /// `start_time < end AND end_time > start`. `exclude_id` removes a
    /// booking's own row during updates.
    async fn count_overlapping(
        &self,
        event_type_id: &str,
        date: NaiveDate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<&str>,
    ) -> Result<i64, AppError>;
}
