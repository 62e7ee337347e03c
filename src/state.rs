use std::sync::Arc;
use crate::domain::ports::{AvailabilityRepository, BookingRepository, EventTypeRepository};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub availability_repo: Arc<dyn AvailabilityRepository>,
    pub event_type_repo: Arc<dyn EventTypeRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
}
