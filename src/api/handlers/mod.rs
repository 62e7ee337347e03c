pub mod availability;
pub mod booking;
pub mod event_type;
pub mod health;
