pub mod dashboard;
pub mod event_bookings;
pub mod orders;
pub mod payments;
pub mod users;
