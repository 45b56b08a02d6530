pub mod event_bookings;
pub mod order_items;
pub mod orders;
pub mod payments;
pub mod users;
