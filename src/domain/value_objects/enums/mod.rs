pub mod booking_statuses;
pub mod order_statuses;
pub mod order_types;
pub mod payment_modes;
pub mod payment_statuses;
