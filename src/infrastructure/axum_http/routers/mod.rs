pub mod admin;
pub mod auth;
pub mod contact;
pub mod events;
pub mod orders;
pub mod payments;
