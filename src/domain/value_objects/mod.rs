pub mod dashboard;
pub mod enums;
pub mod events;
pub mod iam;
pub mod orders;
pub mod payments;
pub mod pricing;
