use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::event_bookings::{EventBookingEntity, InsertEventBookingEntity};
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;

#[automock]
#[async_trait]
pub trait EventBookingRepository {
    async fn create(&self, booking: InsertEventBookingEntity) -> Result<EventBookingEntity>;

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<EventBookingEntity>>;

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<EventBookingEntity>>;

    /// Guarded transition from `from`; 0 rows means the booking had already
    /// left that state.
    async fn transition_status(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<usize>;

    async fn count_new(&self) -> Result<i64>;
}
