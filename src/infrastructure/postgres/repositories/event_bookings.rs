use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::insert_into;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::event_bookings::{EventBookingEntity, InsertEventBookingEntity};
use crate::domain::repositories::event_bookings::EventBookingRepository;
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::event_bookings;

pub struct EventBookingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl EventBookingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl EventBookingRepository for EventBookingPostgres {
    async fn create(&self, booking: InsertEventBookingEntity) -> Result<EventBookingEntity> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking = insert_into(event_bookings::table)
            .values(&booking)
            .returning(EventBookingEntity::as_returning())
            .get_result::<EventBookingEntity>(&mut conn)?;

        Ok(booking)
    }

    async fn list(&self, status: Option<BookingStatus>) -> Result<Vec<EventBookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = event_bookings::table
            .order(event_bookings::created_at.desc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(event_bookings::status.eq(status.as_str()));
        }

        let bookings = query
            .select(EventBookingEntity::as_select())
            .load::<EventBookingEntity>(&mut conn)?;

        Ok(bookings)
    }

    async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<EventBookingEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let booking = event_bookings::table
            .find(booking_id)
            .select(EventBookingEntity::as_select())
            .first::<EventBookingEntity>(&mut conn)
            .optional()?;

        Ok(booking)
    }

    async fn transition_status(
        &self,
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = diesel::update(
            event_bookings::table
                .find(booking_id)
                .filter(event_bookings::status.eq(from.as_str())),
        )
        .set((
            event_bookings::status.eq(to.as_str()),
            event_bookings::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    async fn count_new(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = event_bookings::table
            .filter(event_bookings::status.eq(BookingStatus::New.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
