use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::event_bookings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = event_bookings)]
pub struct EventBookingEntity {
    pub id: Uuid,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
    pub location: String,
    pub expected_guests: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = event_bookings)]
pub struct InsertEventBookingEntity {
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
    pub location: String,
    pub expected_guests: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub notes: Option<String>,
    pub status: String,
}
