use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::orders::OrderEntity;
use crate::infrastructure::postgres::schema::order_items;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable, Associations)]
#[diesel(belongs_to(OrderEntity, foreign_key = order_id))]
#[diesel(table_name = order_items)]
pub struct OrderItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub photo_name: String,
    pub photo_url: String,
    pub quantity: i32,
    pub price_per_unit: f64,
    pub order_type: String,
    pub polaroid_type: Option<String>,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_items)]
pub struct InsertOrderItemEntity {
    pub order_id: Uuid,
    pub photo_name: String,
    pub photo_url: String,
    pub quantity: i32,
    pub price_per_unit: f64,
    pub order_type: String,
    pub polaroid_type: Option<String>,
    pub caption: Option<String>,
}
