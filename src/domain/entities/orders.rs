use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::orders;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = orders)]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub address_json: Value,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub gst: f64,
    pub total_amount: f64,
    pub payment_mode: String,
    pub payment_status: String,
    pub order_status: String,
    pub order_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct InsertOrderEntity {
    pub user_id: Uuid,
    pub customer_name: String,
    pub phone: String,
    pub address_json: Value,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub gst: f64,
    pub total_amount: f64,
    pub payment_mode: String,
    pub payment_status: String,
    pub order_status: String,
    pub order_type: String,
}
