use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::insert_into;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity};
use crate::domain::repositories::payments::PaymentRepository;
use crate::domain::value_objects::enums::payment_statuses::GatewayPaymentStatus;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::payments;

pub struct PaymentPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl PaymentPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl PaymentRepository for PaymentPostgres {
    async fn create(&self, payment: InsertPaymentEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment_id = insert_into(payments::table)
            .values(&payment)
            .returning(payments::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(payment_id)
    }

    async fn find_by_gateway_order(
        &self,
        order_id: Uuid,
        razorpay_order_id: &str,
    ) -> Result<Option<PaymentEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let payment = payments::table
            .filter(payments::order_id.eq(order_id))
            .filter(payments::razorpay_order_id.eq(razorpay_order_id))
            .select(PaymentEntity::as_select())
            .first::<PaymentEntity>(&mut conn)
            .optional()?;

        Ok(payment)
    }

    async fn mark_failed(&self, order_id: Uuid, razorpay_order_id: &str) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = diesel::update(
            payments::table
                .filter(payments::order_id.eq(order_id))
                .filter(payments::razorpay_order_id.eq(razorpay_order_id)),
        )
        .set((
            payments::status.eq(GatewayPaymentStatus::Failed.as_str()),
            payments::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    async fn mark_success(
        &self,
        order_id: Uuid,
        razorpay_order_id: &str,
        razorpay_payment_id: &str,
        razorpay_signature: &str,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = diesel::update(
            payments::table
                .filter(payments::order_id.eq(order_id))
                .filter(payments::razorpay_order_id.eq(razorpay_order_id)),
        )
        .set((
            payments::razorpay_payment_id.eq(razorpay_payment_id),
            payments::razorpay_signature.eq(razorpay_signature),
            payments::status.eq(GatewayPaymentStatus::Success.as_str()),
            payments::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
