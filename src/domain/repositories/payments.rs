use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::payments::{InsertPaymentEntity, PaymentEntity};

#[automock]
#[async_trait]
pub trait PaymentRepository {
    async fn create(&self, payment: InsertPaymentEntity) -> Result<Uuid>;

    async fn find_by_gateway_order(
        &self,
        order_id: Uuid,
        razorpay_order_id: &str,
    ) -> Result<Option<PaymentEntity>>;

    async fn mark_failed(&self, order_id: Uuid, razorpay_order_id: &str) -> Result<usize>;

    async fn mark_success(
        &self,
        order_id: Uuid,
        razorpay_order_id: &str,
        razorpay_payment_id: &str,
        razorpay_signature: &str,
    ) -> Result<usize>;
}
