use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::order_items::OrderItemEntity;
use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_modes::PaymentMode;
use crate::domain::value_objects::orders::{
    AdminOrderRecord, AdminStatusFilter, NormalizedItem, OrderWithItems,
};

#[automock]
#[async_trait]
pub trait OrderRepository {
    /// Persists the order and all of its items in one transaction.
    async fn create_with_items(
        &self,
        order: InsertOrderEntity,
        items: Vec<NormalizedItem>,
    ) -> Result<OrderWithItems>;

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderWithItems>>;

    async fn list_for_admin(
        &self,
        filter: Option<AdminStatusFilter>,
    ) -> Result<Vec<AdminOrderRecord>>;

    /// Unconditional status write used by the free-form admin endpoint.
    async fn set_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Option<OrderEntity>>;

    /// Guarded transition: updates only while the current status is in
    /// `from`, returning the number of rows changed (0 means the order was
    /// not in an eligible state).
    async fn transition_status(
        &self,
        order_id: Uuid,
        from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<usize>;

    /// Marks the order PAID, optionally switching its payment mode (COD
    /// converting to ONLINE on a pay-now flow).
    async fn mark_paid(&self, order_id: Uuid, new_mode: Option<PaymentMode>) -> Result<usize>;

    async fn find_item(&self, order_id: Uuid, photo_id: Uuid) -> Result<Option<OrderItemEntity>>;

    async fn items_for_order(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>>;
}
