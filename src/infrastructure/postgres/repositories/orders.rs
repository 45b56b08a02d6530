use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::dsl::now;
use diesel::insert_into;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::order_items::{InsertOrderItemEntity, OrderItemEntity};
use crate::domain::entities::orders::{InsertOrderEntity, OrderEntity};
use crate::domain::entities::users::UserEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_modes::PaymentMode;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::domain::value_objects::orders::{
    AdminOrderRecord, AdminStatusFilter, NormalizedItem, OrderWithItems,
};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{order_items, orders, users};

pub struct OrderPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl OrderPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    fn load_items_grouped(
        conn: &mut PgConnection,
        orders: &[OrderEntity],
    ) -> Result<Vec<Vec<OrderItemEntity>>> {
        let items = OrderItemEntity::belonging_to(orders)
            .order(order_items::created_at.asc())
            .select(OrderItemEntity::as_select())
            .load::<OrderItemEntity>(conn)?;

        Ok(items.grouped_by(orders))
    }
}

#[async_trait]
impl OrderRepository for OrderPostgres {
    async fn create_with_items(
        &self,
        order: InsertOrderEntity,
        items: Vec<NormalizedItem>,
    ) -> Result<OrderWithItems> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = conn.transaction::<OrderWithItems, anyhow::Error, _>(|conn| {
            let order = insert_into(orders::table)
                .values(&order)
                .returning(OrderEntity::as_returning())
                .get_result::<OrderEntity>(conn)?;

            let rows = items
                .into_iter()
                .map(|item| InsertOrderItemEntity {
                    order_id: order.id,
                    photo_name: item.photo_name,
                    photo_url: item.photo_url,
                    quantity: item.quantity,
                    price_per_unit: item.price_per_unit,
                    order_type: item.order_type.as_str().to_string(),
                    polaroid_type: item.polaroid_type,
                    caption: item.caption,
                })
                .collect::<Vec<_>>();

            let items = insert_into(order_items::table)
                .values(&rows)
                .returning(OrderItemEntity::as_returning())
                .get_results::<OrderItemEntity>(conn)?;

            Ok(OrderWithItems { order, items })
        })?;

        Ok(result)
    }

    async fn find_by_id(&self, order_id: Uuid) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = orders::table
            .find(order_id)
            .select(OrderEntity::as_select())
            .first::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(order)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<OrderWithItems>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order_rows = orders::table
            .filter(orders::user_id.eq(user_id))
            .order(orders::created_at.desc())
            .select(OrderEntity::as_select())
            .load::<OrderEntity>(&mut conn)?;

        let grouped = Self::load_items_grouped(&mut conn, &order_rows)?;

        Ok(order_rows
            .into_iter()
            .zip(grouped)
            .map(|(order, items)| OrderWithItems { order, items })
            .collect())
    }

    async fn list_for_admin(
        &self,
        filter: Option<AdminStatusFilter>,
    ) -> Result<Vec<AdminOrderRecord>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = orders::table
            .inner_join(users::table)
            .select((OrderEntity::as_select(), UserEntity::as_select()))
            .order(orders::created_at.desc())
            .into_boxed();

        query = match filter {
            // "new" means every order still open for processing.
            Some(AdminStatusFilter::New) => query.filter(
                orders::order_status.ne_all(
                    OrderStatus::TERMINAL
                        .iter()
                        .map(|status| status.as_str())
                        .collect::<Vec<_>>(),
                ),
            ),
            Some(AdminStatusFilter::Completed) => {
                query.filter(orders::order_status.eq(OrderStatus::Completed.as_str()))
            }
            Some(AdminStatusFilter::Rejected) => {
                query.filter(orders::order_status.eq(OrderStatus::Rejected.as_str()))
            }
            Some(AdminStatusFilter::Cancelled) => {
                query.filter(orders::order_status.eq(OrderStatus::Cancelled.as_str()))
            }
            None => query,
        };

        let rows = query.load::<(OrderEntity, UserEntity)>(&mut conn)?;

        let order_rows = rows
            .iter()
            .map(|(order, _)| order.clone())
            .collect::<Vec<_>>();
        let grouped = Self::load_items_grouped(&mut conn, &order_rows)?;

        Ok(rows
            .into_iter()
            .zip(grouped)
            .map(|((order, user), items)| AdminOrderRecord { order, items, user })
            .collect())
    }

    async fn set_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Option<OrderEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let order = diesel::update(orders::table.find(order_id))
            .set((
                orders::order_status.eq(status.as_str()),
                orders::updated_at.eq(now),
            ))
            .returning(OrderEntity::as_returning())
            .get_result::<OrderEntity>(&mut conn)
            .optional()?;

        Ok(order)
    }

    async fn transition_status(
        &self,
        order_id: Uuid,
        from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let eligible = from.iter().map(|status| status.as_str()).collect::<Vec<_>>();

        let affected = diesel::update(
            orders::table
                .find(order_id)
                .filter(orders::order_status.eq_any(eligible)),
        )
        .set((
            orders::order_status.eq(to.as_str()),
            orders::updated_at.eq(now),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }

    async fn mark_paid(&self, order_id: Uuid, new_mode: Option<PaymentMode>) -> Result<usize> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let target = orders::table.find(order_id);

        let affected = match new_mode {
            Some(mode) => diesel::update(target)
                .set((
                    orders::payment_status.eq(PaymentStatus::Paid.as_str()),
                    orders::payment_mode.eq(mode.as_str()),
                    orders::updated_at.eq(now),
                ))
                .execute(&mut conn)?,
            None => diesel::update(target)
                .set((
                    orders::payment_status.eq(PaymentStatus::Paid.as_str()),
                    orders::updated_at.eq(now),
                ))
                .execute(&mut conn)?,
        };

        Ok(affected)
    }

    async fn find_item(&self, order_id: Uuid, photo_id: Uuid) -> Result<Option<OrderItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let item = order_items::table
            .find(photo_id)
            .filter(order_items::order_id.eq(order_id))
            .select(OrderItemEntity::as_select())
            .first::<OrderItemEntity>(&mut conn)
            .optional()?;

        Ok(item)
    }

    async fn items_for_order(&self, order_id: Uuid) -> Result<Vec<OrderItemEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let items = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::created_at.asc())
            .select(OrderItemEntity::as_select())
            .load::<OrderItemEntity>(&mut conn)?;

        Ok(items)
    }
}
