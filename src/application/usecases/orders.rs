use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::orders::InsertOrderEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::domain::value_objects::orders::{
    AdminStatusFilter, CreateOrderModel, CreatedOrderDto, OrderDto, OrderItemSummaryDto,
    OrderWithItems, validate_order,
};
use crate::domain::value_objects::pricing;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),
    #[error("Order not found")]
    NotFound,
    #[error("Photo not found")]
    PhotoNotFound,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl OrderError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            OrderError::Validation(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound | OrderError::PhotoNotFound => StatusCode::NOT_FOUND,
            OrderError::Forbidden(_) => StatusCode::FORBIDDEN,
            OrderError::Conflict(_) => StatusCode::CONFLICT,
            OrderError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, OrderError>;

/// What the admin photo-download endpoint should send back.
#[derive(Debug, PartialEq)]
pub enum PhotoDownload {
    File {
        bytes: Vec<u8>,
        content_type: String,
        file_name: String,
    },
    Redirect(String),
}

pub struct OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    order_repo: Arc<O>,
}

impl<O> OrderUseCase<O>
where
    O: OrderRepository + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    pub async fn create_order(
        &self,
        user_id: Uuid,
        model: CreateOrderModel,
    ) -> UseCaseResult<CreatedOrderDto> {
        let validated = validate_order(&model).map_err(OrderError::Validation)?;
        let pricing = pricing::quote(validated.total_quantity);

        info!(
            %user_id,
            total_quantity = validated.total_quantity,
            payment_mode = %validated.payment_mode,
            total_amount = pricing.total_amount,
            "orders: creating order"
        );

        let order = InsertOrderEntity {
            user_id,
            customer_name: validated.customer_name,
            phone: validated.phone,
            address_json: validated.address,
            subtotal: pricing.subtotal,
            delivery_charge: pricing.delivery_charge,
            gst: pricing.gst,
            total_amount: pricing.total_amount,
            payment_mode: validated.payment_mode.as_str().to_string(),
            payment_status: PaymentStatus::Pending.as_str().to_string(),
            order_status: OrderStatus::New.as_str().to_string(),
            order_type: validated.order_type.as_str().to_string(),
        };

        let created = self
            .order_repo
            .create_with_items(order, validated.items)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "orders: failed to persist order");
                OrderError::Internal(err)
            })?;

        info!(%user_id, order_id = %created.order.id, "orders: order created");

        Ok(CreatedOrderDto {
            id: created.order.id,
            order_id: created.order.id,
            total_quantity: validated.total_quantity,
            total_amount: created.order.total_amount,
            payment_mode: created.order.payment_mode,
            payment_status: created.order.payment_status,
            order_status: created.order.order_status,
            created_at: created.order.created_at,
            order_items: created
                .items
                .into_iter()
                .map(|item| OrderItemSummaryDto {
                    id: item.id,
                    photo_name: item.photo_name,
                    quantity: item.quantity,
                    price_per_unit: item.price_per_unit,
                })
                .collect(),
        })
    }

    pub async fn list_user_orders(&self, user_id: Uuid) -> UseCaseResult<Vec<OrderDto>> {
        let records = self.order_repo.list_by_user(user_id).await.map_err(|err| {
            error!(%user_id, db_error = ?err, "orders: failed to list user orders");
            OrderError::Internal(err)
        })?;

        Ok(records.into_iter().map(OrderDto::from_user_view).collect())
    }

    pub async fn list_admin_orders(
        &self,
        filter: Option<AdminStatusFilter>,
    ) -> UseCaseResult<Vec<OrderDto>> {
        let records = self
            .order_repo
            .list_for_admin(filter)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "orders: failed to list admin orders");
                OrderError::Internal(err)
            })?;

        Ok(records.into_iter().map(OrderDto::from_admin_view).collect())
    }

    /// Free-form admin status write; the value must still be a known status.
    pub async fn update_status(
        &self,
        order_id: Uuid,
        status: &str,
    ) -> UseCaseResult<OrderDto> {
        let status = OrderStatus::from_str(status)
            .ok_or_else(|| OrderError::Validation("Invalid order status".to_string()))?;

        let order = self
            .order_repo
            .set_status(order_id, status)
            .await
            .map_err(|err| {
                error!(%order_id, db_error = ?err, "orders: failed to update status");
                OrderError::Internal(err)
            })?
            .ok_or(OrderError::NotFound)?;

        info!(%order_id, status = %status, "orders: status updated");

        let items = self
            .order_repo
            .items_for_order(order_id)
            .await
            .map_err(OrderError::Internal)?;

        Ok(OrderDto::from_user_view(OrderWithItems { order, items }))
    }

    /// ACCEPT / REJECT, valid only while the order is still NEW. The guard
    /// is a conditional update so racing admins cannot both win.
    pub async fn admin_action(&self, order_id: Uuid, action: &str) -> UseCaseResult<OrderStatus> {
        let target = match action.to_ascii_uppercase().as_str() {
            "ACCEPT" => OrderStatus::Accepted,
            "REJECT" => OrderStatus::Rejected,
            _ => {
                return Err(OrderError::Validation(
                    "Action must be ACCEPT or REJECT".to_string(),
                ));
            }
        };

        self.order_repo
            .find_by_id(order_id)
            .await
            .map_err(OrderError::Internal)?
            .ok_or(OrderError::NotFound)?;

        let affected = self
            .order_repo
            .transition_status(order_id, &[OrderStatus::New], target)
            .await
            .map_err(|err| {
                error!(%order_id, db_error = ?err, "orders: failed admin action");
                OrderError::Internal(err)
            })?;

        if affected == 0 {
            warn!(%order_id, action, "orders: admin action on already-processed order");
            return Err(OrderError::Conflict(
                "Order has already been processed".to_string(),
            ));
        }

        info!(%order_id, status = %target, "orders: admin action applied");
        Ok(target)
    }

    pub async fn cancel_order(&self, order_id: Uuid, user_id: Uuid) -> UseCaseResult<()> {
        let order = self
            .order_repo
            .find_by_id(order_id)
            .await
            .map_err(OrderError::Internal)?
            .ok_or(OrderError::NotFound)?;

        if order.user_id != user_id {
            return Err(OrderError::Forbidden(
                "You are not authorized to cancel this order".to_string(),
            ));
        }

        let status = OrderStatus::from_str(&order.order_status).unwrap_or_default();
        if !status.user_cancellable() {
            return Err(OrderError::Validation(
                "Order cannot be cancelled".to_string(),
            ));
        }

        let affected = self
            .order_repo
            .transition_status(
                order_id,
                &[OrderStatus::New, OrderStatus::Accepted],
                OrderStatus::Cancelled,
            )
            .await
            .map_err(|err| {
                error!(%order_id, db_error = ?err, "orders: failed to cancel order");
                OrderError::Internal(err)
            })?;

        if affected == 0 {
            return Err(OrderError::Conflict(
                "Order cannot be cancelled".to_string(),
            ));
        }

        info!(%order_id, %user_id, "orders: order cancelled by user");
        Ok(())
    }

    /// Resolves a stored photo for the back office: data-URIs are decoded to
    /// bytes, plain URLs become redirects.
    pub async fn download_photo(
        &self,
        order_id: Uuid,
        photo_id: Uuid,
    ) -> UseCaseResult<PhotoDownload> {
        let item = self
            .order_repo
            .find_item(order_id, photo_id)
            .await
            .map_err(OrderError::Internal)?
            .ok_or(OrderError::PhotoNotFound)?;

        if let Some(rest) = item.photo_url.strip_prefix("data:") {
            let (content_type, data) = rest
                .split_once(";base64,")
                .ok_or_else(|| OrderError::Validation("Invalid photo data".to_string()))?;

            let bytes = BASE64
                .decode(data)
                .map_err(|_| OrderError::Validation("Invalid photo data".to_string()))?;

            return Ok(PhotoDownload::File {
                bytes,
                file_name: download_file_name(&item.photo_name, content_type),
                content_type: content_type.to_string(),
            });
        }

        Ok(PhotoDownload::Redirect(item.photo_url))
    }
}

fn download_file_name(photo_name: &str, content_type: &str) -> String {
    let stem: String = photo_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let extension = match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        other => other.rsplit('/').next().unwrap_or("bin"),
    };
    format!("{}.{}", stem, extension)
}
