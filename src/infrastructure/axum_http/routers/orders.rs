use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Redirect, Response},
    routing::{get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::application::usecases::orders::{OrderError, OrderUseCase, PhotoDownload};
use crate::auth::{AuthAdmin, AuthUser};
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::value_objects::orders::{AdminStatusFilter, CreateOrderModel};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::orders::OrderPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let order_usecase = OrderUseCase::new(Arc::new(order_repository));

    Router::new()
        .route("/create", post(create_order))
        .route("/user", get(list_user_orders))
        .route("/admin", get(list_admin_orders))
        .route("/:id/status", patch(update_status))
        .route("/:id/admin-action", patch(admin_action))
        .route("/:id/cancel", patch(cancel_order))
        .route("/:order_id/photos/:photo_id/download", get(download_photo))
        .with_state(Arc::new(order_usecase))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    pub order_status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminActionBody {
    pub action: Option<String>,
}

pub async fn create_order<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    auth: AuthUser,
    Json(model): Json<CreateOrderModel>,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    let order = order_usecase.create_order(auth.user_id, model).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order created successfully",
        "order": order,
    }))
    .into_response())
}

pub async fn list_user_orders<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    auth: AuthUser,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    let orders = order_usecase.list_user_orders(auth.user_id).await?;
    Ok(Json(json!({ "success": true, "orders": orders })).into_response())
}

pub async fn list_admin_orders<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    _auth: AuthAdmin,
    Query(query): Query<StatusQuery>,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    // Unknown filter values fall back to the unfiltered listing.
    let filter = query.status.as_deref().and_then(AdminStatusFilter::from_query);
    let orders = order_usecase.list_admin_orders(filter).await?;
    Ok(Json(json!({ "success": true, "orders": orders })).into_response())
}

pub async fn update_status<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    _auth: AuthAdmin,
    Path(order_id): Path<Uuid>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    let status = body
        .order_status
        .ok_or_else(|| OrderError::Validation("orderStatus is required".to_string()))?;
    let order = order_usecase.update_status(order_id, &status).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order status updated",
        "order": order,
    }))
    .into_response())
}

pub async fn admin_action<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    _auth: AuthAdmin,
    Path(order_id): Path<Uuid>,
    Json(body): Json<AdminActionBody>,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    let action = body
        .action
        .ok_or_else(|| OrderError::Validation("Action must be ACCEPT or REJECT".to_string()))?;
    let status = order_usecase.admin_action(order_id, &action).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Order updated",
        "status": status,
    }))
    .into_response())
}

pub async fn cancel_order<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    auth: AuthUser,
    Path(order_id): Path<Uuid>,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    order_usecase.cancel_order(order_id, auth.user_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Order cancelled successfully",
    }))
    .into_response())
}

pub async fn download_photo<O>(
    State(order_usecase): State<Arc<OrderUseCase<O>>>,
    _auth: AuthAdmin,
    Path((order_id, photo_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, OrderError>
where
    O: OrderRepository + Send + Sync + 'static,
{
    let response = match order_usecase.download_photo(order_id, photo_id).await? {
        PhotoDownload::File {
            bytes,
            content_type,
            file_name,
        } => (
            [
                (CONTENT_TYPE, content_type),
                (
                    CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", file_name),
                ),
            ],
            bytes,
        )
            .into_response(),
        PhotoDownload::Redirect(url) => Redirect::temporary(&url).into_response(),
    };
    Ok(response)
}
