use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::application::usecases::dashboard::{DashboardError, DashboardUseCase};
use crate::application::usecases::events::{EventError, EventUseCase};
use crate::auth::AuthAdmin;
use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::repositories::event_bookings::EventBookingRepository;
use crate::domain::value_objects::dashboard::DashboardQuery;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::dashboard::DashboardPostgres;
use crate::infrastructure::postgres::repositories::event_bookings::EventBookingPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let dashboard_usecase =
        DashboardUseCase::new(Arc::new(DashboardPostgres::new(Arc::clone(&db_pool))));
    let event_usecase = EventUseCase::new(
        Arc::new(EventBookingPostgres::new(Arc::clone(&db_pool))),
        Arc::new(DashboardPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/dashboard", get(dashboard))
        .with_state(Arc::new(dashboard_usecase))
        .merge(
            Router::new()
                .route("/notifications", get(notifications))
                .route("/events", get(list_events))
                .route("/events/:id/status", patch(update_event_status))
                .with_state(Arc::new(event_usecase)),
        )
}

pub async fn dashboard<D>(
    State(dashboard_usecase): State<Arc<DashboardUseCase<D>>>,
    _auth: AuthAdmin,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, DashboardError>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    let report = dashboard_usecase.report(query).await?;

    Ok(Json(json!({
        "success": true,
        "stats": report.stats,
        "dayWiseData": report.day_wise_data,
    }))
    .into_response())
}

pub async fn notifications<E, D>(
    State(event_usecase): State<Arc<EventUseCase<E, D>>>,
    _auth: AuthAdmin,
) -> Result<Response, EventError>
where
    E: EventBookingRepository + Send + Sync + 'static,
    D: DashboardRepository + Send + Sync + 'static,
{
    let notifications = event_usecase.notifications().await?;
    Ok(Json(json!({ "success": true, "notifications": notifications })).into_response())
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingStatusBody {
    pub status: Option<String>,
}

pub async fn list_events<E, D>(
    State(event_usecase): State<Arc<EventUseCase<E, D>>>,
    _auth: AuthAdmin,
    Query(query): Query<BookingStatusQuery>,
) -> Result<Response, EventError>
where
    E: EventBookingRepository + Send + Sync + 'static,
    D: DashboardRepository + Send + Sync + 'static,
{
    let bookings = event_usecase.list(query.status).await?;
    Ok(Json(json!({ "success": true, "bookings": bookings })).into_response())
}

pub async fn update_event_status<E, D>(
    State(event_usecase): State<Arc<EventUseCase<E, D>>>,
    _auth: AuthAdmin,
    Path(booking_id): Path<Uuid>,
    Json(body): Json<BookingStatusBody>,
) -> Result<Response, EventError>
where
    E: EventBookingRepository + Send + Sync + 'static,
    D: DashboardRepository + Send + Sync + 'static,
{
    let status = body.status.ok_or_else(|| {
        EventError::Validation("Status must be CONFIRMED or CANCELLED".to_string())
    })?;
    let status = event_usecase.update_status(booking_id, &status).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Booking status updated",
        "status": status,
    }))
    .into_response())
}
