use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;

use crate::application::usecases::events::{EventError, EventUseCase};
use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::repositories::event_bookings::EventBookingRepository;
use crate::domain::value_objects::events::BookEventModel;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::dashboard::DashboardPostgres;
use crate::infrastructure::postgres::repositories::event_bookings::EventBookingPostgres;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let event_usecase = EventUseCase::new(
        Arc::new(EventBookingPostgres::new(Arc::clone(&db_pool))),
        Arc::new(DashboardPostgres::new(Arc::clone(&db_pool))),
    );

    Router::new()
        .route("/book", post(book_event))
        .with_state(Arc::new(event_usecase))
}

pub async fn book_event<E, D>(
    State(event_usecase): State<Arc<EventUseCase<E, D>>>,
    Json(model): Json<BookEventModel>,
) -> Result<Response, EventError>
where
    E: EventBookingRepository + Send + Sync + 'static,
    D: DashboardRepository + Send + Sync + 'static,
{
    let booking = event_usecase.book(model).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Event booking received",
        "booking": booking,
    }))
    .into_response())
}
