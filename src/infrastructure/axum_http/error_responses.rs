use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::application::usecases::auth::LoginError;
use crate::application::usecases::dashboard::DashboardError;
use crate::application::usecases::events::EventError;
use crate::application::usecases::orders::OrderError;
use crate::application::usecases::payments::PaymentError;
use crate::config::config_loader;

/// The shared failure wire shape: `{success: false, message, error?}`.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
        .into_response()
}

/// 500 with a generic message; the underlying detail is logged always and
/// echoed in the `error` field only outside production.
fn internal_error(err: anyhow::Error) -> Response {
    error!(internal_error = ?err, "request failed with internal error");

    let mut body = json!({ "success": false, "message": "Internal server error" });
    if !config_loader::get_stage().is_production() {
        body["error"] = json!(format!("{err:#}"));
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

impl IntoResponse for LoginError {
    fn into_response(self) -> Response {
        match self {
            LoginError::Internal(err) => internal_error(err),
            other => error_response(other.status_code(), &other.to_string()),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        match self {
            OrderError::Internal(err) => internal_error(err),
            other => error_response(other.status_code(), &other.to_string()),
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        match self {
            PaymentError::Internal(err) => internal_error(err),
            other => error_response(other.status_code(), &other.to_string()),
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        match self {
            DashboardError::Internal(err) => internal_error(err),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        match self {
            EventError::Internal(err) => internal_error(err),
            other => error_response(other.status_code(), &other.to_string()),
        }
    }
}
