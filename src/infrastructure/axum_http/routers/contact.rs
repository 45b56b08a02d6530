use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::infrastructure::axum_http::error_responses::error_response;

pub fn routes() -> Router {
    Router::new().route("/", post(submit))
}

#[derive(Debug, Deserialize)]
pub struct ContactModel {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Nothing is persisted; the submission is logged for the back office.
pub async fn submit(Json(model): Json<ContactModel>) -> Response {
    let required = [
        model.name.as_deref(),
        model.email.as_deref(),
        model.message.as_deref(),
    ];
    if required.iter().any(|f| f.map_or(true, |v| v.trim().is_empty())) {
        return error_response(StatusCode::BAD_REQUEST, "All fields are required");
    }

    let email = model.email.as_deref().unwrap_or_default().trim();
    if !email.contains('@') || !email.contains('.') {
        return error_response(StatusCode::BAD_REQUEST, "A valid email is required");
    }

    info!(
        name = model.name.as_deref().unwrap_or_default(),
        email,
        "contact: message received"
    );

    Json(json!({
        "success": true,
        "message": "Message received successfully",
    }))
    .into_response()
}
