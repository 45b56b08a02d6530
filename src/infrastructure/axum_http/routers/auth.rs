use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;

use crate::application::usecases::auth::{AuthUseCase, LoginError, VerifyOtpOutcome};
use crate::config::config_model::DotEnvyConfig;
use crate::domain::repositories::users::UserRepository;
use crate::domain::value_objects::iam::{AdminLoginModel, SendOtpModel, VerifyOtpModel};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::users::UserPostgres;
use crate::otp::{InMemoryOtpCache, OtpCache, OtpStore};

pub fn routes(
    db_pool: Arc<PgPoolSquad>,
    config: &DotEnvyConfig,
    otp_store: Arc<OtpStore<InMemoryOtpCache>>,
) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let auth_usecase = AuthUseCase::new(
        Arc::new(user_repository),
        otp_store,
        config.jwt.secret.clone(),
        config.admin.clone(),
        config.stage,
    );

    Router::new()
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/admin-login", post(admin_login))
        .with_state(Arc::new(auth_usecase))
}

pub async fn send_otp<U, C>(
    State(auth_usecase): State<Arc<AuthUseCase<U, C>>>,
    Json(model): Json<SendOtpModel>,
) -> Result<Response, LoginError>
where
    U: UserRepository + Send + Sync + 'static,
    C: OtpCache + 'static,
{
    let sent = auth_usecase.send_otp(model).await?;

    let mut body = json!({ "success": true, "message": sent.message });
    if let Some(otp) = sent.otp {
        body["otp"] = json!(otp);
    }
    Ok(Json(body).into_response())
}

pub async fn verify_otp<U, C>(
    State(auth_usecase): State<Arc<AuthUseCase<U, C>>>,
    Json(model): Json<VerifyOtpModel>,
) -> Result<Response, LoginError>
where
    U: UserRepository + Send + Sync + 'static,
    C: OtpCache + 'static,
{
    let response = match auth_usecase.verify_otp(model).await? {
        VerifyOtpOutcome::RequiresName => Json(json!({
            "success": false,
            "requiresName": true,
            "message": "Name is required for new users",
        })),
        VerifyOtpOutcome::LoggedIn { token, user } => Json(json!({
            "success": true,
            "token": token,
            "user": user,
        })),
    };
    Ok(response.into_response())
}

pub async fn admin_login<U, C>(
    State(auth_usecase): State<Arc<AuthUseCase<U, C>>>,
    Json(model): Json<AdminLoginModel>,
) -> Result<Response, LoginError>
where
    U: UserRepository + Send + Sync + 'static,
    C: OtpCache + 'static,
{
    let username = model.username.clone().unwrap_or_default();
    let token = auth_usecase.admin_login(model).await?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "admin": { "username": username },
    }))
    .into_response())
}
