use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;

use crate::application::usecases::payments::{PaymentError, PaymentUseCase, RazorpayGateway};
use crate::auth::AuthUser;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::repositories::payments::PaymentRepository;
use crate::domain::value_objects::payments::{CreatePaymentModel, VerifyPaymentModel};
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::repositories::orders::OrderPostgres;
use crate::infrastructure::postgres::repositories::payments::PaymentPostgres;
use crate::infrastructure::razorpay::razorpay_client::RazorpayClient;

pub fn routes(db_pool: Arc<PgPoolSquad>, gateway: Option<Arc<RazorpayClient>>) -> Router {
    let order_repository = OrderPostgres::new(Arc::clone(&db_pool));
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let payment_usecase = PaymentUseCase::new(
        Arc::new(order_repository),
        Arc::new(payment_repository),
        gateway,
    );

    Router::new()
        .route("/create", post(create_payment))
        .route("/verify", post(verify_payment))
        .with_state(Arc::new(payment_usecase))
}

pub async fn create_payment<O, P, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<O, P, G>>>,
    auth: AuthUser,
    Json(model): Json<CreatePaymentModel>,
) -> Result<Response, PaymentError>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: RazorpayGateway + Send + Sync + 'static,
{
    let checkout = payment_usecase.create_payment(auth.user_id, model).await?;

    Ok(Json(json!({
        "success": true,
        "razorpayOrderId": checkout.razorpay_order_id,
        "amount": checkout.amount,
        "currency": checkout.currency,
        "keyId": checkout.key_id,
    }))
    .into_response())
}

pub async fn verify_payment<O, P, G>(
    State(payment_usecase): State<Arc<PaymentUseCase<O, P, G>>>,
    auth: AuthUser,
    Json(model): Json<VerifyPaymentModel>,
) -> Result<Response, PaymentError>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: RazorpayGateway + Send + Sync + 'static,
{
    payment_usecase.verify_payment(auth.user_id, model).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Payment verified successfully",
    }))
    .into_response())
}
