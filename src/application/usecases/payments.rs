use std::sync::Arc;

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::payments::InsertPaymentEntity;
use crate::domain::repositories::orders::OrderRepository;
use crate::domain::repositories::payments::PaymentRepository;
use crate::domain::value_objects::enums::payment_modes::PaymentMode;
use crate::domain::value_objects::enums::payment_statuses::{GatewayPaymentStatus, PaymentStatus};
use crate::domain::value_objects::payments::{CheckoutDto, CreatePaymentModel, VerifyPaymentModel};
use crate::infrastructure::razorpay::razorpay_client::{RazorpayClient, RazorpayOrder};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RazorpayGateway: Send + Sync {
    async fn create_order(&self, amount_paise: i64, receipt: &str) -> AnyResult<RazorpayOrder>;

    fn verify_payment_signature(
        &self,
        razorpay_order_id: &str,
        razorpay_payment_id: &str,
        razorpay_signature: &str,
    ) -> AnyResult<bool>;

    fn key_id(&self) -> String;
}

#[async_trait]
impl RazorpayGateway for RazorpayClient {
    async fn create_order(&self, amount_paise: i64, receipt: &str) -> AnyResult<RazorpayOrder> {
        self.create_order(amount_paise, receipt).await
    }

    fn verify_payment_signature(
        &self,
        razorpay_order_id: &str,
        razorpay_payment_id: &str,
        razorpay_signature: &str,
    ) -> AnyResult<bool> {
        self.verify_payment_signature(razorpay_order_id, razorpay_payment_id, razorpay_signature)
    }

    fn key_id(&self) -> String {
        self.key_id().to_string()
    }
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Online payments are not configured")]
    GatewayUnavailable,
    #[error("Order not found")]
    OrderNotFound,
    #[error("You are not authorized to pay for this order")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("Payment verification failed")]
    VerificationFailed,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PaymentError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            PaymentError::GatewayUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            PaymentError::OrderNotFound => StatusCode::NOT_FOUND,
            PaymentError::Forbidden => StatusCode::FORBIDDEN,
            PaymentError::Validation(_) | PaymentError::VerificationFailed => {
                StatusCode::BAD_REQUEST
            }
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, PaymentError>;

pub struct PaymentUseCase<O, P, G>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: RazorpayGateway + Send + Sync + 'static,
{
    order_repo: Arc<O>,
    payment_repo: Arc<P>,
    gateway: Option<Arc<G>>,
}

impl<O, P, G> PaymentUseCase<O, P, G>
where
    O: OrderRepository + Send + Sync + 'static,
    P: PaymentRepository + Send + Sync + 'static,
    G: RazorpayGateway + Send + Sync + 'static,
{
    pub fn new(order_repo: Arc<O>, payment_repo: Arc<P>, gateway: Option<Arc<G>>) -> Self {
        Self {
            order_repo,
            payment_repo,
            gateway,
        }
    }

    fn gateway(&self) -> UseCaseResult<&Arc<G>> {
        self.gateway
            .as_ref()
            .ok_or(PaymentError::GatewayUnavailable)
    }

    pub async fn create_payment(
        &self,
        user_id: Uuid,
        model: CreatePaymentModel,
    ) -> UseCaseResult<CheckoutDto> {
        let gateway = self.gateway()?;

        let (order_id, amount) = match (model.order_id, model.amount) {
            (Some(order_id), Some(amount)) => (order_id, amount),
            _ => {
                return Err(PaymentError::Validation(
                    "orderId and amount are required".to_string(),
                ));
            }
        };

        let order = self
            .order_repo
            .find_by_id(order_id)
            .await
            .map_err(PaymentError::Internal)?
            .ok_or(PaymentError::OrderNotFound)?;

        if order.user_id != user_id {
            return Err(PaymentError::Forbidden);
        }

        // The widget sends paise; the order stores rupees. Allow 1 paise of
        // float slack.
        let expected_paise = (order.total_amount * 100.0).round() as i64;
        if (amount - expected_paise).abs() > 1 {
            warn!(
                %order_id,
                amount,
                expected_paise,
                "payments: amount mismatch on create"
            );
            return Err(PaymentError::Validation(
                "Payment amount does not match the order total".to_string(),
            ));
        }

        if order.payment_status == PaymentStatus::Paid.as_str() {
            return Err(PaymentError::Validation(
                "Order is already paid".to_string(),
            ));
        }

        let gateway_order = gateway
            .create_order(expected_paise, &order_id.to_string())
            .await
            .map_err(|err| {
                error!(%order_id, gateway_error = ?err, "payments: gateway order creation failed");
                PaymentError::Internal(err)
            })?;

        self.payment_repo
            .create(InsertPaymentEntity {
                order_id,
                razorpay_order_id: gateway_order.id.clone(),
                razorpay_payment_id: None,
                razorpay_signature: None,
                status: GatewayPaymentStatus::Pending.as_str().to_string(),
            })
            .await
            .map_err(|err| {
                error!(%order_id, db_error = ?err, "payments: failed to record payment attempt");
                PaymentError::Internal(err)
            })?;

        info!(
            %order_id,
            razorpay_order_id = %gateway_order.id,
            "payments: gateway order created"
        );

        Ok(CheckoutDto {
            razorpay_order_id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            key_id: gateway.key_id(),
        })
    }

    pub async fn verify_payment(
        &self,
        user_id: Uuid,
        model: VerifyPaymentModel,
    ) -> UseCaseResult<()> {
        let gateway = self.gateway()?;

        let (order_id, razorpay_order_id, razorpay_payment_id, razorpay_signature) = match (
            model.order_id,
            model.razorpay_order_id.as_deref(),
            model.razorpay_payment_id.as_deref(),
            model.razorpay_signature.as_deref(),
        ) {
            (Some(order_id), Some(oid), Some(pid), Some(sig))
                if !oid.is_empty() && !pid.is_empty() && !sig.is_empty() =>
            {
                (order_id, oid, pid, sig)
            }
            _ => {
                return Err(PaymentError::Validation(
                    "Missing payment verification fields".to_string(),
                ));
            }
        };

        let order = self
            .order_repo
            .find_by_id(order_id)
            .await
            .map_err(PaymentError::Internal)?
            .ok_or(PaymentError::OrderNotFound)?;

        if order.user_id != user_id {
            return Err(PaymentError::Forbidden);
        }

        // Replays of an already-settled callback succeed without rewriting
        // anything.
        if order.payment_status == PaymentStatus::Paid.as_str() {
            let settled = self
                .payment_repo
                .find_by_gateway_order(order_id, razorpay_order_id)
                .await
                .map_err(PaymentError::Internal)?;
            if settled
                .map(|payment| payment.status == GatewayPaymentStatus::Success.as_str())
                .unwrap_or(false)
            {
                info!(%order_id, razorpay_order_id, "payments: duplicate verify, already settled");
                return Ok(());
            }
        }

        let valid = gateway
            .verify_payment_signature(razorpay_order_id, razorpay_payment_id, razorpay_signature)
            .map_err(PaymentError::Internal)?;

        if !valid {
            warn!(%order_id, razorpay_order_id, "payments: signature verification failed");
            self.payment_repo
                .mark_failed(order_id, razorpay_order_id)
                .await
                .map_err(PaymentError::Internal)?;
            return Err(PaymentError::VerificationFailed);
        }

        self.payment_repo
            .mark_success(
                order_id,
                razorpay_order_id,
                razorpay_payment_id,
                razorpay_signature,
            )
            .await
            .map_err(PaymentError::Internal)?;

        // Paying a COD order online converts it.
        let new_mode = (order.payment_mode == PaymentMode::Cod.as_str())
            .then_some(PaymentMode::Online);
        self.order_repo
            .mark_paid(order_id, new_mode)
            .await
            .map_err(PaymentError::Internal)?;

        info!(%order_id, razorpay_order_id, "payments: payment verified");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::orders::OrderEntity;
    use crate::domain::entities::payments::PaymentEntity;
    use crate::domain::repositories::orders::MockOrderRepository;
    use crate::domain::repositories::payments::MockPaymentRepository;
    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::json;

    fn order(user_id: Uuid, payment_mode: &str, payment_status: &str) -> OrderEntity {
        OrderEntity {
            id: Uuid::new_v4(),
            user_id,
            customer_name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            address_json: json!({}),
            subtotal: 500.0,
            delivery_charge: 50.0,
            gst: 15.0,
            total_amount: 565.0,
            payment_mode: payment_mode.to_string(),
            payment_status: payment_status.to_string(),
            order_status: "NEW".to_string(),
            order_type: "MAGNET".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn usecase(
        order_repo: MockOrderRepository,
        payment_repo: MockPaymentRepository,
        gateway: Option<MockRazorpayGateway>,
    ) -> PaymentUseCase<MockOrderRepository, MockPaymentRepository, MockRazorpayGateway> {
        PaymentUseCase::new(
            Arc::new(order_repo),
            Arc::new(payment_repo),
            gateway.map(Arc::new),
        )
    }

    fn verify_model(order_id: Uuid) -> VerifyPaymentModel {
        VerifyPaymentModel {
            order_id: Some(order_id),
            razorpay_order_id: Some("order_abc".to_string()),
            razorpay_payment_id: Some("pay_xyz".to_string()),
            razorpay_signature: Some("deadbeef".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_payment_unconfigured_gateway() {
        let usecase = usecase(
            MockOrderRepository::new(),
            MockPaymentRepository::new(),
            None,
        );
        let err = usecase
            .create_payment(
                Uuid::new_v4(),
                CreatePaymentModel {
                    order_id: Some(Uuid::new_v4()),
                    amount: Some(56500),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::GatewayUnavailable));
        assert_eq!(err.status_code(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_create_payment_amount_mismatch() {
        let user_id = Uuid::new_v4();
        let order = order(user_id, "ONLINE", "PENDING");
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .with(eq(order_id))
            .returning(move |_| Ok(Some(order.clone())));

        let usecase = usecase(
            order_repo,
            MockPaymentRepository::new(),
            Some(MockRazorpayGateway::new()),
        );
        let err = usecase
            .create_payment(
                user_id,
                CreatePaymentModel {
                    order_id: Some(order_id),
                    amount: Some(10_000),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_payment_happy_path() {
        let user_id = Uuid::new_v4();
        let order = order(user_id, "ONLINE", "PENDING");
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));

        let mut gateway = MockRazorpayGateway::new();
        gateway
            .expect_create_order()
            .withf(move |amount, receipt| *amount == 56500 && *receipt == order_id.to_string())
            .returning(|amount, receipt| {
                Ok(RazorpayOrder {
                    id: "order_abc".to_string(),
                    amount,
                    currency: "INR".to_string(),
                    receipt: Some(receipt.to_string()),
                    status: Some("created".to_string()),
                })
            });
        gateway
            .expect_key_id()
            .returning(|| "rzp_test_key".to_string());

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_create()
            .withf(move |payment| {
                payment.order_id == order_id
                    && payment.razorpay_order_id == "order_abc"
                    && payment.status == "PENDING"
            })
            .returning(|_| Ok(Uuid::new_v4()));

        let usecase = usecase(order_repo, payment_repo, Some(gateway));
        let checkout = usecase
            .create_payment(
                user_id,
                CreatePaymentModel {
                    order_id: Some(order_id),
                    amount: Some(56500),
                },
            )
            .await
            .unwrap();

        assert_eq!(checkout.razorpay_order_id, "order_abc");
        assert_eq!(checkout.amount, 56500);
        assert_eq!(checkout.key_id, "rzp_test_key");
    }

    #[tokio::test]
    async fn test_verify_tampered_signature_fails_payment_not_order() {
        let user_id = Uuid::new_v4();
        let order = order(user_id, "ONLINE", "PENDING");
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        // mark_paid must never run on a bad signature; no expectation set.

        let mut gateway = MockRazorpayGateway::new();
        gateway
            .expect_verify_payment_signature()
            .returning(|_, _, _| Ok(false));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_mark_failed()
            .with(eq(order_id), eq("order_abc"))
            .times(1)
            .returning(|_, _| Ok(1));

        let usecase = usecase(order_repo, payment_repo, Some(gateway));
        let err = usecase
            .verify_payment(user_id, verify_model(order_id))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::VerificationFailed));
    }

    #[tokio::test]
    async fn test_verify_duplicate_of_settled_order_is_noop() {
        let user_id = Uuid::new_v4();
        let order = order(user_id, "ONLINE", "PAID");
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_find_by_gateway_order()
            .returning(move |order_id, razorpay_order_id| {
                Ok(Some(PaymentEntity {
                    id: Uuid::new_v4(),
                    order_id,
                    razorpay_order_id: razorpay_order_id.to_string(),
                    razorpay_payment_id: Some("pay_xyz".to_string()),
                    razorpay_signature: Some("deadbeef".to_string()),
                    status: "SUCCESS".to_string(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            });

        // No gateway expectations: the short-circuit must not re-verify.
        let usecase = usecase(order_repo, payment_repo, Some(MockRazorpayGateway::new()));
        usecase
            .verify_payment(user_id, verify_model(order_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_success_promotes_cod_to_online() {
        let user_id = Uuid::new_v4();
        let order = order(user_id, "COD", "PENDING");
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));
        order_repo
            .expect_mark_paid()
            .with(eq(order_id), eq(Some(PaymentMode::Online)))
            .times(1)
            .returning(|_, _| Ok(1));

        let mut gateway = MockRazorpayGateway::new();
        gateway
            .expect_verify_payment_signature()
            .with(eq("order_abc"), eq("pay_xyz"), eq("deadbeef"))
            .returning(|_, _, _| Ok(true));

        let mut payment_repo = MockPaymentRepository::new();
        payment_repo
            .expect_mark_success()
            .times(1)
            .returning(|_, _, _, _| Ok(1));

        let usecase = usecase(order_repo, payment_repo, Some(gateway));
        usecase
            .verify_payment(user_id, verify_model(order_id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_verify_foreign_order_forbidden() {
        let order = order(Uuid::new_v4(), "ONLINE", "PENDING");
        let order_id = order.id;

        let mut order_repo = MockOrderRepository::new();
        order_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(order.clone())));

        let usecase = usecase(
            order_repo,
            MockPaymentRepository::new(),
            Some(MockRazorpayGateway::new()),
        );
        let err = usecase
            .verify_payment(Uuid::new_v4(), verify_model(order_id))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::Forbidden));
    }
}
