use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentModel {
    pub order_id: Option<Uuid>,
    /// Rupee total in paise, as the checkout widget expects it.
    pub amount: Option<i64>,
}

/// The checkout callback keeps Razorpay's own snake_case field names;
/// only `orderId` comes from the storefront.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentModel {
    #[serde(rename = "orderId")]
    pub order_id: Option<Uuid>,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

/// Everything the hosted checkout needs to open.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDto {
    pub razorpay_order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key_id: String,
}
