use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::order_items::OrderItemEntity;
use crate::domain::entities::orders::OrderEntity;
use crate::domain::entities::users::UserEntity;
use crate::domain::value_objects::enums::order_types::{ItemType, OrderType};
use crate::domain::value_objects::enums::payment_modes::PaymentMode;
use crate::domain::value_objects::pricing::UNIT_PRICE;

const ADDRESS_REQUIRED_FIELDS: [&str; 8] = [
    "fullName", "phone", "houseNo", "village", "city", "district", "state", "pincode",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderModel {
    #[serde(default)]
    pub photos: Vec<PhotoItemModel>,
    pub address: Option<Value>,
    pub payment_mode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoItemModel {
    pub photo_name: Option<String>,
    pub photo_url: Option<String>,
    pub quantity: Option<i32>,
    pub order_type: Option<String>,
    pub polaroid_type: Option<String>,
    pub caption: Option<String>,
}

/// An order item after validation, with the unit price stamped and
/// polaroid-only fields cleared for magnets.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub photo_name: String,
    pub photo_url: String,
    pub quantity: i32,
    pub price_per_unit: f64,
    pub order_type: ItemType,
    pub polaroid_type: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ValidatedOrder {
    pub items: Vec<NormalizedItem>,
    pub total_quantity: u32,
    pub order_type: OrderType,
    pub address: Value,
    pub customer_name: String,
    pub phone: String,
    pub payment_mode: PaymentMode,
}

/// Runs the full creation rule chain in order; the first failing rule wins
/// and its message names the offending field.
pub fn validate_order(request: &CreateOrderModel) -> Result<ValidatedOrder, String> {
    if request.photos.is_empty() {
        return Err("At least one photo is required".to_string());
    }

    let mut items = Vec::with_capacity(request.photos.len());
    let mut total_quantity: u32 = 0;

    for photo in &request.photos {
        let photo_name = non_empty(photo.photo_name.as_deref());
        let photo_url = non_empty(photo.photo_url.as_deref());
        let (Some(photo_name), Some(photo_url), Some(quantity)) =
            (photo_name, photo_url, photo.quantity)
        else {
            return Err("Each photo must have photoName, photoUrl, and quantity".to_string());
        };

        if !(1..=100).contains(&quantity) {
            return Err("Quantity for each photo must be between 1 and 100".to_string());
        }

        let order_type = photo
            .order_type
            .as_deref()
            .and_then(ItemType::from_str)
            .ok_or_else(|| {
                "Each photo must have a valid orderType (MAGNET or POLAROID)".to_string()
            })?;

        if order_type == ItemType::Polaroid
            && non_empty(photo.polaroid_type.as_deref()).is_none()
        {
            return Err("Polaroid type is required for Polaroid orders".to_string());
        }

        total_quantity += quantity as u32;

        items.push(NormalizedItem {
            photo_name: photo_name.to_string(),
            photo_url: photo_url.to_string(),
            quantity,
            price_per_unit: UNIT_PRICE,
            order_type,
            polaroid_type: match order_type {
                ItemType::Polaroid => photo.polaroid_type.clone(),
                ItemType::Magnet => None,
            },
            caption: match order_type {
                ItemType::Polaroid => photo.caption.clone(),
                ItemType::Magnet => None,
            },
        });
    }

    let address = request
        .address
        .clone()
        .unwrap_or(Value::Null);
    for field in ADDRESS_REQUIRED_FIELDS {
        if address_field(&address, field).is_none() {
            return Err(format!("Missing required field: {}", field));
        }
    }

    let phone = address_field(&address, "phone").unwrap_or_default();
    if !all_digits(&phone, 10) {
        return Err("Phone number must be exactly 10 digits".to_string());
    }

    let pincode = address_field(&address, "pincode").unwrap_or_default();
    if !all_digits(&pincode, 6) {
        return Err("Pincode must be exactly 6 digits".to_string());
    }

    let payment_mode = request
        .payment_mode
        .as_deref()
        .and_then(PaymentMode::from_str)
        .ok_or_else(|| "Payment mode must be COD or ONLINE".to_string())?;

    let customer_name = address_field(&address, "fullName").unwrap_or_default();
    let order_type = OrderType::derive(
        &items.iter().map(|item| item.order_type).collect::<Vec<_>>(),
    );

    Ok(ValidatedOrder {
        items,
        total_quantity,
        order_type,
        address,
        customer_name,
        phone,
        payment_mode,
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn address_field(address: &Value, field: &str) -> Option<String> {
    address
        .get(field)
        .and_then(Value::as_str)
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.to_string())
}

pub fn all_digits(value: &str, expected_len: usize) -> bool {
    value.len() == expected_len && value.chars().all(|c| c.is_ascii_digit())
}

/// Which slice of orders the back office is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminStatusFilter {
    New,
    Completed,
    Rejected,
    Cancelled,
}

impl AdminStatusFilter {
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "new" => Some(AdminStatusFilter::New),
            "completed" => Some(AdminStatusFilter::Completed),
            "rejected" => Some(AdminStatusFilter::Rejected),
            "cancelled" => Some(AdminStatusFilter::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderWithItems {
    pub order: OrderEntity,
    pub items: Vec<OrderItemEntity>,
}

#[derive(Debug, Clone)]
pub struct AdminOrderRecord {
    pub order: OrderEntity,
    pub items: Vec<OrderItemEntity>,
    pub user: UserEntity,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemSummaryDto {
    pub id: Uuid,
    pub photo_name: String,
    pub quantity: i32,
    pub price_per_unit: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrderDto {
    pub id: Uuid,
    pub order_id: Uuid,
    pub total_quantity: u32,
    pub total_amount: f64,
    pub payment_mode: String,
    pub payment_status: String,
    pub order_status: String,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItemSummaryDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: Uuid,
    pub photo_name: String,
    pub photo_url: String,
    pub quantity: i32,
    pub price_per_unit: f64,
    pub order_type: String,
    pub polaroid_type: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummaryDto>,
    pub order_items: Vec<OrderItemDto>,
    pub total_quantity: i64,
    pub magnet_count: i64,
    pub polaroid_count: i64,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub gst: f64,
    pub total_amount: f64,
    pub payment_mode: String,
    pub payment_status: String,
    pub order_status: String,
    pub order_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderDto {
    pub fn from_user_view(record: OrderWithItems) -> Self {
        Self::build(record.order, record.items, None)
    }

    pub fn from_admin_view(record: AdminOrderRecord) -> Self {
        let user = UserSummaryDto {
            id: record.user.id,
            name: record.user.name,
            phone: record.user.phone,
        };
        Self::build(record.order, record.items, Some(user))
    }

    fn build(order: OrderEntity, items: Vec<OrderItemEntity>, user: Option<UserSummaryDto>) -> Self {
        let total_quantity: i64 = items.iter().map(|item| item.quantity as i64).sum();
        let polaroid_count: i64 = items
            .iter()
            .filter(|item| item.order_type == ItemType::Polaroid.as_str())
            .map(|item| item.quantity as i64)
            .sum();
        let magnet_count = total_quantity - polaroid_count;

        let (user_id, address) = match user {
            Some(_) => (Some(order.user_id), Some(order.address_json.clone())),
            None => (None, None),
        };

        Self {
            id: order.id,
            user_id,
            customer_name: order.customer_name,
            phone: order.phone,
            address,
            user,
            order_items: items
                .into_iter()
                .map(|item| OrderItemDto {
                    id: item.id,
                    photo_name: item.photo_name,
                    photo_url: item.photo_url,
                    quantity: item.quantity,
                    price_per_unit: item.price_per_unit,
                    order_type: item.order_type,
                    polaroid_type: item.polaroid_type,
                    caption: item.caption,
                })
                .collect(),
            total_quantity,
            magnet_count,
            polaroid_count,
            subtotal: order.subtotal,
            delivery_charge: order.delivery_charge,
            gst: order.gst,
            total_amount: order.total_amount,
            payment_mode: order.payment_mode,
            payment_status: order.payment_status,
            order_status: order.order_status,
            order_type: order.order_type,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn magnet(quantity: i32) -> PhotoItemModel {
        PhotoItemModel {
            photo_name: Some("beach.jpg".to_string()),
            photo_url: Some("data:image/jpeg;base64,AAAA".to_string()),
            quantity: Some(quantity),
            order_type: Some("MAGNET".to_string()),
            polaroid_type: None,
            caption: None,
        }
    }

    fn address() -> Value {
        json!({
            "fullName": "Asha Rao",
            "phone": "9876543210",
            "houseNo": "12-B",
            "village": "Kotturu",
            "city": "Visakhapatnam",
            "district": "Visakhapatnam",
            "state": "Andhra Pradesh",
            "pincode": "530001"
        })
    }

    fn request(photos: Vec<PhotoItemModel>) -> CreateOrderModel {
        CreateOrderModel {
            photos,
            address: Some(address()),
            payment_mode: Some("COD".to_string()),
        }
    }

    #[test]
    fn test_empty_photos_rejected() {
        let err = validate_order(&request(vec![])).unwrap_err();
        assert_eq!(err, "At least one photo is required");
    }

    #[test]
    fn test_missing_order_type_rejected() {
        let mut photo = magnet(2);
        photo.order_type = None;
        let err = validate_order(&request(vec![photo])).unwrap_err();
        assert_eq!(
            err,
            "Each photo must have a valid orderType (MAGNET or POLAROID)"
        );
    }

    #[test]
    fn test_polaroid_requires_polaroid_type() {
        let mut photo = magnet(1);
        photo.order_type = Some("POLAROID".to_string());
        let err = validate_order(&request(vec![photo])).unwrap_err();
        assert_eq!(err, "Polaroid type is required for Polaroid orders");
    }

    #[test]
    fn test_quantity_bounds() {
        let err = validate_order(&request(vec![magnet(101)])).unwrap_err();
        assert_eq!(err, "Quantity for each photo must be between 1 and 100");
    }

    #[test]
    fn test_missing_address_field_named() {
        let mut req = request(vec![magnet(1)]);
        let mut addr = address();
        addr.as_object_mut().unwrap().remove("pincode");
        req.address = Some(addr);
        let err = validate_order(&req).unwrap_err();
        assert_eq!(err, "Missing required field: pincode");
    }

    #[test]
    fn test_bad_phone_and_pincode_format() {
        let mut req = request(vec![magnet(1)]);
        req.address.as_mut().unwrap()["phone"] = json!("98765");
        assert_eq!(
            validate_order(&req).unwrap_err(),
            "Phone number must be exactly 10 digits"
        );

        let mut req = request(vec![magnet(1)]);
        req.address.as_mut().unwrap()["pincode"] = json!("5300");
        assert_eq!(
            validate_order(&req).unwrap_err(),
            "Pincode must be exactly 6 digits"
        );
    }

    #[test]
    fn test_invalid_payment_mode() {
        let mut req = request(vec![magnet(1)]);
        req.payment_mode = Some("UPI".to_string());
        assert_eq!(
            validate_order(&req).unwrap_err(),
            "Payment mode must be COD or ONLINE"
        );
    }

    #[test]
    fn test_valid_order_normalizes_items() {
        let mut polaroid = magnet(3);
        polaroid.order_type = Some("POLAROID".to_string());
        polaroid.polaroid_type = Some("CLASSIC".to_string());
        polaroid.caption = Some("summer".to_string());

        let validated = validate_order(&request(vec![magnet(2), polaroid])).unwrap();
        assert_eq!(validated.total_quantity, 5);
        assert_eq!(validated.order_type, OrderType::Mixed);
        assert_eq!(validated.customer_name, "Asha Rao");
        assert_eq!(validated.payment_mode, PaymentMode::Cod);
        assert_eq!(validated.items[0].price_per_unit, UNIT_PRICE);
        assert_eq!(validated.items[0].polaroid_type, None);
        assert_eq!(validated.items[1].caption.as_deref(), Some("summer"));
    }

    #[test]
    fn test_magnet_caption_is_cleared() {
        let mut photo = magnet(1);
        photo.caption = Some("ignored".to_string());
        let validated = validate_order(&request(vec![photo])).unwrap();
        assert_eq!(validated.items[0].caption, None);
    }
}
