use serde::{Deserialize, Serialize};

pub const UNIT_PRICE: f64 = 100.0;
pub const DELIVERY_CHARGE: f64 = 50.0;
pub const GST_RATE: f64 = 0.03;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub gst: f64,
    pub total_amount: f64,
}

/// Quote for a whole order, priced by total unit quantity. Amounts are
/// rounded to 2 decimal places; the total is fixed here and never
/// recomputed afterwards.
pub fn quote(total_quantity: u32) -> Pricing {
    let subtotal = total_quantity as f64 * UNIT_PRICE;
    let gst = subtotal * GST_RATE;
    let total_amount = subtotal + DELIVERY_CHARGE + gst;

    Pricing {
        subtotal: round2(subtotal),
        delivery_charge: DELIVERY_CHARGE,
        gst: round2(gst),
        total_amount: round2(total_amount),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
