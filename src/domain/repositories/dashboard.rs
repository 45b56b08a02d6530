use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::value_objects::dashboard::DateWindow;
use crate::domain::value_objects::enums::payment_modes::PaymentMode;

/// Read-only aggregation queries over orders for the admin dashboard.
#[automock]
#[async_trait]
pub trait DashboardRepository {
    async fn count_orders(&self, window: DateWindow) -> Result<i64>;

    /// Orders whose status is not in the terminal set.
    async fn count_open_orders(&self, window: DateWindow) -> Result<i64>;

    async fn count_completed_orders(&self, window: DateWindow) -> Result<i64>;

    /// Sum of totals over COMPLETED orders that are PAID or COD.
    async fn completed_revenue(&self, window: DateWindow) -> Result<f64>;

    /// Sum of item quantities over COMPLETED orders.
    async fn completed_units(&self, window: DateWindow) -> Result<i64>;

    async fn count_completed_by_mode(
        &self,
        window: DateWindow,
        mode: PaymentMode,
    ) -> Result<i64>;

    async fn completed_revenue_by_mode(
        &self,
        window: DateWindow,
        mode: PaymentMode,
    ) -> Result<f64>;

    /// Creation timestamps of every order in the window, for day bucketing.
    async fn order_timestamps(&self, window: DateWindow) -> Result<Vec<DateTime<Utc>>>;

    /// Earliest and latest order creation timestamps over all time.
    async fn order_extent(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>>;

    async fn count_new_orders(&self) -> Result<i64>;
}
