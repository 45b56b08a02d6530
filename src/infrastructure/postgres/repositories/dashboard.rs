use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{max, min, sum};
use diesel::pg::Pg;
use diesel::prelude::*;

use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::value_objects::dashboard::DateWindow;
use crate::domain::value_objects::enums::order_statuses::OrderStatus;
use crate::domain::value_objects::enums::payment_modes::PaymentMode;
use crate::domain::value_objects::enums::payment_statuses::PaymentStatus;
use crate::infrastructure::postgres::postgres_connection::PgPoolSquad;
use crate::infrastructure::postgres::schema::{order_items, orders};

pub struct DashboardPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl DashboardPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }

    fn windowed(window: DateWindow) -> orders::BoxedQuery<'static, Pg> {
        let mut query = orders::table.into_boxed();
        if let Some(start) = window.start {
            query = query.filter(orders::created_at.ge(start));
        }
        if let Some(end) = window.end_exclusive {
            query = query.filter(orders::created_at.lt(end));
        }
        query
    }

    /// COMPLETED orders whose money actually arrived: gateway-paid, or COD
    /// where completion implies collection.
    fn completed_paid(window: DateWindow) -> orders::BoxedQuery<'static, Pg> {
        Self::windowed(window)
            .filter(orders::order_status.eq(OrderStatus::Completed.as_str()))
            .filter(
                orders::payment_status
                    .eq(PaymentStatus::Paid.as_str())
                    .or(orders::payment_mode.eq(PaymentMode::Cod.as_str())),
            )
    }
}

#[async_trait]
impl DashboardRepository for DashboardPostgres {
    async fn count_orders(&self, window: DateWindow) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = Self::windowed(window).count().get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_open_orders(&self, window: DateWindow) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let terminal = OrderStatus::TERMINAL
            .iter()
            .map(|status| status.as_str())
            .collect::<Vec<_>>();

        let count = Self::windowed(window)
            .filter(orders::order_status.ne_all(terminal))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn count_completed_orders(&self, window: DateWindow) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = Self::windowed(window)
            .filter(orders::order_status.eq(OrderStatus::Completed.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn completed_revenue(&self, window: DateWindow) -> Result<f64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let revenue = Self::completed_paid(window)
            .select(sum(orders::total_amount))
            .get_result::<Option<f64>>(&mut conn)?;

        Ok(revenue.unwrap_or(0.0))
    }

    async fn completed_units(&self, window: DateWindow) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = order_items::table
            .inner_join(orders::table)
            .filter(orders::order_status.eq(OrderStatus::Completed.as_str()))
            .into_boxed();
        if let Some(start) = window.start {
            query = query.filter(orders::created_at.ge(start));
        }
        if let Some(end) = window.end_exclusive {
            query = query.filter(orders::created_at.lt(end));
        }

        let units = query
            .select(sum(order_items::quantity))
            .get_result::<Option<i64>>(&mut conn)?;

        Ok(units.unwrap_or(0))
    }

    async fn count_completed_by_mode(
        &self,
        window: DateWindow,
        mode: PaymentMode,
    ) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = Self::windowed(window)
            .filter(orders::order_status.eq(OrderStatus::Completed.as_str()))
            .filter(orders::payment_mode.eq(mode.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }

    async fn completed_revenue_by_mode(
        &self,
        window: DateWindow,
        mode: PaymentMode,
    ) -> Result<f64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let revenue = Self::completed_paid(window)
            .filter(orders::payment_mode.eq(mode.as_str()))
            .select(sum(orders::total_amount))
            .get_result::<Option<f64>>(&mut conn)?;

        Ok(revenue.unwrap_or(0.0))
    }

    async fn order_timestamps(&self, window: DateWindow) -> Result<Vec<DateTime<Utc>>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let timestamps = Self::windowed(window)
            .select(orders::created_at)
            .order(orders::created_at.asc())
            .load::<DateTime<Utc>>(&mut conn)?;

        Ok(timestamps)
    }

    async fn order_extent(&self) -> Result<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let extent = orders::table
            .select((min(orders::created_at), max(orders::created_at)))
            .get_result::<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)>(&mut conn)?;

        Ok(match extent {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        })
    }

    async fn count_new_orders(&self) -> Result<i64> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let count = orders::table
            .filter(orders::order_status.eq(OrderStatus::New.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count)
    }
}
