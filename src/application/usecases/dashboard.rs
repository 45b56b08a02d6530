use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::value_objects::dashboard::{
    DashboardQuery, DashboardRange, DashboardStats, DayWiseEntry, local_day,
};
use crate::domain::value_objects::enums::payment_modes::PaymentMode;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub type UseCaseResult<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReportDto {
    pub stats: DashboardStats,
    pub day_wise_data: Vec<DayWiseEntry>,
}

pub struct DashboardUseCase<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    dashboard_repo: Arc<D>,
}

impl<D> DashboardUseCase<D>
where
    D: DashboardRepository + Send + Sync + 'static,
{
    pub fn new(dashboard_repo: Arc<D>) -> Self {
        Self { dashboard_repo }
    }

    pub async fn report(&self, query: DashboardQuery) -> UseCaseResult<DashboardReportDto> {
        let range = DashboardRange::resolve(
            query.range.as_deref(),
            query.start_date.as_deref(),
            query.end_date.as_deref(),
        );
        let today = Local::now().date_naive();
        let window = range.window(today);

        info!(?range, "dashboard: building report");

        let repo = &self.dashboard_repo;
        let total_orders = repo.count_orders(window).await.map_err(log_db)?;
        let new_orders = repo.count_open_orders(window).await.map_err(log_db)?;
        let completed_orders = repo.count_completed_orders(window).await.map_err(log_db)?;
        let total_revenue = repo.completed_revenue(window).await.map_err(log_db)?;
        let total_magnets = repo.completed_units(window).await.map_err(log_db)?;
        let cod_orders_count = repo
            .count_completed_by_mode(window, PaymentMode::Cod)
            .await
            .map_err(log_db)?;
        let online_orders_count = repo
            .count_completed_by_mode(window, PaymentMode::Online)
            .await
            .map_err(log_db)?;
        let cod_revenue = repo
            .completed_revenue_by_mode(window, PaymentMode::Cod)
            .await
            .map_err(log_db)?;
        let online_revenue = repo
            .completed_revenue_by_mode(window, PaymentMode::Online)
            .await
            .map_err(log_db)?;

        let timestamps = repo.order_timestamps(window).await.map_err(log_db)?;
        let full_extent = match range {
            DashboardRange::Full => repo
                .order_extent()
                .await
                .map_err(log_db)?
                .map(|(first, last)| (local_day(first), local_day(last))),
            _ => None,
        };

        let day_wise_data = range
            .day_buckets(today, full_extent)
            .into_iter()
            .map(|bucket| DayWiseEntry {
                count: timestamps
                    .iter()
                    .filter(|at| local_day(**at) == bucket.date)
                    .count() as i64,
                date: bucket.label,
            })
            .collect();

        Ok(DashboardReportDto {
            stats: DashboardStats {
                total_orders,
                new_orders,
                completed_orders,
                total_revenue: format!("{:.2}", total_revenue),
                total_magnets,
                cod_orders_count,
                online_orders_count,
                cod_revenue: format!("{:.2}", cod_revenue),
                online_revenue: format!("{:.2}", online_revenue),
            },
            day_wise_data,
        })
    }
}

fn log_db(err: anyhow::Error) -> DashboardError {
    error!(db_error = ?err, "dashboard: aggregation query failed");
    DashboardError::Internal(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::dashboard::MockDashboardRepository;
    use chrono::{Duration, Utc};

    fn zeroed_repo() -> MockDashboardRepository {
        let mut repo = MockDashboardRepository::new();
        repo.expect_count_orders().returning(|_| Ok(0));
        repo.expect_count_open_orders().returning(|_| Ok(0));
        repo.expect_count_completed_orders().returning(|_| Ok(0));
        repo.expect_completed_revenue().returning(|_| Ok(0.0));
        repo.expect_completed_units().returning(|_| Ok(0));
        repo.expect_count_completed_by_mode().returning(|_, _| Ok(0));
        repo.expect_completed_revenue_by_mode()
            .returning(|_, _| Ok(0.0));
        repo.expect_order_timestamps().returning(|_| Ok(vec![]));
        repo.expect_order_extent().returning(|| Ok(None));
        repo
    }

    fn query(range: &str) -> DashboardQuery {
        DashboardQuery {
            range: Some(range.to_string()),
            start_date: None,
            end_date: None,
        }
    }

    #[tokio::test]
    async fn test_today_range_with_no_orders() {
        let usecase = DashboardUseCase::new(Arc::new(zeroed_repo()));
        let report = usecase.report(query("today")).await.unwrap();

        assert_eq!(report.stats.total_orders, 0);
        assert_eq!(report.stats.total_revenue, "0.00");
        assert_eq!(report.day_wise_data.len(), 1);
        assert_eq!(report.day_wise_data[0].date, "Today");
        assert_eq!(report.day_wise_data[0].count, 0);
    }

    #[tokio::test]
    async fn test_full_range_with_no_orders_yields_single_empty_bucket() {
        let usecase = DashboardUseCase::new(Arc::new(zeroed_repo()));
        let report = usecase.report(query("full")).await.unwrap();

        assert_eq!(report.day_wise_data.len(), 1);
        assert_eq!(report.day_wise_data[0].count, 0);
    }

    #[tokio::test]
    async fn test_seven_day_series_counts_orders_per_day() {
        let now = Utc::now();
        let mut repo = MockDashboardRepository::new();
        repo.expect_count_orders().returning(|_| Ok(3));
        repo.expect_count_open_orders().returning(|_| Ok(1));
        repo.expect_count_completed_orders().returning(|_| Ok(2));
        repo.expect_completed_revenue().returning(|_| Ok(1130.0));
        repo.expect_completed_units().returning(|_| Ok(10));
        repo.expect_count_completed_by_mode().returning(|_, _| Ok(1));
        repo.expect_completed_revenue_by_mode()
            .returning(|_, _| Ok(565.0));
        repo.expect_order_timestamps()
            .returning(move |_| Ok(vec![now, now, now - Duration::days(1)]));

        let usecase = DashboardUseCase::new(Arc::new(repo));
        let report = usecase.report(query("7")).await.unwrap();

        assert_eq!(report.day_wise_data.len(), 7);
        assert_eq!(report.stats.total_revenue, "1130.00");
        assert_eq!(report.day_wise_data.last().unwrap().count, 2);
        assert_eq!(report.day_wise_data[5].count, 1);
    }
}
