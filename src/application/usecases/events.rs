use std::sync::Arc;

use chrono::Local;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::entities::event_bookings::InsertEventBookingEntity;
use crate::domain::repositories::dashboard::DashboardRepository;
use crate::domain::repositories::event_bookings::EventBookingRepository;
use crate::domain::value_objects::enums::booking_statuses::BookingStatus;
use crate::domain::value_objects::events::{
    BookEventModel, BookingConfirmationDto, BookingDto, validate_booking,
};

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0}")]
    Validation(String),
    #[error("Booking not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl EventError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            EventError::Validation(_) => StatusCode::BAD_REQUEST,
            EventError::NotFound => StatusCode::NOT_FOUND,
            EventError::Conflict(_) => StatusCode::CONFLICT,
            EventError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, EventError>;

/// Badge counts for the back-office header.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationsDto {
    pub new_orders: i64,
    pub new_bookings: i64,
}

pub struct EventUseCase<E, D>
where
    E: EventBookingRepository + Send + Sync + 'static,
    D: DashboardRepository + Send + Sync + 'static,
{
    booking_repo: Arc<E>,
    dashboard_repo: Arc<D>,
}

impl<E, D> EventUseCase<E, D>
where
    E: EventBookingRepository + Send + Sync + 'static,
    D: DashboardRepository + Send + Sync + 'static,
{
    pub fn new(booking_repo: Arc<E>, dashboard_repo: Arc<D>) -> Self {
        Self {
            booking_repo,
            dashboard_repo,
        }
    }

    pub async fn book(&self, model: BookEventModel) -> UseCaseResult<BookingConfirmationDto> {
        let today = Local::now().date_naive();
        let validated = validate_booking(&model, today).map_err(EventError::Validation)?;

        let booking = self
            .booking_repo
            .create(InsertEventBookingEntity {
                event_type: validated.event_type,
                event_date: validated.event_date,
                time_slot: validated.time_slot,
                location: validated.location,
                expected_guests: validated.expected_guests,
                contact_name: validated.contact_name,
                contact_phone: validated.contact_phone,
                notes: validated.notes,
                status: BookingStatus::New.as_str().to_string(),
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "events: failed to persist booking");
                EventError::Internal(err)
            })?;

        info!(booking_id = %booking.id, event_type = %booking.event_type, "events: booking created");

        Ok(BookingConfirmationDto {
            id: booking.id,
            event_type: booking.event_type,
            event_date: booking.event_date,
            time_slot: booking.time_slot,
        })
    }

    pub async fn list(&self, status: Option<String>) -> UseCaseResult<Vec<BookingDto>> {
        let status = match status.as_deref() {
            None | Some("") => None,
            Some(value) => Some(
                BookingStatus::from_str(value.to_ascii_uppercase().as_str())
                    .ok_or_else(|| EventError::Validation("Invalid status filter".to_string()))?,
            ),
        };

        let bookings = self.booking_repo.list(status).await.map_err(|err| {
            error!(db_error = ?err, "events: failed to list bookings");
            EventError::Internal(err)
        })?;

        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    /// CONFIRMED / CANCELLED, valid only while the booking is still NEW.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        status: &str,
    ) -> UseCaseResult<BookingStatus> {
        let target = BookingStatus::from_str(status.to_ascii_uppercase().as_str())
            .filter(|status| *status != BookingStatus::New)
            .ok_or_else(|| {
                EventError::Validation("Status must be CONFIRMED or CANCELLED".to_string())
            })?;

        self.booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(EventError::Internal)?
            .ok_or(EventError::NotFound)?;

        let affected = self
            .booking_repo
            .transition_status(booking_id, BookingStatus::New, target)
            .await
            .map_err(|err| {
                error!(%booking_id, db_error = ?err, "events: failed to update booking status");
                EventError::Internal(err)
            })?;

        if affected == 0 {
            warn!(%booking_id, "events: status update on already-processed booking");
            return Err(EventError::Conflict(
                "Booking has already been processed".to_string(),
            ));
        }

        info!(%booking_id, status = %target, "events: booking status updated");
        Ok(target)
    }

    pub async fn notifications(&self) -> UseCaseResult<NotificationsDto> {
        let new_orders = self
            .dashboard_repo
            .count_new_orders()
            .await
            .map_err(EventError::Internal)?;
        let new_bookings = self
            .booking_repo
            .count_new()
            .await
            .map_err(EventError::Internal)?;

        Ok(NotificationsDto {
            new_orders,
            new_bookings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::event_bookings::EventBookingEntity;
    use crate::domain::repositories::dashboard::MockDashboardRepository;
    use crate::domain::repositories::event_bookings::MockEventBookingRepository;
    use chrono::{Duration, Utc};

    fn model() -> BookEventModel {
        BookEventModel {
            event_type: Some("BIRTHDAY".to_string()),
            event_date: Some((Utc::now() + Duration::days(7)).to_rfc3339()),
            time_slot: Some("17:00-20:00".to_string()),
            location: Some("Beach Road".to_string()),
            expected_guests: Some(40),
            contact_name: Some("Ravi".to_string()),
            contact_phone: Some("9876543210".to_string()),
            notes: None,
        }
    }

    fn usecase(
        booking_repo: MockEventBookingRepository,
        dashboard_repo: MockDashboardRepository,
    ) -> EventUseCase<MockEventBookingRepository, MockDashboardRepository> {
        EventUseCase::new(Arc::new(booking_repo), Arc::new(dashboard_repo))
    }

    #[tokio::test]
    async fn test_book_persists_with_new_status() {
        let mut booking_repo = MockEventBookingRepository::new();
        booking_repo
            .expect_create()
            .withf(|insert| insert.status == "NEW" && insert.event_type == "BIRTHDAY")
            .returning(|insert| {
                Ok(EventBookingEntity {
                    id: Uuid::new_v4(),
                    event_type: insert.event_type,
                    event_date: insert.event_date,
                    time_slot: insert.time_slot,
                    location: insert.location,
                    expected_guests: insert.expected_guests,
                    contact_name: insert.contact_name,
                    contact_phone: insert.contact_phone,
                    notes: insert.notes,
                    status: insert.status,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let usecase = usecase(booking_repo, MockDashboardRepository::new());
        let confirmation = usecase.book(model()).await.unwrap();
        assert_eq!(confirmation.event_type, "BIRTHDAY");
    }

    #[tokio::test]
    async fn test_book_rejects_invalid_payload_without_touching_db() {
        let usecase = usecase(
            MockEventBookingRepository::new(),
            MockDashboardRepository::new(),
        );
        let mut invalid = model();
        invalid.contact_phone = Some("123".to_string());
        let err = usecase.book(invalid).await.unwrap_err();
        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_status_conflict_after_processing() {
        let booking_id = Uuid::new_v4();
        let mut booking_repo = MockEventBookingRepository::new();
        booking_repo.expect_find_by_id().returning(move |id| {
            Ok(Some(EventBookingEntity {
                id,
                event_type: "BIRTHDAY".to_string(),
                event_date: Utc::now() + Duration::days(7),
                time_slot: "17:00-20:00".to_string(),
                location: "Beach Road".to_string(),
                expected_guests: 40,
                contact_name: "Ravi".to_string(),
                contact_phone: "9876543210".to_string(),
                notes: None,
                status: "CONFIRMED".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        booking_repo
            .expect_transition_status()
            .returning(|_, _, _| Ok(0));

        let usecase = usecase(booking_repo, MockDashboardRepository::new());
        let err = usecase
            .update_status(booking_id, "cancelled")
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_status_rejects_new_as_target() {
        let usecase = usecase(
            MockEventBookingRepository::new(),
            MockDashboardRepository::new(),
        );
        let err = usecase
            .update_status(Uuid::new_v4(), "NEW")
            .await
            .unwrap_err();
        assert!(matches!(err, EventError::Validation(_)));
    }

    #[tokio::test]
    async fn test_notifications_counts() {
        let mut booking_repo = MockEventBookingRepository::new();
        booking_repo.expect_count_new().returning(|| Ok(2));
        let mut dashboard_repo = MockDashboardRepository::new();
        dashboard_repo.expect_count_new_orders().returning(|| Ok(5));

        let usecase = usecase(booking_repo, dashboard_repo);
        let notifications = usecase.notifications().await.unwrap();
        assert_eq!(
            notifications,
            NotificationsDto {
                new_orders: 5,
                new_bookings: 2,
            }
        );
    }
}
