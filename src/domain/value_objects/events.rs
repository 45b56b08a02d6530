use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::event_bookings::EventBookingEntity;
use crate::domain::value_objects::dashboard::local_midnight_utc;
use crate::domain::value_objects::orders::all_digits;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookEventModel {
    pub event_type: Option<String>,
    pub event_date: Option<String>,
    pub time_slot: Option<String>,
    pub location: Option<String>,
    pub expected_guests: Option<i32>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
    pub location: String,
    pub expected_guests: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub notes: Option<String>,
}

/// Validates a public booking request; `today` is the server-local day used
/// for the future-date rule.
pub fn validate_booking(
    model: &BookEventModel,
    today: NaiveDate,
) -> Result<ValidatedBooking, String> {
    let required = [
        model.event_type.as_deref(),
        model.event_date.as_deref(),
        model.time_slot.as_deref(),
        model.location.as_deref(),
        model.contact_name.as_deref(),
        model.contact_phone.as_deref(),
    ];
    if required.iter().any(|f| f.map_or(true, |v| v.trim().is_empty()))
        || model.expected_guests.is_none()
    {
        return Err("All required fields must be provided".to_string());
    }

    let contact_phone = model.contact_phone.as_deref().unwrap_or_default().trim();
    if !all_digits(contact_phone, 10) {
        return Err("Phone number must be exactly 10 digits".to_string());
    }

    let event_date = parse_event_date(model.event_date.as_deref().unwrap_or_default())
        .ok_or_else(|| "Event date must be in the future".to_string())?;
    if event_date < local_midnight_utc(today) {
        return Err("Event date must be in the future".to_string());
    }

    let expected_guests = model.expected_guests.unwrap_or_default();
    if expected_guests < 1 {
        return Err("Expected guests must be at least 1".to_string());
    }

    Ok(ValidatedBooking {
        event_type: model.event_type.clone().unwrap_or_default(),
        event_date,
        time_slot: model.time_slot.clone().unwrap_or_default(),
        location: model.location.as_deref().unwrap_or_default().trim().to_string(),
        expected_guests,
        contact_name: model
            .contact_name
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string(),
        contact_phone: contact_phone.to_string(),
        notes: model
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string),
    })
}

fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(local_midnight_utc)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmationDto {
    pub id: Uuid,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    pub event_type: String,
    pub event_date: DateTime<Utc>,
    pub time_slot: String,
    pub location: String,
    pub expected_guests: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventBookingEntity> for BookingDto {
    fn from(entity: EventBookingEntity) -> Self {
        Self {
            id: entity.id,
            event_type: entity.event_type,
            event_date: entity.event_date,
            time_slot: entity.time_slot,
            location: entity.location,
            expected_guests: entity.expected_guests,
            contact_name: entity.contact_name,
            contact_phone: entity.contact_phone,
            notes: entity.notes,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
