// crates/sensor-gate-core/src/reading.rs
// ============================================================================
// Module: Sensor Readings
// Description: Wire types and the fixed timestamp layout for sensor records.
// Purpose: Give scenarios typed views of the bodies exchanged with the API.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! The service under test stores readings with a numeric value, a unit
//! string, a server-assigned identifier, and a timestamp in the fixed
//! `YYYY-MM-DD HH:MM:SS` layout. That layout sorts lexicographically in
//! chronological order, which the verification layer relies on. These types
//! are observations only; the external service owns the storage.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Timestamp Layout
// ============================================================================

/// Fixed layout for every timestamp exchanged with the service.
pub const TIMESTAMP_LAYOUT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Layout for the `YYYY-MM` prefix used by recency checks.
const MONTH_PREFIX_LAYOUT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]");

/// Errors raised while rendering wall-clock time in the fixed layout.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The moment could not be rendered in the fixed layout.
    #[error("timestamp formatting failed: {0}")]
    Format(String),
}

/// Returns the current UTC moment rendered in the fixed layout.
///
/// # Errors
///
/// Returns [`TimestampError::Format`] when rendering fails.
pub fn now_timestamp() -> Result<String, TimestampError> {
    OffsetDateTime::now_utc()
        .format(&TIMESTAMP_LAYOUT)
        .map_err(|err| TimestampError::Format(err.to_string()))
}

/// Returns the current UTC `YYYY-MM` prefix for recency checks.
///
/// # Errors
///
/// Returns [`TimestampError::Format`] when rendering fails.
pub fn current_month_prefix() -> Result<String, TimestampError> {
    OffsetDateTime::now_utc()
        .format(&MONTH_PREFIX_LAYOUT)
        .map_err(|err| TimestampError::Format(err.to_string()))
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Reading submitted to the service with `POST /api/{sensor_type}`.
///
/// The timestamp is optional; when omitted it is left out of the JSON body
/// entirely (not serialized as `null`) so the service must assign a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    /// Numeric sensor value.
    pub value: f64,
    /// Unit string, for example `"C"`.
    pub unit: String,
    /// Timestamp in the fixed layout, or absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl NewReading {
    /// Creates a reading with an explicit timestamp.
    #[must_use]
    pub fn with_timestamp(value: f64, unit: &str, timestamp: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            timestamp: Some(timestamp.to_string()),
        }
    }

    /// Creates a reading without a timestamp, forcing the service default.
    #[must_use]
    pub fn without_timestamp(value: f64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            timestamp: None,
        }
    }
}

/// Stored record observed through `GET /api/{sensor_type}/{id}` or a list
/// endpoint.
///
/// The timestamp stays optional here so a service that fails to assign the
/// default surfaces as a clean assertion failure instead of a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    /// Server-assigned identifier.
    pub id: i64,
    /// Numeric sensor value.
    pub value: f64,
    /// Unit string.
    pub unit: String,
    /// Timestamp in the fixed layout; `None` when the service returned null.
    pub timestamp: Option<String>,
}

/// Response envelope for a created reading; only `id` is contractual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedReading {
    /// Server-assigned identifier of the new record.
    pub id: i64,
}
