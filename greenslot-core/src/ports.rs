//! Traits describing the booking backend, plus the shared error type.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Error as ReqwestError;

use crate::model::BookingRequest;

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while talking to the booking backend.
pub enum PortError {
    /// Network layer failed: unreachable, timeout, non-2xx, or an
    /// undecodable body.
    #[error("Network error: {0}")]
    Network(#[from] ReqwestError),
    /// The backend answered but reported a failure.
    #[error("Backend error: {0}")]
    Backend(String),
    /// Internal provider error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Default)]
/// Decoded backend answer to a booking submission.
pub struct BookingReply {
    /// Whether the backend persisted the booking.
    pub accepted: bool,
    /// Identifier assigned on acceptance.
    pub booking_id: Option<String>,
    /// Rejection reason or informational message.
    pub message: Option<String>,
    /// Backend-supplied customer deep link, if any.
    pub whatsapp_customer: Option<String>,
    /// Backend-supplied owner-alert deep link, if any.
    pub whatsapp_owner: Option<String>,
}

#[async_trait]
/// Slot availability queries against the backend.
pub trait AvailabilityPort: Send + Sync {
    /// Fetch the bookable time-of-day strings for a date, in order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the request fails or the backend
    /// reports an error.
    async fn available_times(&self, date: NaiveDate) -> Result<Vec<String>, PortError>;
}

#[async_trait]
/// Booking submission against the backend.
pub trait BookingPort: Send + Sync {
    /// Attempt to persist a booking. A [`BookingReply`] with
    /// `accepted == false` means the backend declined it, typically
    /// because the slot was taken in the meantime.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] on transport-level failure only.
    async fn book(
        &self,
        request: &BookingRequest,
        source: &str,
    ) -> Result<BookingReply, PortError>;
}
