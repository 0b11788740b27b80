//! Provider for the spreadsheet-backed booking endpoint.
//!
//! The backend is an Apps-Script-style web app in front of a spreadsheet.
//! It answers `GET ?action=availability&date=...` with the free slots for a
//! date and accepts bookings as a JSON `POST`. Field names drifted between
//! backend revisions (`success` vs `ok`, `available` vs `availableTimes`,
//! `message` vs `error`), so decoding accepts both spellings.
//!
//! Timeouts are the HTTP client's concern; build the [`Client`] with the
//! configured request timeout before handing it to the ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use greenslot_core::{
    config::BackendConfig,
    model::{BookingRequest, JobType},
    ports::{AvailabilityPort, BookingPort, BookingReply, PortError},
};

/// Wire shape of an availability answer.
#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(alias = "ok", default)]
    success: bool,

    #[serde(alias = "availableTimes", default)]
    available: Vec<String>,

    #[serde(default)]
    error: Option<String>,
}

/// Wire shape of a booking answer.
#[derive(Debug, Deserialize)]
struct BookingResponse {
    #[serde(alias = "ok", default)]
    success: bool,

    #[serde(rename = "bookingId", default)]
    booking_id: Option<String>,

    #[serde(alias = "error", default)]
    message: Option<String>,

    #[serde(rename = "whatsappCustomer", default)]
    whatsapp_customer: Option<String>,

    #[serde(rename = "whatsappOwner", default)]
    whatsapp_owner: Option<String>,
}

/// JSON body of a booking submission.
#[derive(Debug, Serialize)]
struct BookingPayload<'req> {
    action: &'static str,
    date: String,
    time: &'req str,
    name: &'req str,
    mobile: &'req str,
    postcode: &'req str,
    notes: &'req str,

    #[serde(rename = "jobType")]
    job_type: JobType,

    estimate: &'req str,
    source: &'req str,
}

impl<'req> BookingPayload<'req> {
    fn from_request(request: &'req BookingRequest, source: &'req str) -> Self {
        Self {
            action: "book",
            date: request.date.format("%Y-%m-%d").to_string(),
            time: &request.time,
            name: &request.name,
            mobile: &request.mobile,
            postcode: &request.postcode,
            notes: request.notes.as_deref().unwrap_or(""),
            job_type: request.job,
            estimate: &request.estimate,
            source,
        }
    }
}

/// Availability queries against the spreadsheet endpoint.
pub struct SheetsAvailabilityPort {
    client: Client,
    endpoint: String,
}

impl SheetsAvailabilityPort {
    /// Create a new availability port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl AvailabilityPort for SheetsAvailabilityPort {
    async fn available_times(&self, date: NaiveDate) -> Result<Vec<String>, PortError> {
        let date = date.format("%Y-%m-%d").to_string();
        tracing::debug!(%date, "querying availability");

        let req = self
            .client
            .get(&self.endpoint)
            .query(&[("action", "availability"), ("date", date.as_str())]);

        let resp = fetch_json::<AvailabilityResponse>(req).await?;
        decode_availability(resp)
    }
}

/// Booking submissions against the spreadsheet endpoint.
pub struct SheetsBookingPort {
    client: Client,
    endpoint: String,
}

impl SheetsBookingPort {
    /// Create a new booking port bound to the given HTTP client.
    #[must_use]
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl BookingPort for SheetsBookingPort {
    async fn book(
        &self,
        request: &BookingRequest,
        source: &str,
    ) -> Result<BookingReply, PortError> {
        let payload = BookingPayload::from_request(request, source);
        tracing::debug!(date = %payload.date, time = payload.time, "submitting booking");

        let req = self.client.post(&self.endpoint).json(&payload);
        let resp = fetch_json::<BookingResponse>(req).await?;

        Ok(reply_from(resp))
    }
}

/// Build both ports for the configured backend.
#[must_use]
pub fn ports(
    client: Client,
    config: &BackendConfig,
) -> (Arc<SheetsAvailabilityPort>, Arc<SheetsBookingPort>) {
    let availability = Arc::new(SheetsAvailabilityPort::new(
        client.clone(),
        config.endpoint.clone(),
    ));
    let booking = Arc::new(SheetsBookingPort::new(client, config.endpoint.clone()));
    (availability, booking)
}

fn decode_availability(resp: AvailabilityResponse) -> Result<Vec<String>, PortError> {
    if !resp.success {
        let reason = resp
            .error
            .unwrap_or_else(|| "availability query failed".to_owned());
        return Err(PortError::Backend(reason));
    }
    Ok(resp.available)
}

/// A declined booking is a reply, not a transport error; the service layer
/// decides how to present it.
fn reply_from(resp: BookingResponse) -> BookingReply {
    BookingReply {
        accepted: resp.success,
        booking_id: resp.booking_id,
        message: resp.message,
        whatsapp_customer: resp.whatsapp_customer,
        whatsapp_owner: resp.whatsapp_owner,
    }
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, PortError> {
    req.send()
        .await
        .map_err(PortError::from)?
        .error_for_status()
        .map_err(PortError::from)?
        .json()
        .await
        .map_err(PortError::from)
}
