//! High-level booking service combining the ports and configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{Config, UnavailablePolicy};
use crate::model::{BookingConfirmation, BookingRequest, WhatsappLinks};
use crate::ports::{AvailabilityPort, BookingPort, PortError};
use crate::whatsapp;

/// Shown when the backend rejects a booking without giving a reason.
pub const GENERIC_REJECTION: &str = "That slot is no longer available. Please pick another.";

/// Shown for any transport-level failure during submission.
pub const GENERIC_TRANSPORT: &str = "Could not connect. Please try again in a moment.";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of an availability query after the fallback policy is applied.
pub enum SlotsOutcome {
    /// The backend answered; these times are offered verbatim. An empty
    /// list is a legitimate "no times available" answer.
    Available(Vec<String>),
    /// The query failed and the static slot list is offered instead.
    Fallback(Vec<String>),
    /// The query failed and the configuration says to fail closed.
    Unavailable(String),
}

impl SlotsOutcome {
    /// Times to offer, empty in the [`SlotsOutcome::Unavailable`] state.
    #[must_use]
    pub fn slots(&self) -> &[String] {
        match self {
            SlotsOutcome::Available(slots) | SlotsOutcome::Fallback(slots) => slots,
            SlotsOutcome::Unavailable(_) => &[],
        }
    }
}

#[derive(Debug)]
/// Result of a booking submission that reached the backend.
pub enum SubmitOutcome {
    /// Booking persisted; confirmation and handoff links are ready.
    Confirmed(BookingConfirmation),
    /// Backend declined the booking. Carries the server reason (verbatim
    /// when present) and a refreshed slot list for the submitted date, so
    /// the stale slot disappears from the UI.
    Rejected {
        /// User-facing rejection reason.
        reason: String,
        /// Availability for the submitted date, re-queried after rejection.
        refreshed: SlotsOutcome,
    },
}

#[derive(thiserror::Error, Debug)]
/// A submission attempt that never produced a backend decision.
pub enum SubmitError {
    /// Local validation failed; no network I/O was performed.
    #[error(transparent)]
    Invalid(#[from] crate::model::ValidationError),
    /// Transport-level failure; the user may retry manually.
    #[error("Could not connect. Please try again in a moment.")]
    Transport(#[source] PortError),
}

/// Public entry point for availability queries and booking submissions.
pub struct BookingService {
    availability: Arc<dyn AvailabilityPort>,
    booking: Arc<dyn BookingPort>,
    config: Config,
}

impl BookingService {
    /// Create a new service bound to the given ports and configuration.
    #[must_use]
    pub fn new(
        availability: Arc<dyn AvailabilityPort>,
        booking: Arc<dyn BookingPort>,
        config: Config,
    ) -> Self {
        Self {
            availability,
            booking,
            config,
        }
    }

    /// Business configuration the service was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the bookable slots for a date, applying the configured policy
    /// when the backend cannot be reached.
    pub async fn slots_for(&self, date: chrono::NaiveDate) -> SlotsOutcome {
        match self.availability.available_times(date).await {
            Ok(times) => SlotsOutcome::Available(times),
            Err(err) => match self.config.behavior.on_unavailable {
                UnavailablePolicy::Fallback => {
                    tracing::warn!("availability query failed ({err}), using static slots");
                    SlotsOutcome::Fallback(self.config.business.default_slots())
                }
                UnavailablePolicy::Empty => {
                    tracing::warn!("availability query failed ({err})");
                    SlotsOutcome::Unavailable(format!("Could not load times: {err}"))
                }
            },
        }
    }

    /// Submit a booking. Validates locally first; an invalid request
    /// returns immediately without touching the network. Exactly one
    /// submission is made per call and nothing is retried automatically.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Invalid`] when required fields are missing,
    /// [`SubmitError::Transport`] when the backend could not be reached.
    pub async fn submit(&self, request: &BookingRequest) -> Result<SubmitOutcome, SubmitError> {
        request.validate()?;

        // Canonical international digits, for the backend and the links alike.
        let mut request = request.clone();
        request.mobile =
            whatsapp::normalize_mobile(&request.mobile, &self.config.business.country_code);

        let reply = self
            .booking
            .book(&request, &self.config.backend.source)
            .await
            .map_err(SubmitError::Transport)?;

        if !reply.accepted {
            let reason = reply
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| GENERIC_REJECTION.to_owned());
            let refreshed = self.slots_for(request.date).await;
            return Ok(SubmitOutcome::Rejected { reason, refreshed });
        }

        let booking_id = reply.booking_id.ok_or_else(|| {
            SubmitError::Transport(PortError::Internal(
                "backend accepted the booking without an id".to_owned(),
            ))
        })?;

        Ok(SubmitOutcome::Confirmed(self.confirmation(
            &request,
            booking_id,
            reply.whatsapp_customer,
            reply.whatsapp_owner,
        )))
    }

    /// Assemble the confirmation, preferring backend-supplied links over
    /// locally constructed ones.
    fn confirmation(
        &self,
        request: &BookingRequest,
        booking_id: String,
        customer_link: Option<String>,
        owner_link: Option<String>,
    ) -> BookingConfirmation {
        let business = &self.config.business;

        let customer = customer_link.unwrap_or_else(|| {
            whatsapp::wa_link(
                &business.whatsapp,
                &whatsapp::booking_message(request, &booking_id),
            )
        });

        let owner = self.config.behavior.owner_alert.then(|| {
            owner_link.unwrap_or_else(|| {
                whatsapp::wa_link(
                    &business.whatsapp,
                    &whatsapp::owner_message(request, &booking_id),
                )
            })
        });

        BookingConfirmation {
            booking_id,
            links: WhatsappLinks { customer, owner },
        }
    }
}

/// Ticket source for availability queries. Each query takes a ticket via
/// [`QuerySequence::begin`]; a response is applied only while its ticket is
/// still the newest, so a stale response for an older date can never
/// overwrite the result of a newer one.
#[derive(Debug, Default)]
pub struct QuerySequence(AtomicU64);

impl QuerySequence {
    /// Create a fresh sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, superseding all earlier tickets.
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the given ticket still belongs to the newest query.
    #[must_use]
    pub fn is_latest(&self, ticket: u64) -> bool {
        self.0.load(Ordering::SeqCst) == ticket
    }
}
