use std::sync::Arc;

use chrono::NaiveDate;
use greenslot_core::{
    estimate::{EstimateResult, estimate},
    model::{
        AccessDifficulty, BookingConfirmation, BookingRequest, EstimateRequest, JobType,
        SizeCategory, WasteVolume,
    },
    service::{BookingService, QuerySequence, SlotsOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Estimate,
    Booking,
    Confirmed,
}

/// Which row of the estimate form is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EstimateField {
    Job,
    Size,
    Access,
    Waste,
}

impl EstimateField {
    pub(crate) const ALL: [EstimateField; 4] = [
        EstimateField::Job,
        EstimateField::Size,
        EstimateField::Access,
        EstimateField::Waste,
    ];
}

/// Which row of the booking form is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BookingField {
    Date,
    Slot,
    Name,
    Mobile,
    Postcode,
    Notes,
    Submit,
}

impl BookingField {
    pub(crate) const ALL: [BookingField; 7] = [
        BookingField::Date,
        BookingField::Slot,
        BookingField::Name,
        BookingField::Mobile,
        BookingField::Postcode,
        BookingField::Notes,
        BookingField::Submit,
    ];

    pub(crate) fn is_text(self) -> bool {
        matches!(
            self,
            BookingField::Name | BookingField::Mobile | BookingField::Postcode | BookingField::Notes
        )
    }
}

pub(crate) struct App {
    pub service: Arc<BookingService>,
    pub sequence: Arc<QuerySequence>,

    pub screen: Screen,

    // Estimate form
    pub estimate_field: usize,
    pub job_index: usize,
    pub size_index: usize,
    pub access_index: usize,
    pub waste_index: usize,
    /// Last computed estimate; cleared whenever an estimator input changes
    /// and read once when the booking is submitted.
    pub last_estimate: Option<EstimateResult>,

    // Booking form
    pub booking_field: usize,
    pub date: NaiveDate,
    pub window: (NaiveDate, NaiveDate),
    pub slots: SlotsOutcome,
    pub slot_index: Option<usize>,
    pub name: String,
    pub mobile: String,
    pub postcode: String,
    pub notes: String,

    pub is_loading: bool,
    pub status: Option<String>,
    pub confirmation: Option<BookingConfirmation>,
}

impl App {
    pub(crate) fn new(service: Arc<BookingService>, today: NaiveDate) -> Self {
        let window = service.config().business.booking_window(today);
        Self {
            service,
            sequence: Arc::new(QuerySequence::new()),
            screen: Screen::Estimate,
            estimate_field: 0,
            job_index: 0,
            size_index: 0,
            access_index: 0,
            waste_index: 0,
            last_estimate: None,
            booking_field: 0,
            date: today,
            window,
            slots: SlotsOutcome::Available(Vec::new()),
            slot_index: None,
            name: String::new(),
            mobile: String::new(),
            postcode: String::new(),
            notes: String::new(),
            is_loading: false,
            status: None,
            confirmation: None,
        }
    }

    pub(crate) fn estimate_request(&self) -> EstimateRequest {
        EstimateRequest {
            job: JobType::ALL[self.job_index % JobType::ALL.len()],
            size: SizeCategory::ALL[self.size_index % SizeCategory::ALL.len()],
            access: AccessDifficulty::ALL[self.access_index % AccessDifficulty::ALL.len()],
            waste: WasteVolume::ALL[self.waste_index % WasteVolume::ALL.len()],
        }
    }

    pub(crate) fn compute_estimate(&mut self) {
        self.last_estimate = Some(estimate(&self.estimate_request()));
    }

    /// Any estimator input change invalidates the stored estimate.
    pub(crate) fn invalidate_estimate(&mut self) {
        self.last_estimate = None;
    }

    /// Step the selected date by `delta` days, clamped to the booking
    /// window. Returns true when the date actually changed.
    pub(crate) fn step_date(&mut self, delta: i64) -> bool {
        let (min, max) = self.window;
        let stepped = (self.date + chrono::Duration::days(delta)).clamp(min, max);
        if stepped == self.date {
            return false;
        }
        self.date = stepped;
        self.slot_index = None;
        true
    }

    /// Apply a finished availability query. Discarded when a newer query
    /// has been started since (last-write-wins) or the date moved on.
    pub(crate) fn apply_slots(&mut self, ticket: u64, date: NaiveDate, outcome: SlotsOutcome) {
        if !self.sequence.is_latest(ticket) || date != self.date {
            return;
        }
        self.slots = outcome;
        self.slot_index = None;
        self.is_loading = false;
    }

    pub(crate) fn selected_time(&self) -> Option<&str> {
        let slots = self.slots.slots();
        self.slot_index
            .and_then(|index| slots.get(index))
            .map(String::as_str)
    }

    /// Move the slot selection; `None` is the neutral placeholder before
    /// the first real slot.
    pub(crate) fn step_slot(&mut self, forward: bool) {
        let count = self.slots.slots().len();
        if count == 0 {
            self.slot_index = None;
            return;
        }
        self.slot_index = match (self.slot_index, forward) {
            (None, true) => Some(0),
            (None, false) => None,
            (Some(index), true) => Some((index + 1).min(count - 1)),
            (Some(0), false) => None,
            (Some(index), false) => Some(index - 1),
        };
    }

    /// Snapshot the form into a request. The stored estimate is read here,
    /// exactly once per submission attempt.
    pub(crate) fn booking_request(&self) -> BookingRequest {
        BookingRequest {
            date: self.date,
            time: self.selected_time().unwrap_or_default().to_owned(),
            name: self.name.trim().to_owned(),
            mobile: self.mobile.trim().to_owned(),
            postcode: self.postcode.trim().to_owned(),
            notes: {
                let notes = self.notes.trim();
                (!notes.is_empty()).then(|| notes.to_owned())
            },
            job: JobType::ALL[self.job_index % JobType::ALL.len()],
            estimate: self
                .last_estimate
                .map(|estimate| estimate.to_string())
                .unwrap_or_default(),
        }
    }

    pub(crate) fn focused_text_field(&mut self) -> Option<&mut String> {
        match BookingField::ALL[self.booking_field % BookingField::ALL.len()] {
            BookingField::Name => Some(&mut self.name),
            BookingField::Mobile => Some(&mut self.mobile),
            BookingField::Postcode => Some(&mut self.postcode),
            BookingField::Notes => Some(&mut self.notes),
            _ => None,
        }
    }

    pub(crate) fn current_booking_field(&self) -> BookingField {
        BookingField::ALL[self.booking_field % BookingField::ALL.len()]
    }

    pub(crate) fn current_estimate_field(&self) -> EstimateField {
        EstimateField::ALL[self.estimate_field % EstimateField::ALL.len()]
    }

    /// Reset the transient booking state for another attempt, keeping the
    /// customer's contact details.
    pub(crate) fn start_over(&mut self) {
        self.screen = Screen::Booking;
        self.confirmation = None;
        self.status = None;
    }
}
