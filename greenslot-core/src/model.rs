//! Domain data structures for jobs, estimates, and booking requests.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Kind of garden job the customer is asking about.
pub enum JobType {
    /// Lawn mowing.
    Lawn,
    /// Hedge trimming.
    Hedge,
    /// General tidy-up of beds and borders.
    Tidy,
    /// Full garden clearance.
    #[serde(rename = "clear")]
    Clearance,
    /// Anything else; priced as general maintenance.
    General,
}

impl JobType {
    /// All job types in display order.
    pub const ALL: [JobType; 5] = [
        JobType::Lawn,
        JobType::Hedge,
        JobType::Tidy,
        JobType::Clearance,
        JobType::General,
    ];
}

impl fmt::Display for JobType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobType::Lawn => "Lawn mowing",
            JobType::Hedge => "Hedge trimming",
            JobType::Tidy => "Garden tidy-up",
            JobType::Clearance => "Garden clearance",
            JobType::General => "General gardening",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Rough size of the area or job.
pub enum SizeCategory {
    /// Small garden or quick job.
    Small,
    /// Typical suburban garden.
    Medium,
    /// Large garden or a full day's work.
    Large,
}

impl SizeCategory {
    /// All size categories in ascending order.
    pub const ALL: [SizeCategory; 3] = [
        SizeCategory::Small,
        SizeCategory::Medium,
        SizeCategory::Large,
    ];
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SizeCategory::Small => "Small",
            SizeCategory::Medium => "Medium",
            SizeCategory::Large => "Large",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// How awkward it is to get tools and waste in and out.
pub enum AccessDifficulty {
    /// Direct access, e.g. a side gate.
    Easy,
    /// Through-the-house or narrow access.
    Average,
    /// Stairs, long carries, or no vehicle access.
    Difficult,
}

impl AccessDifficulty {
    /// All difficulties in ascending order of surcharge.
    pub const ALL: [AccessDifficulty; 3] = [
        AccessDifficulty::Easy,
        AccessDifficulty::Average,
        AccessDifficulty::Difficult,
    ];
}

impl fmt::Display for AccessDifficulty {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccessDifficulty::Easy => "Easy access",
            AccessDifficulty::Average => "Average access",
            AccessDifficulty::Difficult => "Difficult access",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Amount of green waste to take away.
pub enum WasteVolume {
    /// Customer keeps the waste.
    None,
    /// A few bags or one trailer load.
    Some,
    /// Multiple loads.
    Lots,
}

impl WasteVolume {
    /// All waste volumes in ascending order of surcharge.
    pub const ALL: [WasteVolume; 3] = [WasteVolume::None, WasteVolume::Some, WasteVolume::Lots];
}

impl fmt::Display for WasteVolume {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WasteVolume::None => "No waste removal",
            WasteVolume::Some => "Some waste",
            WasteVolume::Lots => "Lots of waste",
        };
        write!(formatter, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inputs to the estimator, recomputed on every form change.
pub struct EstimateRequest {
    /// Kind of job.
    pub job: JobType,
    /// Rough size of the job.
    pub size: SizeCategory,
    /// Access difficulty surcharge category.
    pub access: AccessDifficulty,
    /// Waste removal surcharge category.
    pub waste: WasteVolume,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A booking attempt as entered by the customer. Built fresh per submission.
pub struct BookingRequest {
    /// Requested visit date.
    pub date: NaiveDate,
    /// Requested slot, e.g. `"09:00"`.
    pub time: String,
    /// Customer name.
    pub name: String,
    /// Customer mobile number as typed.
    pub mobile: String,
    /// Job site postcode.
    pub postcode: String,
    /// Free-text notes, if any.
    pub notes: Option<String>,
    /// Kind of job being booked.
    pub job: JobType,
    /// Rendered estimate range shown to the customer at submission time.
    pub estimate: String,
}

impl BookingRequest {
    /// Check the locally-enforceable required fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first missing group of
    /// fields. Validation is synchronous and performs no I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.time.trim().is_empty() {
            return Err(ValidationError::MissingSchedule);
        }
        if self.name.trim().is_empty()
            || self.mobile.trim().is_empty()
            || self.postcode.trim().is_empty()
        {
            return Err(ValidationError::MissingContact);
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
/// A booking request failed local validation; nothing was sent.
pub enum ValidationError {
    /// No time slot picked yet.
    #[error("Please select a date and time")]
    MissingSchedule,
    /// One of name, mobile, or postcode is empty.
    #[error("Please enter name, mobile and postcode")]
    MissingContact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// WhatsApp deep links handed to the customer after a confirmed booking.
pub struct WhatsappLinks {
    /// Link the customer opens to send the booking summary to the business.
    pub customer: String,
    /// Optional owner-alert link, present when enabled in configuration.
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of an accepted booking, alive only while the confirmation renders.
pub struct BookingConfirmation {
    /// Identifier assigned by the backend, e.g. `"EG-123"`.
    pub booking_id: String,
    /// Deep links for the out-of-band WhatsApp handoff.
    pub links: WhatsappLinks,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            date: NaiveDate::from_ymd_opt(2026, 9, 14).expect("valid date"),
            time: "09:00".to_owned(),
            name: "Sam".to_owned(),
            mobile: "07123456789".to_owned(),
            postcode: "EG1 2AB".to_owned(),
            notes: None,
            job: JobType::Lawn,
            estimate: "£30 – £40".to_owned(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok(), "all fields are populated");
    }

    #[test]
    fn empty_time_is_a_schedule_error() {
        let mut req = request();
        req.time = String::new();
        assert_eq!(req.validate(), Err(ValidationError::MissingSchedule));
    }

    #[test]
    fn blank_contact_fields_are_rejected() {
        for field in ["name", "mobile", "postcode"] {
            let mut req = request();
            match field {
                "name" => req.name = "  ".to_owned(),
                "mobile" => req.mobile = String::new(),
                _ => req.postcode = String::new(),
            }
            assert_eq!(
                req.validate(),
                Err(ValidationError::MissingContact),
                "{field} must be required"
            );
        }
    }

    #[test]
    fn job_type_wire_names_match_the_backend() {
        let encoded = serde_json::to_string(&JobType::Clearance).expect("serializes");
        assert_eq!(encoded, "\"clear\"");
        let encoded = serde_json::to_string(&JobType::Lawn).expect("serializes");
        assert_eq!(encoded, "\"lawn\"");
    }
}
