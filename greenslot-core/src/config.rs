//! Externalized business configuration.
//!
//! Loaded from `greenslot.toml` (path overridable via `GREENSLOT_CONFIG`).
//! A missing file yields the defaults; an unparseable file logs a warning
//! and yields the defaults. The backend endpoint and WhatsApp number have
//! no usable default and must be set before the app can talk to anything.

use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
/// Top-level configuration, one section per concern.
pub struct Config {
    /// Remote booking backend.
    pub backend: BackendConfig,
    /// Business constants: contact number, hours, lookahead.
    pub business: BusinessConfig,
    /// Flags for the behaviors that historically varied.
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
/// Where and how to reach the booking backend.
pub struct BackendConfig {
    /// Base URL of the spreadsheet-backed endpoint.
    pub endpoint: String,
    /// Per-request timeout in seconds for availability and booking calls.
    pub request_timeout_secs: u64,
    /// Tag sent with every booking so the backend can tell clients apart.
    pub source: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            request_timeout_secs: 12,
            source: String::from("greenslot-tui"),
        }
    }
}

impl BackendConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
/// Business constants that drive slots, the booking window, and handoff.
pub struct BusinessConfig {
    /// Business WhatsApp number, digits only with country code.
    pub whatsapp: String,
    /// Country calling code used to normalize customer numbers.
    pub country_code: String,
    /// First bookable hour of the day.
    pub open_hour: u32,
    /// Hour the business closes; no slot starts at or after it.
    pub close_hour: u32,
    /// Length of one slot in minutes.
    pub slot_minutes: u32,
    /// How many days ahead a booking may be placed.
    pub lookahead_days: i64,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            whatsapp: String::new(),
            country_code: String::from("44"),
            open_hour: 9,
            close_hour: 17,
            slot_minutes: 60,
            lookahead_days: 21,
        }
    }
}

impl BusinessConfig {
    /// Enumerate the static slot list from the business hours: fixed-length
    /// slots from the opening hour up to, but excluding, the closing hour.
    #[must_use]
    pub fn default_slots(&self) -> Vec<String> {
        if self.slot_minutes == 0 || self.close_hour <= self.open_hour {
            return Vec::new();
        }

        let open = self.open_hour * 60;
        let close = self.close_hour * 60;

        (open..close)
            .step_by(self.slot_minutes as usize)
            .map(|minute| format!("{:02}:{:02}", minute / 60, minute % 60))
            .collect()
    }

    /// Inclusive date range a customer may book within, starting today.
    #[must_use]
    pub fn booking_window(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today, today + chrono::Duration::days(self.lookahead_days))
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
/// Behavioral flags covering the divergent historical variants.
pub struct BehaviorConfig {
    /// What to show when an availability query fails.
    pub on_unavailable: UnavailablePolicy,
    /// Also produce an owner-alert WhatsApp link on success.
    pub owner_alert: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Fallback behavior when slot availability cannot be loaded.
pub enum UnavailablePolicy {
    /// Fail open: offer the static slot list derived from business hours.
    #[default]
    Fallback,
    /// Fail closed: show an explicit "could not load" state.
    Empty,
}

impl Config {
    /// Parse a configuration document.
    ///
    /// # Errors
    ///
    /// Returns the underlying TOML error when the document is malformed.
    pub fn from_toml(document: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(document)
    }

    /// Load configuration from a file, falling back to defaults when the
    /// file is missing or malformed.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let document = match std::fs::read_to_string(path) {
            Ok(document) => document,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                tracing::warn!("failed to read {}: {err}, using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_toml(&document) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("failed to parse {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_slots_exclude_the_closing_hour() {
        let business = BusinessConfig::default();
        let slots = business.default_slots();
        assert_eq!(slots.first().map(String::as_str), Some("09:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:00"));
        assert_eq!(slots.len(), 8, "09:00 through 16:00 inclusive");
    }

    #[test]
    fn half_hour_slots_are_supported() {
        let business = BusinessConfig {
            slot_minutes: 30,
            ..BusinessConfig::default()
        };
        let slots = business.default_slots();
        assert_eq!(slots.len(), 16, "two slots per hour over eight hours");
        assert_eq!(slots.get(1).map(String::as_str), Some("09:30"));
        assert_eq!(slots.last().map(String::as_str), Some("16:30"));
    }

    #[test]
    fn degenerate_hours_yield_no_slots() {
        let business = BusinessConfig {
            open_hour: 17,
            close_hour: 9,
            ..BusinessConfig::default()
        };
        assert!(business.default_slots().is_empty(), "closed before opening");
    }

    #[test]
    fn booking_window_spans_the_lookahead() {
        let business = BusinessConfig::default();
        let today = NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date");
        let (start, end) = business.booking_window(today);
        assert_eq!(start, today);
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 9, 22).expect("valid date"));
    }

    #[test]
    fn parses_a_full_document() {
        let config = Config::from_toml(
            r#"
            [backend]
            endpoint = "https://example.test/exec"
            request_timeout_secs = 10

            [business]
            whatsapp = "447123456789"
            slot_minutes = 30

            [behavior]
            on_unavailable = "empty"
            owner_alert = true
            "#,
        )
        .expect("valid document");

        assert_eq!(config.backend.endpoint, "https://example.test/exec");
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.business.slot_minutes, 30);
        assert_eq!(config.behavior.on_unavailable, UnavailablePolicy::Empty);
        assert!(config.behavior.owner_alert, "owner alert flag carries over");
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let config = Config::from_toml("").expect("empty document parses");
        assert_eq!(config.backend.request_timeout_secs, 12);
        assert_eq!(config.business.lookahead_days, 21);
        assert_eq!(
            config.behavior.on_unavailable,
            UnavailablePolicy::Fallback,
            "fail-open is the default"
        );
    }

    #[test]
    fn missing_file_loads_defaults() {
        let config = Config::load(Path::new("/nonexistent/greenslot.toml"));
        assert!(config.backend.endpoint.is_empty(), "no default endpoint");
        assert_eq!(config.business.open_hour, 9);
    }
}
