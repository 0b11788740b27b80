//! WhatsApp handoff: number normalization and deep-link construction.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::model::BookingRequest;

/// Normalize a customer-entered mobile number to bare international digits.
///
/// Non-digit characters are stripped. A leading national trunk `0` is
/// replaced with the country calling code; a number already carrying the
/// country code (or entered with `+`) passes through unchanged.
#[must_use]
pub fn normalize_mobile(raw: &str, country_code: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.strip_prefix('0') {
        Some(rest) => format!("{country_code}{rest}"),
        None => digits,
    }
}

/// Build a `wa.me` deep link that opens a chat with `number` and the given
/// message pre-filled. The text is percent-encoded for the query component.
#[must_use]
pub fn wa_link(number: &str, text: &str) -> String {
    let encoded = utf8_percent_encode(text, NON_ALPHANUMERIC);
    format!("https://wa.me/{number}?text={encoded}")
}

/// Human-readable booking summary the customer sends to the business.
#[must_use]
pub fn booking_message(request: &BookingRequest, booking_id: &str) -> String {
    let notes = request
        .notes
        .as_deref()
        .filter(|notes| !notes.trim().is_empty())
        .unwrap_or("-");

    format!(
        "Booking request ✅\n\n\
         Name: {name}\n\
         Mobile: {mobile}\n\
         Postcode: {postcode}\n\
         Date/Time: {date} {time}\n\
         Job: {job}\n\
         Estimate: {estimate}\n\
         Notes: {notes}\n\n\
         Booking ID: {booking_id}",
        name = request.name,
        mobile = request.mobile,
        postcode = request.postcode,
        date = request.date.format("%Y-%m-%d"),
        time = request.time,
        job = request.job,
        estimate = request.estimate,
    )
}

/// Terse one-line alert for the business owner.
#[must_use]
pub fn owner_message(request: &BookingRequest, booking_id: &str) -> String {
    format!(
        "New booking {booking_id}: {date} {time}, {name} ({postcode}), {job}",
        date = request.date.format("%Y-%m-%d"),
        time = request.time,
        name = request.name,
        postcode = request.postcode,
        job = request.job,
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use percent_encoding::percent_decode_str;

    use super::*;
    use crate::model::JobType;

    fn request() -> BookingRequest {
        BookingRequest {
            date: NaiveDate::from_ymd_opt(2026, 9, 14).expect("valid date"),
            time: "11:00".to_owned(),
            name: "Sam".to_owned(),
            mobile: "07123 456789".to_owned(),
            postcode: "EG1 2AB".to_owned(),
            notes: None,
            job: JobType::Hedge,
            estimate: "£70 – £110".to_owned(),
        }
    }

    #[test]
    fn trunk_prefix_becomes_country_code() {
        assert_eq!(normalize_mobile("07123456789", "44"), "447123456789");
    }

    #[test]
    fn international_numbers_pass_through() {
        assert_eq!(normalize_mobile("+447123456789", "44"), "447123456789");
        assert_eq!(normalize_mobile("447123456789", "44"), "447123456789");
    }

    #[test]
    fn spaces_and_punctuation_are_stripped() {
        assert_eq!(normalize_mobile("07123 456-789", "44"), "447123456789");
    }

    #[test]
    fn link_decodes_back_to_the_summary() {
        let message = booking_message(&request(), "EG-123");
        let link = wa_link("447000000000", &message);

        let (base, query) = link.split_once("?text=").expect("query component");
        assert_eq!(base, "https://wa.me/447000000000");

        let decoded = percent_decode_str(query)
            .decode_utf8()
            .expect("valid utf-8");
        assert!(decoded.contains("EG-123"), "booking id survives encoding");
        assert!(decoded.contains("2026-09-14"), "date survives encoding");
        assert!(decoded.contains("11:00"), "time survives encoding");
    }

    #[test]
    fn link_query_contains_no_raw_spaces_or_newlines() {
        let link = wa_link("447000000000", "hello world\nline");
        let (_, query) = link.split_once("?text=").expect("query component");
        assert!(!query.contains(' '), "spaces must be encoded");
        assert!(!query.contains('\n'), "newlines must be encoded");
    }

    #[test]
    fn missing_notes_render_as_a_dash() {
        let message = booking_message(&request(), "EG-9");
        assert!(message.contains("Notes: -"), "empty notes collapse to '-'");

        let mut with_notes = request();
        with_notes.notes = Some("Side gate code 1234".to_owned());
        let message = booking_message(&with_notes, "EG-9");
        assert!(message.contains("Notes: Side gate code 1234"));
    }

    #[test]
    fn owner_alert_is_a_single_line() {
        let message = owner_message(&request(), "EG-123");
        assert!(!message.contains('\n'), "owner alert stays terse");
        assert!(message.contains("EG-123"), "owner alert names the booking");
    }
}
