// ============================================================================
// FORMAT HELPERS - Display formatting for timestamps and prices
// ============================================================================

use chrono::{DateTime, NaiveDateTime};

/// Format an ISO departure timestamp as "Sat, Mar 15 · 02:30 PM".
/// Falls back to the raw string when the server sends something unparseable.
pub fn format_datetime(raw: &str) -> String {
    match parse_naive(raw) {
        Some(dt) => dt.format("%a, %b %-d · %I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// Format only the date part: "Mar 15, 2025".
pub fn format_date(raw: &str) -> String {
    match parse_naive(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Format only the time part: "02:30 PM".
pub fn format_time(raw: &str) -> String {
    match parse_naive(raw) {
        Some(dt) => dt.format("%I:%M %p").to_string(),
        None => raw.to_string(),
    }
}

/// Prices are displayed with two decimals and the currency suffix.
pub fn format_price(price: f64) -> String {
    format!("{:.2} EGP", price)
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    // The API sometimes omits the timezone suffix
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_departure() {
        assert_eq!(format_datetime("2025-03-15T14:30:00Z"), "Sat, Mar 15 · 02:30 PM");
    }

    #[test]
    fn formats_timestamp_without_timezone() {
        assert_eq!(format_datetime("2025-03-15T09:05:00"), "Sat, Mar 15 · 09:05 AM");
        assert_eq!(format_date("2025-03-15T09:05:00"), "Mar 15, 2025");
        assert_eq!(format_time("2025-03-15T09:05:00"), "09:05 AM");
    }

    #[test]
    fn unparseable_timestamp_falls_back_to_raw() {
        assert_eq!(format_datetime("soon"), "soon");
    }

    #[test]
    fn prices_use_two_decimals() {
        assert_eq!(format_price(120.0), "120.00 EGP");
        assert_eq!(format_price(99.5), "99.50 EGP");
    }
}
