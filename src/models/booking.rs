use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Payment type of a booking. The server expects and reports the
/// uppercase spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    Online,
    Cash,
}

impl PaymentType {
    /// Label shown in the payment selector and the confirmation overlay.
    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Online => "Visa",
            PaymentType::Cash => "Cash",
        }
    }

    pub fn is_online(self) -> bool {
        matches!(self, PaymentType::Online)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "PENDING"),
            BookingStatus::Confirmed => write!(f, "CONFIRMED"),
            BookingStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Role of the acting user. Administrators book on behalf of customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Admin,
    Passenger,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Admin => write!(f, "Admin"),
            UserType::Passenger => write!(f, "Passenger"),
        }
    }
}

/// Customer fields, required only for admin bookings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
}

/// Response of GET /api/trips/{id}/book/.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeatMapResponse {
    #[serde(default)]
    pub seat_status: HashMap<String, String>,
}

/// Body of POST /api/trips/{id}/book/ (the temporary hold).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldRequest {
    pub seats_booked: usize,
    pub selected_seats: Vec<u32>,
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldResponse {
    pub temp_booking_ref: String,
}

/// Body of POST /api/trips/{id}/confirm/{ref}/.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub temp_booking_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmResponse {
    #[serde(default)]
    pub order_id: Option<i64>,
    /// Echo of the created booking; kept opaque, the success screen
    /// re-fetches the authoritative detail.
    #[serde(default)]
    pub booking: Option<serde_json::Value>,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

/// Response of GET /api/get_payment_key/{orderId}/.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentKeyResponse {
    #[serde(default)]
    pub payment_key: Option<String>,
}

/// Trip fields embedded in a booking detail (flat strings on this endpoint).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripInfo {
    pub start_location: String,
    pub destination: String,
    pub departure_date: String,
    pub bus_type: String,
}

/// Booking as returned by GET /api/bookings/detail/{orderId}/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    pub id: i64,
    pub trip: TripInfo,
    #[serde(default)]
    pub selected_seats: Vec<u32>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub payment_reference: Option<String>,
    #[serde(default)]
    pub booking_date: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetailResponse {
    pub booking: BookingDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_type_uses_server_spelling() {
        assert_eq!(serde_json::to_string(&PaymentType::Online).unwrap(), "\"ONLINE\"");
        assert_eq!(serde_json::to_string(&PaymentType::Cash).unwrap(), "\"CASH\"");
    }

    #[test]
    fn hold_request_omits_customer_fields_for_passengers() {
        let request = HoldRequest {
            seats_booked: 2,
            selected_seats: vec![4, 5],
            payment_type: PaymentType::Online,
            customer_name: None,
            customer_phone: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("customer_name"));
        assert!(json.contains("\"payment_type\":\"ONLINE\""));
    }

    #[test]
    fn booking_status_parses_uppercase() {
        let status: BookingStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(status, BookingStatus::Cancelled);
    }

    #[test]
    fn user_type_matches_server_casing() {
        let user: UserType = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(user, UserType::Admin);
    }
}
