use serde::{Deserialize, Serialize};

use crate::models::booking::{BookingStatus, UserType};

/// Response of GET /api/profile/?page=&limit= - the extended user record
/// plus one page of booking history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: ProfileUser,
    #[serde(default)]
    pub bookings: Vec<ProfileBooking>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { total_pages: default_total_pages() }
    }
}

fn default_total_pages() -> u32 {
    1
}

/// Booking as embedded in the profile history. This endpoint nests the
/// trip endpoints as `{name}` objects, unlike the flat booking detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileBooking {
    pub id: i64,
    pub trip: ProfileTrip,
    #[serde(default)]
    pub selected_seats: Vec<u32>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub payment_type: Option<String>,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileTrip {
    pub start_location: NamedLocation,
    pub destination: NamedLocation,
    pub departure_date: String,
    #[serde(default)]
    pub bus_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedLocation {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_page_parses_nested_location_names() {
        let json = r#"{
            "user": {"name": "Mona", "email": "mona@example.com", "phone_number": "01234567890", "user_type": "Passenger"},
            "bookings": [{
                "id": 7,
                "trip": {
                    "start_location": {"name": "Cairo"},
                    "destination": {"name": "Alexandria"},
                    "departure_date": "2025-03-15T14:30:00Z",
                    "bus_type": "STANDARD"
                },
                "selected_seats": [3, 4],
                "total_price": 240.0,
                "payment_type": "ONLINE",
                "status": "CONFIRMED"
            }],
            "pagination": {"total_pages": 3}
        }"#;
        let profile: ProfileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.user_type, Some(UserType::Passenger));
        assert_eq!(profile.bookings[0].trip.start_location.name, "Cairo");
        assert_eq!(profile.bookings[0].status, BookingStatus::Confirmed);
        assert_eq!(profile.pagination.total_pages, 3);
    }

    #[test]
    fn pagination_defaults_to_a_single_page() {
        let json = r#"{"user": {"name": "A", "email": "a@b.c"}}"#;
        let profile: ProfileResponse = serde_json::from_str(json).unwrap();
        assert_eq!(profile.pagination.total_pages, 1);
        assert!(profile.bookings.is_empty());
    }
}
