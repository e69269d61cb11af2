use serde::{Deserialize, Serialize};

/// Bus type as reported by the server. Decides which seat layout is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BusType {
    Standard,
    Mini,
}

impl BusType {
    pub fn is_mini(self) -> bool {
        matches!(self, BusType::Mini)
    }
}

impl std::fmt::Display for BusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BusType::Standard => write!(f, "STANDARD"),
            BusType::Mini => write!(f, "MINI"),
        }
    }
}

/// Trip as returned by GET /api/trips/search/. Immutable within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub start_location: String,
    pub destination: String,
    pub departure_date: String,
    pub bus_type: BusType,
    pub price: f64,
    #[serde(default)]
    pub available_seats: u32,
}

/// Query parameters of GET /api/trips/search/.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripSearchQuery {
    pub start_city: String,
    pub start_area: String,
    pub destination_city: String,
    pub destination_area: String,
    pub departure_date: String,
    pub round_trip: bool,
}

impl TripSearchQuery {
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_city", self.start_city.clone()),
            ("start_area", self.start_area.clone()),
            ("destination_city", self.destination_city.clone()),
            ("destination_area", self.destination_area.clone()),
            ("departure_date", self.departure_date.clone()),
            ("round_trip", self.round_trip.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_type_uses_server_spelling() {
        assert_eq!(serde_json::to_string(&BusType::Mini).unwrap(), "\"MINI\"");
        let parsed: BusType = serde_json::from_str("\"STANDARD\"").unwrap();
        assert_eq!(parsed, BusType::Standard);
    }

    #[test]
    fn round_trip_flag_is_serialized_as_bool_string() {
        let query = TripSearchQuery { round_trip: true, ..Default::default() };
        let pairs = query.to_query_pairs();
        assert!(pairs.contains(&("round_trip", "true".to_string())));
    }
}
