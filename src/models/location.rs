use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub areas: Vec<Area>,
}

/// Response of GET /api/locations/ - the cities → areas tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub cities: Vec<City>,
}

impl LocationsResponse {
    /// Find an area by id together with the city it belongs to.
    pub fn find_area(&self, area_id: i64) -> Option<(&City, &Area)> {
        for city in &self.cities {
            if let Some(area) = city.areas.iter().find(|a| a.id == area_id) {
                return Some((city, area));
            }
        }
        None
    }
}
