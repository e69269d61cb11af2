// ============================================================================
// SEAT MODEL - Server-reported seat availability and the local selection
// ============================================================================
// The server is the source of truth: a seat map is derived from the
// per-seat status map of GET /api/trips/{id}/book/ and never mutated locally.
// The local selection only ever references seats that are present and
// available in the current map.
// ============================================================================

use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    Available,
    Unavailable,
}

/// Seat availability for one trip, keyed by seat number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatMap {
    seats: BTreeMap<u32, SeatStatus>,
}

impl SeatMap {
    /// Build a seat map from the wire format `{"<seat number>": "<status>"}`.
    /// Every status other than `"available"` (booked, held, ...) counts as
    /// unavailable. Keys that are not seat numbers are skipped.
    pub fn from_status_map(status: &HashMap<String, String>) -> Self {
        let mut seats = BTreeMap::new();
        for (number, state) in status {
            if let Ok(number) = number.parse::<u32>() {
                let status = if state == "available" {
                    SeatStatus::Available
                } else {
                    SeatStatus::Unavailable
                };
                seats.insert(number, status);
            }
        }
        Self { seats }
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn contains(&self, seat: u32) -> bool {
        self.seats.contains_key(&seat)
    }

    pub fn is_unavailable(&self, seat: u32) -> bool {
        matches!(self.seats.get(&seat), Some(SeatStatus::Unavailable))
    }

    pub fn all_seats(&self) -> BTreeSet<u32> {
        self.seats.keys().copied().collect()
    }

    pub fn available_seats(&self) -> BTreeSet<u32> {
        self.seats
            .iter()
            .filter(|(_, status)| **status == SeatStatus::Available)
            .map(|(number, _)| *number)
            .collect()
    }

    pub fn unavailable_seats(&self) -> BTreeSet<u32> {
        self.seats
            .iter()
            .filter(|(_, status)| **status == SeatStatus::Unavailable)
            .map(|(number, _)| *number)
            .collect()
    }

    pub fn max_seat_number(&self) -> Option<u32> {
        self.seats.keys().next_back().copied()
    }
}

/// Locally chosen seats, in click order. Invariant: every chosen seat is
/// present and available in the seat map it was chosen against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatSelection {
    chosen: Vec<u32>,
}

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a seat. Returns false (and changes nothing) when the seat is
    /// unavailable or unknown to the map.
    pub fn toggle(&mut self, seat: u32, map: &SeatMap) -> bool {
        if !map.contains(seat) || map.is_unavailable(seat) {
            return false;
        }
        if let Some(position) = self.chosen.iter().position(|s| *s == seat) {
            self.chosen.remove(position);
        } else {
            self.chosen.push(seat);
        }
        true
    }

    pub fn contains(&self, seat: u32) -> bool {
        self.chosen.contains(&seat)
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    /// Chosen seats in click order, for the booking payload and for display.
    pub fn to_vec(&self) -> Vec<u32> {
        self.chosen.clone()
    }

    pub fn display(&self) -> String {
        self.chosen
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Drop chosen seats that a refreshed map no longer reports as available.
    pub fn retain_available(&mut self, map: &SeatMap) {
        self.chosen.retain(|seat| map.contains(*seat) && !map.is_unavailable(*seat));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn derives_available_and_unavailable_sets() {
        let map = SeatMap::from_status_map(&status_map(&[
            ("1", "available"),
            ("2", "booked"),
            ("3", "available"),
        ]));
        assert_eq!(map.unavailable_seats(), BTreeSet::from([2]));
        assert!(map.available_seats().contains(&1));
        assert!(map.available_seats().contains(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn any_non_available_status_is_unavailable() {
        let map = SeatMap::from_status_map(&status_map(&[("4", "held"), ("5", "AVAILABLE")]));
        assert!(map.is_unavailable(4));
        // status matching is exact; the server sends lowercase
        assert!(map.is_unavailable(5));
    }

    #[test]
    fn toggling_an_unavailable_seat_is_rejected() {
        let map = SeatMap::from_status_map(&status_map(&[("1", "available"), ("2", "booked")]));
        let mut selection = SeatSelection::new();
        assert!(!selection.toggle(2, &map));
        assert!(selection.is_empty());
        // the invariant chosen ∩ unavailable = ∅ holds after arbitrary toggles
        assert!(selection.toggle(1, &map));
        assert!(!selection.toggle(7, &map));
        let chosen: BTreeSet<u32> = selection.to_vec().into_iter().collect();
        assert!(chosen.is_disjoint(&map.unavailable_seats()));
    }

    #[test]
    fn toggle_twice_deselects() {
        let map = SeatMap::from_status_map(&status_map(&[("1", "available")]));
        let mut selection = SeatSelection::new();
        selection.toggle(1, &map);
        assert!(selection.contains(1));
        selection.toggle(1, &map);
        assert!(selection.is_empty());
    }

    #[test]
    fn selection_preserves_click_order() {
        let map = SeatMap::from_status_map(&status_map(&[
            ("1", "available"),
            ("2", "available"),
            ("3", "available"),
        ]));
        let mut selection = SeatSelection::new();
        selection.toggle(3, &map);
        selection.toggle(1, &map);
        assert_eq!(selection.to_vec(), vec![3, 1]);
        assert_eq!(selection.display(), "3, 1");
    }

    #[test]
    fn refreshed_map_evicts_conflicting_seats() {
        let initial = SeatMap::from_status_map(&status_map(&[("1", "available"), ("2", "available")]));
        let mut selection = SeatSelection::new();
        selection.toggle(1, &initial);
        selection.toggle(2, &initial);

        let refreshed = SeatMap::from_status_map(&status_map(&[("1", "booked"), ("2", "available")]));
        selection.retain_available(&refreshed);
        assert_eq!(selection.to_vec(), vec![2]);
    }

    #[test]
    fn max_seat_number_comes_from_the_numbering_not_the_count() {
        let map = SeatMap::from_status_map(&status_map(&[("2", "available"), ("47", "available")]));
        assert_eq!(map.max_seat_number(), Some(47));
        assert_eq!(map.len(), 2);
    }
}
