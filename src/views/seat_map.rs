// ============================================================================
// SEAT MAP VIEW - Pure projection of the seat list into a visual layout
// ============================================================================
// Two fixed layouts: the standard 4-across grid (2 + aisle + 2) and the
// mini-bus pattern (1/2/3/3/4 seats per row). Layout computation is pure;
// rendering attaches one button per seat and reports toggles upward.
// ============================================================================

use std::collections::BTreeSet;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, set_attribute, ElementBuilder};
use crate::models::seat::{SeatMap, SeatSelection};
use crate::state::app_state::AppState;

/// One slot of a standard row: a seat, or an invisible placeholder where
/// the numbering has a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatCell {
    Seat(u32),
    Gap,
}

/// A standard row: up to two seats, the aisle, up to two seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRow {
    pub left: Vec<SeatCell>,
    pub right: Vec<SeatCell>,
}

/// Compute the standard 4-across layout. The row count is derived from the
/// highest seat number present, not from the seat count, so numbering gaps
/// render as placeholders instead of shifting seats around.
pub fn standard_rows(seat_numbers: &BTreeSet<u32>) -> Vec<BusRow> {
    let max = match seat_numbers.iter().next_back() {
        Some(max) => *max,
        None => return Vec::new(),
    };
    let total_rows = max.div_ceil(4);

    (0..total_rows)
        .map(|row| BusRow {
            left: side_cells(row, [1, 2], seat_numbers, max),
            right: side_cells(row, [3, 4], seat_numbers, max),
        })
        .collect()
}

fn side_cells(row: u32, positions: [u32; 2], seats: &BTreeSet<u32>, max: u32) -> Vec<SeatCell> {
    positions
        .iter()
        .filter_map(|position| {
            let number = row * 4 + position;
            if number > max {
                None
            } else if seats.contains(&number) {
                Some(SeatCell::Seat(number))
            } else {
                Some(SeatCell::Gap)
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiniRowKind {
    /// One seat, centered (next to the driver).
    Center,
    /// Two seats on the left.
    LeftPair,
    /// Two seats on the left, one on the right.
    LeftPairRight,
    /// Four seats across the full width.
    FullRow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiniRow {
    pub kind: MiniRowKind,
    pub seats: Vec<u32>,
}

const MINI_PATTERN: [(MiniRowKind, usize); 5] = [
    (MiniRowKind::Center, 1),
    (MiniRowKind::LeftPair, 2),
    (MiniRowKind::LeftPairRight, 3),
    (MiniRowKind::LeftPairRight, 3),
    (MiniRowKind::FullRow, 4),
];

/// Compute the mini-bus layout: seats fill the fixed 1/2/3/3/4 pattern in
/// ascending order; anything beyond the pattern flows into 4-wide rows.
pub fn mini_rows(seat_numbers: &BTreeSet<u32>) -> Vec<MiniRow> {
    let ordered: Vec<u32> = seat_numbers.iter().copied().collect();
    let mut rows = Vec::new();
    let mut index = 0;

    for (kind, capacity) in MINI_PATTERN {
        if index >= ordered.len() {
            break;
        }
        let end = (index + capacity).min(ordered.len());
        rows.push(MiniRow { kind, seats: ordered[index..end].to_vec() });
        index = end;
    }

    while index < ordered.len() {
        let end = (index + 4).min(ordered.len());
        rows.push(MiniRow { kind: MiniRowKind::FullRow, seats: ordered[index..end].to_vec() });
        index = end;
    }

    rows
}

/// Styling precedence per seat: unavailable > chosen > available.
pub fn seat_class(seat: u32, map: &SeatMap, selection: &SeatSelection) -> &'static str {
    if map.is_unavailable(seat) {
        "seat seat-unavailable"
    } else if selection.contains(seat) {
        "seat seat-chosen"
    } else {
        "seat seat-available"
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the standard 4-across grid.
pub fn render_bus_layout(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("bus-layout").build();
    if let Some(placeholder) = loading_or_empty(state)? {
        append_child(&container, &placeholder)?;
        return Ok(container);
    }

    let body = ElementBuilder::new("div")?.class("bus-body").build();
    let seat_numbers = state.booking.seat_map.borrow().all_seats();

    for row in standard_rows(&seat_numbers) {
        let row_el = ElementBuilder::new("div")?.class("bus-row").build();
        for (side, cells) in [("bus-row-left", &row.left), ("bus-row-right", &row.right)] {
            let side_el = ElementBuilder::new("div")?.class(side).build();
            for cell in cells {
                match cell {
                    SeatCell::Seat(number) => {
                        append_child(&side_el, &render_seat_button(state, *number)?)?
                    }
                    SeatCell::Gap => append_child(&side_el, &render_gap()?)?,
                }
            }
            append_child(&row_el, &side_el)?;
        }
        append_child(&body, &row_el)?;
    }

    append_child(&container, &body)?;
    Ok(container)
}

/// Render the mini-bus pattern layout.
pub fn render_mini_bus_layout(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?.class("mini-bus-layout").build();
    if let Some(placeholder) = loading_or_empty(state)? {
        append_child(&container, &placeholder)?;
        return Ok(container);
    }

    let body = ElementBuilder::new("div")?.class("bus-body").build();
    let seat_numbers = state.booking.seat_map.borrow().all_seats();

    for row in mini_rows(&seat_numbers) {
        let class = match row.kind {
            MiniRowKind::Center => "mini-row mini-row-center",
            MiniRowKind::LeftPair => "mini-row mini-row-left",
            MiniRowKind::LeftPairRight => "mini-row mini-row-split",
            MiniRowKind::FullRow => "mini-row mini-row-full",
        };
        let row_el = ElementBuilder::new("div")?.class(class).build();
        for seat in &row.seats {
            append_child(&row_el, &render_seat_button(state, *seat)?)?;
        }
        append_child(&body, &row_el)?;
    }

    append_child(&container, &body)?;
    Ok(container)
}

fn loading_or_empty(state: &AppState) -> Result<Option<Element>, JsValue> {
    if *state.booking.loading.borrow() {
        return Ok(Some(ElementBuilder::new("div")?.class("spinner").build()));
    }
    if state.booking.seat_map.borrow().is_empty() {
        return Ok(Some(
            ElementBuilder::new("p")?
                .class("seats-empty")
                .text("No seats available for this trip.")
                .build(),
        ));
    }
    Ok(None)
}

fn render_seat_button(state: &AppState, seat: u32) -> Result<Element, JsValue> {
    let map = state.booking.seat_map.borrow();
    let selection = state.booking.selection.borrow();
    let class = seat_class(seat, &map, &selection);
    drop(selection);
    let unavailable = map.is_unavailable(seat);
    drop(map);

    let button = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class(class)
        .text(&seat.to_string())
        .build();
    if unavailable {
        set_attribute(&button, "disabled", "true")?;
    }

    // toggling an unavailable seat is a no-op (also enforced in the model)
    let state = state.clone();
    on_click(&button, move |_| {
        if state.booking.stage().in_flight() || *state.booking.submitting.borrow() {
            return;
        }
        let toggled = {
            let map = state.booking.seat_map.borrow();
            state.booking.selection.borrow_mut().toggle(seat, &map)
        };
        if toggled {
            state.notify_subscribers();
        }
    })?;

    Ok(button)
}

fn render_gap() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?.class("seat seat-gap").build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn seats(numbers: &[u32]) -> BTreeSet<u32> {
        numbers.iter().copied().collect()
    }

    #[test]
    fn row_count_follows_the_highest_seat_number() {
        let rows = standard_rows(&seats(&[1, 2, 47]));
        // ceil(47 / 4) = 12 rows even though only three seats exist
        assert_eq!(rows.len(), 12);
    }

    #[test]
    fn numbering_gaps_become_placeholders() {
        let rows = standard_rows(&seats(&[1, 4]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].left, vec![SeatCell::Seat(1), SeatCell::Gap]);
        assert_eq!(rows[0].right, vec![SeatCell::Gap, SeatCell::Seat(4)]);
    }

    #[test]
    fn cells_beyond_the_highest_seat_are_not_rendered_at_all() {
        let rows = standard_rows(&seats(&[45, 46, 47]));
        let last = rows.last().unwrap();
        assert_eq!(last.left, vec![SeatCell::Seat(45), SeatCell::Seat(46)]);
        // seat 48 does not exist and is past the maximum: no placeholder
        assert_eq!(last.right, vec![SeatCell::Seat(47)]);
    }

    #[test]
    fn empty_seat_set_renders_no_rows() {
        assert!(standard_rows(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn mini_layout_follows_the_fixed_pattern() {
        let rows = mini_rows(&seats(&(1..=13).collect::<Vec<_>>()));
        let kinds: Vec<MiniRowKind> = rows.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MiniRowKind::Center,
                MiniRowKind::LeftPair,
                MiniRowKind::LeftPairRight,
                MiniRowKind::LeftPairRight,
                MiniRowKind::FullRow,
            ]
        );
        assert_eq!(rows[0].seats, vec![1]);
        assert_eq!(rows[1].seats, vec![2, 3]);
        assert_eq!(rows[4].seats, vec![10, 11, 12, 13]);
    }

    #[test]
    fn mini_layout_overflow_fills_four_wide_rows() {
        let rows = mini_rows(&seats(&(1..=17).collect::<Vec<_>>()));
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].kind, MiniRowKind::FullRow);
        assert_eq!(rows[5].seats, vec![14, 15, 16, 17]);
    }

    #[test]
    fn mini_layout_with_fewer_seats_truncates_the_pattern() {
        let rows = mini_rows(&seats(&[5, 9]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].seats, vec![5]);
        assert_eq!(rows[1].seats, vec![9]);
    }

    #[test]
    fn unavailable_takes_precedence_over_chosen() {
        let initial: HashMap<String, String> =
            [("1", "available"), ("2", "available")].iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let map = SeatMap::from_status_map(&initial);
        let mut selection = SeatSelection::new();
        selection.toggle(1, &map);
        assert_eq!(seat_class(1, &map, &selection), "seat seat-chosen");
        assert_eq!(seat_class(2, &map, &selection), "seat seat-available");

        // seat 1 got booked elsewhere; until the selection is reconciled the
        // unavailable styling wins
        let refreshed: HashMap<String, String> =
            [("1", "booked"), ("2", "available")].iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        let refreshed = SeatMap::from_status_map(&refreshed);
        assert_eq!(seat_class(1, &refreshed, &selection), "seat seat-unavailable");
    }
}
