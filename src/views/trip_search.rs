// ============================================================================
// TRIP SEARCH VIEW - Landing screen
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, create_element, get_element_by_id, input_value, on_click, on_submit,
    select_value, set_attribute, set_inner_html, set_text_content, ElementBuilder,
};
use crate::models::location::LocationsResponse;
use crate::models::trip::{Trip, TripSearchQuery};
use crate::services::api_client::ApiClient;
use crate::state::app_state::AppState;
use crate::state::route::{self, Route};
use crate::utils::format::{format_datetime, format_price};

pub fn render_trip_search(state: &AppState) -> Result<Element, JsValue> {
    let locations = Rc::new(RefCell::new(LocationsResponse::default()));

    let screen = ElementBuilder::new("div")?.class("search-screen").build();

    let headline = ElementBuilder::new("h1")?
        .class("search-headline")
        .text("Book Your Royal Bus Now")
        .build();
    append_child(&screen, &headline)?;

    // Search form card
    let card = ElementBuilder::new("div")?.class("search-card").build();
    let form = ElementBuilder::new("form")?.class("search-form").build();

    append_child(&form, &area_select_group("start-area", "From", "Departure Station")?)?;
    append_child(
        &form,
        &area_select_group("destination-area", "To", "Destination Station")?,
    )?;
    append_child(&form, &date_group()?)?;
    append_child(&form, &round_trip_group()?)?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Search")
        .build();
    append_child(&form, &submit)?;
    append_child(&card, &form)?;
    append_child(&screen, &card)?;

    // Inline error banner + results container
    let error = ElementBuilder::new("div")?.id("search-error")?.class("form-error").build();
    append_child(&screen, &error)?;
    let results = ElementBuilder::new("div")?.id("trip-results")?.class("trip-results").build();
    append_child(&screen, &results)?;

    // Load the cities → areas tree once per mount
    {
        let locations = locations.clone();
        spawn_local(async move {
            let api = ApiClient::new();
            match api.locations().await {
                Ok(response) => {
                    log::info!("📍 [SEARCH] {} cities loaded", response.cities.len());
                    populate_area_select("start-area", "Departure Station", &response);
                    populate_area_select("destination-area", "Destination Station", &response);
                    *locations.borrow_mut() = response;
                }
                Err(error) => {
                    log::error!("❌ [SEARCH] {}", error);
                    show_search_error("Error fetching locations. Please try again.");
                }
            }
        });
    }

    // Search submission
    {
        let state = state.clone();
        let locations = locations.clone();
        on_submit(&form, move |event| {
            event.prevent_default();

            let start_area = select_value("start-area").unwrap_or_default();
            let destination_area = select_value("destination-area").unwrap_or_default();
            let departure_date = input_value("departure-date").unwrap_or_default();
            if start_area.is_empty() || destination_area.is_empty() || departure_date.is_empty() {
                show_search_error("Please choose departure, destination and date.");
                return;
            }
            show_search_error("");

            let round_trip = get_element_by_id("round-trip")
                .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
                .map(|input| input.checked())
                .unwrap_or(false);

            let query = {
                let locations = locations.borrow();
                let city_of = |area: &str| {
                    area.parse::<i64>()
                        .ok()
                        .and_then(|id| locations.find_area(id))
                        .map(|(city, _)| city.id.to_string())
                        .unwrap_or_default()
                };
                TripSearchQuery {
                    start_city: city_of(&start_area),
                    start_area: start_area.clone(),
                    destination_city: city_of(&destination_area),
                    destination_area: destination_area.clone(),
                    departure_date: departure_date.clone(),
                    round_trip,
                }
            };

            let state = state.clone();
            spawn_local(async move {
                let api = ApiClient::new();
                match api.search_trips(&query).await {
                    Ok(trips) => {
                        log::info!("🚌 [SEARCH] {} trips found", trips.len());
                        if let Some(container) = get_element_by_id("trip-results") {
                            let _ = render_trip_results(&state, &container, &trips);
                        }
                    }
                    Err(error) => {
                        log::error!("❌ [SEARCH] {}", error);
                        show_search_error("Error fetching trips. Please try again.");
                        if let Some(container) = get_element_by_id("trip-results") {
                            set_inner_html(&container, "");
                        }
                    }
                }
            });
        })?;
    }

    Ok(screen)
}

fn area_select_group(id: &str, label_text: &str, placeholder: &str) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let label = ElementBuilder::new("label")?.attr("for", id)?.text(label_text).build();
    append_child(&group, &label)?;

    let select = ElementBuilder::new("select")?
        .id(id)?
        .attr("name", id)?
        .attr("required", "true")?
        .class("form-input")
        .build();
    let option = create_element("option")?;
    set_attribute(&option, "value", "")?;
    set_text_content(&option, placeholder);
    append_child(&select, &option)?;

    append_child(&group, &select)?;
    Ok(group)
}

fn date_group() -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();
    let label = ElementBuilder::new("label")?.attr("for", "departure-date")?.text("Date").build();
    let input = ElementBuilder::new("input")?
        .attr("type", "date")?
        .id("departure-date")?
        .attr("name", "departure-date")?
        .attr("required", "true")?
        .class("form-input")
        .build();
    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok(group)
}

fn round_trip_group() -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group form-group-checkbox").build();
    let input = ElementBuilder::new("input")?
        .attr("type", "checkbox")?
        .id("round-trip")?
        .attr("name", "round-trip")?
        .build();
    let label = ElementBuilder::new("label")?.attr("for", "round-trip")?.text("Round trip").build();
    append_child(&group, &input)?;
    append_child(&group, &label)?;
    Ok(group)
}

/// Fill a station select with one optgroup per city.
fn populate_area_select(select_id: &str, placeholder: &str, locations: &LocationsResponse) {
    let select = match get_element_by_id(select_id) {
        Some(select) => select,
        None => return,
    };
    set_inner_html(&select, "");

    let placeholder_option = match create_element("option") {
        Ok(option) => option,
        Err(_) => return,
    };
    let _ = set_attribute(&placeholder_option, "value", "");
    set_text_content(&placeholder_option, placeholder);
    let _ = append_child(&select, &placeholder_option);

    for city in &locations.cities {
        let group = match create_element("optgroup") {
            Ok(group) => group,
            Err(_) => continue,
        };
        let _ = set_attribute(&group, "label", &city.name);
        for area in &city.areas {
            if let Ok(option) = create_element("option") {
                let _ = set_attribute(&option, "value", &area.id.to_string());
                set_text_content(&option, &area.name);
                let _ = append_child(&group, &option);
            }
        }
        let _ = append_child(&select, &group);
    }
}

fn render_trip_results(
    state: &AppState,
    container: &Element,
    trips: &[Trip],
) -> Result<(), JsValue> {
    set_inner_html(container, "");

    let heading = ElementBuilder::new("h3")?.class("results-heading").text("Available Trips").build();
    append_child(container, &heading)?;

    if trips.is_empty() {
        let empty = ElementBuilder::new("p")?
            .class("results-empty")
            .text("No trips available for your search.")
            .build();
        let hint = ElementBuilder::new("p")?
            .class("results-hint")
            .text("Please try changing your locations or date.")
            .build();
        append_child(container, &empty)?;
        append_child(container, &hint)?;
        return Ok(());
    }

    for trip in trips {
        let card = ElementBuilder::new("div")?.class("trip-card").build();

        let journey = ElementBuilder::new("div")?.class("trip-journey").build();
        let from = ElementBuilder::new("div")?.class("trip-stop").text(&trip.start_location).build();
        let to = ElementBuilder::new("div")?.class("trip-stop").text(&trip.destination).build();
        append_child(&journey, &from)?;
        append_child(&journey, &to)?;
        append_child(&card, &journey)?;

        for (label, value) in [
            ("Departure Date", format_datetime(&trip.departure_date)),
            ("Bus Type", trip.bus_type.to_string()),
            ("Price", format_price(trip.price)),
            ("Seats Available", trip.available_seats.to_string()),
        ] {
            let cell = ElementBuilder::new("div")?.class("trip-field").build();
            let caption = ElementBuilder::new("div")?.class("trip-field-label").text(label).build();
            let content = ElementBuilder::new("div")?.class("trip-field-value").text(&value).build();
            append_child(&cell, &caption)?;
            append_child(&cell, &content)?;
            append_child(&card, &cell)?;
        }

        let book = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn-primary")
            .text("Book Now")
            .build();
        {
            let state = state.clone();
            let trip = trip.clone();
            on_click(&book, move |_| {
                state.booking.start_trip(Some(trip.clone()));
                route::navigate(&Route::TripBooking { trip_id: trip.id });
            })?;
        }
        append_child(&card, &book)?;

        append_child(container, &card)?;
    }

    Ok(())
}

fn show_search_error(message: &str) {
    if let Some(banner) = get_element_by_id("search-error") {
        set_text_content(&banner, message);
    }
}
