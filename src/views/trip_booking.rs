// ============================================================================
// TRIP BOOKING VIEW - Seat selection and the hold → confirm → pay sequence
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, create_element, on_click, on_input, set_attribute, set_class_name,
    set_text_content, ElementBuilder,
};
use crate::models::booking::{PaymentType, UserType};
use crate::models::trip::Trip;
use crate::services::api_client::redirect_to_payment;
use crate::state::app_state::AppState;
use crate::state::booking_state::BookingStage;
use crate::state::route::{self, Route};
use crate::utils::format::{format_datetime, format_price};
use crate::viewmodels::booking_viewmodel::{
    AuthorizedBookingApi, BookingError, BookingFlow, ConfirmOutcome,
};
use crate::viewmodels::ProfileViewModel;
use crate::views::seat_map::{render_bus_layout, render_mini_bus_layout};

pub fn render_trip_booking(state: &AppState, trip_id: i64) -> Result<Element, JsValue> {
    ensure_loaded(state, trip_id);

    let screen = ElementBuilder::new("div")?.class("booking-screen").build();

    if state.booking.stage().overlay_visible() {
        append_child(&screen, &render_confirm_overlay(state, trip_id)?)?;
    }

    let title = ElementBuilder::new("h2")?.class("booking-title").text("Select Your Seats").build();
    append_child(&screen, &title)?;

    if let Some(trip) = state.booking.trip.borrow().as_ref() {
        append_child(&screen, &render_trip_summary(trip)?)?;
    }

    // Seat layout variant follows the bus type; standard when unknown
    let is_mini = state
        .booking
        .trip
        .borrow()
        .as_ref()
        .map(|trip| trip.bus_type.is_mini())
        .unwrap_or(false);
    let layout = if is_mini {
        render_mini_bus_layout(state)?
    } else {
        render_bus_layout(state)?
    };
    append_child(&screen, &layout)?;

    if let Some(message) = state.booking.error.borrow().as_ref() {
        let banner = ElementBuilder::new("p")?.class("form-error").text(message).build();
        append_child(&screen, &banner)?;
    }

    if *state.booking.user_type.borrow() == Some(UserType::Admin) {
        append_child(&screen, &render_customer_inputs(state)?)?;
    }

    append_child(&screen, &render_booking_bar(state, trip_id)?)?;

    Ok(screen)
}

/// Fetch the acting user's role and the seat map once per trip.
fn ensure_loaded(state: &AppState, trip_id: i64) {
    if *state.booking.loaded_trip_id.borrow() == Some(trip_id) {
        let stage = state.booking.stage();
        if !matches!(stage, BookingStage::Completed { .. } | BookingStage::AwaitingPayment) {
            return;
        }
        // returning after a finished attempt starts a clean one with a
        // fresh seat map
        let trip = state.booking.trip.borrow().clone();
        state.booking.start_trip(trip);
    }
    let known_trip = state.booking.trip.borrow().as_ref().map(|trip| trip.id);
    if known_trip != Some(trip_id) {
        // deep link without trip context; seats still load, the summary is
        // simply not shown
        state.booking.start_trip(None);
    }
    *state.booking.loaded_trip_id.borrow_mut() = Some(trip_id);
    *state.booking.loading.borrow_mut() = true;

    let state = state.clone();
    spawn_local(async move {
        let profile_vm = ProfileViewModel::new();
        match profile_vm.load_page(&state.auth, 1).await {
            Ok(profile) => {
                if let Some(user_type) = profile.user.user_type {
                    state.booking.apply_user_type(user_type);
                }
            }
            Err(error) => {
                log::error!("❌ [BOOKING] Could not load the user profile: {}", error);
                state.booking.set_error(Some("Failed to fetch user type.".to_string()));
            }
        }

        let flow = BookingFlow::new(AuthorizedBookingApi::new(state.auth.clone()));
        match flow.load_seat_map(trip_id).await {
            Ok(map) => {
                log::info!("💺 [BOOKING] Seat map loaded: {} seats", map.len());
                *state.booking.seat_map.borrow_mut() = map;
            }
            Err(error) => {
                log::error!("❌ [BOOKING] {}", error);
                state.booking.set_error(Some("Failed to fetch seats.".to_string()));
            }
        }

        *state.booking.loading.borrow_mut() = false;
        state.notify_subscribers();
    });
}

fn render_trip_summary(trip: &Trip) -> Result<Element, JsValue> {
    let summary = ElementBuilder::new("div")?.class("trip-summary").build();

    let journey = ElementBuilder::new("div")?.class("trip-field").build();
    let caption = ElementBuilder::new("div")?.class("trip-field-label").text("From & To").build();
    let from = ElementBuilder::new("div")?.class("trip-stop").text(&trip.start_location).build();
    let to = ElementBuilder::new("div")?.class("trip-stop").text(&trip.destination).build();
    append_child(&journey, &caption)?;
    append_child(&journey, &from)?;
    append_child(&journey, &to)?;
    append_child(&summary, &journey)?;

    for (label, value) in [
        ("Departure Date", format_datetime(&trip.departure_date)),
        ("Bus Type", trip.bus_type.to_string()),
        ("Seat Price", format_price(trip.price)),
    ] {
        let cell = ElementBuilder::new("div")?.class("trip-field").build();
        let caption = ElementBuilder::new("div")?.class("trip-field-label").text(label).build();
        let content = ElementBuilder::new("div")?.class("trip-field-value").text(&value).build();
        append_child(&cell, &caption)?;
        append_child(&cell, &content)?;
        append_child(&summary, &cell)?;
    }

    Ok(summary)
}

/// Customer fields shown to administrators booking on behalf of a customer.
fn render_customer_inputs(state: &AppState) -> Result<Element, JsValue> {
    let wrapper = ElementBuilder::new("div")?.class("customer-details").build();
    let submitting = *state.booking.submitting.borrow();

    for (id, label_text, placeholder, cell) in [
        (
            "customer-name",
            "Customer Name",
            "Enter customer name",
            state.booking.customer_name.clone(),
        ),
        (
            "customer-phone",
            "Customer Phone",
            "Enter customer phone (11 digits)",
            state.booking.customer_phone.clone(),
        ),
    ] {
        let label = ElementBuilder::new("label")?.attr("for", id)?.text(label_text).build();
        append_child(&wrapper, &label)?;

        let input = ElementBuilder::new("input")?
            .attr("type", "text")?
            .id(id)?
            .attr("placeholder", placeholder)?
            .attr("value", &cell.borrow())?
            .class("form-input")
            .build();
        if submitting {
            set_attribute(&input, "disabled", "true")?;
        }
        on_input(&input, move |event| {
            if let Some(target) =
                event.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                *cell.borrow_mut() = target.value();
            }
        })?;
        append_child(&wrapper, &input)?;
    }

    Ok(wrapper)
}

/// Total price, payment selector, and the Book Seats control.
fn render_booking_bar(state: &AppState, trip_id: i64) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("booking-bar").build();

    let seats = state.booking.selection.borrow().len();
    let price = state.booking.trip.borrow().as_ref().map(|trip| trip.price).unwrap_or(0.0);
    let total = ElementBuilder::new("h2")?
        .class("booking-total")
        .text(&format!("Total Price: {}", format_price(seats as f64 * price)))
        .build();
    append_child(&bar, &total)?;

    // Payment selector: admins always collect cash at the counter
    let payment = ElementBuilder::new("div")?.class("payment-select").build();
    let label = ElementBuilder::new("label")?.text("Select Payment Method").build();
    append_child(&payment, &label)?;
    if *state.booking.user_type.borrow() == Some(UserType::Admin) {
        let cash = ElementBuilder::new("span")?
            .class("payment-fixed")
            .text(PaymentType::Cash.label())
            .build();
        append_child(&payment, &cash)?;
    } else {
        let select = ElementBuilder::new("select")?.id("payment-type")?.class("form-input").build();
        let option = create_element("option")?;
        set_attribute(&option, "value", "online")?;
        set_text_content(&option, PaymentType::Online.label());
        append_child(&select, &option)?;
        if *state.booking.submitting.borrow() {
            set_attribute(&select, "disabled", "true")?;
        }
        append_child(&payment, &select)?;
    }
    append_child(&bar, &payment)?;

    let book = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary btn-book")
        .build();
    let submitting = *state.booking.submitting.borrow();
    set_text_content(&book, if submitting { "Processing..." } else { "Book Seats" });
    if submitting {
        set_attribute(&book, "disabled", "true")?;
    }
    {
        let state = state.clone();
        on_click(&book, move |_| {
            if *state.booking.submitting.borrow() {
                return;
            }
            *state.booking.submitting.borrow_mut() = true;
            state.booking.set_error(None);
            state.notify_subscribers();

            let state = state.clone();
            spawn_local(async move {
                let booking = &state.booking;
                let mut flow = BookingFlow::with_stage(
                    AuthorizedBookingApi::new(state.auth.clone()),
                    booking.stage(),
                );
                let selection = booking.selection.borrow().clone();
                let payment_type = *booking.payment_type.borrow();
                let user_type = *booking.user_type.borrow();
                let customer = booking.customer_details();

                let result = flow
                    .initiate_hold(trip_id, &selection, payment_type, user_type, &customer)
                    .await;
                booking.set_stage(flow.stage());

                if let Err(error) = result {
                    apply_booking_error(&state, error);
                }
                *booking.submitting.borrow_mut() = false;
                state.notify_subscribers();
            });
        })?;
    }
    append_child(&bar, &book)?;

    Ok(bar)
}

/// Confirmation overlay shown while a temporary hold exists.
fn render_confirm_overlay(state: &AppState, trip_id: i64) -> Result<Element, JsValue> {
    let overlay = ElementBuilder::new("div")?.class("overlay").build();
    let dialog = ElementBuilder::new("div")?.class("overlay-dialog").build();

    let warning = ElementBuilder::new("p")?
        .class("overlay-warning")
        .text(
            "IMPORTANT: Please Verify All Details Carefully. \
             Once Confirmed Booking Cannot Be Refunded Or Changed.",
        )
        .build();
    append_child(&dialog, &warning)?;

    if let Some(trip) = state.booking.trip.borrow().as_ref() {
        let heading = ElementBuilder::new("h4")?.text("Trip Details").build();
        append_child(&dialog, &heading)?;
        for (label, value) in [
            ("From", trip.start_location.clone()),
            ("To", trip.destination.clone()),
            ("Date", format_datetime(&trip.departure_date)),
            ("Bus Type", trip.bus_type.to_string()),
        ] {
            append_child(&dialog, &overlay_row(label, &value)?)?;
        }
    }

    let heading = ElementBuilder::new("h4")?.text("Booking Details").build();
    append_child(&dialog, &heading)?;
    let seats_display = state.booking.selection.borrow().display();
    let seats = state.booking.selection.borrow().len();
    let price = state.booking.trip.borrow().as_ref().map(|trip| trip.price).unwrap_or(0.0);
    let payment_type = *state.booking.payment_type.borrow();
    append_child(&dialog, &overlay_row("Selected Seats", &seats_display)?)?;
    append_child(
        &dialog,
        &overlay_row("Total Amount", &format_price(seats as f64 * price))?,
    )?;
    append_child(&dialog, &overlay_row("Payment Method", payment_type.label())?)?;
    if *state.booking.user_type.borrow() == Some(UserType::Admin) {
        append_child(
            &dialog,
            &overlay_row("Customer Name", &state.booking.customer_name.borrow())?,
        )?;
        append_child(
            &dialog,
            &overlay_row("Customer Phone", &state.booking.customer_phone.borrow())?,
        )?;
    }

    let confirming = state.booking.stage().in_flight();

    let confirm = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-confirm")
        .build();
    set_text_content(&confirm, if confirming { "Processing..." } else { "Confirm" });
    if confirming {
        set_attribute(&confirm, "disabled", "true")?;
    }
    {
        let state = state.clone();
        on_click(&confirm, move |_| {
            if state.booking.stage().in_flight() {
                return;
            }
            let state = state.clone();
            spawn_local(async move {
                let booking = &state.booking;
                // the flow resumes from Held; the mirrored state moves to
                // Confirming right away so both overlay buttons disable
                let mut flow = BookingFlow::with_stage(
                    AuthorizedBookingApi::new(state.auth.clone()),
                    booking.stage(),
                );
                let payment_type = *booking.payment_type.borrow();
                let user_type = *booking.user_type.borrow();
                let customer = booking.customer_details();
                booking.set_stage(BookingStage::Confirming);
                state.notify_subscribers();

                let result = flow.confirm(trip_id, payment_type, user_type, &customer).await;
                booking.set_stage(flow.stage());

                match result {
                    Ok(ConfirmOutcome::PaymentRedirect { payment_key, .. }) => {
                        // terminal: the external page redirects back to the
                        // success route
                        redirect_to_payment(&payment_key);
                    }
                    Ok(ConfirmOutcome::Completed { order_id, redirect_url }) => {
                        if let Some(url) = redirect_url {
                            if let Some(window) = web_sys::window() {
                                let _ = window.location().set_href(&url);
                            }
                        } else {
                            route::navigate(&Route::BookingSuccess { order_id, success: true });
                        }
                    }
                    Err(error) => apply_booking_error(&state, error),
                }
                state.notify_subscribers();
            });
        })?;
    }
    append_child(&dialog, &confirm)?;

    let cancel = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-cancel")
        .text("Cancel")
        .build();
    if confirming {
        set_attribute(&cancel, "disabled", "true")?;
    }
    {
        let state = state.clone();
        on_click(&cancel, move |_| {
            if state.booking.stage().in_flight() {
                return;
            }
            let mut flow = BookingFlow::with_stage(
                AuthorizedBookingApi::new(state.auth.clone()),
                state.booking.stage(),
            );
            flow.cancel();
            state.booking.set_stage(flow.stage());
            state.booking.set_error(None);
            state.notify_subscribers();
        })?;
    }
    append_child(&dialog, &cancel)?;

    append_child(&overlay, &dialog)?;
    Ok(overlay)
}

fn overlay_row(label: &str, value: &str) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("p")?.class("overlay-row").build();
    let caption = create_element("span")?;
    set_class_name(&caption, "overlay-row-label");
    set_text_content(&caption, label);
    let content = create_element("span")?;
    set_class_name(&content, "overlay-row-value");
    set_text_content(&content, value);
    append_child(&row, &caption)?;
    append_child(&row, &content)?;
    Ok(row)
}

/// Reflect an orchestrator error in the screen state. Seat conflicts come
/// with a re-fetched authoritative map that replaces the local one.
fn apply_booking_error(state: &AppState, error: BookingError) {
    match error {
        BookingError::SeatConflict { message, refreshed } => {
            state.booking.set_error(Some(message));
            if let Some(map) = refreshed {
                state.booking.selection.borrow_mut().retain_available(&map);
                *state.booking.seat_map.borrow_mut() = map;
            }
        }
        other => state.booking.set_error(Some(other.to_string())),
    }
}
