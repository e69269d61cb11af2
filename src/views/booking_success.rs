// ============================================================================
// BOOKING SUCCESS VIEW - Boarding pass
// ============================================================================
// Entered after a cash confirmation or after the external payment page
// redirects back. The authoritative booking detail is re-fetched from the
// API; nothing carried over from the booking screen is trusted here.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, set_inner_html, ElementBuilder};
use crate::models::booking::BookingDetail;
use crate::state::app_state::AppState;
use crate::utils::format::{format_datetime, format_price};
use crate::viewmodels::ProfileViewModel;

pub fn render_booking_success(
    state: &AppState,
    order_id: Option<i64>,
    success: bool,
) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("success-screen").build();

    let order_id = match order_id {
        Some(order_id) if success => order_id,
        Some(_) | None => {
            let message = if order_id.is_none() {
                "No order ID provided"
            } else {
                "Payment was not successful. Please try again."
            };
            append_child(&screen, &warning_card(message)?)?;
            append_child(&screen, &home_link()?)?;
            return Ok(screen);
        }
    };

    let banner = ElementBuilder::new("div")?
        .class("success-banner")
        .text("Payment successful! Your ticket is ready.")
        .build();
    append_child(&screen, &banner)?;

    let ticket = ElementBuilder::new("div")?.id("ticket-container")?.class("ticket").build();
    let spinner = ElementBuilder::new("div")?.class("spinner").build();
    append_child(&ticket, &spinner)?;
    append_child(&screen, &ticket)?;

    append_child(&screen, &home_link()?)?;

    {
        let state = state.clone();
        spawn_local(async move {
            let vm = ProfileViewModel::new();
            match vm.booking_detail(&state.auth, order_id).await {
                Ok(response) => {
                    log::info!("🎟️ [TICKET] Booking {} loaded", response.booking.id);
                    if let Some(container) = crate::dom::get_element_by_id("ticket-container") {
                        let _ = render_ticket(&container, &response.booking);
                    }
                }
                Err(error) => {
                    log::error!("❌ [TICKET] {}", error);
                    if let Some(container) = crate::dom::get_element_by_id("ticket-container") {
                        set_inner_html(&container, "");
                        if let Ok(card) = warning_card("Failed to load booking details") {
                            let _ = append_child(&container, &card);
                        }
                    }
                }
            }
        });
    }

    Ok(screen)
}

fn render_ticket(container: &Element, booking: &BookingDetail) -> Result<(), JsValue> {
    set_inner_html(container, "");

    // Header strip
    let header = ElementBuilder::new("div")?.class("ticket-header").build();
    let brand = ElementBuilder::new("h1")?.text("BUS BOOKING").build();
    let pass = ElementBuilder::new("div")?.class("ticket-pass").build();
    let caption = ElementBuilder::new("p")?.text("BOARDING PASS").build();
    let status = ElementBuilder::new("p")?
        .class("ticket-status")
        .text(booking.payment_status.as_deref().unwrap_or("PAID"))
        .build();
    append_child(&pass, &caption)?;
    append_child(&pass, &status)?;
    append_child(&header, &brand)?;
    append_child(&header, &pass)?;
    append_child(container, &header)?;

    // Journey headline
    let journey = ElementBuilder::new("div")?.class("ticket-journey").build();
    let from = ElementBuilder::new("div")?.text(&booking.trip.start_location).build();
    let arrow = ElementBuilder::new("div")?.class("ticket-arrow").text("→").build();
    let to = ElementBuilder::new("div")?.text(&booking.trip.destination).build();
    append_child(&journey, &from)?;
    append_child(&journey, &arrow)?;
    append_child(&journey, &to)?;
    append_child(container, &journey)?;

    // Main fields
    let grid = ElementBuilder::new("div")?.class("ticket-grid").build();
    let seat_numbers = booking
        .selected_seats
        .iter()
        .map(|seat| seat.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    for (label, value) in [
        ("Passenger Name", booking.customer_name.clone().unwrap_or_else(|| "N/A".into())),
        ("Phone", booking.customer_phone.clone().unwrap_or_else(|| "N/A".into())),
        ("Departure", format_datetime(&booking.trip.departure_date)),
        ("Bus Type", booking.trip.bus_type.clone()),
        ("Seat Numbers", seat_numbers),
        ("Total Amount", format_price(booking.total_price)),
    ] {
        let cell = ElementBuilder::new("div")?.class("ticket-field").build();
        let caption = ElementBuilder::new("p")?.class("ticket-field-label").text(label).build();
        let content = ElementBuilder::new("p")?.class("ticket-field-value").text(&value).build();
        append_child(&cell, &caption)?;
        append_child(&cell, &content)?;
        append_child(&grid, &cell)?;
    }
    append_child(container, &grid)?;

    // Payment footer
    let footer = ElementBuilder::new("div")?.class("ticket-footer").build();
    for (label, value) in [
        ("Payment Ref", booking.payment_reference.clone().unwrap_or_else(|| "N/A".into())),
        ("Payment Type", booking.payment_type.clone().unwrap_or_else(|| "N/A".into())),
        (
            "Payment Date",
            booking.booking_date.as_deref().map(format_datetime).unwrap_or_else(|| "N/A".into()),
        ),
    ] {
        let row = ElementBuilder::new("p")?.build();
        let caption = ElementBuilder::new("span")?.class("ticket-field-label").text(label).build();
        let content = ElementBuilder::new("span")?.text(&format!(" {}", value)).build();
        append_child(&row, &caption)?;
        append_child(&row, &content)?;
        append_child(&footer, &row)?;
    }
    append_child(container, &footer)?;

    Ok(())
}

fn warning_card(message: &str) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("warning-card").build();
    let text = ElementBuilder::new("p")?.text(message).build();
    append_child(&card, &text)?;
    Ok(card)
}

fn home_link() -> Result<Element, JsValue> {
    let link = ElementBuilder::new("a")?
        .class("btn-secondary")
        .attr("href", "#/")?
        .text("Return to Home")
        .build();
    Ok(link)
}
