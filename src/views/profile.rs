// ============================================================================
// PROFILE VIEW - User record and paginated booking history
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, get_element_by_id, on_click, set_attribute, set_inner_html, set_text_content,
    ElementBuilder,
};
use crate::models::booking::{BookingStatus, UserType};
use crate::models::profile::ProfileResponse;
use crate::state::app_state::AppState;
use crate::state::route::{self, Route};
use crate::utils::format::{format_date, format_price, format_time};
use crate::viewmodels::ProfileViewModel;

pub fn render_profile(state: &AppState) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("profile-screen").build();

    let title = ElementBuilder::new("h1")?.class("profile-title").text("My Profile").build();
    append_child(&screen, &title)?;

    let content = ElementBuilder::new("div")?.id("profile-content")?.class("profile-content").build();
    let spinner = ElementBuilder::new("div")?.class("spinner").build();
    append_child(&content, &spinner)?;
    append_child(&screen, &content)?;

    load_profile_page(state.clone(), 1);

    Ok(screen)
}

/// Fetch one history page and render it into the content container.
fn load_profile_page(state: AppState, page: u32) {
    spawn_local(async move {
        let vm = ProfileViewModel::new();
        match vm.load_page(&state.auth, page).await {
            Ok(profile) => {
                log::info!("👤 [PROFILE] Page {} loaded: {} bookings", page, profile.bookings.len());
                if let Some(container) = get_element_by_id("profile-content") {
                    let profile = Rc::new(RefCell::new(profile));
                    let _ = render_profile_content(&state, &container, profile, page);
                }
            }
            Err(error) => {
                log::error!("❌ [PROFILE] {}", error);
                if let Some(container) = get_element_by_id("profile-content") {
                    let _ = render_profile_error(&state, &container, page);
                }
            }
        }
    });
}

fn render_profile_error(state: &AppState, container: &Element, page: u32) -> Result<(), JsValue> {
    set_inner_html(container, "");

    let card = ElementBuilder::new("div")?.class("warning-card").build();
    let message = ElementBuilder::new("p")?.text("Failed to load profile").build();
    append_child(&card, &message)?;

    let retry = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-primary")
        .text("Try Again")
        .build();
    {
        let state = state.clone();
        on_click(&retry, move |_| {
            load_profile_page(state.clone(), page);
        })?;
    }
    append_child(&card, &retry)?;

    append_child(container, &card)?;
    Ok(())
}

fn render_profile_content(
    state: &AppState,
    container: &Element,
    profile: Rc<RefCell<ProfileResponse>>,
    page: u32,
) -> Result<(), JsValue> {
    set_inner_html(container, "");

    let snapshot = profile.borrow().clone();

    // User card
    let user_card = ElementBuilder::new("div")?.class("user-card").build();
    let initial = snapshot.user.name.chars().next().map(|c| c.to_uppercase().to_string());
    let avatar = ElementBuilder::new("div")?
        .class("user-avatar")
        .text(initial.as_deref().unwrap_or("?"))
        .build();
    append_child(&user_card, &avatar)?;

    let details = ElementBuilder::new("div")?.class("user-details").build();
    let name = ElementBuilder::new("h2")?.text(&snapshot.user.name).build();
    append_child(&details, &name)?;
    if let Some(user_type) = snapshot.user.user_type {
        let badge = ElementBuilder::new("span")?
            .class("user-badge")
            .text(&user_type.to_string())
            .build();
        append_child(&details, &badge)?;
    }
    if let Some(phone) = &snapshot.user.phone_number {
        let phone = ElementBuilder::new("p")?.class("user-contact").text(phone).build();
        append_child(&details, &phone)?;
    }
    let email = ElementBuilder::new("p")?.class("user-contact").text(&snapshot.user.email).build();
    append_child(&details, &email)?;
    append_child(&user_card, &details)?;
    append_child(container, &user_card)?;

    let heading = ElementBuilder::new("h3")?.class("bookings-heading").text("My Bookings").build();
    append_child(container, &heading)?;

    if snapshot.bookings.is_empty() {
        let empty = ElementBuilder::new("div")?.class("bookings-empty").build();
        let title = ElementBuilder::new("h3")?.text("No bookings found").build();
        let hint = ElementBuilder::new("p")?.text("You haven't made any bookings yet.").build();
        let browse = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn-primary")
            .text("Browse Available Trips")
            .build();
        on_click(&browse, move |_| {
            route::navigate(&Route::Home);
        })?;
        append_child(&empty, &title)?;
        append_child(&empty, &hint)?;
        append_child(&empty, &browse)?;
        append_child(container, &empty)?;
        return Ok(());
    }

    let is_admin = snapshot.user.user_type == Some(UserType::Admin);
    let grid = ElementBuilder::new("div")?.class("bookings-grid").build();

    for (index, booking) in snapshot.bookings.iter().enumerate() {
        let card = ElementBuilder::new("div")?.class("booking-card").build();

        // Header: route + status badge
        let header = ElementBuilder::new("div")?.class("booking-card-header").build();
        let journey = ElementBuilder::new("div")?
            .class("booking-route")
            .text(&format!(
                "{} → {}",
                booking.trip.start_location.name, booking.trip.destination.name
            ))
            .build();
        let status = ElementBuilder::new("span")?
            .class(status_class(booking.status))
            .text(&booking.status.to_string())
            .build();
        append_child(&header, &journey)?;
        append_child(&header, &status)?;
        append_child(&card, &header)?;

        let when = ElementBuilder::new("p")?
            .class("booking-when")
            .text(&format!(
                "{} · {}",
                format_date(&booking.trip.departure_date),
                format_time(&booking.trip.departure_date)
            ))
            .build();
        append_child(&card, &when)?;

        let seat_numbers = booking
            .selected_seats
            .iter()
            .map(|seat| seat.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        for (label, value) in [
            ("Seats", seat_numbers),
            ("Bus Type", booking.trip.bus_type.clone().unwrap_or_else(|| "N/A".into())),
            ("Total Price", format_price(booking.total_price)),
            ("Payment", booking.payment_type.clone().unwrap_or_else(|| "N/A".into())),
        ] {
            let cell = ElementBuilder::new("div")?.class("booking-field").build();
            let caption = ElementBuilder::new("p")?.class("booking-field-label").text(label).build();
            let content = ElementBuilder::new("p")?.class("booking-field-value").text(&value).build();
            append_child(&cell, &caption)?;
            append_child(&cell, &content)?;
            append_child(&card, &cell)?;
        }

        let ticket = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn-secondary")
            .text("View Ticket")
            .build();
        {
            let order_id = booking.id;
            on_click(&ticket, move |_| {
                route::navigate(&Route::BookingSuccess { order_id: Some(order_id), success: true });
            })?;
        }
        append_child(&card, &ticket)?;

        if is_admin && booking.status != BookingStatus::Cancelled {
            let cancel = ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-cancel")
                .id(&format!("cancel-booking-{}", booking.id))?
                .text("Cancel Booking")
                .build();
            {
                let state = state.clone();
                let container = container.clone();
                let profile = profile.clone();
                let booking_id = booking.id;
                on_click(&cancel, move |_| {
                    let confirmed = web_sys::window()
                        .and_then(|window| {
                            window
                                .confirm_with_message(&format!(
                                    "Are you sure you want to cancel Booking #{}? This action cannot be undone.",
                                    booking_id
                                ))
                                .ok()
                        })
                        .unwrap_or(false);
                    if !confirmed {
                        return;
                    }

                    if let Some(button) = get_element_by_id(&format!("cancel-booking-{}", booking_id)) {
                        set_text_content(&button, "Cancelling...");
                        let _ = set_attribute(&button, "disabled", "true");
                    }

                    let state = state.clone();
                    let container = container.clone();
                    let profile = profile.clone();
                    spawn_local(async move {
                        let vm = ProfileViewModel::new();
                        match vm.cancel_booking(&state.auth, booking_id).await {
                            Ok(()) => {
                                if let Some(entry) =
                                    profile.borrow_mut().bookings.get_mut(index)
                                {
                                    entry.status = BookingStatus::Cancelled;
                                }
                                alert(&format!("Booking #{} cancelled successfully!", booking_id));
                            }
                            Err(message) => {
                                let message = if message.is_empty() {
                                    "Failed to cancel booking".to_string()
                                } else {
                                    message
                                };
                                alert(&message);
                            }
                        }
                        let _ = render_profile_content(&state, &container, profile, page);
                    });
                })?;
            }
            append_child(&card, &cancel)?;
        }

        append_child(&grid, &card)?;
    }
    append_child(container, &grid)?;

    // Pagination
    let total_pages = snapshot.pagination.total_pages.max(1);
    let pagination = ElementBuilder::new("div")?.class("pagination").build();

    let previous = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-page")
        .text("Previous")
        .build();
    if page <= 1 {
        set_attribute(&previous, "disabled", "true")?;
    } else {
        let state = state.clone();
        on_click(&previous, move |_| {
            load_profile_page(state.clone(), page - 1);
        })?;
    }
    append_child(&pagination, &previous)?;

    let indicator = ElementBuilder::new("span")?
        .class("page-indicator")
        .text(&format!("Page {} of {}", page, total_pages))
        .build();
    append_child(&pagination, &indicator)?;

    let next = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-page")
        .text("Next")
        .build();
    if page >= total_pages {
        set_attribute(&next, "disabled", "true")?;
    } else {
        let state = state.clone();
        on_click(&next, move |_| {
            load_profile_page(state.clone(), page + 1);
        })?;
    }
    append_child(&pagination, &next)?;

    append_child(container, &pagination)?;
    Ok(())
}

fn status_class(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "status-badge status-confirmed",
        BookingStatus::Pending => "status-badge status-pending",
        BookingStatus::Cancelled => "status-badge status-cancelled",
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
