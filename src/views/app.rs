// ============================================================================
// APP VIEW - Route dispatch and the shared shell
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::auth_state::AuthStatus;
use crate::state::route::{self, Route};
use crate::views::shared::{render_footer, render_navbar};
use crate::views::{
    booking_success, forgot_password, login, profile, register, reset_password, static_pages,
    trip_booking, trip_search,
};

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let route = route::current();
    let app = ElementBuilder::new("div")?.class("app").build();

    append_child(&app, &render_navbar(state)?)?;

    // guarded screens: an unresolved session shows a splash, a missing one
    // falls back to the login view
    let screen = if route.requires_auth() {
        match state.auth.status() {
            AuthStatus::Unknown => render_auth_splash()?,
            AuthStatus::Unauthenticated => login::render_login(state)?,
            AuthStatus::Authenticated => screen_for(&route, state)?,
        }
    } else {
        screen_for(&route, state)?
    };
    append_child(&app, &screen)?;

    append_child(&app, &render_footer()?)?;
    Ok(app)
}

fn screen_for(route: &Route, state: &AppState) -> Result<Element, JsValue> {
    match route {
        Route::Home | Route::TripSearch => trip_search::render_trip_search(state),
        Route::Login => login::render_login(state),
        Route::Register => register::render_register(state),
        Route::ForgotPassword => forgot_password::render_forgot_password(state),
        Route::ResetPassword { token, uid } => {
            reset_password::render_reset_password(state, token.clone(), uid.clone())
        }
        Route::TripBooking { trip_id } => trip_booking::render_trip_booking(state, *trip_id),
        Route::BookingSuccess { order_id, success } => {
            booking_success::render_booking_success(state, *order_id, *success)
        }
        Route::Profile => profile::render_profile(state),
        Route::About => static_pages::render_about(),
        Route::Contact => static_pages::render_contact(),
        Route::Privacy => static_pages::render_privacy(),
        Route::NotFound => render_not_found(),
    }
}

fn render_auth_splash() -> Result<Element, JsValue> {
    let splash = ElementBuilder::new("div")?.class("auth-splash").build();
    let spinner = ElementBuilder::new("div")?.class("spinner").build();
    append_child(&splash, &spinner)?;
    Ok(splash)
}

fn render_not_found() -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("screen not-found").build();
    let title = ElementBuilder::new("h2")?.text("Page not found").build();
    let back = ElementBuilder::new("a")?
        .attr("href", "#/")?
        .text("Back to trip search")
        .build();
    append_child(&screen, &title)?;
    append_child(&screen, &back)?;
    Ok(screen)
}
