// ============================================================================
// NAVBAR - Top navigation, rendered on every screen
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::app_state::AppState;
use crate::state::route::{self, Route};
use crate::viewmodels::SessionViewModel;

pub fn render_navbar(state: &AppState) -> Result<Element, JsValue> {
    let nav = ElementBuilder::new("nav")?.class("navbar").build();

    let brand = ElementBuilder::new("a")?
        .class("navbar-brand")
        .attr("href", "#/")?
        .text("Royal Bus")
        .build();
    append_child(&nav, &brand)?;

    let links = ElementBuilder::new("div")?.class("navbar-links").build();
    for (label, href) in [
        ("Search Trips", "#/trips/search"),
        ("About", "#/about"),
        ("Contact", "#/contact"),
    ] {
        let link = ElementBuilder::new("a")?
            .class("navbar-link")
            .attr("href", href)?
            .text(label)
            .build();
        append_child(&links, &link)?;
    }
    append_child(&nav, &links)?;

    let session_area = ElementBuilder::new("div")?.class("navbar-session").build();
    if state.auth.is_authenticated() {
        let profile = ElementBuilder::new("a")?
            .class("navbar-link")
            .attr("href", "#/profile")?
            .text("My Profile")
            .build();
        append_child(&session_area, &profile)?;

        let sign_out = ElementBuilder::new("button")?
            .attr("type", "button")?
            .class("btn-signout")
            .text("Sign out")
            .build();
        {
            let state = state.clone();
            on_click(&sign_out, move |_| {
                let state = state.clone();
                spawn_local(async move {
                    let vm = SessionViewModel::new();
                    vm.logout(&state.auth).await;
                    route::navigate(&Route::Login);
                    state.notify_subscribers();
                });
            })?;
        }
        append_child(&session_area, &sign_out)?;
    } else {
        let sign_in = ElementBuilder::new("a")?
            .class("navbar-link")
            .attr("href", "#/login")?
            .text("Sign in")
            .build();
        let sign_up = ElementBuilder::new("a")?
            .class("navbar-link navbar-link-accent")
            .attr("href", "#/register")?
            .text("Sign up")
            .build();
        append_child(&session_area, &sign_in)?;
        append_child(&session_area, &sign_up)?;
    }
    append_child(&nav, &session_area)?;

    Ok(nav)
}
