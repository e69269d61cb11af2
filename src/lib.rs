// ============================================================================
// ROYAL BUS - BUS TICKET BOOKING APP (PURE RUST/WASM, STRICT MVVM)
// ============================================================================
// - Views: functions that render DOM (no business logic)
// - ViewModels: booking orchestration + session lifecycle
// - Services: API communication and session persistence only
// - State: Rc<RefCell> cells on a single AppState
// - Models: wire-format structures shared with the backend
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_logger::Config;

use crate::app::App;

// Static cell holding the App instance
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook first for usable stack traces
    console_error_panic_hook::set_once();

    wasm_logger::init(Config::default());
    log::info!("🚌 Royal Bus booking app starting");

    let mut app = App::new()?;
    app.render()?;

    APP.with(|cell| {
        *cell.borrow_mut() = Some(app);
    });

    // Global listeners, registered exactly ONCE here: session transitions
    // dispatched by the views, and hash navigation.
    if let Some(window) = web_sys::window() {
        for event_name in ["loggedIn", "loggedOut", "hashchange"] {
            let closure = wasm_bindgen::closure::Closure::wrap(Box::new(
                move |_event: web_sys::Event| {
                    rerender_app();
                },
            )
                as Box<dyn FnMut(web_sys::Event)>);
            window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            // registered once at startup, so forget() cannot accumulate
            closure.forget();
        }
    }

    Ok(())
}

/// Re-render the whole app from the current state.
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(app) = &mut *cell.borrow_mut() {
            if let Err(error) = app.render() {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "❌ [RERENDER] Render failed: {:?}",
                    error
                )));
            }
        }
    });
}
