// ============================================================================
// APP - Application shell
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::state::app_state::AppState;
use crate::viewmodels::SessionViewModel;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Option<Element>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new();

        // Resolve the persisted session asynchronously: the auth status stays
        // Unknown until this task runs, so guarded screens show a splash
        // instead of trusting storage presence synchronously.
        {
            let auth = state.auth.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let vm = SessionViewModel::new();
                vm.restore_into(&auth);
                crate::rerender_app();
            });
        }

        // Re-render on state changes, batched through a zero-delay timeout
        state.subscribe_to_changes(move || {
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self { state, root: Some(root) })
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        if let Some(root) = &self.root {
            set_inner_html(root, "");
            let view = render_app(&self.state)?;
            append_child(root, &view)?;
        }
        Ok(())
    }
}
