// ============================================================================
// LOGIN VIEW
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, get_element_by_id, on_input, on_submit, remove_attribute, set_attribute,
    set_text_content, ElementBuilder,
};
use crate::state::app_state::AppState;
use crate::state::route::{self, Route};
use crate::viewmodels::SessionViewModel;

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    // Local form state lives in closures
    let email = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));

    let screen = ElementBuilder::new("div")?.class("login-screen").build();
    let container = ElementBuilder::new("div")?.class("auth-container").build();

    // Header
    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let title = ElementBuilder::new("h1")?.text("Welcome back").build();
    let subtitle = ElementBuilder::new("p")?.text("Don't have an account? ").build();
    let register_link = ElementBuilder::new("a")?
        .attr("href", "#/register")?
        .text("Sign up")
        .build();
    append_child(&subtitle, &register_link)?;
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;
    append_child(&container, &header)?;

    // Form
    let form = ElementBuilder::new("form")?.class("auth-form").build();
    append_child(
        &form,
        &text_input_group("login-email", "Email", "email", "you@example.com", email.clone())?,
    )?;
    append_child(
        &form,
        &text_input_group("login-password", "Password", "password", "••••••••", password.clone())?,
    )?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .id("login-submit")?
        .class("btn-primary")
        .text("Sign in")
        .build();
    append_child(&form, &submit)?;

    {
        let state = state.clone();
        let email = email.clone();
        let password = password.clone();
        on_submit(&form, move |event| {
            event.prevent_default();

            let email_value = email.borrow().clone();
            let password_value = password.borrow().clone();
            if email_value.is_empty() || password_value.is_empty() {
                show_login_error("Please fill in all fields.");
                return;
            }

            set_submitting(true);
            show_login_error("");

            let state = state.clone();
            spawn_local(async move {
                let vm = SessionViewModel::new();
                match vm.login(&state.auth, &email_value, &password_value).await {
                    Ok(()) => {
                        log::info!("✅ [LOGIN] Signed in, returning to the landing screen");
                        // the global listener re-renders the whole app
                        if let Some(window) = web_sys::window() {
                            if let Ok(event) = web_sys::Event::new("loggedIn") {
                                let _ = window.dispatch_event(&event);
                            }
                        }
                        route::navigate(&Route::Home);
                        state.notify_subscribers();
                    }
                    Err(message) => {
                        log::error!("❌ [LOGIN] {}", message);
                        set_submitting(false);
                        show_login_error(&message);
                    }
                }
            });
        })?;
    }

    append_child(&container, &form)?;

    // Inline error banner
    let error = ElementBuilder::new("div")?
        .id("login-error")?
        .class("form-error")
        .build();
    append_child(&container, &error)?;

    let footer = ElementBuilder::new("p")?
        .class("auth-footer")
        .text("Forgot your password? ")
        .build();
    let reset_link = ElementBuilder::new("a")?
        .attr("href", "#/forgot-password")?
        .text("Reset it")
        .build();
    append_child(&footer, &reset_link)?;
    append_child(&container, &footer)?;

    append_child(&screen, &container)?;
    Ok(screen)
}

fn show_login_error(message: &str) {
    if let Some(banner) = get_element_by_id("login-error") {
        set_text_content(&banner, message);
    }
}

fn set_submitting(submitting: bool) {
    if let Some(button) = get_element_by_id("login-submit") {
        if submitting {
            let _ = set_attribute(&button, "disabled", "true");
        } else {
            let _ = remove_attribute(&button, "disabled");
        }
    }
}

/// Label + input wired to a shared string cell.
pub(crate) fn text_input_group(
    id: &str,
    label_text: &str,
    input_type: &str,
    placeholder: &str,
    value: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
    let group = ElementBuilder::new("div")?.class("form-group").build();

    let label = ElementBuilder::new("label")?.attr("for", id)?.text(label_text).build();
    append_child(&group, &label)?;

    let input = ElementBuilder::new("input")?
        .attr("type", input_type)?
        .id(id)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .attr("value", &value.borrow())?
        .class("form-input")
        .build();
    {
        let value = value.clone();
        on_input(&input, move |event| {
            if let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                *value.borrow_mut() = target.value();
            }
        })?;
    }
    append_child(&group, &input)?;

    Ok(group)
}
