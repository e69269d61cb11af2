// ============================================================================
// FORGOT PASSWORD VIEW
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, on_submit, set_text_content, ElementBuilder};
use crate::services::api_client::{ApiClient, ApiError};
use crate::state::app_state::AppState;
use crate::views::login::text_input_group;

pub fn render_forgot_password(state: &AppState) -> Result<Element, JsValue> {
    let _ = state;
    let email = Rc::new(RefCell::new(String::new()));

    let screen = ElementBuilder::new("div")?.class("forgot-screen").build();
    let container = ElementBuilder::new("div")?.class("auth-container").build();

    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let title = ElementBuilder::new("h1")?.text("Reset your password").build();
    let subtitle = ElementBuilder::new("p")?
        .text("Enter your email to receive a password reset link.")
        .build();
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;
    append_child(&container, &header)?;

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    append_child(
        &form,
        &text_input_group("forgot-email", "Email Address", "email", "you@example.com", email.clone())?,
    )?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Send Reset Link")
        .build();
    append_child(&form, &submit)?;

    on_submit(&form, move |event| {
        event.prevent_default();

        let email_value = email.borrow().clone();
        if email_value.is_empty() {
            show_message("Please enter your email address.");
            return;
        }
        show_message("");

        spawn_local(async move {
            let api = ApiClient::new();
            match api.forgot_password(&email_value).await {
                Ok(response) => {
                    let message = response
                        .message
                        .unwrap_or_else(|| "Password reset email sent.".to_string());
                    show_message(&message);
                }
                Err(ApiError::Server { message, .. }) => show_message(&message),
                Err(_) => show_message("Something went wrong"),
            }
        });
    })?;

    append_child(&container, &form)?;

    let message = ElementBuilder::new("div")?
        .id("forgot-message")?
        .class("form-message")
        .build();
    append_child(&container, &message)?;

    let footer = ElementBuilder::new("p")?.class("auth-footer").text("Back to ").build();
    let login_link = ElementBuilder::new("a")?.attr("href", "#/login")?.text("Sign in").build();
    append_child(&footer, &login_link)?;
    append_child(&container, &footer)?;

    append_child(&screen, &container)?;
    Ok(screen)
}

fn show_message(message: &str) {
    if let Some(banner) = get_element_by_id("forgot-message") {
        set_text_content(&banner, message);
    }
}
