// ============================================================================
// RESET PASSWORD VIEW
// ============================================================================
// The reset link carries `token` and `uid` query parameters; both must be
// present for the form to be usable.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, get_element_by_id, on_submit, set_attribute, set_text_content, ElementBuilder,
};
use crate::services::api_client::{ApiClient, ApiError};
use crate::state::app_state::AppState;
use crate::state::route::{self, Route};
use crate::views::login::text_input_group;

pub fn render_reset_password(
    state: &AppState,
    token: Option<String>,
    uid: Option<String>,
) -> Result<Element, JsValue> {
    let _ = state;
    let password = Rc::new(RefCell::new(String::new()));

    let screen = ElementBuilder::new("div")?.class("reset-screen").build();
    let container = ElementBuilder::new("div")?.class("auth-container").build();

    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let title = ElementBuilder::new("h1")?.text("Set new password").build();
    let subtitle = ElementBuilder::new("p")?.text("Enter your new password below.").build();
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;
    append_child(&container, &header)?;

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    append_child(
        &form,
        &text_input_group("reset-password", "New Password", "password", "••••••••", password.clone())?,
    )?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Reset Password")
        .build();
    let usable = token.is_some() && uid.is_some();
    if !usable {
        set_attribute(&submit, "disabled", "true")?;
    }
    append_child(&form, &submit)?;

    {
        let token = token.clone();
        let uid = uid.clone();
        on_submit(&form, move |event| {
            event.prevent_default();

            let (token, uid) = match (token.clone(), uid.clone()) {
                (Some(token), Some(uid)) => (token, uid),
                _ => return,
            };
            let password_value = password.borrow().clone();
            if password_value.len() < 8 {
                show_message("Password must be at least 8 characters");
                return;
            }
            show_message("");

            spawn_local(async move {
                let api = ApiClient::new();
                match api.reset_password(&token, &uid, &password_value).await {
                    Ok(response) => {
                        let message = response
                            .message
                            .unwrap_or_else(|| "Password reset successfully.".to_string());
                        show_message(&message);
                        // brief pause so the message is readable, then back to login
                        Timeout::new(2_000, || {
                            route::navigate(&Route::Login);
                        })
                        .forget();
                    }
                    Err(ApiError::Server { message, .. }) => show_message(&message),
                    Err(_) => show_message("Something went wrong"),
                }
            });
        })?;
    }

    append_child(&container, &form)?;

    let message = ElementBuilder::new("div")?
        .id("reset-message")?
        .class("form-message")
        .build();
    if !usable {
        set_text_content(&message, "Invalid or missing reset parameters");
    }
    append_child(&container, &message)?;

    append_child(&screen, &container)?;
    Ok(screen)
}

fn show_message(message: &str) {
    if let Some(banner) = get_element_by_id("reset-message") {
        set_text_content(&banner, message);
    }
}
