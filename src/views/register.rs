// ============================================================================
// REGISTER VIEW
// ============================================================================
// Client-side field validation runs before any network call; server-side
// field errors come back keyed by field name and land next to their inputs.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_text_content, ElementBuilder};
use crate::dom::on_submit;
use crate::models::auth::RegisterRequest;
use crate::services::api_client::{ApiClient, RegisterError};
use crate::state::app_state::AppState;
use crate::state::route::{self, Route};
use crate::views::login::text_input_group;

pub(crate) const FIELD_NAME: &str = "name";
pub(crate) const FIELD_EMAIL: &str = "email";
pub(crate) const FIELD_PHONE: &str = "phone_number";
pub(crate) const FIELD_PASSWORD: &str = "password";

/// Validate the registration form. Returns one message per offending
/// field; an empty list means the form may be submitted.
pub(crate) fn validate_registration(request: &RegisterRequest) -> Vec<(&'static str, String)> {
    let mut errors = Vec::new();

    if request.name.trim().is_empty() {
        errors.push((FIELD_NAME, "Name is required".to_string()));
    }

    if request.email.trim().is_empty() {
        errors.push((FIELD_EMAIL, "Email is required".to_string()));
    } else if !is_valid_email(&request.email) {
        errors.push((FIELD_EMAIL, "Invalid email address".to_string()));
    }

    if request.phone_number.trim().is_empty() {
        errors.push((FIELD_PHONE, "Phone number is required".to_string()));
    } else if request.phone_number.len() != 11
        || !request.phone_number.chars().all(|c| c.is_ascii_digit())
    {
        errors.push((FIELD_PHONE, "Phone number must be exactly 11 digits".to_string()));
    }

    if request.password.is_empty() {
        errors.push((FIELD_PASSWORD, "Password is required".to_string()));
    } else if request.password.len() < 8 {
        errors.push((FIELD_PASSWORD, "Password must be at least 8 characters".to_string()));
    }

    errors
}

/// local@domain.tld with no whitespace, mirroring the form's address check.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.split('.').count() >= 2
                && domain.split('.').all(|segment| !segment.is_empty())
        }
        _ => false,
    }
}

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    let name = Rc::new(RefCell::new(String::new()));
    let email = Rc::new(RefCell::new(String::new()));
    let phone = Rc::new(RefCell::new(String::new()));
    let password = Rc::new(RefCell::new(String::new()));
    let _ = state;

    let screen = ElementBuilder::new("div")?.class("register-screen").build();
    let container = ElementBuilder::new("div")?.class("auth-container").build();

    let header = ElementBuilder::new("div")?.class("auth-header").build();
    let title = ElementBuilder::new("h1")?.text("Create your account").build();
    let subtitle = ElementBuilder::new("p")?.text("Already have an account? ").build();
    let login_link = ElementBuilder::new("a")?.attr("href", "#/login")?.text("Sign in").build();
    append_child(&subtitle, &login_link)?;
    append_child(&header, &title)?;
    append_child(&header, &subtitle)?;
    append_child(&container, &header)?;

    let form = ElementBuilder::new("form")?.class("auth-form").build();
    append_child(&form, &field_with_error(FIELD_NAME, "Name", "text", "Your name", name.clone())?)?;
    append_child(
        &form,
        &field_with_error(FIELD_EMAIL, "Email", "email", "you@example.com", email.clone())?,
    )?;
    append_child(
        &form,
        &field_with_error(FIELD_PHONE, "Phone", "text", "11-digit phone number", phone.clone())?,
    )?;
    append_child(
        &form,
        &field_with_error(FIELD_PASSWORD, "Password", "password", "••••••••", password.clone())?,
    )?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-primary")
        .text("Create Account")
        .build();
    append_child(&form, &submit)?;

    {
        on_submit(&form, move |event| {
            event.prevent_default();

            let request = RegisterRequest {
                name: name.borrow().clone(),
                email: email.borrow().clone(),
                phone_number: phone.borrow().clone(),
                password: password.borrow().clone(),
            };

            clear_field_errors();
            show_message("");

            let errors = validate_registration(&request);
            if !errors.is_empty() {
                for (field, message) in errors {
                    show_field_error(field, &message);
                }
                return;
            }

            spawn_local(async move {
                let api = ApiClient::new();
                match api.register(&request).await {
                    Ok(()) => {
                        log::info!("✅ [REGISTER] Account created for {}", request.email);
                        route::navigate(&Route::Login);
                    }
                    Err(RegisterError::Fields(fields)) => {
                        for (field, messages) in fields {
                            if let Some(first) = messages.first() {
                                show_field_error(&field, first);
                            }
                        }
                        show_message("Registration failed.");
                    }
                    Err(RegisterError::Api(error)) => {
                        log::error!("❌ [REGISTER] {}", error);
                        show_message("Error: Something went wrong.");
                    }
                }
            });
        })?;
    }

    append_child(&container, &form)?;

    let message = ElementBuilder::new("div")?
        .id("register-message")?
        .class("form-error")
        .build();
    append_child(&container, &message)?;

    append_child(&screen, &container)?;
    Ok(screen)
}

fn field_with_error(
    field: &str,
    label: &str,
    input_type: &str,
    placeholder: &str,
    value: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
    let wrapper = ElementBuilder::new("div")?.class("form-field").build();
    let group = text_input_group(
        &format!("register-{}", field),
        label,
        input_type,
        placeholder,
        value,
    )?;
    append_child(&wrapper, &group)?;

    let error = ElementBuilder::new("p")?
        .id(&format!("register-error-{}", field))?
        .class("field-error")
        .build();
    append_child(&wrapper, &error)?;
    Ok(wrapper)
}

fn show_field_error(field: &str, message: &str) {
    if let Some(slot) = get_element_by_id(&format!("register-error-{}", field)) {
        set_text_content(&slot, message);
    }
}

fn clear_field_errors() {
    for field in [FIELD_NAME, FIELD_EMAIL, FIELD_PHONE, FIELD_PASSWORD] {
        show_field_error(field, "");
    }
}

fn show_message(message: &str) {
    if let Some(banner) = get_element_by_id("register-message") {
        set_text_content(&banner, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, phone: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            phone_number: phone.into(),
            password: password.into(),
        }
    }

    #[test]
    fn a_complete_form_passes() {
        let errors =
            validate_registration(&request("Mona", "mona@example.com", "01234567890", "s3cretpw"));
        assert!(errors.is_empty());
    }

    #[test]
    fn malformed_email_is_rejected() {
        let errors =
            validate_registration(&request("Mona", "mona@example", "01234567890", "s3cretpw"));
        assert_eq!(errors, vec![(FIELD_EMAIL, "Invalid email address".to_string())]);
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(is_valid_email("mona@mail.example.com"));
    }

    #[test]
    fn phone_must_be_exactly_eleven_digits() {
        let errors =
            validate_registration(&request("Mona", "mona@example.com", "0123456789", "s3cretpw"));
        assert_eq!(
            errors,
            vec![(FIELD_PHONE, "Phone number must be exactly 11 digits".to_string())]
        );
        let errors =
            validate_registration(&request("Mona", "mona@example.com", "0123456789a", "s3cretpw"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn short_password_is_rejected() {
        let errors =
            validate_registration(&request("Mona", "mona@example.com", "01234567890", "short"));
        assert_eq!(
            errors,
            vec![(FIELD_PASSWORD, "Password must be at least 8 characters".to_string())]
        );
    }

    #[test]
    fn empty_form_reports_every_field() {
        let errors = validate_registration(&request("", "", "", ""));
        let fields: Vec<&str> = errors.iter().map(|(field, _)| *field).collect();
        assert_eq!(fields, vec![FIELD_NAME, FIELD_EMAIL, FIELD_PHONE, FIELD_PASSWORD]);
    }
}
