// ============================================================================
// STATIC PAGES - Informational screens
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};

fn page(title: &str, paragraphs: &[&str]) -> Result<Element, JsValue> {
    let screen = ElementBuilder::new("div")?.class("screen static-page").build();
    let heading = ElementBuilder::new("h2")?.text(title).build();
    append_child(&screen, &heading)?;
    for text in paragraphs {
        let paragraph = ElementBuilder::new("p")?.text(text).build();
        append_child(&screen, &paragraph)?;
    }
    Ok(screen)
}

pub fn render_about() -> Result<Element, JsValue> {
    page(
        "About Royal Bus",
        &[
            "Royal Bus connects major cities and their districts with daily departures \
             on standard and mini coaches.",
            "Book online, pick your seats, and pay by card or in cash at the counter.",
        ],
    )
}

pub fn render_contact() -> Result<Element, JsValue> {
    page(
        "Contact",
        &[
            "Customer service is available every day from 8:00 to 22:00.",
            "Hotline: 16128",
            "Email: support@royalbus.example",
        ],
    )
}

pub fn render_privacy() -> Result<Element, JsValue> {
    page(
        "Privacy",
        &[
            "We only store the data needed to process your bookings: your account \
             details and your booking history.",
            "Payment card data is handled entirely by our payment provider and never \
             reaches our servers.",
        ],
    )
}
