use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};

pub fn render_footer() -> Result<Element, JsValue> {
    let footer = ElementBuilder::new("footer")?.class("footer").build();

    let links = ElementBuilder::new("div")?.class("footer-links").build();
    for (label, href) in [("About", "#/about"), ("Privacy", "#/privacy"), ("Contact", "#/contact")] {
        let link = ElementBuilder::new("a")?.attr("href", href)?.text(label).build();
        append_child(&links, &link)?;
    }
    append_child(&footer, &links)?;

    let note = ElementBuilder::new("p")?
        .class("footer-note")
        .text("Royal Bus · travel across the country in comfort.")
        .build();
    append_child(&footer, &note)?;

    Ok(footer)
}
