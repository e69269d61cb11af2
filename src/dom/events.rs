// ============================================================================
// EVENT HANDLING
// ============================================================================
// MEMORY-LEAK MANAGEMENT:
// - For listeners on DOM elements: when the element is destroyed (e.g. via
//   set_inner_html("")), the browser cleans up the attached listeners, so
//   closure.forget() is safe for element-local listeners.
// - Listeners on window/document must only be registered ONCE at app startup,
//   otherwise they accumulate (see lib.rs).
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, InputEvent, MouseEvent};

/// Attach a click handler to an element.
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // closure.forget() keeps the closure alive for the lifetime of the element
    closure.forget();
    Ok(())
}

/// Attach an input handler (fires on every keystroke).
pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(InputEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(InputEvent)>);
    element.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Attach a submit handler to a form. The handler is responsible for
/// calling prevent_default().
pub fn on_submit<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
