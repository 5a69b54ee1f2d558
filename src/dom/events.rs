// ============================================================================
// EVENT HANDLING - Helpers para registrar listeners
// ============================================================================
// Los listeners se registran con Closure + forget(). Para listeners en
// elementos del DOM es seguro: cuando el elemento se destruye (p.ej. con
// set_inner_html("")), el navegador limpia los listeners asociados.
// Listeners globales (window/document) deben registrarse UNA sola vez.
// ============================================================================

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, InputEvent, MouseEvent};

/// Click handler simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // forget() mantiene el closure vivo; el navegador lo limpia con el elemento
    closure.forget();
    Ok(())
}

/// Input handler (inputs de texto)
pub fn on_input<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(InputEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(InputEvent)>);
    element.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Change handler (selects)
pub fn on_change<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Submit handler para formularios (hace prevent_default antes de delegar)
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(move |e: Event| {
        e.prevent_default();
        handler(e);
    }) as Box<dyn FnMut(Event)>);
    element.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Valor actual de un input
pub fn input_value(element: &Element) -> String {
    element
        .dyn_ref::<web_sys::HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Valor actual de un select
pub fn select_value(element: &Element) -> String {
    element
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
        .unwrap_or_default()
}
