// ============================================================================
// ELEMENT HELPERS - Funciones básicas para manipular DOM
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

/// Obtener window global
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Obtener document
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Obtener elemento por ID
pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

/// Crear elemento
pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()
        .ok_or_else(|| JsValue::from_str("No document"))
        .and_then(|doc| doc.create_element(tag))
}

/// Establecer class name (reemplaza todas las clases)
pub fn set_class_name(element: &Element, class: &str) {
    element.set_class_name(class);
}

/// Establecer text content
pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Establecer inner HTML
pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// Agregar hijo
pub fn append_child(parent: &Element, child: &Element) -> Result<(), JsValue> {
    parent.append_child(child).map(|_| ())
}

/// Establecer atributo
pub fn set_attribute(element: &Element, name: &str, value: &str) -> Result<(), JsValue> {
    element.set_attribute(name, value)
}

/// Mostrar un alert nativo (notificación de éxito/fallo de un booking)
pub fn alert(message: &str) {
    if let Some(win) = window() {
        let _ = win.alert_with_message(message);
    }
}
