// ============================================================================
// APP - montaje, suscripción a cambios y re-render
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::state::AppState;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear la aplicación: toma el nodo raíz e hidrata la sesión guardada
    /// ANTES del primer render (y de cualquier request)
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No se encontró el elemento #app"))?;

        let state = AppState::new();
        state.auth.initialize();

        Ok(Self { state, root })
    }

    /// Suscribir el re-render a los cambios de estado. Las notificaciones de
    /// un mismo tick se colapsan en un solo render via Timeout(0).
    pub fn mount(&self) {
        let pending = Rc::new(RefCell::new(false));
        self.state.subscribe_to_changes(move || {
            if *pending.borrow() {
                return;
            }
            *pending.borrow_mut() = true;
            let pending = pending.clone();
            Timeout::new(0, move || {
                *pending.borrow_mut() = false;
                crate::rerender_app();
            })
            .forget();
        });
    }

    /// Render completo: limpiar la raíz y volver a montar la vista activa
    pub fn render(&self) -> Result<(), JsValue> {
        set_inner_html(&self.root, "");
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;
        Ok(())
    }
}
