// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para re-render
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Lista de subscribers que se notifican ante cualquier cambio de estado.
/// Todo corre en un solo hilo (WASM), así que Rc<RefCell> alcanza.
pub struct Subscribers {
    callbacks: Rc<RefCell<Vec<Box<dyn Fn()>>>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self {
            callbacks: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.callbacks.borrow_mut().push(Box::new(callback));
    }

    /// Notificar a todos los subscribers
    pub fn notify(&self) {
        for callback in self.callbacks.borrow().iter() {
            callback();
        }
    }
}

impl Clone for Subscribers {
    fn clone(&self) -> Self {
        Self {
            callbacks: self.callbacks.clone(),
        }
    }
}

impl Default for Subscribers {
    fn default() -> Self {
        Self::new()
    }
}
