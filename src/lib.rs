// ============================================================================
// CARWASH CONSOLE - consola de operación diaria para un car wash
// ============================================================================

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub mod app;
pub mod dom;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

use app::App;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Punto de entrada WASM
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("🚀 [APP] Iniciando Carwash Console");

    let app = App::new()?;
    app.mount();
    app.render()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    log::info!("✅ [APP] Aplicación montada");
    Ok(())
}

/// Re-render de la vista activa (invocado por la suscripción de estado)
pub fn rerender_app() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow().as_ref() {
            if let Err(e) = app.render() {
                log::error!("❌ [APP] Error al re-renderizar: {:?}", e);
            }
        }
    });
}
