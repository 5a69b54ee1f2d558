// ============================================================================
// ENTRY VIEW - grid de tipos de vehículo para iniciar un registro
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::VehicleKind;
use crate::state::{AppState, Route};
use crate::utils::format_naira;

/// Grid de entrada: un card por tipo de vehículo, más alfombras
pub fn render_entry(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("div")?.class("entry-view").build();

    let title = ElementBuilder::new("h2")?
        .class("view-title")
        .text("Cars Entry")
        .build();
    append_child(&view, &title)?;

    let grid = ElementBuilder::new("div")?.class("vehicle-grid").build();

    for kind in VehicleKind::ALL {
        let card = vehicle_card(
            state,
            kind.label(),
            &format!("Basic wash from {}", format_naira(kind.basic_price())),
            Route::Booking(kind),
        )?;
        append_child(&grid, &card)?;
    }

    let rug = vehicle_card(state, "Rug", "Price set per rug", Route::Rug)?;
    append_child(&grid, &rug)?;

    append_child(&view, &grid)?;
    Ok(view)
}

fn vehicle_card(
    state: &AppState,
    label: &str,
    hint: &str,
    route: Route,
) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("button")?
        .class("vehicle-card")
        .child(
            ElementBuilder::new("span")?
                .class("vehicle-card-label")
                .text(label)
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("vehicle-card-hint")
                .text(hint)
                .build(),
        )?
        .build();

    let state = state.clone();
    on_click(&card, move |_| {
        state.navigate(route);
    })?;
    Ok(card)
}
