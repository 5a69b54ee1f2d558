// ============================================================================
// BOOKING VIEW - formulario de lavado para un tipo de vehículo
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    alert, append_child, get_element_by_id, input_value, on_change, on_click, select_value,
    set_text_content, ElementBuilder,
};
use crate::models::{BookingInput, BookingItems, ItemSelection, VehicleKind};
use crate::services::{create_booking, ApiClient};
use crate::state::{AppState, Route};
use crate::utils::format_naira;

const PAYMENT_METHODS: [&str; 2] = ["Cash", "Transfer"];

/// Formulario de lavado: datos del auto, items con total acumulado,
/// washer y método de pago, con modal de confirmación antes del POST
pub fn render_booking(state: &AppState, kind: VehicleKind) -> Result<Element, JsValue> {
    let selected: Rc<RefCell<Vec<ItemSelection>>> = Rc::new(RefCell::new(Vec::new()));

    let view = ElementBuilder::new("div")?.class("booking-view").build();
    append_child(&view, &view_header(state, &format!("{} Wash", kind.label()))?)?;

    let form = ElementBuilder::new("div")?.class("booking-form").build();

    append_child(&form, &text_field("booking-plate", "Plate Number", "text")?)?;
    append_child(&form, &text_field("booking-model", "Car Model", "text")?)?;
    append_child(
        &form,
        &text_field("booking-customer", "Customer Name", "text")?,
    )?;
    append_child(&form, &text_field("booking-phone", "Customer Phone", "tel")?)?;
    append_child(&form, &text_field("booking-washer", "Washer Name", "text")?)?;
    append_child(&form, &payment_select()?)?;

    // Items con total acumulado
    let items_section = ElementBuilder::new("div")?.class("items-section").build();
    append_child(
        &items_section,
        &ElementBuilder::new("h3")?
            .class("items-title")
            .text("Wash Items")
            .build(),
    )?;
    for item in kind.wash_items() {
        let row = ElementBuilder::new("label")?.class("item-row").build();
        let checkbox = ElementBuilder::new("input")?
            .attr("type", "checkbox")?
            .build();
        {
            let selected = selected.clone();
            let item = item.clone();
            on_change(&checkbox, move |_| {
                toggle_selection(&mut selected.borrow_mut(), &item);
                let total: f64 = selected.borrow().iter().map(|i| i.price).sum();
                if let Some(el) = get_element_by_id("booking-total") {
                    set_text_content(&el, &format_naira(total));
                }
            })?;
        }
        append_child(&row, &checkbox)?;
        append_child(
            &row,
            &ElementBuilder::new("span")?
                .class("item-name")
                .text(&item.name)
                .build(),
        )?;
        append_child(
            &row,
            &ElementBuilder::new("span")?
                .class("item-price")
                .text(&format_naira(item.price))
                .build(),
        )?;
        append_child(&items_section, &row)?;
    }
    append_child(&form, &items_section)?;

    let total_row = ElementBuilder::new("div")?
        .class("total-row")
        .child(
            ElementBuilder::new("span")?
                .class("total-label")
                .text("Total")
                .build(),
        )?
        .child(
            ElementBuilder::new("span")?
                .class("total-amount")
                .id("booking-total")?
                .text(&format_naira(0.0))
                .build(),
        )?
        .build();
    append_child(&form, &total_row)?;

    let pay_button = ElementBuilder::new("button")?
        .class("pay-button")
        .text("Pay")
        .build();
    append_child(&form, &pay_button)?;
    append_child(&view, &form)?;

    // Modal de confirmación (oculto hasta validar)
    let (modal, confirm) = confirm_modal()?;
    append_child(&view, &modal)?;

    {
        let selected = selected.clone();
        let modal = modal.clone();
        on_click(&pay_button, move |_| {
            let plate = field_value("booking-plate");
            let washer = field_value("booking-washer");
            if plate.trim().is_empty() {
                alert("Plate number is required");
                return;
            }
            if washer.trim().is_empty() {
                alert("Washer name is required");
                return;
            }
            if selected.borrow().is_empty() {
                alert("Select at least one wash item");
                return;
            }
            let total: f64 = selected.borrow().iter().map(|i| i.price).sum();
            if let Some(el) = get_element_by_id("confirm-summary") {
                set_text_content(
                    &el,
                    &format!(
                        "{} — {} item(s), total {}",
                        plate.trim(),
                        selected.borrow().len(),
                        format_naira(total)
                    ),
                );
            }
            modal.class_list().remove_1("hidden").ok();
        })?;
    }

    // Confirmar: armar el input y disparar el workflow de creación
    {
        let state = state.clone();
        let selected = selected.clone();
        let modal = modal.clone();
        on_click(&confirm, move |_| {
            if *state.booking_processing.borrow() {
                return;
            }
            let input = BookingInput {
                plate_number: Some(field_value("booking-plate")),
                car_model: Some(field_value("booking-model")),
                customer_name: Some(field_value("booking-customer")),
                customer_phone: Some(field_value("booking-phone")),
                washer: field_value("booking-washer"),
                payment_method: payment_value(),
                items: BookingItems::Selections(selected.borrow().clone()),
            };
            let state = state.clone();
            let modal = modal.clone();
            spawn_local(async move {
                let client = ApiClient::new(state.auth.clone());
                let outcome = create_booking(&client, &state, &input).await;
                alert(outcome.message());
                if outcome.is_success() {
                    state.navigate(Route::Entry);
                } else {
                    modal.class_list().add_1("hidden").ok();
                }
            });
        })?;
    }

    Ok(view)
}

/// Header con botón de volver al grid de entrada
pub(super) fn view_header(state: &AppState, title: &str) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("div")?.class("view-header").build();
    let back = ElementBuilder::new("button")?
        .class("back-button")
        .text("← Back")
        .build();
    {
        let state = state.clone();
        on_click(&back, move |_| {
            state.navigate(Route::Entry);
        })?;
    }
    append_child(&header, &back)?;
    append_child(
        &header,
        &ElementBuilder::new("h2")?
            .class("view-title")
            .text(title)
            .build(),
    )?;
    Ok(header)
}

pub(super) fn text_field(id: &str, label: &str, input_type: &str) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .class("form-label")
                .text(label)
                .build(),
        )?
        .child(
            ElementBuilder::new("input")?
                .class("form-input")
                .id(id)?
                .attr("type", input_type)?
                .build(),
        )?
        .build())
}

pub(super) fn payment_select() -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?
        .class("form-input")
        .id("booking-payment")?
        .build();
    for method in PAYMENT_METHODS {
        append_child(
            &select,
            &ElementBuilder::new("option")?
                .attr("value", method)?
                .text(method)
                .build(),
        )?;
    }
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .class("form-label")
                .text("Payment Method")
                .build(),
        )?
        .child(select)?
        .build())
}

/// Devuelve el modal y su botón de confirmar para cablear el submit
pub(super) fn confirm_modal() -> Result<(Element, Element), JsValue> {
    let modal = ElementBuilder::new("div")?
        .class("confirm-modal hidden")
        .build();
    let card = ElementBuilder::new("div")?
        .class("confirm-card")
        .child(
            ElementBuilder::new("h3")?
                .class("confirm-title")
                .text("Confirm Payment")
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("confirm-summary")
                .id("confirm-summary")?
                .build(),
        )?
        .build();

    let actions = ElementBuilder::new("div")?.class("confirm-actions").build();
    let cancel = ElementBuilder::new("button")?
        .class("cancel-button")
        .id("confirm-cancel")?
        .text("Cancel")
        .build();
    {
        let modal = modal.clone();
        on_click(&cancel, move |_| {
            modal.class_list().add_1("hidden").ok();
        })?;
    }
    append_child(&actions, &cancel)?;
    let confirm = ElementBuilder::new("button")?
        .class("confirm-button")
        .text("Confirm")
        .build();
    append_child(&actions, &confirm)?;
    append_child(&card, &actions)?;
    append_child(&modal, &card)?;
    Ok((modal, confirm))
}

pub(super) fn field_value(id: &str) -> String {
    get_element_by_id(id)
        .map(|el| input_value(&el))
        .unwrap_or_default()
}

pub(super) fn payment_value() -> String {
    get_element_by_id("booking-payment")
        .map(|el| select_value(&el))
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "Cash".to_string())
}

fn toggle_selection(selected: &mut Vec<ItemSelection>, item: &ItemSelection) {
    if let Some(pos) = selected.iter().position(|i| i.name == item.name) {
        selected.remove(pos);
    } else {
        selected.push(item.clone());
    }
}
