// ============================================================================
// RUG VIEW - lavado de alfombras, precio acordado por alfombra
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{alert, append_child, on_click, ElementBuilder};
use crate::models::{BookingInput, BookingItems, ItemSelection};
use crate::services::{create_booking, ApiClient};
use crate::state::{AppState, Route};
use crate::views::booking::{
    confirm_modal, field_value, payment_select, payment_value, text_field, view_header,
};

/// Formulario de alfombras: sin patente ni lista de precios, el precio
/// se acuerda con el cliente y se manda como customPrice
pub fn render_rug(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("div")?.class("booking-view").build();
    append_child(&view, &view_header(state, "Rug Wash")?)?;

    let form = ElementBuilder::new("div")?.class("booking-form").build();
    append_child(
        &form,
        &text_field("rug-customer", "Customer Name", "text")?,
    )?;
    append_child(&form, &text_field("rug-phone", "Customer Phone", "tel")?)?;
    append_child(&form, &text_field("rug-washer", "Washer Name", "text")?)?;
    append_child(&form, &text_field("rug-price", "Agreed Price", "number")?)?;
    append_child(&form, &payment_select()?)?;

    let pay_button = ElementBuilder::new("button")?
        .class("pay-button")
        .text("Pay")
        .build();
    append_child(&form, &pay_button)?;
    append_child(&view, &form)?;

    let (modal, confirm) = confirm_modal()?;
    append_child(&view, &modal)?;

    {
        let modal = modal.clone();
        on_click(&pay_button, move |_| {
            if field_value("rug-washer").trim().is_empty() {
                alert("Washer name is required");
                return;
            }
            if parse_price(&field_value("rug-price")).is_none() {
                alert("Enter a valid price");
                return;
            }
            modal.class_list().remove_1("hidden").ok();
        })?;
    }

    {
        let state = state.clone();
        let modal = modal.clone();
        on_click(&confirm, move |_| {
            if *state.booking_processing.borrow() {
                return;
            }
            let Some(price) = parse_price(&field_value("rug-price")) else {
                return;
            };
            let input = BookingInput {
                plate_number: None,
                car_model: None,
                customer_name: Some(field_value("rug-customer")),
                customer_phone: Some(field_value("rug-phone")),
                washer: field_value("rug-washer"),
                payment_method: payment_value(),
                items: BookingItems::Selections(vec![ItemSelection {
                    name: "Rug".to_string(),
                    price,
                }]),
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

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| *p > 0.0)
}

#[cfg(test)]
mod tests {
    use super::parse_price;

    #[test]
    fn rejects_empty_zero_and_garbage_prices() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("-50"), None);
        assert_eq!(parse_price("abc"), None);
    }

    #[test]
    fn accepts_positive_prices_with_whitespace() {
        assert_eq!(parse_price(" 1500 "), Some(1500.0));
        assert_eq!(parse_price("1500.5"), Some(1500.5));
    }
}
