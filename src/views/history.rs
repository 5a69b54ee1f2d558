// ============================================================================
// HISTORY VIEW - historial de transacciones del día
// ============================================================================

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, input_value, on_change, ElementBuilder};
use crate::models::CarWashRecord;
use crate::services::{records_service, ApiClient};
use crate::state::AppState;
use crate::utils::dates::{format_date_for_api, format_timestamp, today};
use crate::utils::format_naira;

/// Lista de transacciones, filtrable por fecha
pub fn render_history(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("div")?.class("history-view").build();

    let header = ElementBuilder::new("div")?.class("view-header").build();
    append_child(
        &header,
        &ElementBuilder::new("h2")?
            .class("view-title")
            .text("Transactions")
            .build(),
    )?;

    let date_input = ElementBuilder::new("input")?
        .class("date-filter")
        .attr("type", "date")?
        .attr("value", &format_date_for_api(today()))?
        .build();
    {
        let state = state.clone();
        let target = date_input.clone();
        on_change(&date_input, move |_| {
            let raw = input_value(&target);
            let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") else {
                return;
            };
            let state = state.clone();
            spawn_local(async move {
                let client = ApiClient::new(state.auth.clone());
                records_service::fetch_records(&client, &state, Some(date), None).await;
            });
        })?;
    }
    append_child(&header, &date_input)?;
    append_child(&view, &header)?;

    if *state.records_loading.borrow() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("loading-message")
                .text("Loading...")
                .build(),
        )?;
        return Ok(view);
    }

    if let Some(error) = state.records_error.borrow().as_ref() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("error-message")
                .text(error)
                .build(),
        )?;
        return Ok(view);
    }

    let records = state.records.borrow();
    if records.is_empty() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("empty-message")
                .text("No transactions for this date")
                .build(),
        )?;
        return Ok(view);
    }

    let list = ElementBuilder::new("div")?.class("history-list").build();
    for record in records.iter() {
        append_child(&list, &record_card(record)?)?;
    }
    append_child(&view, &list)?;

    Ok(view)
}

fn record_card(record: &CarWashRecord) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("div")?.class("record-card").build();

    let title = match (&record.plate_number, &record.vehicle_type) {
        (Some(plate), Some(kind)) => format!("{} — {}", kind, plate),
        (Some(plate), None) => plate.clone(),
        (None, Some(kind)) => kind.clone(),
        (None, None) => "Wash record".to_string(),
    };
    append_child(
        &card,
        &ElementBuilder::new("h3")?
            .class("record-title")
            .text(&title)
            .build(),
    )?;

    let mut meta: Vec<String> = Vec::new();
    if let Some(washer) = &record.washer_name {
        meta.push(format!("Washer: {}", washer));
    }
    if let Some(payment) = &record.payment_method {
        meta.push(format!("Paid by {}", payment));
    }
    if let Some(created) = &record.created_at {
        meta.push(format_timestamp(created));
    }
    append_child(
        &card,
        &ElementBuilder::new("p")?
            .class("record-meta")
            .text(&meta.join(" · "))
            .build(),
    )?;

    let items = record
        .items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if !items.is_empty() {
        append_child(
            &card,
            &ElementBuilder::new("p")?
                .class("record-items")
                .text(&items)
                .build(),
        )?;
    }

    append_child(
        &card,
        &ElementBuilder::new("span")?
            .class("record-amount")
            .text(&format_naira(record.total_amount))
            .build(),
    )?;
    Ok(card)
}
