// ============================================================================
// WASHERS VIEW - pagos diarios por washer, filas expandibles por servicio
// ============================================================================

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, input_value, on_change, on_click, ElementBuilder};
use crate::models::WasherRow;
use crate::services::{summary_service, ApiClient};
use crate::state::AppState;
use crate::utils::dates::{format_date_for_api, format_long_date, today};
use crate::utils::format_naira;

/// Tabla de pagos diarios: una fila por washer, con filtro de fecha
pub fn render_washers(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("div")?.class("washers-view").build();

    let selected_date = state.washers_date.borrow().unwrap_or_else(today);

    let header = ElementBuilder::new("div")?.class("view-header").build();
    append_child(
        &header,
        &ElementBuilder::new("h2")?
            .class("view-title")
            .text("Staff Payment")
            .build(),
    )?;
    append_child(
        &header,
        &ElementBuilder::new("p")?
            .class("view-subtitle")
            .text(&format_long_date(selected_date))
            .build(),
    )?;

    // Filtro de fecha: re-fetch al cambiar
    let date_input = ElementBuilder::new("input")?
        .class("date-filter")
        .attr("type", "date")?
        .attr("value", &format_date_for_api(selected_date))?
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
                summary_service::fetch_daily_summary(&client, &state, Some(date)).await;
            });
        })?;
    }
    append_child(&header, &date_input)?;
    append_child(&view, &header)?;

    if *state.washers_loading.borrow() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("loading-message")
                .text("Loading...")
                .build(),
        )?;
        return Ok(view);
    }

    if let Some(error) = state.washers_error.borrow().as_ref() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("error-message")
                .text(error)
                .build(),
        )?;
        return Ok(view);
    }

    let rows = state.washer_rows.borrow();
    if rows.is_empty() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("empty-message")
                .text("No washer payments for this date")
                .build(),
        )?;
        return Ok(view);
    }

    let table = ElementBuilder::new("div")?.class("washers-table").build();
    append_child(&table, &header_row()?)?;
    for row in rows.iter() {
        append_child(&table, &washer_row(state, row)?)?;
        if state.expanded_washers.borrow().contains(&row.id) {
            append_child(&table, &detail_rows(row)?)?;
        }
    }
    append_child(&view, &table)?;

    Ok(view)
}

fn header_row() -> Result<Element, JsValue> {
    let row = ElementBuilder::new("div")?
        .class("table-row table-header")
        .build();
    for label in ["Washer", "Phone", "Jobs", "Cars", "Worker Pay", "Company Pay", ""] {
        append_child(
            &row,
            &ElementBuilder::new("span")?
                .class("table-cell")
                .text(label)
                .build(),
        )?;
    }
    Ok(row)
}

fn washer_row(state: &AppState, row: &WasherRow) -> Result<Element, JsValue> {
    let expanded = state.expanded_washers.borrow().contains(&row.id);
    let el = ElementBuilder::new("div")?.class("table-row").build();
    for value in [
        row.name.clone(),
        row.phone.clone(),
        row.total_jobs.to_string(),
        row.cars_washed.to_string(),
        format_naira(row.worker_pay),
        format_naira(row.company_pay),
    ] {
        append_child(
            &el,
            &ElementBuilder::new("span")?
                .class("table-cell")
                .text(&value)
                .build(),
        )?;
    }

    let toggle = ElementBuilder::new("button")?
        .class("expand-button")
        .text(if expanded { "▲" } else { "▼" })
        .build();
    {
        let state = state.clone();
        let id = row.id.clone();
        on_click(&toggle, move |_| {
            state.toggle_washer_row(&id);
        })?;
    }
    append_child(&el, &toggle)?;
    Ok(el)
}

/// Sub-tabla por servicio distinto, con cantidades y split acumulados
fn detail_rows(row: &WasherRow) -> Result<Element, JsValue> {
    let details = ElementBuilder::new("div")?.class("detail-rows").build();
    for detail in &row.details {
        let line = ElementBuilder::new("div")?
            .class("table-row detail-row")
            .build();
        for value in [
            detail.service.clone(),
            format!("x{}", detail.quantity),
            format_naira(detail.worker_earning),
            format_naira(detail.company_earning),
        ] {
            append_child(
                &line,
                &ElementBuilder::new("span")?
                    .class("table-cell")
                    .text(&value)
                    .build(),
            )?;
        }
        append_child(&details, &line)?;
    }
    Ok(details)
}
