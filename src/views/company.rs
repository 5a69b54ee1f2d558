// ============================================================================
// COMPANY VIEW - resumen mensual de la empresa, todas las sucursales
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, input_value, on_click, on_input, ElementBuilder};
use crate::models::{BranchRow, MonthRow};
use crate::services::{summary_service, ApiClient};
use crate::state::AppState;
use crate::utils::dates::format_month_header;
use crate::utils::format_naira;

/// Parsear el valor de un <input type="month">: "2024-11" -> (2024, 11)
pub fn parse_month_value(raw: &str) -> Option<(i32, u32)> {
    let (year, month) = raw.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if (1..=12).contains(&month) {
        Some((year, month))
    } else {
        None
    }
}

/// Tabla mensual: fila por fecha con datos, expandible por sucursal y
/// luego por desglose de items
pub fn render_company(state: &AppState) -> Result<Element, JsValue> {
    let view = ElementBuilder::new("div")?.class("company-view").build();
    let (year, month) = *state.selected_month.borrow();

    let header = ElementBuilder::new("div")?.class("view-header").build();
    append_child(
        &header,
        &ElementBuilder::new("h2")?
            .class("view-title")
            .text("Company")
            .build(),
    )?;
    append_child(
        &header,
        &ElementBuilder::new("p")?
            .class("view-subtitle")
            .text(&format_month_header(year, month))
            .build(),
    )?;

    // Selector de mes: cada cambio recarga el mes completo
    let month_input = ElementBuilder::new("input")?
        .class("month-filter")
        .attr("type", "month")?
        .attr("value", &format!("{}-{:02}", year, month))?
        .build();
    {
        let state = state.clone();
        let target = month_input.clone();
        on_input(&month_input, move |_| {
            let Some((year, month)) = parse_month_value(&input_value(&target)) else {
                return;
            };
            *state.selected_month.borrow_mut() = (year, month);
            let state = state.clone();
            spawn_local(async move {
                let client = ApiClient::new(state.auth.clone());
                summary_service::fetch_company_month(&client, &state, year, month).await;
            });
        })?;
    }
    append_child(&header, &month_input)?;

    // Búsqueda por etiqueta de fecha ("November 22, 2024")
    let search_input = ElementBuilder::new("input")?
        .class("search-filter")
        .attr("type", "search")?
        .attr("placeholder", "Search by date...")?
        .attr("value", &state.company_search.borrow())?
        .build();
    {
        let state = state.clone();
        let target = search_input.clone();
        on_input(&search_input, move |_| {
            *state.company_search.borrow_mut() = input_value(&target);
            state.notify_change();
        })?;
    }
    append_child(&header, &search_input)?;
    append_child(&view, &header)?;

    if *state.company_loading.borrow() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("loading-message")
                .text("Loading month...")
                .build(),
        )?;
        return Ok(view);
    }

    let search = state.company_search.borrow().to_lowercase();
    let rows = state.month_rows.borrow();
    let visible: Vec<&MonthRow> = rows
        .iter()
        .filter(|row| search.is_empty() || row.date_label.to_lowercase().contains(&search))
        .collect();

    if visible.is_empty() {
        append_child(
            &view,
            &ElementBuilder::new("p")?
                .class("empty-message")
                .text("No records for this month")
                .build(),
        )?;
        return Ok(view);
    }

    let table = ElementBuilder::new("div")?.class("company-table").build();
    for row in visible {
        append_child(&table, &date_row(state, row)?)?;
        if state.expanded_dates.borrow().contains(&row.id) {
            for branch in &row.branches {
                append_child(&table, &branch_row(state, &row.id, branch)?)?;
                if state.is_branch_expanded(&row.id, &branch.branch_id) {
                    append_child(&table, &items_breakdown(branch)?)?;
                }
            }
        }
    }
    append_child(&view, &table)?;

    Ok(view)
}

fn date_row(state: &AppState, row: &MonthRow) -> Result<Element, JsValue> {
    let expanded = state.expanded_dates.borrow().contains(&row.id);
    let el = ElementBuilder::new("div")?
        .class("table-row date-row")
        .build();
    for value in [
        row.date_label.clone(),
        format_naira(row.total_earnings),
        format_naira(row.company_share),
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
            state.toggle_date_row(&id);
        })?;
    }
    append_child(&el, &toggle)?;
    Ok(el)
}

fn branch_row(state: &AppState, date_id: &str, branch: &BranchRow) -> Result<Element, JsValue> {
    let expanded = state.is_branch_expanded(date_id, &branch.branch_id);
    let el = ElementBuilder::new("div")?
        .class("table-row branch-row")
        .build();
    for value in [
        branch.branch_name.clone(),
        format_naira(branch.total_earnings),
        format_naira(branch.company_share),
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
        let date_id = date_id.to_string();
        let branch_id = branch.branch_id.clone();
        on_click(&toggle, move |_| {
            state.toggle_branch_row(&date_id, &branch_id);
        })?;
    }
    append_child(&el, &toggle)?;
    Ok(el)
}

/// Desglose de items lavados de una sucursal en la fecha
fn items_breakdown(branch: &BranchRow) -> Result<Element, JsValue> {
    let breakdown = ElementBuilder::new("div")?.class("items-breakdown").build();
    for item in &branch.items {
        let line = ElementBuilder::new("div")?
            .class("table-row item-row")
            .build();
        for value in [
            item.item_name.clone(),
            format!("x{}", item.quantity),
            format_naira(item.company_earning),
        ] {
            append_child(
                &line,
                &ElementBuilder::new("span")?
                    .class("table-cell")
                    .text(&value)
                    .build(),
            )?;
        }
        append_child(&breakdown, &line)?;
    }
    Ok(breakdown)
}

#[cfg(test)]
mod tests {
    use super::parse_month_value;

    #[test]
    fn month_input_values_parse_to_year_month() {
        assert_eq!(parse_month_value("2024-11"), Some((2024, 11)));
        assert_eq!(parse_month_value("2025-01"), Some((2025, 1)));
    }

    #[test]
    fn malformed_month_values_are_rejected() {
        assert_eq!(parse_month_value(""), None);
        assert_eq!(parse_month_value("2024"), None);
        assert_eq!(parse_month_value("2024-13"), None);
        assert_eq!(parse_month_value("2024-00"), None);
    }
}
