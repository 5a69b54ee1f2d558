// ============================================================================
// APP SHELL - sidebar de navegación + área de contenido según la ruta
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::services::{auth_service, records_service, summary_service, ApiClient};
use crate::state::{AppState, Route};
use crate::utils::dates::today;
use crate::views::{
    booking::render_booking, company::render_company, entry::render_entry,
    history::render_history, login::render_login, rug::render_rug, washers::render_washers,
};

/// Renderizar la aplicación completa según el estado actual
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    if !state.auth.is_logged_in() {
        return render_login(state);
    }

    let shell = ElementBuilder::new("div")?.class("dashboard-layout").build();
    let sidebar = render_sidebar(state)?;
    let main = ElementBuilder::new("main")?.class("dashboard-main").build();

    let content = match state.current_route() {
        Route::Entry => render_entry(state)?,
        Route::Booking(kind) => render_booking(state, kind)?,
        Route::Rug => render_rug(state)?,
        Route::Washers => render_washers(state)?,
        Route::Company => render_company(state)?,
        Route::History => render_history(state)?,
    };
    append_child(&main, &content)?;

    append_child(&shell, &sidebar)?;
    append_child(&shell, &main)?;
    Ok(shell)
}

fn nav_item(
    state: &AppState,
    label: &str,
    route: Route,
    active: bool,
    on_navigate: impl Fn(&AppState) + 'static,
) -> Result<Element, JsValue> {
    let class = if active {
        "nav-item nav-item-active"
    } else {
        "nav-item"
    };
    let item = ElementBuilder::new("button")?.class(class).text(label).build();
    let state = state.clone();
    on_click(&item, move |_| {
        on_navigate(&state);
        state.navigate(route);
    })?;
    Ok(item)
}

fn render_sidebar(state: &AppState) -> Result<Element, JsValue> {
    let sidebar = ElementBuilder::new("aside")?.class("sidebar").build();

    let brand = ElementBuilder::new("div")?
        .class("sidebar-brand")
        .text("Top-Most Carwash")
        .build();
    append_child(&sidebar, &brand)?;

    if let Some(user) = state.auth.get_user() {
        let who = ElementBuilder::new("div")?
            .class("sidebar-user")
            .text(user.name.as_deref().unwrap_or(&user.email))
            .build();
        append_child(&sidebar, &who)?;
    }

    let nav = ElementBuilder::new("nav")?.class("sidebar-nav").build();

    let route = state.current_route();
    let entry_active = matches!(route, Route::Entry | Route::Booking(_) | Route::Rug);
    append_child(
        &nav,
        &nav_item(state, "Cars Entry", Route::Entry, entry_active, |_| {})?,
    )?;
    append_child(
        &nav,
        &nav_item(
            state,
            "Staff Payment",
            Route::Washers,
            matches!(route, Route::Washers),
            |state| {
                let state = state.clone();
                spawn_local(async move {
                    let client = ApiClient::new(state.auth.clone());
                    summary_service::fetch_daily_summary(&client, &state, None).await;
                });
            },
        )?,
    )?;
    append_child(
        &nav,
        &nav_item(
            state,
            "Company",
            Route::Company,
            matches!(route, Route::Company),
            |state| {
                let state = state.clone();
                spawn_local(async move {
                    let client = ApiClient::new(state.auth.clone());
                    let (year, month) = *state.selected_month.borrow();
                    summary_service::fetch_company_month(&client, &state, year, month).await;
                });
            },
        )?,
    )?;
    append_child(
        &nav,
        &nav_item(
            state,
            "Transactions",
            Route::History,
            matches!(route, Route::History),
            |state| {
                let state = state.clone();
                spawn_local(async move {
                    let client = ApiClient::new(state.auth.clone());
                    records_service::fetch_records(&client, &state, Some(today()), None).await;
                });
            },
        )?,
    )?;
    append_child(&sidebar, &nav)?;

    let logout = ElementBuilder::new("button")?
        .class("logout-button")
        .text("Logout")
        .build();
    {
        let state = state.clone();
        on_click(&logout, move |_| {
            let state = state.clone();
            spawn_local(async move {
                let client = ApiClient::new(state.auth.clone());
                auth_service::logout(&client, &state.auth).await;
                state.navigate(Route::Entry);
            });
        })?;
    }
    append_child(&sidebar, &logout)?;

    Ok(sidebar)
}
