// ============================================================================
// RECORDS SERVICE - historial de transacciones de lavado
// ============================================================================

use chrono::NaiveDate;

use crate::models::{ApiEnvelope, CarWashRecord};
use crate::services::api_client::{expire_session_if_unauthorized, ApiClient};
use crate::state::AppState;
use crate::utils::format_date_for_api;

/// Armar el path con los filtros opcionales como query params
pub fn records_query(date: Option<NaiveDate>, washer_id: Option<&str>) -> String {
    let mut params: Vec<String> = Vec::new();
    if let Some(d) = date {
        params.push(format!("date={}", format_date_for_api(d)));
    }
    if let Some(id) = washer_id {
        params.push(format!("washerId={}", id));
    }
    if params.is_empty() {
        "/records/car-wash".to_string()
    } else {
        format!("/records/car-wash?{}", params.join("&"))
    }
}

/// GET /records/car-wash con filtros opcionales de fecha y washer
pub async fn fetch_records(
    client: &ApiClient,
    state: &AppState,
    date: Option<NaiveDate>,
    washer_id: Option<&str>,
) {
    *state.records_loading.borrow_mut() = true;
    *state.records_error.borrow_mut() = None;
    state.notify_change();

    let path = records_query(date, washer_id);
    match client
        .get_json::<ApiEnvelope<Vec<CarWashRecord>>>(&path)
        .await
    {
        Ok(envelope) => {
            let records = if envelope.success {
                envelope.data.unwrap_or_default()
            } else {
                Vec::new()
            };
            log::info!("🧾 [RECORDS] {} registros recibidos", records.len());
            *state.records.borrow_mut() = records;
        }
        Err(err) => {
            expire_session_if_unauthorized(&state.auth, &err);
            log::error!("❌ [RECORDS] Error cargando historial: {}", err);
            *state.records_error.borrow_mut() = Some(err.message());
            *state.records.borrow_mut() = Vec::new();
        }
    }

    *state.records_loading.borrow_mut() = false;
    state.notify_change();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_building() {
        assert_eq!(records_query(None, None), "/records/car-wash");

        let d = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(
            records_query(Some(d), None),
            "/records/car-wash?date=2025-01-09"
        );
        assert_eq!(
            records_query(Some(d), Some("w7")),
            "/records/car-wash?date=2025-01-09&washerId=w7"
        );
        assert_eq!(
            records_query(None, Some("w7")),
            "/records/car-wash?washerId=w7"
        );
    }
}
