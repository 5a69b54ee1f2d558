// ============================================================================
// SUMMARY SERVICE - fetch y reshape de resúmenes diarios/mensuales
// ============================================================================

use chrono::NaiveDate;

use crate::models::{
    ApiEnvelope, CompanySummaryData, DailySummaryData, MonthRow, BranchRow, ServiceDetail,
    WasherLineShare, WasherRow,
};
use crate::services::api_client::{
    expire_session_if_unauthorized, ApiClient, ApiError, ApiResult,
};
use crate::state::AppState;
use crate::utils::{dates_in_month, format_date_for_api, format_long_date};

// ---------------------------------------------------------------------------
// Resumen diario por washer
// ---------------------------------------------------------------------------

/// Agrupar las líneas de un washer por servicio distinto, en orden de
/// primera aparición, acumulando cantidad y splits
pub fn group_service_details(items: &[WasherLineShare]) -> Vec<ServiceDetail> {
    let mut details: Vec<ServiceDetail> = Vec::new();
    for item in items {
        match details.iter_mut().find(|d| d.service == item.service_item) {
            Some(detail) => {
                detail.quantity += 1;
                detail.worker_earning += item.washer_share;
                detail.company_earning += item.company_share;
            }
            None => details.push(ServiceDetail {
                service: item.service_item.clone(),
                quantity: 1,
                worker_earning: item.washer_share,
                company_earning: item.company_share,
            }),
        }
    }
    details
}

/// Una fila por washer, con sus sub-filas por servicio ya calculadas.
/// Se regenera completa en cada fetch, nunca se parchea incrementalmente.
pub fn reshape_daily(data: &DailySummaryData) -> Vec<WasherRow> {
    data.washer_payments
        .iter()
        .map(|washer| WasherRow {
            id: washer
                .washer_id
                .clone()
                .unwrap_or_else(|| washer.washer_name.clone()),
            name: washer.washer_name.clone(),
            phone: washer.washer_phone.clone().unwrap_or_default(),
            worker_pay: washer.washer_earnings,
            company_pay: washer.company_earnings,
            total_jobs: washer.items_washed,
            cars_washed: washer.cars_washed,
            details: group_service_details(&washer.items),
        })
        .collect()
}

/// GET /payments/daily-summary?date= y reshape a filas de la tabla de staff
pub async fn fetch_daily_summary(client: &ApiClient, state: &AppState, date: Option<NaiveDate>) {
    *state.washers_loading.borrow_mut() = true;
    *state.washers_error.borrow_mut() = None;
    *state.washers_date.borrow_mut() = date;
    state.notify_change();

    let path = match date {
        Some(d) => format!("/payments/daily-summary?date={}", format_date_for_api(d)),
        None => "/payments/daily-summary".to_string(),
    };

    let result = client.get_json::<ApiEnvelope<DailySummaryData>>(&path).await;

    match result {
        Ok(envelope) => {
            let rows = match envelope.data {
                Some(data) if envelope.success => reshape_daily(&data),
                _ => Vec::new(),
            };
            log::info!("📋 [SUMMARY] Resumen diario: {} washers", rows.len());
            *state.washer_rows.borrow_mut() = rows;
        }
        Err(err) => {
            expire_session_if_unauthorized(&state.auth, &err);
            log::error!("❌ [SUMMARY] Error en resumen diario: {}", err);
            *state.washers_error.borrow_mut() = Some(err.message());
            *state.washer_rows.borrow_mut() = Vec::new();
        }
    }

    *state.washers_loading.borrow_mut() = false;
    state.notify_change();
}

// ---------------------------------------------------------------------------
// Resumen mensual de empresa (todas las sucursales)
// ---------------------------------------------------------------------------

/// Fila de fecha para la tabla de empresa. None cuando la fecha no trae
/// sucursales (día sin registros: se salta, no es error)
pub fn build_month_row(date: NaiveDate, data: CompanySummaryData) -> Option<MonthRow> {
    if data.branches.is_empty() {
        return None;
    }
    let id = format_date_for_api(date);
    Some(MonthRow {
        date_label: format_long_date(date),
        raw_date: date,
        total_earnings: data.overall_totals.total_earnings,
        company_share: data.overall_totals.company_share,
        branches: data
            .branches
            .into_iter()
            .map(|block| BranchRow {
                branch_id: branch_id_string(&block.branch.id),
                branch_name: block.branch.name,
                total_earnings: block.summary.total_earnings,
                company_share: block.summary.company_share,
                items: block.items_washed,
            })
            .collect(),
        id,
    })
}

fn branch_id_string(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Ensamblar el mes una vez que TODOS los requests por fecha terminaron:
/// las fechas con error o sin datos se saltan en silencio y el resultado
/// final se ordena descendente por fecha de calendario (nunca por orden de
/// llegada)
pub fn assemble_month(settled: Vec<(NaiveDate, ApiResult<CompanySummaryData>)>) -> Vec<MonthRow> {
    let mut rows: Vec<MonthRow> = settled
        .into_iter()
        .filter_map(|(date, result)| match result {
            Ok(data) => build_month_row(date, data),
            Err(err) => {
                log::debug!("📅 [SUMMARY] Sin datos para {}: {}", date, err);
                None
            }
        })
        .collect();

    rows.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));
    rows
}

/// Un request por cada fecha de calendario del mes. Las fallas por fecha se
/// tragan (un día vacío y un request caído se ven igual desde la vista),
/// con una excepción: un 401 con token presente expira la sesión completa.
pub async fn fetch_company_month(client: &ApiClient, state: &AppState, year: i32, month: u32) {
    *state.company_loading.borrow_mut() = true;
    state.notify_change();

    let dates = dates_in_month(year, month);
    log::info!(
        "🏢 [SUMMARY] Cargando resumen de empresa: {}-{:02} ({} fechas)",
        year,
        month,
        dates.len()
    );

    let mut settled: Vec<(NaiveDate, ApiResult<CompanySummaryData>)> =
        Vec::with_capacity(dates.len());
    let mut session_expired: Option<ApiError> = None;

    for date in dates {
        let path = format!(
            "/records/company-summary-all?date={}",
            format_date_for_api(date)
        );
        let result = client
            .get_json::<ApiEnvelope<CompanySummaryData>>(&path)
            .await
            .and_then(|envelope| {
                let data = if envelope.success { envelope.data } else { None };
                data.ok_or(ApiError::Application {
                    message: "empty summary".to_string(),
                    status: 200,
                })
            });

        if let Err(ApiError::Unauthorized { had_token: true }) = &result {
            session_expired = Some(ApiError::Unauthorized { had_token: true });
        }
        settled.push((date, result));
    }

    let rows = assemble_month(settled);
    log::info!("🏢 [SUMMARY] Mes ensamblado: {} fechas con datos", rows.len());
    *state.month_rows.borrow_mut() = rows;
    *state.company_loading.borrow_mut() = false;

    if let Some(err) = session_expired {
        expire_session_if_unauthorized(&state.auth, &err);
    }
    state.notify_change();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Branch, BranchBlock, ItemWashed, SummaryTotals, WasherPayment};
    use crate::services::api_client::NO_RESPONSE_MESSAGE;

    fn share(service: &str, washer: f64, company: f64) -> WasherLineShare {
        WasherLineShare {
            service_item: service.to_string(),
            washer_share: washer,
            company_share: company,
        }
    }

    #[test]
    fn details_group_by_service_in_first_seen_order() {
        let details = group_service_details(&[
            share("Car (Basic)", 700.0, 500.0),
            share("Roof", 500.0, 300.0),
            share("Car (Basic)", 700.0, 500.0),
        ]);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].service, "Car (Basic)");
        assert_eq!(details[0].quantity, 2);
        assert_eq!(details[0].worker_earning, 1400.0);
        assert_eq!(details[0].company_earning, 1000.0);
        assert_eq!(details[1].service, "Roof");
        assert_eq!(details[1].quantity, 1);
    }

    #[test]
    fn daily_reshape_produces_one_row_per_washer() {
        let data = DailySummaryData {
            date: Some("2025-03-07".to_string()),
            washer_payments: vec![
                WasherPayment {
                    washer_id: Some("w1".to_string()),
                    washer_name: "Abbey".to_string(),
                    washer_phone: Some("0801".to_string()),
                    washer_earnings: 2400.0,
                    company_earnings: 1600.0,
                    items_washed: 3,
                    cars_washed: 2,
                    items: vec![share("Seat", 800.0, 500.0), share("Seat", 800.0, 500.0)],
                },
                WasherPayment {
                    washer_id: None,
                    washer_name: "Shako".to_string(),
                    washer_phone: None,
                    washer_earnings: 900.0,
                    company_earnings: 600.0,
                    items_washed: 1,
                    cars_washed: 1,
                    items: vec![],
                },
            ],
        };
        let rows = reshape_daily(&data);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "w1");
        assert_eq!(rows[0].details.len(), 1);
        assert_eq!(rows[0].details[0].quantity, 2);
        // Sin washerId cae al nombre como id de fila
        assert_eq!(rows[1].id, "Shako");
        assert!(rows[1].details.is_empty());
    }

    fn company_data(branch_names: &[&str]) -> CompanySummaryData {
        CompanySummaryData {
            date: None,
            overall_totals: SummaryTotals {
                total_earnings: 5000.0,
                company_share: 2000.0,
            },
            branches: branch_names
                .iter()
                .map(|name| BranchBlock {
                    branch: Branch {
                        id: serde_json::json!(1),
                        name: name.to_string(),
                    },
                    summary: SummaryTotals {
                        total_earnings: 5000.0,
                        company_share: 2000.0,
                    },
                    items_washed: vec![ItemWashed {
                        item_name: "Car (Basic)".to_string(),
                        quantity: 4,
                        company_earning: 2000.0,
                    }],
                })
                .collect(),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, day).unwrap()
    }

    #[test]
    fn failed_dates_are_skipped_and_result_is_sorted_descending() {
        // Mes de 30 días: fallan los días 5 y 17, el resto responde
        let settled: Vec<(NaiveDate, ApiResult<CompanySummaryData>)> = (1..=30)
            .map(|day| {
                let result = if day == 5 {
                    Err(ApiError::Application {
                        message: "server error".to_string(),
                        status: 500,
                    })
                } else if day == 17 {
                    Err(ApiError::Transport(NO_RESPONSE_MESSAGE.to_string()))
                } else {
                    Ok(company_data(&["Main"]))
                };
                (date(day), result)
            })
            .collect();

        let rows = assemble_month(settled);
        assert_eq!(rows.len(), 28);
        assert!(rows.windows(2).all(|w| w[0].raw_date > w[1].raw_date));
        assert!(!rows.iter().any(|r| r.raw_date == date(5)));
        assert!(!rows.iter().any(|r| r.raw_date == date(17)));
    }

    #[test]
    fn sorting_ignores_arrival_order() {
        let settled = vec![
            (date(3), Ok(company_data(&["Main"]))),
            (date(28), Ok(company_data(&["Main"]))),
            (date(11), Ok(company_data(&["Main"]))),
        ];
        let rows = assemble_month(settled);
        let days: Vec<u32> = rows.iter().map(|r| chrono::Datelike::day(&r.raw_date)).collect();
        assert_eq!(days, vec![28, 11, 3]);
    }

    #[test]
    fn dates_without_branch_data_are_skipped() {
        let settled = vec![
            (date(1), Ok(company_data(&[]))),
            (date(2), Ok(company_data(&["Main", "Annex"]))),
        ];
        let rows = assemble_month(settled);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "2024-11-02");
        assert_eq!(rows[0].date_label, "November 2, 2024");
        assert_eq!(rows[0].branches.len(), 2);
        assert_eq!(rows[0].branches[1].branch_name, "Annex");
        assert_eq!(rows[0].branches[0].items[0].quantity, 4);
    }
}
