// ============================================================================
// SUMMARY MODELS - agregados que devuelve el backend + filas para las tablas
// ============================================================================

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Resumen diario por washer (GET /payments/daily-summary?date=)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryData {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub washer_payments: Vec<WasherPayment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasherPayment {
    #[serde(default)]
    pub washer_id: Option<String>,
    pub washer_name: String,
    #[serde(default)]
    pub washer_phone: Option<String>,
    #[serde(default)]
    pub washer_earnings: f64,
    #[serde(default)]
    pub company_earnings: f64,
    /// Cantidad total de items lavados por el washer en el día
    #[serde(default)]
    pub items_washed: u32,
    #[serde(default)]
    pub cars_washed: u32,
    #[serde(default)]
    pub items: Vec<WasherLineShare>,
}

/// Línea individual con el split washer/empresa
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasherLineShare {
    pub service_item: String,
    #[serde(default)]
    pub washer_share: f64,
    #[serde(default)]
    pub company_share: f64,
}

// ---------------------------------------------------------------------------
// Resumen de empresa, todas las sucursales (GET /records/company-summary-all)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummaryData {
    #[serde(default)]
    pub date: Option<String>,
    pub overall_totals: SummaryTotals,
    pub branches: Vec<BranchBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    #[serde(default)]
    pub total_earnings: f64,
    #[serde(default)]
    pub company_share: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchBlock {
    pub branch: Branch,
    pub summary: SummaryTotals,
    #[serde(default)]
    pub items_washed: Vec<ItemWashed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub id: serde_json::Value,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWashed {
    pub item_name: String,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub company_earning: f64,
}

// ---------------------------------------------------------------------------
// Filas derivadas para las vistas (se regeneran en cada fetch)
// ---------------------------------------------------------------------------

/// Fila de la tabla de pagos diarios: un washer, expandible por servicio
#[derive(Debug, Clone, PartialEq)]
pub struct WasherRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub worker_pay: f64,
    pub company_pay: f64,
    pub total_jobs: u32,
    pub cars_washed: u32,
    pub details: Vec<ServiceDetail>,
}

/// Sub-fila por servicio distinto, con acumulados
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDetail {
    pub service: String,
    pub quantity: u32,
    pub worker_earning: f64,
    pub company_earning: f64,
}

/// Fila de la tabla de empresa: una fecha del mes, expandible por sucursal
#[derive(Debug, Clone)]
pub struct MonthRow {
    /// YYYY-MM-DD (id estable de la fila)
    pub id: String,
    pub date_label: String,
    pub raw_date: NaiveDate,
    pub total_earnings: f64,
    pub company_share: f64,
    pub branches: Vec<BranchRow>,
}

#[derive(Debug, Clone)]
pub struct BranchRow {
    pub branch_id: String,
    pub branch_name: String,
    pub total_earnings: f64,
    pub company_share: f64,
    pub items: Vec<ItemWashed>,
}
