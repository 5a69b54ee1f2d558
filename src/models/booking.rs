// ============================================================================
// BOOKING MODELS - formulario de entrada y registro de lavado (wire)
// ============================================================================

use serde::{Deserialize, Serialize};

/// Item seleccionado en un formulario de lavado: {name, price}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSelection {
    pub name: String,
    pub price: f64,
}

/// Línea de servicio en el formato que espera el backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashLineItem {
    pub washer_name: String,
    pub service_item_name: String,
    /// Solo presente para items de precio variable (p.ej. alfombras)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<f64>,
}

/// Items de un booking: o selecciones del formulario (name/price) o líneas
/// que ya vienen en el formato del backend (pass-through)
#[derive(Debug, Clone, PartialEq)]
pub enum BookingItems {
    Selections(Vec<ItemSelection>),
    Lines(Vec<WashLineItem>),
}

/// Booking tal como lo arma un formulario (pre-validado por el formulario)
#[derive(Debug, Clone, PartialEq)]
pub struct BookingInput {
    pub plate_number: Option<String>,
    pub car_model: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    /// Washer compartido por todas las líneas del booking
    pub washer: String,
    pub payment_method: String,
    pub items: BookingItems,
}

/// Registro normalizado que viaja al backend (POST /records/car-wash)
/// Los opcionales ausentes se OMITEN del JSON, nunca se mandan como null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WashRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub payment_method: String,
    pub items: Vec<WashLineItem>,
}

/// Tipos de vehículo con formulario propio en la página de entrada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    Car,
    Jeep,
    PickUp,
    Bus,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 4] = [
        VehicleKind::Car,
        VehicleKind::Jeep,
        VehicleKind::PickUp,
        VehicleKind::Bus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleKind::Car => "Car",
            VehicleKind::Jeep => "Jeep",
            VehicleKind::PickUp => "Pick-Up",
            VehicleKind::Bus => "Bus",
        }
    }

    pub fn basic_price(&self) -> f64 {
        match self {
            VehicleKind::Car => 1200.0,
            VehicleKind::Jeep | VehicleKind::PickUp => 1500.0,
            VehicleKind::Bus => 2500.0,
        }
    }

    /// Lista de precios del formulario para este tipo de vehículo
    pub fn wash_items(&self) -> Vec<ItemSelection> {
        let mut items = vec![ItemSelection {
            name: format!("{} (Basic)", self.label()),
            price: self.basic_price(),
        }];
        for (name, price) in [
            ("Engine", 2000.0),
            ("Radiator", 1500.0),
            ("Condenser", 1500.0),
            ("Seat", 1300.0),
            ("Floor", 800.0),
            ("Roof", 800.0),
            ("Boot", 800.0),
        ] {
            items.push(ItemSelection {
                name: name.to_string(),
                price,
            });
        }
        items
    }
}

/// Registro histórico de lavado (GET /records/car-wash)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarWashRecord {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub vehicle_type: Option<String>,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub washer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemSelection>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}
