// ============================================================================
// BOOKING SERVICE - builder de payload + workflow de envío
// ============================================================================

use crate::models::{ApiEnvelope, BookingInput, BookingItems, WashLineItem, WashRecord};
use crate::services::api_client::{expire_session_if_unauthorized, ApiClient};
use crate::state::AppState;

/// Marcadores de items con precio variable: el precio se ingresa por
/// transacción en vez de salir de la lista de precios. Match por substring
/// case-insensitive sobre el nombre del servicio.
pub const VARIABLE_PRICE_MARKERS: [&str; 1] = ["rug"];

pub const BOOKING_CREATED_MESSAGE: &str = "Booking created successfully";
pub const BOOKING_FAILED_MESSAGE: &str = "Failed to create booking";

/// El builder asume input pre-validado por el formulario; falla únicamente
/// cuando no hay items de dónde armar el registro
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    NoItems,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::NoItems => write!(f, "booking has no items"),
        }
    }
}

/// Resultado del workflow de envío, para que el formulario haga match
/// exhaustivo: resetear campos en Created, mostrar mensaje en Rejected
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Created {
        data: Option<serde_json::Value>,
        message: String,
    },
    Rejected {
        message: String,
    },
}

impl BookingOutcome {
    pub fn message(&self) -> &str {
        match self {
            BookingOutcome::Created { message, .. } => message,
            BookingOutcome::Rejected { message } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BookingOutcome::Created { .. })
    }
}

pub fn is_variable_priced(service_name: &str) -> bool {
    let lower = service_name.to_lowercase();
    VARIABLE_PRICE_MARKERS.iter().any(|m| lower.contains(m))
}

/// Construir el registro normalizado que espera el backend.
/// Reglas, en orden:
/// 1. Lineas ya en formato backend pasan sin tocar; selecciones {name, price}
///    se mapean a {washerName, serviceItemName}
/// 2. Selecciones de precio variable llevan customPrice = precio ingresado
/// 3. Opcionales vacíos se omiten del JSON (serde skip), nunca van como null
/// 4. paymentMethod viaja en minúsculas
pub fn build_wash_record(input: &BookingInput) -> Result<WashRecord, BuildError> {
    let items: Vec<WashLineItem> = match &input.items {
        BookingItems::Lines(lines) => lines.clone(),
        BookingItems::Selections(selections) => selections
            .iter()
            .map(|sel| WashLineItem {
                washer_name: input.washer.trim().to_string(),
                service_item_name: sel.name.clone(),
                custom_price: if is_variable_priced(&sel.name) {
                    Some(sel.price)
                } else {
                    None
                },
            })
            .collect(),
    };

    if items.is_empty() {
        return Err(BuildError::NoItems);
    }

    Ok(WashRecord {
        car_number: clean_optional(&input.plate_number),
        car_model: clean_optional(&input.car_model),
        customer_name: clean_optional(&input.customer_name),
        customer_phone: clean_optional(&input.customer_phone),
        payment_method: input.payment_method.to_lowercase(),
        items,
    })
}

fn clean_optional(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Interpretar la respuesta del POST con la prioridad de fallas del workflow:
/// (a) error normalizado del gateway, (b) 2xx con success:false, (c) fallback
pub fn interpret_create_response(
    result: crate::services::api_client::ApiResult<ApiEnvelope<serde_json::Value>>,
) -> BookingOutcome {
    match result {
        Ok(envelope) if envelope.success => BookingOutcome::Created {
            data: envelope.data,
            message: envelope
                .message
                .unwrap_or_else(|| BOOKING_CREATED_MESSAGE.to_string()),
        },
        Ok(envelope) => BookingOutcome::Rejected {
            message: envelope
                .message
                .unwrap_or_else(|| BOOKING_FAILED_MESSAGE.to_string()),
        },
        Err(err) => BookingOutcome::Rejected {
            message: err.message(),
        },
    }
}

/// Workflow completo: idle -> submitting -> {succeeded | failed} -> idle.
/// Sin reintentos automáticos; el formulario puede reinvocar y el workflow
/// arranca de cero.
pub async fn create_booking(
    client: &ApiClient,
    state: &AppState,
    input: &BookingInput,
) -> BookingOutcome {
    begin_submission(state);

    let record = match build_wash_record(input) {
        Ok(record) => record,
        Err(e) => {
            return settle_submission(
                state,
                Err(crate::services::api_client::ApiError::Application {
                    message: e.to_string(),
                    status: 0,
                }),
            );
        }
    };

    log::info!(
        "🚗 [BOOKING] Enviando registro de lavado ({} items, pago: {})",
        record.items.len(),
        record.payment_method
    );

    let result = client
        .post_json::<WashRecord, ApiEnvelope<serde_json::Value>>("/records/car-wash", &record)
        .await;

    if let Err(err) = &result {
        expire_session_if_unauthorized(&state.auth, err);
    }

    settle_submission(state, result)
}

fn begin_submission(state: &AppState) {
    *state.booking_processing.borrow_mut() = true;
}

/// Cierre del workflow: interpretar el resultado y bajar el flag de
/// procesamiento. Cada camino de salida de create_booking pasa por acá.
fn settle_submission(
    state: &AppState,
    result: crate::services::api_client::ApiResult<ApiEnvelope<serde_json::Value>>,
) -> BookingOutcome {
    let outcome = interpret_create_response(result);
    *state.booking_processing.borrow_mut() = false;

    match &outcome {
        BookingOutcome::Created { .. } => log::info!("✅ [BOOKING] Registro creado"),
        BookingOutcome::Rejected { message } => {
            log::error!("❌ [BOOKING] Falló el registro: {}", message)
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemSelection;
    use crate::services::api_client::{ApiError, NO_RESPONSE_MESSAGE};
    use serde_json::json;

    fn car_booking(items: Vec<ItemSelection>) -> BookingInput {
        BookingInput {
            plate_number: Some("ABC-123".to_string()),
            car_model: None,
            customer_name: None,
            customer_phone: None,
            washer: "Abbey".to_string(),
            payment_method: "Cash".to_string(),
            items: BookingItems::Selections(items),
        }
    }

    fn sel(name: &str, price: f64) -> ItemSelection {
        ItemSelection {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn fixed_price_items_never_carry_custom_price() {
        let record =
            build_wash_record(&car_booking(vec![sel("Car (Basic)", 1200.0), sel("Roof", 800.0)]))
                .unwrap();
        assert!(record.items.iter().all(|i| i.custom_price.is_none()));
    }

    #[test]
    fn rug_items_carry_custom_price_and_siblings_do_not() {
        let record = build_wash_record(&car_booking(vec![
            sel("Seat", 1300.0),
            sel("RUG cleaning", 2500.0),
        ]))
        .unwrap();
        assert_eq!(record.items[0].custom_price, None);
        assert_eq!(record.items[1].custom_price, Some(2500.0));
    }

    #[test]
    fn absent_optionals_are_omitted_from_the_wire_payload() {
        let record = build_wash_record(&car_booking(vec![sel("Floor", 800.0)])).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("carModel"));
        assert!(!obj.contains_key("customerName"));
        assert!(!obj.contains_key("customerPhone"));
        assert_eq!(obj["carNumber"], "ABC-123");
        // Ningún valor null en el objeto
        assert!(obj.values().all(|v| !v.is_null()));
    }

    #[test]
    fn builder_is_deterministic() {
        let input = car_booking(vec![sel("Engine", 2000.0), sel("Rug", 1500.0)]);
        assert_eq!(build_wash_record(&input), build_wash_record(&input));
    }

    #[test]
    fn rug_booking_scenario() {
        // {rugPrice:"1500", washer:"Ada", paymentMethod:"cash"} =>
        // {paymentMethod:"cash", items:[{washerName:"Ada", serviceItemName:"Rug", customPrice:1500}]}
        let input = BookingInput {
            plate_number: None,
            car_model: None,
            customer_name: None,
            customer_phone: None,
            washer: "Ada".to_string(),
            payment_method: "cash".to_string(),
            items: BookingItems::Selections(vec![sel("Rug", 1500.0)]),
        };
        let value = serde_json::to_value(build_wash_record(&input).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "paymentMethod": "cash",
                "items": [{
                    "washerName": "Ada",
                    "serviceItemName": "Rug",
                    "customPrice": 1500.0
                }]
            })
        );
    }

    #[test]
    fn backend_shaped_lines_pass_through_unchanged() {
        let lines = vec![WashLineItem {
            washer_name: "Shako".to_string(),
            service_item_name: "Boot".to_string(),
            custom_price: None,
        }];
        let input = BookingInput {
            items: BookingItems::Lines(lines.clone()),
            ..car_booking(vec![])
        };
        let record = build_wash_record(&input).unwrap();
        assert_eq!(record.items, lines);
    }

    #[test]
    fn payment_method_is_lowercased() {
        let record = build_wash_record(&car_booking(vec![sel("Roof", 800.0)])).unwrap();
        assert_eq!(record.payment_method, "cash");
    }

    #[test]
    fn empty_item_list_fails_loudly() {
        assert_eq!(
            build_wash_record(&car_booking(vec![])),
            Err(BuildError::NoItems)
        );
    }

    #[test]
    fn successful_envelope_round_trips_data_and_message() {
        let envelope = ApiEnvelope::<serde_json::Value> {
            success: true,
            message: Some("ok".to_string()),
            data: Some(json!({"id": 1})),
        };
        let outcome = interpret_create_response(Ok(envelope));
        assert_eq!(
            outcome,
            BookingOutcome::Created {
                data: Some(json!({"id": 1})),
                message: "ok".to_string()
            }
        );
    }

    #[test]
    fn success_false_in_2xx_body_uses_its_message() {
        let envelope = ApiEnvelope::<serde_json::Value> {
            success: false,
            message: Some("washer not found".to_string()),
            data: None,
        };
        let outcome = interpret_create_response(Ok(envelope));
        assert_eq!(outcome.message(), "washer not found");
        assert!(!outcome.is_success());
    }

    #[test]
    fn submission_round_trip_leaves_no_processing_flag_set() {
        let state = AppState::new();

        begin_submission(&state);
        assert!(*state.booking_processing.borrow());

        let envelope = ApiEnvelope::<serde_json::Value> {
            success: true,
            message: Some("ok".to_string()),
            data: Some(json!({"id": 1})),
        };
        let outcome = settle_submission(&state, Ok(envelope));
        assert!(outcome.is_success());
        assert!(!*state.booking_processing.borrow());

        // También en el camino de falla
        begin_submission(&state);
        let outcome = settle_submission(
            &state,
            Err(ApiError::Transport(NO_RESPONSE_MESSAGE.to_string())),
        );
        assert!(!outcome.is_success());
        assert!(!*state.booking_processing.borrow());
    }

    #[test]
    fn gateway_errors_rank_first() {
        let outcome = interpret_create_response(Err(ApiError::Transport(
            NO_RESPONSE_MESSAGE.to_string(),
        )));
        assert_eq!(outcome.message(), NO_RESPONSE_MESSAGE);

        let outcome = interpret_create_response(Err(ApiError::Application {
            message: "duplicate record".to_string(),
            status: 409,
        }));
        assert_eq!(outcome.message(), "duplicate record");
    }
}
