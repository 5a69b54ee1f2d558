// ============================================================================
// API CLIENT - gateway HTTP (stateless, credencial inyectada)
// ============================================================================
// Adjunta el bearer token en cada request leyendo el AuthState al momento
// de enviar. No tiene lógica de negocio ni efectos de navegación: un 401 se
// devuelve como señal estructurada y el observer de sesión decide qué hacer.
// ============================================================================

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::state::AuthState;
use crate::utils::{BACKEND_URL, LOGIN_PATH};

/// Mensaje fijo para fallas de transporte (sin respuesta del servidor)
pub const NO_RESPONSE_MESSAGE: &str = "No response from server. Please check your connection.";
/// Fallback cuando el body de error no trae "message"
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Error normalizado del gateway
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// El request se emitió pero no llegó respuesta (red caída, CORS, etc).
    /// No lleva status HTTP.
    Transport(String),
    /// HTTP 401. had_token distingue una sesión expirada (true) de un
    /// intento de login rechazado (false)
    Unauthorized { had_token: bool },
    /// Cualquier otro no-2xx, o un 2xx que no decodifica
    Application { message: String, status: u16 },
}

impl ApiError {
    /// Mensaje para mostrar al usuario
    pub fn message(&self) -> String {
        match self {
            ApiError::Transport(msg) => msg.clone(),
            ApiError::Unauthorized { .. } => "Invalid email or password".to_string(),
            ApiError::Application { message, .. } => message.clone(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {}", msg),
            ApiError::Unauthorized { had_token } => {
                write!(f, "unauthorized (had_token: {})", had_token)
            }
            ApiError::Application { message, status } => {
                write!(f, "HTTP {}: {}", status, message)
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Cliente API. La sesión se inyecta en la construcción (nada global):
/// el token se lee del AuthState en cada request, nunca se cachea.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    auth: AuthState,
}

impl ApiClient {
    pub fn new(auth: AuthState) -> Self {
        Self {
            base_url: BACKEND_URL.to_string(),
            auth,
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> (RequestBuilder, bool) {
        match self.auth.get_token() {
            Some(token) => (
                builder.header("Authorization", &format!("Bearer {}", token)),
                true,
            ),
            None => (builder, false),
        }
    }

    /// GET con query incluido en el path (p.ej. "/payments/daily-summary?date=...")
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let (builder, had_token) = self.authorize(Request::get(&url));
        let response = builder
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ [API] Sin respuesta de {}: {}", url, e);
                ApiError::Transport(NO_RESPONSE_MESSAGE.to_string())
            })?;
        handle_response(response, had_token).await
    }

    /// POST con body JSON
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let (builder, had_token) = self.authorize(Request::post(&url));
        let request = builder
            .json(body)
            .map_err(|e| ApiError::Transport(format!("Request build error: {}", e)))?;
        let response = request
            .send()
            .await
            .map_err(|e| {
                log::error!("❌ [API] Sin respuesta de {}: {}", url, e);
                ApiError::Transport(NO_RESPONSE_MESSAGE.to_string())
            })?;
        handle_response(response, had_token).await
    }
}

async fn handle_response<T: DeserializeOwned>(
    response: Response,
    had_token: bool,
) -> ApiResult<T> {
    let status = response.status();

    if !response.ok() {
        let body = response.json::<serde_json::Value>().await.ok();
        return Err(error_from_status(status, body, had_token));
    }

    response.json::<T>().await.map_err(|e| ApiError::Application {
        message: format!("Invalid response from server: {}", e),
        status,
    })
}

/// Normalizar un status no-2xx + body en un ApiError
pub(crate) fn error_from_status(
    status: u16,
    body: Option<serde_json::Value>,
    had_token: bool,
) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized { had_token };
    }
    let message = body
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .map(String::from)
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
    ApiError::Application { message, status }
}

/// Un 401 fuerza logout+redirect solo si había credencial (sesión que
/// expiró) y no estamos ya parados en el login (evita loops mientras el
/// usuario tipea credenciales incorrectas)
pub fn should_force_login(err: &ApiError, is_login_page: bool) -> bool {
    matches!(err, ApiError::Unauthorized { had_token: true }) && !is_login_page
}

/// Observer único de sesión expirada: limpia las credenciales persistidas
/// y navega al login. Se invoca en el borde de cada workflow; el gateway
/// nunca navega por sí mismo.
pub fn expire_session_if_unauthorized(auth: &AuthState, err: &ApiError) {
    if should_force_login(err, is_on_login_page()) {
        log::warn!("🔒 [API] Sesión expirada, limpiando credenciales y redirigiendo al login");
        auth.clear_auth();
        redirect_to_login();
    }
}

fn is_on_login_page() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    match win.location().pathname() {
        // El root también sirve el login
        Ok(path) => path == LOGIN_PATH || path == "/",
        Err(_) => false,
    }
}

fn redirect_to_login() {
    if let Some(win) = web_sys::window() {
        let _ = win.location().set_href(LOGIN_PATH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn a_401_with_token_is_a_session_expiry_signal() {
        let err = error_from_status(401, None, true);
        assert_eq!(err, ApiError::Unauthorized { had_token: true });
        assert!(should_force_login(&err, false));
        // Ya en el login: no redirigir (el form muestra el error inline)
        assert!(!should_force_login(&err, true));
    }

    #[test]
    fn a_401_without_token_never_redirects() {
        let err = error_from_status(401, None, false);
        assert_eq!(err, ApiError::Unauthorized { had_token: false });
        assert!(!should_force_login(&err, false));
        assert!(!should_force_login(&err, true));
    }

    #[test]
    fn non_2xx_takes_message_from_body() {
        let err = error_from_status(500, Some(json!({"message": "boom"})), true);
        assert_eq!(
            err,
            ApiError::Application {
                message: "boom".to_string(),
                status: 500
            }
        );
        assert!(!should_force_login(&err, false));
    }

    #[test]
    fn non_2xx_without_message_falls_back_to_generic() {
        let err = error_from_status(404, Some(json!({"detail": "x"})), false);
        assert_eq!(
            err,
            ApiError::Application {
                message: GENERIC_ERROR_MESSAGE.to_string(),
                status: 404
            }
        );

        let err = error_from_status(400, None, false);
        assert!(matches!(err, ApiError::Application { status: 400, .. }));
    }

    #[test]
    fn transport_errors_carry_no_status() {
        let err = ApiError::Transport(NO_RESPONSE_MESSAGE.to_string());
        assert_eq!(err.message(), NO_RESPONSE_MESSAGE);
        assert!(!should_force_login(&err, false));
    }
}
