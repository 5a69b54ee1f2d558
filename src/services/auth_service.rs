// ============================================================================
// AUTH SERVICE - login / logout contra el backend
// ============================================================================

use crate::models::{ApiEnvelope, LoginData, LoginRequest, User};
use crate::services::api_client::{ApiClient, ApiError};
use crate::state::AuthState;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Workflow de login. Valida la respuesta, actualiza el AuthState y
/// persiste la sesión. Todo error se devuelve como mensaje para mostrar
/// inline en el formulario; acá nunca se redirige (el 401 de un intento de
/// login no lleva token, así que el observer de sesión lo ignora).
pub async fn login(
    client: &ApiClient,
    auth: &AuthState,
    email: &str,
    password: &str,
) -> Result<User, String> {
    auth.set_loading(true);
    auth.clear_error();

    let request = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    log::info!("🔐 [AUTH] Intentando login para {}", email);

    let result = client
        .post_json::<LoginRequest, ApiEnvelope<LoginData>>("/auth/login", &request)
        .await;

    let outcome = match result {
        Ok(envelope) => interpret_login_envelope(envelope),
        Err(ApiError::Unauthorized { .. }) => Err(INVALID_CREDENTIALS_MESSAGE.to_string()),
        Err(err) => Err(err.message()),
    };

    match outcome {
        Ok((user, token)) => {
            log::info!("✅ [AUTH] Login exitoso: {}", user.email);
            auth.login(user.clone(), token);
            Ok(user)
        }
        Err(message) => {
            log::error!("❌ [AUTH] Login rechazado: {}", message);
            auth.set_error(Some(message.clone()));
            auth.set_loading(false);
            Err(message)
        }
    }
}

/// Validar el envelope de login: success:false o data incompleta son
/// rechazos, no panics
fn interpret_login_envelope(envelope: ApiEnvelope<LoginData>) -> Result<(User, String), String> {
    if !envelope.success {
        return Err(envelope
            .message
            .unwrap_or_else(|| INVALID_CREDENTIALS_MESSAGE.to_string()));
    }

    let data = envelope.data.ok_or(INVALID_RESPONSE_MESSAGE)?;
    match (data.user, data.token) {
        (Some(user), Some(token)) if !token.is_empty() => Ok((user, token)),
        _ => Err(INVALID_RESPONSE_MESSAGE.to_string()),
    }
}

/// Logout: avisa al backend pero limpia la sesión local aunque el call falle
pub async fn logout(client: &ApiClient, auth: &AuthState) {
    if let Err(e) = client
        .post_json::<serde_json::Value, ApiEnvelope<serde_json::Value>>(
            "/auth/logout",
            &serde_json::json!({}),
        )
        .await
    {
        log::warn!("⚠️ [AUTH] Error en logout remoto (se ignora): {}", e);
    }
    auth.logout();
    log::info!("👋 [AUTH] Sesión cerrada");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Some("u1".into()),
            name: Some("Admin".into()),
            email: "a@b.com".into(),
            role: Some("admin".into()),
            branch_id: None,
        }
    }

    #[test]
    fn valid_envelope_yields_user_and_token() {
        let envelope = ApiEnvelope {
            success: true,
            message: None,
            data: Some(LoginData {
                user: Some(user()),
                token: Some("jwt".into()),
            }),
        };
        let (u, t) = interpret_login_envelope(envelope).unwrap();
        assert_eq!(u.email, "a@b.com");
        assert_eq!(t, "jwt");
    }

    #[test]
    fn success_false_surfaces_backend_message() {
        let envelope = ApiEnvelope {
            success: false,
            message: Some("Account disabled".into()),
            data: None,
        };
        assert_eq!(
            interpret_login_envelope(envelope),
            Err("Account disabled".to_string())
        );
    }

    #[test]
    fn success_false_without_message_uses_credentials_fallback() {
        let envelope = ApiEnvelope {
            success: false,
            message: None,
            data: None,
        };
        assert_eq!(
            interpret_login_envelope(envelope),
            Err(INVALID_CREDENTIALS_MESSAGE.to_string())
        );
    }

    #[test]
    fn missing_user_or_token_is_an_invalid_response() {
        let envelope = ApiEnvelope {
            success: true,
            message: None,
            data: Some(LoginData {
                user: Some(user()),
                token: None,
            }),
        };
        assert_eq!(
            interpret_login_envelope(envelope),
            Err(INVALID_RESPONSE_MESSAGE.to_string())
        );

        let envelope = ApiEnvelope::<LoginData> {
            success: true,
            message: None,
            data: None,
        };
        assert_eq!(
            interpret_login_envelope(envelope),
            Err(INVALID_RESPONSE_MESSAGE.to_string())
        );
    }
}
