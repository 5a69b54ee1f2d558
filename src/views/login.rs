// ============================================================================
// LOGIN VIEW - formulario de email/password con validación client-side
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{
    append_child, get_element_by_id, input_value, on_input, on_submit, set_text_content,
    ElementBuilder,
};
use crate::services::{auth_service, ApiClient};
use crate::state::{AppState, Route};

/// Errores por campo del formulario de login
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Compuerta única del submit: no reenviar mientras hay un login en vuelo
/// y no salir a la red con errores de validación
pub fn can_submit(loading: bool, errors: &LoginFieldErrors) -> bool {
    !loading && errors.is_empty()
}

/// Validación previa a cualquier llamada de red: campos requeridos, forma
/// del email y largo mínimo de password
pub fn validate_login(email: &str, password: &str) -> LoginFieldErrors {
    let mut errors = LoginFieldErrors::default();

    if email.is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.email = Some("Please enter a valid email".to_string());
    }

    if password.is_empty() {
        errors.password = Some("Password is required".to_string());
    } else if password.len() < 6 {
        errors.password = Some("Password must be at least 6 characters".to_string());
    }

    errors
}

fn show_field_error(id: &str, message: Option<&String>) {
    if let Some(el) = get_element_by_id(id) {
        set_text_content(&el, message.map(String::as_str).unwrap_or(""));
    }
}

/// Renderizar vista de login
pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    // Los valores tipeados viven en AppState: el formulario se reconstruye
    // en cada render (loading, error global) sin perderlos
    let email = state.login_email.clone();
    let password = state.login_password.clone();

    let screen = ElementBuilder::new("div")?.class("login-container").build();
    let container = ElementBuilder::new("div")?
        .class("login-form-container")
        .build();

    // Logo + header
    let logo = ElementBuilder::new("div")?
        .class("logo")
        .child(
            ElementBuilder::new("h1")?
                .class("company-name-title")
                .text("Top-Most Carwash")
                .build(),
        )?
        .build();

    let header = ElementBuilder::new("div")?
        .class("login-header")
        .child(
            ElementBuilder::new("h1")?
                .class("login-title")
                .text("Welcome Admin")
                .build(),
        )?
        .child(
            ElementBuilder::new("p")?
                .class("login-subtitle")
                .text("Hey there, have a great day!")
                .build(),
        )?
        .build();

    let form = ElementBuilder::new("form")?.class("login-form").build();

    // Campo email
    let email_input = ElementBuilder::new("input")?
        .class("form-input")
        .id("login-email")?
        .attr("type", "email")?
        .attr("name", "email")?
        .attr("value", &email.borrow())?
        .build();
    {
        let email = email.clone();
        let target = email_input.clone();
        on_input(&email_input, move |_| {
            *email.borrow_mut() = input_value(&target);
            // Limpiar el error del campo apenas el usuario tipea
            show_field_error("login-email-error", None);
        })?;
    }
    let email_group = ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .class("form-label")
                .text("Email Address")
                .build(),
        )?
        .child(email_input)?
        .child(
            ElementBuilder::new("span")?
                .class("field-error")
                .id("login-email-error")?
                .build(),
        )?
        .build();

    // Campo password
    let password_input = ElementBuilder::new("input")?
        .class("form-input")
        .id("login-password")?
        .attr("type", "password")?
        .attr("name", "password")?
        .attr("value", &password.borrow())?
        .build();
    {
        let password = password.clone();
        let target = password_input.clone();
        on_input(&password_input, move |_| {
            *password.borrow_mut() = input_value(&target);
            show_field_error("login-password-error", None);
        })?;
    }
    let password_group = ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .class("form-label")
                .text("Password")
                .build(),
        )?
        .child(password_input)?
        .child(
            ElementBuilder::new("span")?
                .class("field-error")
                .id("login-password-error")?
                .build(),
        )?
        .build();

    // Error global (credenciales inválidas, red caída)
    let global_error = ElementBuilder::new("div")?.class("error-message").build();
    if let Some(message) = state.auth.get_error() {
        set_text_content(&global_error, &message);
    }

    let loading = state.auth.get_loading();
    let submit = ElementBuilder::new("button")?
        .class("verify-button")
        .attr("type", "submit")?
        .text(if loading { "Verifying..." } else { "Verify" })
        .build();
    if loading {
        submit.set_attribute("disabled", "true")?;
    }

    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &global_error)?;
    append_child(&form, &submit)?;

    // Submit: validar primero, recién después salir a la red. Un solo
    // login en vuelo: mientras loading está activo el submit se ignora.
    {
        let email = email.clone();
        let password = password.clone();
        let state = state.clone();
        on_submit(&form, move |_| {
            let email_value = email.borrow().trim().to_string();
            let password_value = password.borrow().clone();

            let errors = validate_login(&email_value, &password_value);
            show_field_error("login-email-error", errors.email.as_ref());
            show_field_error("login-password-error", errors.password.as_ref());
            if !can_submit(state.auth.get_loading(), &errors) {
                return;
            }

            // Loading se fija acá, antes del await, y se notifica para que
            // el re-render muestre el botón deshabilitado
            state.auth.set_loading(true);
            state.auth.clear_error();
            state.notify_change();

            let state = state.clone();
            spawn_local(async move {
                let client = ApiClient::new(state.auth.clone());
                match auth_service::login(&client, &state.auth, &email_value, &password_value).await
                {
                    Ok(_) => {
                        state.login_email.borrow_mut().clear();
                        state.login_password.borrow_mut().clear();
                        state.navigate(Route::Entry);
                    }
                    // El mensaje ya quedó en AuthState.error; re-render para mostrarlo
                    Err(_) => state.notify_change(),
                }
            });
        })?;
    }

    append_child(&container, &logo)?;
    append_child(&container, &header)?;
    append_child(&container, &form)?;
    append_child(&screen, &container)?;
    Ok(screen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_is_rejected_before_any_network_call() {
        let errors = validate_login("a@b.com", "short");
        assert_eq!(errors.email, None);
        assert_eq!(
            errors.password,
            Some("Password must be at least 6 characters".to_string())
        );
    }

    #[test]
    fn missing_fields_are_required() {
        let errors = validate_login("", "");
        assert_eq!(errors.email, Some("Email is required".to_string()));
        assert_eq!(errors.password, Some("Password is required".to_string()));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["not-an-email", "a@b", "@b.com", "a b@c.com", "a@.c"] {
            let errors = validate_login(email, "longenough");
            assert_eq!(
                errors.email,
                Some("Please enter a valid email".to_string()),
                "email: {}",
                email
            );
        }
    }

    #[test]
    fn valid_credentials_pass_validation() {
        assert!(validate_login("admin@topmost.ng", "secret1").is_empty());
    }

    #[test]
    fn submit_is_blocked_while_a_login_is_in_flight() {
        let clean = validate_login("a@b.com", "secret1");
        assert!(can_submit(false, &clean));
        // Segundo click con el request anterior todavía en vuelo: se ignora
        assert!(!can_submit(true, &clean));
    }

    #[test]
    fn submit_is_blocked_by_validation_errors() {
        let errors = validate_login("a@b.com", "short");
        assert!(!can_submit(false, &errors));
    }
}
