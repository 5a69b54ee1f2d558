// ============================================================================
// AUTH STATE - Estado de sesión (reemplaza el store persistido del original)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{AuthSnapshot, AuthSnapshotState, User};
use crate::utils::{
    load_from_storage, load_raw, remove_from_storage, save_raw, save_to_storage,
    AUTH_STORAGE_KEY, TOKEN_STORAGE_KEY,
};

/// Estado de autenticación. Invariante: is_authenticated == token.is_some()
/// después de cada mutación. El gateway lo lee en cada request; solo
/// login/logout lo escriben, siempre de forma síncrona (sin awaits entre
/// la copia en memoria y la persistida).
#[derive(Clone)]
pub struct AuthState {
    pub user: Rc<RefCell<Option<User>>>,
    pub token: Rc<RefCell<Option<String>>>,
    pub is_authenticated: Rc<RefCell<bool>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            user: Rc::new(RefCell::new(None)),
            token: Rc::new(RefCell::new(None)),
            is_authenticated: Rc::new(RefCell::new(false)),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
        }
    }

    /// Login exitoso: fija usuario+token en memoria y persiste AMBAS claves
    /// (token crudo + snapshot estructurado) en el mismo paso síncrono.
    pub fn login(&self, user: User, token: String) {
        *self.user.borrow_mut() = Some(user.clone());
        *self.token.borrow_mut() = Some(token.clone());
        *self.is_authenticated.borrow_mut() = true;
        *self.error.borrow_mut() = None;
        *self.loading.borrow_mut() = false;

        if let Err(e) = save_raw(TOKEN_STORAGE_KEY, &token) {
            log::error!("❌ Error guardando token en storage: {}", e);
        }
        let snapshot = AuthSnapshot {
            state: AuthSnapshotState {
                user: Some(user),
                token: Some(token),
                is_authenticated: true,
            },
            version: 0,
        };
        if let Err(e) = save_to_storage(AUTH_STORAGE_KEY, &snapshot) {
            log::error!("❌ Error guardando snapshot de sesión: {}", e);
        }
    }

    /// Logout: limpia memoria y storage juntos
    pub fn logout(&self) {
        self.clear_auth();
    }

    /// Limpiar sesión (logout explícito o 401 con token presente)
    pub fn clear_auth(&self) {
        *self.user.borrow_mut() = None;
        *self.token.borrow_mut() = None;
        *self.is_authenticated.borrow_mut() = false;
        *self.error.borrow_mut() = None;
        *self.loading.borrow_mut() = false;

        let _ = remove_from_storage(TOKEN_STORAGE_KEY);
        let _ = remove_from_storage(AUTH_STORAGE_KEY);
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn clear_error(&self) {
        *self.error.borrow_mut() = None;
    }

    pub fn get_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn get_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        *self.is_authenticated.borrow()
    }

    /// Rehidratar la sesión desde storage ANTES de emitir cualquier request
    /// autenticado. Claves ausentes, snapshot corrupto o token que no
    /// coincide => no autenticado (y se limpian las claves). Nunca paniquea.
    pub fn initialize(&self) {
        let raw_token = load_raw(TOKEN_STORAGE_KEY);
        let snapshot = load_from_storage::<AuthSnapshot>(AUTH_STORAGE_KEY);

        match reconcile_persisted(raw_token, snapshot) {
            Some((user, token)) => {
                log::info!("💾 [AUTH] Sesión restaurada desde storage");
                *self.user.borrow_mut() = user;
                *self.token.borrow_mut() = Some(token);
                *self.is_authenticated.borrow_mut() = true;
            }
            None => {
                // Estado persistido incompleto o inconsistente: arrancar limpio
                let _ = remove_from_storage(TOKEN_STORAGE_KEY);
                let _ = remove_from_storage(AUTH_STORAGE_KEY);
            }
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconciliar las dos claves persistidas. Autenticado solo cuando el token
/// crudo existe, el snapshot existe y dice autenticado, y ambos tokens
/// coinciden.
pub fn reconcile_persisted(
    raw_token: Option<String>,
    snapshot: Option<AuthSnapshot>,
) -> Option<(Option<User>, String)> {
    let raw = raw_token?;
    let snap = snapshot?;
    if !snap.state.is_authenticated {
        return None;
    }
    let snap_token = snap.state.token?;
    if snap_token != raw {
        return None;
    }
    Some((snap.state.user, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthSnapshot, AuthSnapshotState, User};

    fn snapshot(token: Option<&str>, authenticated: bool) -> AuthSnapshot {
        AuthSnapshot {
            state: AuthSnapshotState {
                user: Some(User {
                    id: Some("u1".into()),
                    name: Some("Ada".into()),
                    email: "a@b.com".into(),
                    role: None,
                    branch_id: None,
                }),
                token: token.map(String::from),
                is_authenticated: authenticated,
            },
            version: 0,
        }
    }

    #[test]
    fn both_keys_present_and_matching_restores_session() {
        let result = reconcile_persisted(Some("tok".into()), Some(snapshot(Some("tok"), true)));
        let (user, token) = result.expect("debe restaurar");
        assert_eq!(token, "tok");
        assert_eq!(user.unwrap().email, "a@b.com");
    }

    #[test]
    fn missing_raw_token_means_logged_out() {
        assert!(reconcile_persisted(None, Some(snapshot(Some("tok"), true))).is_none());
    }

    #[test]
    fn missing_snapshot_means_logged_out() {
        assert!(reconcile_persisted(Some("tok".into()), None).is_none());
    }

    #[test]
    fn token_mismatch_means_logged_out() {
        assert!(reconcile_persisted(Some("a".into()), Some(snapshot(Some("b"), true))).is_none());
    }

    #[test]
    fn snapshot_not_authenticated_means_logged_out() {
        assert!(reconcile_persisted(Some("tok".into()), Some(snapshot(Some("tok"), false))).is_none());
    }
}
