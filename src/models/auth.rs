use serde::{Deserialize, Serialize};

/// Usuario autenticado (principal de la sesión)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload de data en la respuesta de login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Envelope estándar del backend: { success, message, data }
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "none_data")]
    pub data: Option<T>,
}

fn default_success() -> bool {
    true
}

fn none_data<T>() -> Option<T> {
    None
}

/// Snapshot persistido en localStorage bajo "auth-storage"
/// (mismo formato que el middleware persist del frontend original)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSnapshot {
    pub state: AuthSnapshotState,
    #[serde(default)]
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshotState {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}
