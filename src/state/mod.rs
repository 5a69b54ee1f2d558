pub mod app_state;
pub mod auth_state;
pub mod reactivity;

pub use app_state::{AppState, Route};
pub use auth_state::AuthState;
