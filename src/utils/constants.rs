/// URL base del backend (incluye el prefijo /api)
/// Configurada en tiempo de compilación:
/// - Desarrollo: http://localhost:5000/api (por defecto)
/// - Producción: via BACKEND_URL env var (.env)
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:5000/api",
};

/// Clave de localStorage con el token crudo (la lee el gateway en cada request)
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Clave de localStorage con el snapshot estructurado de sesión
/// Formato: {"state":{"user":...,"token":...,"isAuthenticated":...},"version":0}
pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Ruta de entrada al login (para evitar loops de redirección en 401)
pub const LOGIN_PATH: &str = "/login";
