use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Guardar un valor serializable bajo una clave
pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    let json = serde_json::to_string(value)
        .map_err(|e| format!("Error serializando datos: {}", e))?;
    storage
        .set_item(key, &json)
        .map_err(|_| "Error guardando en localStorage".to_string())?;
    Ok(())
}

/// Cargar un valor tipado; None si no existe o no parsea
pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    let storage = get_local_storage()?;
    let json = storage.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

/// Guardar un string crudo (sin JSON) - usado para el token bearer
pub fn save_raw(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .set_item(key, value)
        .map_err(|_| "Error guardando en localStorage".to_string())?;
    Ok(())
}

/// Leer un string crudo
pub fn load_raw(key: &str) -> Option<String> {
    let storage = get_local_storage()?;
    storage.get_item(key).ok()?
}

pub fn remove_from_storage(key: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("No se pudo acceder a localStorage")?;
    storage
        .remove_item(key)
        .map_err(|_| "Error eliminando de localStorage".to_string())?;
    Ok(())
}
