use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Store a raw string value (used for the token pair).
pub fn set_string(key: &str, value: &str) -> Result<(), String> {
    let storage = get_local_storage().ok_or("Could not access localStorage")?;
    storage
        .set_item(key, value)
        .map_err(|_| "Error writing to localStorage".to_string())
}

pub fn get_string(key: &str) -> Option<String> {
    let storage = get_local_storage()?;
    storage.get_item(key).ok()?
}

/// Best-effort removal; a missing key is not an error.
pub fn remove(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string(value).map_err(|e| format!("Error serializing data: {}", e))?;
    set_string(key, &json)
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = get_string(key)?;
    serde_json::from_str(&json).ok()
}
