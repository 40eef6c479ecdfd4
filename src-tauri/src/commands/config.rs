//! String preferences persisted through the store plugin.

use std::sync::Arc;

use tauri::{AppHandle, Wry};
use tauri_plugin_store::{Store, StoreExt};
use tracing::{debug, warn};

use crate::client::DEFAULT_BASE_URL;

fn open_store(app: &AppHandle) -> Result<Arc<Store<Wry>>, String> {
    app.store("preferences.json").map_err(|e| {
        warn!("Failed to open preferences store: {}", e);
        e.to_string()
    })
}

#[tauri::command]
pub fn get_preference(app: AppHandle, key: &str) -> Result<Option<String>, String> {
    debug!("Reading preference {}", key);
    let store = open_store(&app)?;
    Ok(store.get(key).and_then(|v| v.as_str().map(|s| s.to_string())))
}

#[tauri::command]
pub fn set_preference(app: AppHandle, key: &str, value: &str) -> Result<(), String> {
    debug!("Storing preference {} = {}", key, value);
    let store = open_store(&app)?;
    store.set(key, serde_json::json!(value));
    store.save().map_err(|e| {
        warn!("Failed to save preferences: {}", e);
        e.to_string()
    })
}

/// Analysis service base URL from preferences, falling back to the default.
pub fn service_base_url(app: &AppHandle) -> String {
    open_store(app)
        .ok()
        .and_then(|store| store.get("api_base_url"))
        .and_then(|v| v.as_str().map(|s| s.trim().trim_end_matches('/').to_string()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
