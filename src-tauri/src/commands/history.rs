//! Pass-through commands for the service's stored-analysis endpoints.
//!
//! These sit outside the capture -> analyze -> view core; payloads are
//! forwarded as raw JSON with no local interpretation or caching.

use serde_json::Value;
use tauri::AppHandle;
use tracing::info;

use super::config::service_base_url;
use crate::client::AnalysisClient;

fn client_for(app: &AppHandle) -> Result<AnalysisClient, String> {
    AnalysisClient::new(&service_base_url(app)).map_err(String::from)
}

#[tauri::command]
pub async fn get_analysis_history(app: AppHandle) -> Result<Value, String> {
    let client = client_for(&app)?;
    let history = client.analysis_history().await.map_err(String::from)?;
    info!("Fetched analysis history");
    Ok(history)
}

#[tauri::command]
pub async fn get_analysis(app: AppHandle, analysis_id: String) -> Result<Value, String> {
    let client = client_for(&app)?;
    client.analysis(&analysis_id).await.map_err(String::from)
}

#[tauri::command]
pub async fn delete_analysis(app: AppHandle, analysis_id: String) -> Result<Value, String> {
    let client = client_for(&app)?;
    let deleted = client.delete_analysis(&analysis_id).await.map_err(String::from)?;
    info!("Deleted analysis {}", analysis_id);
    Ok(deleted)
}

#[tauri::command]
pub async fn get_consultation(app: AppHandle, analysis_id: String) -> Result<Value, String> {
    let client = client_for(&app)?;
    client.consultation(&analysis_id).await.map_err(String::from)
}
