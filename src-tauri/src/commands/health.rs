use serde::Serialize;
use serde_json::Value;
use tauri::AppHandle;
use tracing::{info, warn};

use super::config::service_base_url;
use crate::client::AnalysisClient;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub base_url: String,
    pub reachable: bool,
    /// The probe's raw response body, when one arrived.
    pub detail: Option<Value>,
    pub error: Option<String>,
}

#[tauri::command]
pub async fn run_health_check(app: AppHandle) -> Result<HealthReport, String> {
    let base_url = service_base_url(&app);
    info!("Probing analysis service at {}", base_url);

    let client = AnalysisClient::new(&base_url).map_err(String::from)?;
    match client.health().await {
        Ok(detail) => Ok(HealthReport {
            base_url,
            reachable: true,
            detail: Some(detail),
            error: None,
        }),
        Err(e) => {
            warn!("Health probe failed: {}", e);
            Ok(HealthReport {
                base_url,
                reachable: false,
                detail: None,
                error: Some(e.to_string()),
            })
        }
    }
}
