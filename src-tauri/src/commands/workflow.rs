//! Tauri commands driving the photo analysis workflow.
//!
//! Each command returns a [`WorkflowSnapshot`] so the display layer always
//! renders from the same source of truth. Acquisition outcomes that change
//! nothing (a cancelled picker, a permission refusal) come back as a
//! transient notice on an otherwise unchanged snapshot.

use tauri::{AppHandle, State};
use tracing::{info, warn};

use super::config::service_base_url;
use crate::acquisition::{self, Acquisition, ImageSource, MediaState};
use crate::client::{image_prep, AnalysisClient};
use crate::workflow::{WorkflowSession, WorkflowSnapshot};

#[tauri::command]
pub async fn select_from_gallery(
    media: State<'_, MediaState>,
    session: State<'_, WorkflowSession>,
) -> Result<WorkflowSnapshot, String> {
    select(&media, &session, ImageSource::Gallery).await
}

#[tauri::command]
pub async fn select_from_camera(
    media: State<'_, MediaState>,
    session: State<'_, WorkflowSession>,
) -> Result<WorkflowSnapshot, String> {
    select(&media, &session, ImageSource::Camera).await
}

/// Confirm the current selection for analysis.
///
/// A confirm that arrives while an analysis is already in flight changes
/// nothing; the snapshot of the in-flight state is returned instead.
#[tauri::command]
pub async fn confirm_analysis(
    app: AppHandle,
    session: State<'_, WorkflowSession>,
) -> Result<WorkflowSnapshot, String> {
    let client = AnalysisClient::new(&service_base_url(&app)).map_err(String::from)?;
    Ok(session.run_analysis(&client).await)
}

/// Re-submit the asset preserved by a failed analysis.
#[tauri::command]
pub async fn retry_analysis(
    app: AppHandle,
    session: State<'_, WorkflowSession>,
) -> Result<WorkflowSnapshot, String> {
    if !session.retry() {
        return Ok(session.snapshot(None));
    }
    let client = AnalysisClient::new(&service_base_url(&app)).map_err(String::from)?;
    Ok(session.run_analysis(&client).await)
}

#[tauri::command]
pub fn clear_selection(session: State<'_, WorkflowSession>) -> Result<WorkflowSnapshot, String> {
    if session.clear_selection() {
        info!("Selection cleared");
    }
    Ok(session.snapshot(None))
}

#[tauri::command]
pub fn restart(session: State<'_, WorkflowSession>) -> Result<WorkflowSnapshot, String> {
    if session.restart() {
        info!("Workflow returned to idle");
    }
    Ok(session.snapshot(None))
}

#[tauri::command]
pub fn workflow_state(session: State<'_, WorkflowSession>) -> Result<WorkflowSnapshot, String> {
    Ok(session.snapshot(None))
}

async fn select(
    media: &MediaState,
    session: &WorkflowSession,
    source: ImageSource,
) -> Result<WorkflowSnapshot, String> {
    match acquisition::acquire(media.0.as_ref(), source).await {
        Acquisition::Picked(asset) => {
            let preview = match build_preview(&asset.uri).await {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("Preview generation failed for {}: {}", asset.uri, e);
                    None
                }
            };
            if session.select(asset, preview) {
                Ok(session.snapshot(None))
            } else {
                Ok(session.snapshot(Some(
                    "Finish the current analysis before picking a new photo.".to_string(),
                )))
            }
        }
        Acquisition::Cancelled => Ok(session.snapshot(Some("Selection cancelled.".to_string()))),
        Acquisition::PermissionDenied => {
            Ok(session.snapshot(Some(permission_notice(source).to_string())))
        }
    }
}

fn permission_notice(source: ImageSource) -> &'static str {
    match source {
        ImageSource::Gallery => "Please grant camera roll permissions to upload photos.",
        ImageSource::Camera => "Please grant camera permissions to take photos.",
    }
}

/// Downscaled preview for the webview, built off the blocking pool.
async fn build_preview(uri: &str) -> Result<String, String> {
    let path = uri.to_string();
    tokio::task::spawn_blocking(move || {
        let bytes =
            std::fs::read(&path).map_err(|e| format!("Failed to read '{}': {}", path, e))?;
        image_prep::preview_data_url(&bytes)
    })
    .await
    .map_err(|e| format!("Preview task panicked: {}", e))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_notices_are_actionable() {
        assert!(permission_notice(ImageSource::Gallery).contains("camera roll"));
        assert!(permission_notice(ImageSource::Camera).contains("camera permissions"));
    }
}
