#![recursion_limit = "256"]

pub mod acquisition;
pub mod client;
mod commands;
pub mod error;
pub mod workflow;

pub use acquisition::{acquire, Acquisition, ImageAsset, ImageSource, MediaGateway};
pub use client::{AnalysisClient, AnalysisReport};
pub use error::UploadError;
pub use workflow::{WorkflowSession, WorkflowSnapshot, WorkflowState};

use acquisition::MediaState;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .manage(WorkflowSession::new())
        .manage(MediaState::desktop())
        .invoke_handler(tauri::generate_handler![
            commands::workflow::select_from_gallery,
            commands::workflow::select_from_camera,
            commands::workflow::confirm_analysis,
            commands::workflow::retry_analysis,
            commands::workflow::clear_selection,
            commands::workflow::restart,
            commands::workflow::workflow_state,
            commands::config::get_preference,
            commands::config::set_preference,
            commands::health::run_health_check,
            commands::history::get_analysis_history,
            commands::history::get_analysis,
            commands::history::delete_analysis,
            commands::history::get_consultation,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
