//! The capture -> analyze -> view lifecycle.
//!
//! A single [`WorkflowState`] per app session is the source of truth for
//! where the user is in the cycle. Transition methods are the only mutation
//! path, and the upload client is only ever invoked through the
//! `Selected -> Analyzing` edge, so at most one submission is in flight.

use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

use crate::acquisition::ImageAsset;
use crate::client::{AnalysisClient, AnalysisReport};
use crate::error::UploadError;

/// Where the user is in the capture -> analyze -> view cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    Idle,
    Selected { asset: ImageAsset },
    Analyzing { asset: ImageAsset },
    Result { report: AnalysisReport, asset: ImageAsset },
    Failed { error: UploadError, asset: ImageAsset },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Selected { .. } => "selected",
            WorkflowState::Analyzing { .. } => "analyzing",
            WorkflowState::Result { .. } => "result",
            WorkflowState::Failed { .. } => "failed",
        }
    }

    /// Adopt a newly acquired asset. A fresh pick supersedes a previous
    /// selection; any other state refuses the asset.
    pub fn select(&mut self, asset: ImageAsset) -> bool {
        match self {
            WorkflowState::Idle | WorkflowState::Selected { .. } => {
                *self = WorkflowState::Selected { asset };
                true
            }
            _ => false,
        }
    }

    /// `Selected -> Analyzing`. Returns the asset to submit, or `None` when
    /// the transition does not apply (notably while already `Analyzing`, so
    /// a repeated confirm is a no-op).
    pub fn begin_analysis(&mut self) -> Option<ImageAsset> {
        match self {
            WorkflowState::Selected { asset } => {
                let asset = asset.clone();
                *self = WorkflowState::Analyzing {
                    asset: asset.clone(),
                };
                Some(asset)
            }
            _ => None,
        }
    }

    /// `Analyzing -> Result | Failed`. The asset recorded with the outcome
    /// is exactly the one that was submitted.
    pub fn complete(&mut self, outcome: Result<AnalysisReport, UploadError>) -> bool {
        match self {
            WorkflowState::Analyzing { asset } => {
                let asset = asset.clone();
                *self = match outcome {
                    Ok(report) => WorkflowState::Result { report, asset },
                    Err(error) => WorkflowState::Failed { error, asset },
                };
                true
            }
            _ => false,
        }
    }

    /// `Failed -> Selected`, restoring the preserved asset so the user can
    /// re-submit it without picking again.
    pub fn retry(&mut self) -> bool {
        match self {
            WorkflowState::Failed { asset, .. } => {
                let asset = asset.clone();
                *self = WorkflowState::Selected { asset };
                true
            }
            _ => false,
        }
    }

    /// `Selected -> Idle`, discarding the asset.
    pub fn clear_selection(&mut self) -> bool {
        match self {
            WorkflowState::Selected { .. } => {
                *self = WorkflowState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Return to `Idle`, discarding all held data. Backs both "new analysis"
    /// and "home". An in-flight submission cannot be abandoned, so
    /// `Analyzing` stays put.
    pub fn restart(&mut self) -> bool {
        match self {
            WorkflowState::Analyzing { .. } => false,
            _ => {
                *self = WorkflowState::Idle;
                true
            }
        }
    }
}

/// Asset fields the display layer needs. The preview travels with the asset
/// so the webview can show the picked photo without filesystem access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetView {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub preview: Option<String>,
}

/// Renderable projection of the current state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SnapshotState {
    Idle,
    Selected { asset: AssetView },
    Analyzing { asset: AssetView },
    Result { asset: AssetView, report: AnalysisReport },
    Failed { asset: AssetView, error: UploadError },
}

/// What a workflow command hands back to the display layer. The notice is
/// transient commentary (a cancelled pick, a permission refusal), never a
/// state of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSnapshot {
    pub state: SnapshotState,
    pub notice: Option<String>,
}

struct SessionInner {
    state: WorkflowState,
    preview: Option<String>,
}

/// Per-app workflow session held in Tauri managed state.
///
/// All mutation is serialized through the inner mutex. [`run_analysis`]
/// holds the lock only across transitions, never across the network call,
/// so reads stay responsive while a submission is in flight.
///
/// [`run_analysis`]: WorkflowSession::run_analysis
pub struct WorkflowSession {
    inner: Mutex<SessionInner>,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                state: WorkflowState::Idle,
                preview: None,
            }),
        }
    }

    /// Adopt a picked asset along with its webview preview.
    pub fn select(&self, asset: ImageAsset, preview: Option<String>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let adopted = inner.state.select(asset);
        if adopted {
            inner.preview = preview;
        } else {
            warn!(
                "Pick refused while workflow is {}",
                inner.state.name()
            );
        }
        adopted
    }

    /// Drive one full analysis attempt: flip to `Analyzing`, submit, record
    /// the outcome. A call that finds anything but `Selected` changes
    /// nothing and returns the current snapshot, so a double confirm
    /// submits exactly once.
    pub async fn run_analysis(&self, client: &AnalysisClient) -> WorkflowSnapshot {
        let begun = {
            let mut inner = self.inner.lock().unwrap();
            inner.state.begin_analysis()
        };
        let asset = match begun {
            Some(asset) => asset,
            None => {
                info!("Confirm ignored; no selection awaiting analysis");
                return self.snapshot(None);
            }
        };

        info!("Analyzing {}", asset.uri);
        let outcome = client.submit(&asset).await;
        {
            let mut inner = self.inner.lock().unwrap();
            match &outcome {
                Ok(_) => info!("Analysis of {} succeeded", asset.uri),
                Err(e) => warn!("Analysis of {} failed: {}", asset.uri, e),
            }
            if !inner.state.complete(outcome) {
                warn!("Analysis outcome arrived after the workflow moved on");
            }
        }
        self.snapshot(None)
    }

    /// Restore a failed submission's asset for another attempt.
    pub fn retry(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.state.retry()
    }

    pub fn clear_selection(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let cleared = inner.state.clear_selection();
        if cleared {
            inner.preview = None;
        }
        cleared
    }

    pub fn restart(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let reset = inner.state.restart();
        if reset {
            inner.preview = None;
        }
        reset
    }

    /// Current state for tests and diagnostics.
    pub fn state(&self) -> WorkflowState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Renderable projection of the current state, with an optional
    /// transient notice attached.
    pub fn snapshot(&self, notice: Option<String>) -> WorkflowSnapshot {
        let inner = self.inner.lock().unwrap();
        let view = |asset: &ImageAsset| AssetView {
            uri: asset.uri.clone(),
            width: asset.width,
            height: asset.height,
            preview: inner.preview.clone(),
        };

        let state = match &inner.state {
            WorkflowState::Idle => SnapshotState::Idle,
            WorkflowState::Selected { asset } => SnapshotState::Selected { asset: view(asset) },
            WorkflowState::Analyzing { asset } => SnapshotState::Analyzing { asset: view(asset) },
            WorkflowState::Result { report, asset } => SnapshotState::Result {
                asset: view(asset),
                report: report.clone(),
            },
            WorkflowState::Failed { error, asset } => SnapshotState::Failed {
                asset: view(asset),
                error: error.clone(),
            },
        };
        WorkflowSnapshot { state, notice }
    }
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}
