//! Platform access to the user's photo sources.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::types::{Access, ImageAsset};

/// Capability-gated access to the platform's photo sources.
///
/// Permission requests are idempotent: once the platform has granted or
/// permanently denied access, repeated calls do not re-prompt.
#[async_trait]
pub trait MediaGateway: Send + Sync {
    async fn request_gallery_access(&self) -> Access;
    async fn request_camera_access(&self) -> Access;
    /// Open the native gallery picker. `None` means the user cancelled.
    async fn pick_from_gallery(&self) -> Option<ImageAsset>;
    /// Open the native capture flow. `None` means the user cancelled.
    async fn capture_from_camera(&self) -> Option<ImageAsset>;
}

/// Tauri-managed handle to the active gateway implementation.
pub struct MediaState(pub Arc<dyn MediaGateway>);

impl MediaState {
    pub fn desktop() -> Self {
        Self(Arc::new(DesktopMedia::new()))
    }
}

/// File-dialog backed gateway for desktop platforms.
///
/// Desktop file dialogs carry no runtime permission, so both access checks
/// report `Granted`. There is no OS camera picker either; the capture path
/// imports a photo the user just took with the system camera app, which
/// keeps the permission-gated contract intact for platforms that enforce one.
pub struct DesktopMedia;

impl DesktopMedia {
    pub fn new() -> Self {
        Self
    }

    async fn pick(&self, title: &str) -> Option<ImageAsset> {
        let file = rfd::AsyncFileDialog::new()
            .set_title(title)
            .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
            .pick_file()
            .await?;

        let path = file.path().to_path_buf();
        let dimensions = match image::image_dimensions(&path) {
            Ok(d) => Some(d),
            Err(e) => {
                warn!("Could not read dimensions for {:?}: {}", path, e);
                None
            }
        };

        Some(ImageAsset {
            uri: path.to_string_lossy().to_string(),
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
        })
    }
}

#[async_trait]
impl MediaGateway for DesktopMedia {
    async fn request_gallery_access(&self) -> Access {
        Access::Granted
    }

    async fn request_camera_access(&self) -> Access {
        Access::Granted
    }

    async fn pick_from_gallery(&self) -> Option<ImageAsset> {
        self.pick("Choose a photo").await
    }

    async fn capture_from_camera(&self) -> Option<ImageAsset> {
        self.pick("Import a captured photo").await
    }
}
