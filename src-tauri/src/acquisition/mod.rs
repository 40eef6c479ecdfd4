//! Image acquisition: permission negotiation and native photo picking.
//!
//! Every screen obtains images through the single [`acquire`] entry point,
//! so the permission-then-pick sequence lives in exactly one place.

pub mod gateway;
pub mod types;

pub use gateway::{DesktopMedia, MediaGateway, MediaState};
pub use types::{Access, Acquisition, ImageAsset, ImageSource};

use tracing::info;

/// Obtain a single image from the requested source.
///
/// The permission capability is checked before the picker is invoked; a
/// denial returns [`Acquisition::PermissionDenied`] without showing the
/// picker. A dismissed picker returns [`Acquisition::Cancelled`]. Multi-select
/// is not supported; a successful pick yields exactly one asset.
pub async fn acquire(gateway: &dyn MediaGateway, source: ImageSource) -> Acquisition {
    let access = match source {
        ImageSource::Gallery => gateway.request_gallery_access().await,
        ImageSource::Camera => gateway.request_camera_access().await,
    };
    if access == Access::Denied {
        info!("{:?} access denied, picker not opened", source);
        return Acquisition::PermissionDenied;
    }

    let picked = match source {
        ImageSource::Gallery => gateway.pick_from_gallery().await,
        ImageSource::Camera => gateway.capture_from_camera().await,
    };
    match picked {
        Some(asset) => {
            info!("Acquired image from {:?}: {}", source, asset.uri);
            Acquisition::Picked(asset)
        }
        None => {
            info!("{:?} pick cancelled by user", source);
            Acquisition::Cancelled
        }
    }
}
