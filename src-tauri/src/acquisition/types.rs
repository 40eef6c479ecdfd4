use serde::{Deserialize, Serialize};

/// A single locally addressable photo selected or captured by the user.
///
/// Created by acquisition on a successful pick; immutable afterwards. The
/// workflow owns it exclusively for the duration of one analysis cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Opaque locator for the image bytes (a filesystem path on desktop).
    pub uri: String,
    /// Pixel width, when the source reports it.
    pub width: Option<u32>,
    /// Pixel height, when the source reports it.
    pub height: Option<u32>,
}

/// Which device capability a pick request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Gallery,
    Camera,
}

/// Result of a permission capability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

/// Outcome of one acquisition attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Acquisition {
    /// Exactly one image was obtained.
    Picked(ImageAsset),
    /// The user dismissed the native picker.
    Cancelled,
    /// The permission capability reported "not granted"; no picker was shown.
    PermissionDenied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ImageSource::Gallery).unwrap(),
            r#""gallery""#
        );
        assert_eq!(
            serde_json::to_string(&ImageSource::Camera).unwrap(),
            r#""camera""#
        );
    }

    #[test]
    fn test_image_asset_round_trip() {
        let asset = ImageAsset {
            uri: "/photos/photo1.jpg".to_string(),
            width: Some(1024),
            height: Some(768),
        };

        let json = serde_json::to_string(&asset).unwrap();
        let back: ImageAsset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, back);
    }
}
