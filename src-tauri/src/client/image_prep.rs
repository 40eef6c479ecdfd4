//! Image payload and preview preparation.
//!
//! The upload payload is always JPEG; sources that already are JPEG pass
//! through byte-for-byte, everything else is re-encoded. Previews are
//! downscaled separately so the webview never loads full-size photos.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::info;

/// Longest edge for webview preview thumbnails.
pub const MAX_PREVIEW_DIMENSION: u32 = 512;

/// Return JPEG bytes for the upload payload.
///
/// Bytes that already are JPEG are returned unchanged so the payload is
/// exactly what the user picked; other formats are decoded and re-encoded.
///
/// # Errors
/// The bytes are not a decodable image.
pub fn ensure_jpeg(image_bytes: Vec<u8>) -> Result<Vec<u8>, String> {
    let already_jpeg = image::guess_format(&image_bytes)
        .map(|f| f == ImageFormat::Jpeg)
        .unwrap_or(false);
    if already_jpeg {
        return Ok(image_bytes);
    }

    let img = image::load_from_memory(&image_bytes)
        .map_err(|e| format!("Failed to load image: {}. Ensure it's a valid JPEG/PNG/WebP.", e))?;
    let jpeg = encode_to_jpeg(&img)?;
    info!(
        "Re-encoded {} byte image to {} byte JPEG",
        image_bytes.len(),
        jpeg.len()
    );
    Ok(jpeg)
}

/// Build a downscaled JPEG preview as a `data:` URL for the webview.
pub fn preview_data_url(image_bytes: &[u8]) -> Result<String, String> {
    let img = image::load_from_memory(image_bytes)
        .map_err(|e| format!("Failed to load image for preview: {}", e))?;

    let resized = resize_if_needed(img, MAX_PREVIEW_DIMENSION);
    let jpeg = encode_to_jpeg(&resized)?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)))
}

/// Resize image if either dimension exceeds max, maintaining aspect ratio.
fn resize_if_needed(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());

    if width <= max_dimension && height <= max_dimension {
        return img;
    }

    let scale = max_dimension as f32 / width.max(height) as f32;
    let new_width = (width as f32 * scale) as u32;
    let new_height = (height as f32 * scale) as u32;

    img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

/// Encode DynamicImage to JPEG bytes.
fn encode_to_jpeg(img: &DynamicImage) -> Result<Vec<u8>, String> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| format!("Failed to encode image to JPEG: {}", e))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        encode_to_jpeg(&img).unwrap()
    }

    #[test]
    fn test_ensure_jpeg_passes_jpeg_through_unchanged() {
        let original = jpeg_bytes(300, 200);
        let payload = ensure_jpeg(original.clone()).unwrap();
        assert_eq!(payload, original);
    }

    #[test]
    fn test_ensure_jpeg_re_encodes_png() {
        let payload = ensure_jpeg(png_bytes(300, 200)).unwrap();
        // JPEG magic bytes
        assert!(payload.len() > 2);
        assert_eq!(payload[0], 0xFF);
        assert_eq!(payload[1], 0xD8);
    }

    #[test]
    fn test_ensure_jpeg_rejects_non_image() {
        let result = ensure_jpeg(b"not an image".to_vec());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to load"));
    }

    #[test]
    fn test_preview_is_a_jpeg_data_url() {
        let url = preview_data_url(&png_bytes(300, 200)).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let encoded = url.trim_start_matches("data:image/jpeg;base64,");
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(decoded[0], 0xFF);
        assert_eq!(decoded[1], 0xD8);
    }

    #[test]
    fn test_resize_if_needed_no_resize() {
        let img = DynamicImage::new_rgb8(400, 300);
        let resized = resize_if_needed(img, 512);
        assert_eq!(resized.width(), 400);
        assert_eq!(resized.height(), 300);
    }

    #[test]
    fn test_resize_if_needed_resize_width() {
        let img = DynamicImage::new_rgb8(2048, 1024);
        let resized = resize_if_needed(img, 512);
        assert_eq!(resized.width(), 512);
        assert_eq!(resized.height(), 256);
    }

    #[test]
    fn test_resize_if_needed_resize_height() {
        let img = DynamicImage::new_rgb8(1024, 2048);
        let resized = resize_if_needed(img, 512);
        assert_eq!(resized.width(), 256);
        assert_eq!(resized.height(), 512);
    }
}
