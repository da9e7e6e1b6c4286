//! Image import: decoding raster bytes before an image element is
//! created.
//!
//! Decoding is the one asynchronous boundary around element creation:
//! callers run [`decode_image_task`] to completion and then perform the
//! same synchronous create as any other tool action. No engine state is
//! visible mid-decode.

use crate::elements::{ImageContent, ImageFormat};
use crate::storage::BoxFuture;
use image::GenericImageView;
use thiserror::Error;

/// Image import errors.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported image format")]
    UnsupportedFormat,
    #[error("image decode failed: {0}")]
    Decode(String),
}

/// A decoded image ready to become an element payload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub format: ImageFormat,
    /// Pixel width of the source.
    pub width: u32,
    /// Pixel height of the source.
    pub height: u32,
    /// The original encoded bytes (what the element stores).
    pub bytes: Vec<u8>,
    /// Decoded RGBA8 pixels, row-major, for the view layer's texture
    /// upload.
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Convert into the element payload, dropping the pixel buffer.
    pub fn into_content(self) -> ImageContent {
        ImageContent::new(self.format, &self.bytes, self.width, self.height)
    }
}

/// Decode image bytes, sniffing the format from magic bytes.
pub fn decode_image(bytes: Vec<u8>) -> Result<DecodedImage, ImportError> {
    let format = ImageFormat::from_magic_bytes(&bytes).ok_or(ImportError::UnsupportedFormat)?;
    let decoded =
        image::load_from_memory(&bytes).map_err(|e| ImportError::Decode(e.to_string()))?;
    let (width, height) = decoded.dimensions();
    Ok(DecodedImage {
        format,
        width,
        height,
        bytes,
        rgba: decoded.to_rgba8().into_raw(),
    })
}

/// Run the decode as a single asynchronous task.
pub fn decode_image_task(bytes: Vec<u8>) -> BoxFuture<'static, Result<DecodedImage, ImportError>> {
    Box::pin(async move { decode_image(bytes) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([40, 80, 120, 255]));
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn decode_reports_dimensions_and_pixels() {
        let decoded = decode_image(png_bytes(2, 3)).unwrap();
        assert_eq!(decoded.format, ImageFormat::Png);
        assert_eq!((decoded.width, decoded.height), (2, 3));
        assert_eq!(decoded.rgba.len(), 2 * 3 * 4);
    }

    #[test]
    fn garbage_is_unsupported() {
        let result = decode_image(b"definitely not an image".to_vec());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat)));
    }

    #[test]
    fn truncated_png_fails_decode() {
        let mut bytes = png_bytes(4, 4);
        bytes.truncate(12);
        assert!(matches!(decode_image(bytes), Err(ImportError::Decode(_))));
    }

    #[test]
    fn task_resolves_to_the_same_decode() {
        let decoded = block_on(decode_image_task(png_bytes(5, 2))).unwrap();
        assert_eq!((decoded.width, decoded.height), (5, 2));
    }

    #[test]
    fn content_keeps_encoded_bytes() {
        let bytes = png_bytes(2, 2);
        let decoded = decode_image(bytes.clone()).unwrap();
        let content = decoded.into_content();
        assert_eq!(content.data(), Some(bytes));
        assert_eq!((content.source_width, content.source_height), (2, 2));
    }
}
