//! JPEG encoding.
//!
//! Uses the `image` crate's JPEG encoder with a configurable quality.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;
use crate::raster::Raster;

/// Quality used when the caller does not pick one.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a raster as JPEG.
///
/// # Arguments
///
/// * `raster` - Raster to encode; channels are clamped to 0-255
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for further editing
/// * 60-90: Good quality for web display
/// * Below 60: Visible artifacts
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(
            &raster.to_rgb_bytes(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let raster = Raster::filled(100, 100, [128, 128, 128]).unwrap();
        let jpeg = encode_jpeg(&raster, DEFAULT_JPEG_QUALITY).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let raster = Raster::filled(10, 10, [128, 128, 128]).unwrap();

        // Quality 0 should be clamped to 1
        assert!(encode_jpeg(&raster, 0).is_ok());
        // Quality 255 should be clamped to 100
        assert!(encode_jpeg(&raster, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_out_of_range_does_not_fail() {
        let raster = Raster::filled(8, 8, [-400, 900, 128]).unwrap();
        assert!(encode_jpeg(&raster, 90).is_ok());
    }

    #[test]
    fn test_encode_jpeg_non_square() {
        let wide = Raster::filled(200, 50, [1, 2, 3]).unwrap();
        assert!(encode_jpeg(&wide, 90).is_ok());

        let tall = Raster::filled(50, 200, [1, 2, 3]).unwrap();
        assert!(encode_jpeg(&tall, 90).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
