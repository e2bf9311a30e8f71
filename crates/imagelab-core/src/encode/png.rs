//! PNG encoding, the default pipeline output.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;

use super::EncodeError;
use crate::raster::Raster;

/// Encode a raster as an 8-bit RGB PNG.
///
/// Channels are clamped to 0-255 first.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Cursor::new(Vec::new());

    PngEncoder::new(&mut buffer)
        .write_image(
            &raster.to_rgb_bytes(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed {
            format: "PNG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
