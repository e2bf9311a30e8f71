//! Format-sniffing decoder built on `image::ImageReader`.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};
use thiserror::Error;

use crate::raster::{Raster, RasterError};

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Empty image data")]
    Empty,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has no pixels.
    #[error("Decoded image is unusable: {0}")]
    InvalidRaster(#[from] RasterError),
}

/// Guess the container format of `bytes` from its magic number.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Decode an encoded image into an RGB [`Raster`].
///
/// Alpha and extra channels are dropped; grayscale is expanded to RGB.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for an empty buffer,
/// `DecodeError::InvalidFormat` if the format cannot be recognized and
/// `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let Some(format) = reader.format() else {
        return Err(DecodeError::InvalidFormat);
    };

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    log::debug!(
        "decoded {:?} image {}x{}",
        format,
        img.width(),
        img.height()
    );

    Ok(Raster::from_rgb_image(&img.into_rgb8())?)
}
