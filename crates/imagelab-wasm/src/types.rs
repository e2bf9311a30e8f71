//! WASM-compatible wrapper types for raster data.
//!
//! This module provides JavaScript-friendly types that wrap the core imagelab
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use imagelab_core::{ProcessedImage, Raster};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A raster wrapper for JavaScript.
///
/// Internally channels are kept as signed integers so intermediate results
/// can leave the 0-255 band. `pixels()` hands JavaScript clamped RGB bytes,
/// ready for an `ImageData` or a canvas.
#[wasm_bindgen]
pub struct JsRaster {
    inner: Raster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a JsRaster from dimensions and RGB bytes.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        Self::from_rgb_bytes(width, height, &pixels).map_err(crate::js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes `pixels()` returns (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixel_count() * 3
    }

    /// Returns clamped RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.to_rgb_bytes()
    }
}

impl JsRaster {
    pub(crate) fn from_raster(inner: Raster) -> Self {
        Self { inner }
    }

    pub(crate) fn raster(&self) -> &Raster {
        &self.inner
    }

    pub(crate) fn from_rgb_bytes(
        width: u32,
        height: u32,
        bytes: &[u8],
    ) -> Result<Self, imagelab_core::RasterError> {
        let expected = Raster::checked_pixel_count(width, height)?;
        let byte_len = expected
            .checked_mul(3)
            .ok_or(imagelab_core::RasterError::InvalidDimensions { width, height })?;
        if bytes.len() != byte_len {
            return Err(imagelab_core::RasterError::InvalidPixelData {
                expected,
                actual: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| [c[0] as i32, c[1] as i32, c[2] as i32])
            .collect();
        Raster::new(width, height, pixels).map(Self::from_raster)
    }
}

/// Result of a pipeline run, for JavaScript.
#[wasm_bindgen]
pub struct JsProcessedImage {
    inner: ProcessedImage,
}

#[wasm_bindgen]
impl JsProcessedImage {
    /// Encoded image bytes
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// MIME type of `bytes()`, e.g. `image/png`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// The request this image answers, as a plain object
    /// (`grid_size`, `rgb_values`, `kernel_values`, both flags).
    ///
    /// JSON objects become plain JS objects rather than `Map`s.
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        self.inner
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(crate::js_error)
    }
}

impl JsProcessedImage {
    pub(crate) fn from_processed(inner: ProcessedImage) -> Self {
        Self { inner }
    }
}
