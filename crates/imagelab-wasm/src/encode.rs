//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@imagelab/wasm';
//!
//! const png = encode_png(raster);
//! const jpeg = encode_jpeg(raster, 90);
//! ```

use crate::types::JsRaster;
use imagelab_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a raster as PNG. Channels are clamped to 0-255.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.raster()).map_err(crate::js_error)
}

/// Encode a raster as JPEG.
///
/// # Arguments
///
/// * `image` - The raster to encode
/// * `quality` - JPEG quality (1-100, recommended: 90)
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.raster(), quality).map_err(crate::js_error)
}
