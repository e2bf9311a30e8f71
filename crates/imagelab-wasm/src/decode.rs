//! Image decoding WASM bindings.

use crate::types::JsRaster;
use imagelab_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an encoded image (PNG, JPEG) into a raster.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const raster = decode_image(bytes);
/// console.log(`Decoded ${raster.width}x${raster.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(crate::js_error)
}
