//! imagelab WASM - WebAssembly bindings for imagelab
//!
//! This crate exposes the imagelab-core pipeline and raster utilities to
//! the browser front end, which calls them directly instead of posting the
//! upload form to a server.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for raster data
//! - `process` - The request pipeline (channel override + convolution)
//! - `transform` - Individual transforms (override, convolve, composite, rotate)
//! - `decode` / `encode` - Conversion between image files and rasters
//!
//! # Usage
//!
//! ```typescript
//! import init, { process_image } from '@imagelab/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = process_image(bytes, JSON.stringify(rgb), JSON.stringify(kernel),
//!                              'true', 'true', '3');
//! const url = URL.createObjectURL(new Blob([result.bytes()], { type: result.mime_type }));
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod process;
mod transform;
mod types;

pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use process::{process_image, process_image_with};
pub use transform::{apply_rgb_values, composite, convolve, override_channel, rotate};
pub use types::{JsProcessedImage, JsRaster};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Wrap any displayable error as a JavaScript `Error`.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
