//! WASM bindings for the individual raster transforms.
//!
//! These mirror the core functions one to one so the front end can preview
//! a single step without running the whole pipeline.

use crate::types::JsRaster;
use imagelab_core::{Channel, EdgeGuard, Kernel, Position, RgbValues};
use wasm_bindgen::prelude::*;

/// Replace one channel (`"red"`, `"green"` or `"blue"`) with `amount`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const noRed = override_channel(raster, 'red', 0);
/// ```
#[wasm_bindgen]
pub fn override_channel(image: &JsRaster, channel: &str, amount: i32) -> Result<JsRaster, JsValue> {
    let channel: Channel = channel.parse().map_err(crate::js_error)?;
    Ok(JsRaster::from_raster(imagelab_core::override_channel(
        image.raster(),
        channel,
        amount,
    )))
}

/// Replace all three channels, red first.
#[wasm_bindgen]
pub fn apply_rgb_values(image: &JsRaster, red: i32, green: i32, blue: i32) -> JsRaster {
    let values = RgbValues::new(red, green, blue);
    JsRaster::from_raster(imagelab_core::apply_rgb_values(image.raster(), &values))
}

/// Convolve with a kernel given as row-major weights.
///
/// # Arguments
///
/// * `image` - Source raster
/// * `weights` - Kernel weights, row by row (`Float64Array`)
/// * `kernel_width` - Number of weights per row
/// * `edge_guard` - `"raster"` (default), `"raster_strict"` or `"kernel"`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const sharpened = convolve(raster, new Float64Array([0, -1, 0, -1, 5, -1, 0, -1, 0]), 3);
/// ```
#[wasm_bindgen]
pub fn convolve(
    image: &JsRaster,
    weights: &[f64],
    kernel_width: usize,
    edge_guard: Option<String>,
) -> Result<JsRaster, JsValue> {
    let kernel = kernel_from_flat(weights, kernel_width)?;
    let guard = parse_edge_guard(edge_guard.as_deref())?;
    Ok(JsRaster::from_raster(imagelab_core::convolve_with(
        image.raster(),
        &kernel,
        guard,
    )))
}

/// Paste `overlay` onto `base` at `(row, col)`, clamped to fit.
#[wasm_bindgen]
pub fn composite(base: &JsRaster, overlay: &JsRaster, row: i32, col: i32) -> Result<JsRaster, JsValue> {
    let position = Position::new(i64::from(row), i64::from(col));
    imagelab_core::composite(base.raster(), overlay.raster(), position)
        .map(JsRaster::from_raster)
        .map_err(crate::js_error)
}

/// Rotate clockwise by `steps` quarter turns (clamped to 1..=3).
#[wasm_bindgen]
pub fn rotate(image: &JsRaster, steps: i32) -> JsRaster {
    JsRaster::from_raster(imagelab_core::rotate(image.raster(), steps))
}

fn kernel_from_flat(weights: &[f64], kernel_width: usize) -> Result<Kernel, JsValue> {
    if kernel_width == 0 || weights.len() % kernel_width != 0 {
        return Err(crate::js_error(format!(
            "{} weights do not form rows of {}",
            weights.len(),
            kernel_width
        )));
    }
    let rows = weights.chunks_exact(kernel_width).map(<[f64]>::to_vec).collect();
    Kernel::new(rows).map_err(crate::js_error)
}

fn parse_edge_guard(name: Option<&str>) -> Result<EdgeGuard, JsValue> {
    match name {
        None | Some("raster") => Ok(EdgeGuard::Raster),
        Some("raster_strict") => Ok(EdgeGuard::RasterStrict),
        Some("kernel") => Ok(EdgeGuard::Kernel),
        Some(other) => Err(crate::js_error(format!("Unknown edge guard: {other}"))),
    }
}

/// Tests for transform bindings.
///
/// Only success paths run natively; building a `JsValue` error needs a
/// JavaScript host, so failure paths live in `wasm_tests`.
#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsRaster {
        let bytes: Vec<u8> = (0..width * height * 3).map(|i| (i * 5 % 256) as u8).collect();
        JsRaster::from_rgb_bytes(width, height, &bytes).unwrap()
    }

    #[test]
    fn test_override_channel_binding() {
        let img = gradient(3, 3);
        let result = override_channel(&img, "green", 200).unwrap();
        for (orig, new) in img.pixels().chunks(3).zip(result.pixels().chunks(3)) {
            assert_eq!(new[0], orig[0]);
            assert_eq!(new[1], 200);
            assert_eq!(new[2], orig[2]);
        }
    }

    #[test]
    fn test_apply_rgb_values_binding() {
        let result = apply_rgb_values(&gradient(2, 2), 1, 2, 3);
        assert_eq!(result.pixels(), [1u8, 2, 3].repeat(4));
    }

    #[test]
    fn test_convolve_identity_binding() {
        let img = gradient(4, 4);
        let result = convolve(&img, &[1.0], 1, None).unwrap();
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_convolve_flat_kernel_shape() {
        let img = gradient(5, 5);
        let result = convolve(&img, &[1.0; 6], 3, Some("raster_strict".into())).unwrap();
        assert_eq!(result.width(), 5);
        assert_eq!(result.height(), 5);
    }

    #[test]
    fn test_composite_binding() {
        let base = JsRaster::from_rgb_bytes(4, 4, &[0u8; 48]).unwrap();
        let overlay = JsRaster::from_rgb_bytes(2, 2, &[9u8; 12]).unwrap();
        let result = composite(&base, &overlay, 100, -100).unwrap();
        // clamped to row 2, col 0
        assert_eq!(result.raster().get(2, 0), Some([9, 9, 9]));
        assert_eq!(result.raster().get(3, 1), Some([9, 9, 9]));
        assert_eq!(result.raster().get(1, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_rotate_binding() {
        let img = gradient(5, 2);
        let result = rotate(&img, 1);
        assert_eq!((result.width(), result.height()), (2, 5));
    }

    #[test]
    fn test_parse_edge_guard_known_names() {
        assert_eq!(parse_edge_guard(None).unwrap(), EdgeGuard::Raster);
        assert_eq!(parse_edge_guard(Some("kernel")).unwrap(), EdgeGuard::Kernel);
    }
}
