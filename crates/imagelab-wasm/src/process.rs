//! WASM bindings for the request pipeline.
//!
//! `process_image` takes the same string fields the upload form posts, so
//! the front end can switch between a server round trip and local
//! processing without reshaping its data. `process_image_with` takes typed
//! objects instead.

use crate::types::JsProcessedImage;
use imagelab_core::{FormFields, PipelineError, ProcessOptions, ProcessRequest};
use wasm_bindgen::prelude::*;

/// Process an uploaded image from raw form fields.
///
/// # Arguments
///
/// * `bytes` - Encoded image file (`Uint8Array`)
/// * `rgb_values` - JSON object `{"red", "green", "blue"}`
/// * `kernel_values` - JSON array of weight rows
/// * `rgb_modified` / `kernel_modified` - `"true"` to enable a transform
/// * `grid_size` - Integer string, echoed back in the summary
///
/// # Errors
///
/// Throws an `Error` with a `status` property: 400 for request problems,
/// 500 for processing failures.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const result = process_image(bytes, '{"red":255,"green":0,"blue":0}', undefined,
///                              'true', undefined, undefined);
/// ```
#[wasm_bindgen]
pub fn process_image(
    bytes: &[u8],
    rgb_values: Option<String>,
    kernel_values: Option<String>,
    rgb_modified: Option<String>,
    kernel_modified: Option<String>,
    grid_size: Option<String>,
) -> Result<JsProcessedImage, JsValue> {
    let form = FormFields {
        grid_size,
        rgb_values,
        kernel_values,
        rgb_modified,
        kernel_modified,
    };
    run_form(bytes, &form)
        .map(JsProcessedImage::from_processed)
        .map_err(pipeline_error)
}

/// Process an uploaded image from a typed request object.
///
/// `options` may be `undefined` or `null` for the defaults (PNG output,
/// raster edge guard).
#[wasm_bindgen]
pub fn process_image_with(
    bytes: &[u8],
    request: JsValue,
    options: JsValue,
) -> Result<JsProcessedImage, JsValue> {
    let request: ProcessRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| pipeline_error(PipelineError::InvalidParameter(e.to_string())))?;

    let options: ProcessOptions = if options.is_undefined() || options.is_null() {
        ProcessOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| pipeline_error(PipelineError::InvalidParameter(e.to_string())))?
    };

    imagelab_core::process_image(bytes, &request, &options)
        .map(JsProcessedImage::from_processed)
        .map_err(pipeline_error)
}

fn run_form(
    bytes: &[u8],
    form: &FormFields,
) -> Result<imagelab_core::ProcessedImage, PipelineError> {
    // A missing upload is reported before any field is parsed
    if bytes.is_empty() {
        return Err(PipelineError::MissingInput);
    }
    let request = ProcessRequest::from_form(form)?;
    imagelab_core::process_image(bytes, &request, &ProcessOptions::default())
}

fn status_code(err: &PipelineError) -> u16 {
    if err.is_client_error() {
        400
    } else {
        500
    }
}

fn pipeline_error(err: PipelineError) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&err.to_string()));

    let error = js_sys::Error::new(&err.to_string());
    let attached = js_sys::Reflect::set(
        &error,
        &JsValue::from_str("status"),
        &JsValue::from(status_code(&err)),
    );
    debug_assert!(matches!(attached, Ok(true)), "failed to set status on error");
    error.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use imagelab_core::{encode::encode_png, Raster};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let pixels = (0..width * height)
            .map(|i| [(i * 7 % 256) as i32, 30, 60])
            .collect();
        encode_png(&Raster::new(width, height, pixels).unwrap()).unwrap()
    }

    fn form(rgb_modified: bool, kernel_modified: bool) -> FormFields {
        FormFields {
            grid_size: Some("3".into()),
            rgb_values: Some(r#"{"red": 10, "green": 20, "blue": 30}"#.into()),
            kernel_values: Some("[[0, 0, 0], [0, 1, 0], [0, 0, 0]]".into()),
            rgb_modified: Some(rgb_modified.to_string()),
            kernel_modified: Some(kernel_modified.to_string()),
        }
    }

    #[test]
    fn test_run_form_rgb() {
        let out = run_form(&png(4, 3), &form(true, false)).unwrap();
        assert_eq!((out.width, out.height), (4, 3));
        assert_eq!(out.mime_type, "image/png");
        assert_eq!(out.summary.grid_size, 3);

        let decoded = imagelab_core::decode_image(&out.bytes).unwrap();
        assert!(decoded.pixels().iter().all(|p| *p == [10, 20, 30]));
    }

    #[test]
    fn test_run_form_both_transforms() {
        let out = run_form(&png(5, 5), &form(true, true)).unwrap();
        assert!(out.summary.rgb_modified && out.summary.kernel_modified);
        assert_eq!(out.summary.kernel_values[1][1], 1);
    }

    #[test]
    fn test_run_form_missing_input_first() {
        let mut f = form(true, false);
        f.grid_size = Some("not a number".into());
        assert_eq!(run_form(&[], &f).unwrap_err(), PipelineError::MissingInput);
    }

    #[test]
    fn test_run_form_no_changes() {
        let err = run_form(&png(2, 2), &form(false, false)).unwrap_err();
        assert_eq!(err, PipelineError::NoOpRequested);
    }

    #[test]
    fn test_run_form_bad_json() {
        let mut f = form(true, false);
        f.rgb_values = Some("{".into());
        let err = run_form(&png(2, 2), &f).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(status_code(&PipelineError::MissingInput), 400);
        assert_eq!(status_code(&PipelineError::NoOpRequested), 400);
        assert_eq!(status_code(&PipelineError::InvalidParameter("x".into())), 400);
        assert_eq!(status_code(&PipelineError::ProcessingFailure("x".into())), 500);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_error_carries_status() {
        let err = process_image(&[], None, None, None, None, None)
            .err()
            .unwrap();
        let status = js_sys::Reflect::get(&err, &JsValue::from_str("status")).unwrap();
        assert_eq!(status.as_f64(), Some(400.0));
    }

    #[wasm_bindgen_test]
    fn test_processing_failure_status() {
        let err = process_image(
            b"nope",
            Some(r#"{"red": 1, "green": 2, "blue": 3}"#.into()),
            None,
            Some("true".into()),
            None,
            None,
        )
        .err()
        .unwrap();
        let status = js_sys::Reflect::get(&err, &JsValue::from_str("status")).unwrap();
        assert_eq!(status.as_f64(), Some(500.0));
    }

    #[wasm_bindgen_test]
    fn test_process_with_default_options() {
        let request = serde_wasm_bindgen::to_value(&ProcessRequest::with_kernel(vec![vec![1.0]]))
            .unwrap();
        let bytes = imagelab_core::encode::encode_png(
            &imagelab_core::Raster::filled(2, 2, [5, 5, 5]).unwrap(),
        )
        .unwrap();
        let out = process_image_with(&bytes, request, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.mime_type(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_summary_is_plain_object() {
        let bytes = imagelab_core::encode::encode_png(
            &imagelab_core::Raster::filled(2, 2, [5, 5, 5]).unwrap(),
        )
        .unwrap();
        let out = process_image(
            &bytes,
            Some(r#"{"red": 7, "green": 8, "blue": 9}"#.into()),
            None,
            Some("true".into()),
            None,
            Some("-2".into()),
        )
        .unwrap();
        let summary = out.summary().unwrap();
        let grid_size = js_sys::Reflect::get(&summary, &JsValue::from_str("grid_size")).unwrap();
        assert_eq!(grid_size.as_f64(), Some(-2.0));
        let rgb = js_sys::Reflect::get(&summary, &JsValue::from_str("rgb_values")).unwrap();
        let red = js_sys::Reflect::get(&rgb, &JsValue::from_str("red")).unwrap();
        assert_eq!(red.as_f64(), Some(7.0));
    }
}
