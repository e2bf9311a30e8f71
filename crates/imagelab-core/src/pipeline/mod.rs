//! Request driver: validate, transform, encode.
//!
//! # Transform Order
//!
//! When both transforms are requested they run in this order:
//! 1. Channel override (red, then green, then blue)
//! 2. Convolution on the overridden raster
//!
//! # Failure Model
//!
//! Every stage either succeeds or aborts the whole request. Nothing is
//! retried and no partially processed image is returned.

mod request;

use std::time::Instant;

use thiserror::Error;

use crate::channel::apply_rgb_values;
use crate::convolve::{convolve_with, Kernel};
use crate::decode::{decode_image, DecodeError};
use crate::encode::encode;
use crate::raster::Raster;

pub use request::{
    FormEcho, FormFields, ProcessOptions, ProcessRequest, ProcessedImage, RequestSummary,
    DEFAULT_GRID_SIZE,
};

/// Reasons a request is rejected or fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// No image was supplied.
    #[error("No image file provided")]
    MissingInput,

    /// A parameter could not be parsed or is missing for a requested transform.
    #[error("{0}")]
    InvalidParameter(String),

    /// Neither transform was requested.
    #[error("No changes made to image")]
    NoOpRequested,

    /// Decoding, a transform or encoding failed.
    #[error("Error processing image: {0}")]
    ProcessingFailure(String),
}

impl PipelineError {
    /// True for errors caused by the request rather than by processing.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PipelineError::ProcessingFailure(_))
    }
}

/// Run the requested transforms on an already decoded raster.
///
/// # Errors
///
/// - `MissingInput` if `raster` is `None`
/// - `NoOpRequested` if neither flag is set
/// - `InvalidParameter` if a flag is set without its parameter
/// - `ProcessingFailure` if the kernel is degenerate
pub fn process_raster(
    raster: Option<&Raster>,
    request: &ProcessRequest,
    options: &ProcessOptions,
) -> Result<Raster, PipelineError> {
    let Some(raster) = raster else {
        log::warn!("rejected request: no image supplied");
        return Err(PipelineError::MissingInput);
    };

    if !request.has_changes() {
        log::warn!("rejected request: no changes requested");
        return Err(PipelineError::NoOpRequested);
    }

    let rgb = if request.rgb_modified {
        Some(request.rgb_values.ok_or_else(|| {
            PipelineError::InvalidParameter("rgb_modified is set but rgb_values is missing".into())
        })?)
    } else {
        None
    };

    let kernel = if request.kernel_modified {
        let weights = request.kernel_values.clone().ok_or_else(|| {
            PipelineError::InvalidParameter(
                "kernel_modified is set but kernel_values is missing".into(),
            )
        })?;
        Some(Kernel::new(weights).map_err(|e| PipelineError::ProcessingFailure(e.to_string()))?)
    } else {
        None
    };

    let mut current = raster.clone();

    if let Some(values) = rgb {
        let started = Instant::now();
        current = apply_rgb_values(&current, &values);
        log::debug!(
            "channel override {:?} on {}x{} in {:?}",
            values,
            current.width(),
            current.height(),
            started.elapsed()
        );
    }

    if let Some(kernel) = kernel {
        let started = Instant::now();
        current = convolve_with(&current, &kernel, options.edge_guard);
        log::debug!(
            "convolved {}x{} with {}x{} kernel ({:?}) in {:?}",
            current.width(),
            current.height(),
            kernel.height(),
            kernel.width(),
            options.edge_guard,
            started.elapsed()
        );
    }

    Ok(current)
}

/// Decode `bytes`, run the requested transforms and encode the result.
///
/// An empty buffer counts as a missing image.
pub fn process_image(
    bytes: &[u8],
    request: &ProcessRequest,
    options: &ProcessOptions,
) -> Result<ProcessedImage, PipelineError> {
    let raster = match decode_image(bytes) {
        Ok(raster) => Some(raster),
        Err(DecodeError::Empty) => None,
        Err(e) => {
            // NoOpRequested takes precedence over decode failures
            if !request.has_changes() {
                return Err(PipelineError::NoOpRequested);
            }
            log::warn!("decode failed: {e}");
            return Err(PipelineError::ProcessingFailure(e.to_string()));
        }
    };

    let result = process_raster(raster.as_ref(), request, options)?;

    let bytes = encode(&result, options.output).map_err(|e| {
        log::warn!("encode failed: {e}");
        PipelineError::ProcessingFailure(e.to_string())
    })?;

    log::debug!(
        "encoded {}x{} result as {} ({} bytes)",
        result.width(),
        result.height(),
        options.output.mime_type(),
        bytes.len()
    );

    Ok(ProcessedImage {
        bytes,
        mime_type: options.output.mime_type(),
        width: result.width(),
        height: result.height(),
        summary: request.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::RgbValues;
    use crate::encode::{encode_png, OutputFormat};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn gradient(width: u32, height: u32) -> Raster {
        let pixels = (0..width * height)
            .map(|i| {
                let v = (i * 11 % 256) as i32;
                [v, 255 - v, 100]
            })
            .collect();
        Raster::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_missing_raster() {
        let req = ProcessRequest::with_rgb(RgbValues::default());
        let err = process_raster(None, &req, &ProcessOptions::default()).unwrap_err();
        assert_eq!(err, PipelineError::MissingInput);
        assert!(err.is_client_error());
    }

    #[test]
    fn test_no_op_rejected() {
        let raster = gradient(4, 4);
        let err =
            process_raster(Some(&raster), &ProcessRequest::default(), &ProcessOptions::default())
                .unwrap_err();
        assert_eq!(err, PipelineError::NoOpRequested);
        assert_eq!(err.to_string(), "No changes made to image");
    }

    #[test]
    fn test_flag_without_values() {
        let raster = gradient(4, 4);
        let req = ProcessRequest {
            rgb_modified: true,
            ..ProcessRequest::default()
        };
        let err = process_raster(Some(&raster), &req, &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_kernel_is_processing_failure() {
        let raster = gradient(4, 4);
        let req = ProcessRequest::with_kernel(vec![]);
        let err = process_raster(Some(&raster), &req, &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::ProcessingFailure(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_rgb_request_replaces_every_channel() {
        init_logger();
        let raster = gradient(4, 4);
        let req = ProcessRequest::with_rgb(RgbValues::new(255, 12, 34));
        let result = process_raster(Some(&raster), &req, &ProcessOptions::default()).unwrap();
        assert!(result.pixels().iter().all(|p| *p == [255, 12, 34]));
    }

    #[test]
    fn test_identity_kernel_on_black() {
        let black = Raster::filled(4, 4, [0, 0, 0]).unwrap();
        let req = ProcessRequest::with_kernel(vec![vec![1.0]]);
        let result = process_raster(Some(&black), &req, &ProcessOptions::default()).unwrap();
        assert_eq!(result, black);
    }

    #[test]
    fn test_override_runs_before_convolution() {
        let raster = gradient(3, 3);
        let req = ProcessRequest {
            rgb_values: Some(RgbValues::new(40, 80, 120)),
            kernel_values: Some(vec![vec![1.0, 1.0], vec![1.0, 1.0]]),
            rgb_modified: true,
            kernel_modified: true,
            ..ProcessRequest::default()
        };
        let result = process_raster(Some(&raster), &req, &ProcessOptions::default()).unwrap();
        // A uniform raster stays uniform under a box blur
        assert!(result.pixels().iter().all(|p| *p == [40, 80, 120]));
    }

    #[test]
    fn test_edge_guard_option_is_used() {
        let raster = Raster::filled(4, 4, [9, 9, 9]).unwrap();
        let req = ProcessRequest::with_kernel(vec![vec![1.0]]);
        let opts = ProcessOptions {
            edge_guard: crate::EdgeGuard::Kernel,
            ..ProcessOptions::default()
        };
        let result = process_raster(Some(&raster), &req, &opts).unwrap();
        assert_eq!(result.get(3, 3), Some([0, 0, 0]));
    }

    #[test]
    fn test_process_image_png_round_trip() {
        init_logger();
        let raster = gradient(6, 5);
        let png = encode_png(&raster).unwrap();
        let req = ProcessRequest::with_kernel(vec![vec![1.0]]);

        let out = process_image(&png, &req, &ProcessOptions::default()).unwrap();
        assert_eq!(out.mime_type, "image/png");
        assert_eq!((out.width, out.height), (6, 5));
        assert_eq!(crate::decode::decode_image(&out.bytes).unwrap(), raster);
        assert_eq!(out.summary, req.summary());
    }

    #[test]
    fn test_process_image_jpeg_output() {
        let png = encode_png(&gradient(8, 8)).unwrap();
        let req = ProcessRequest::with_rgb(RgbValues::new(1, 2, 3));
        let opts = ProcessOptions {
            output: OutputFormat::Jpeg { quality: 85 },
            ..ProcessOptions::default()
        };
        let out = process_image(&png, &req, &opts).unwrap();
        assert_eq!(out.mime_type, "image/jpeg");
        assert_eq!(&out.bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_process_image_empty_bytes() {
        let req = ProcessRequest::with_rgb(RgbValues::default());
        let err = process_image(&[], &req, &ProcessOptions::default()).unwrap_err();
        assert_eq!(err, PipelineError::MissingInput);
    }

    #[test]
    fn test_process_image_corrupt_bytes() {
        let req = ProcessRequest::with_rgb(RgbValues::default());
        let err = process_image(b"nope", &req, &ProcessOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::ProcessingFailure(_)));

        let err =
            process_image(b"nope", &ProcessRequest::default(), &ProcessOptions::default())
                .unwrap_err();
        assert_eq!(err, PipelineError::NoOpRequested);
    }

    #[test]
    fn test_out_of_range_override_is_clamped_on_output() {
        let png = encode_png(&gradient(2, 2)).unwrap();
        let req = ProcessRequest::with_rgb(RgbValues::new(400, -20, 128));
        let out = process_image(&png, &req, &ProcessOptions::default()).unwrap();
        let decoded = crate::decode::decode_image(&out.bytes).unwrap();
        assert!(decoded.pixels().iter().all(|p| *p == [255, 0, 128]));
    }

    #[test]
    fn test_processed_image_summary_json() {
        let png = encode_png(&gradient(2, 2)).unwrap();
        let req = ProcessRequest {
            grid_size: 5,
            ..ProcessRequest::with_rgb(RgbValues::new(1, 2, 3))
        };
        let out = process_image(&png, &req, &ProcessOptions::default()).unwrap();
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json["grid_size"], 5);
        assert_eq!(json["rgb_modified"], true);
        assert_eq!(json["rgb_values"]["green"], 2);
        assert_eq!(json["kernel_values"], serde_json::json!([]));
        assert_eq!(json["mime_type"], "image/png");
        assert!(json.get("bytes").is_none());
    }
}
