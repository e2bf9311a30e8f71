//! Image encoding for processed rasters.
//!
//! This module provides functionality for:
//! - Encoding rasters to PNG (lossless, the default output)
//! - Encoding rasters to JPEG with configurable quality
//!
//! Channels outside 0-255 are clamped before encoding, since channel
//! overrides and unnormalized convolution can leave that band.
//!
//! # Examples
//!
//! ```ignore
//! use imagelab_core::encode::{encode, OutputFormat};
//!
//! let png = encode(&raster, OutputFormat::Png).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod jpeg;
mod png;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::Raster;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Output container for an encoded raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg {
        /// 1-100, clamped
        quality: u8,
    },
}

impl OutputFormat {
    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg { .. } => "image/jpeg",
        }
    }
}

/// Encode `raster` in the requested format.
pub fn encode(raster: &Raster, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Png => encode_png(raster),
        OutputFormat::Jpeg { quality } => encode_jpeg(raster, quality),
    }
}
