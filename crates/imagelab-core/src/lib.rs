//! imagelab core - raster transformation library
//!
//! This crate provides the image processing behind imagelab: per-channel
//! overrides, kernel convolution, compositing, quarter-turn rotation, and
//! the request pipeline that decodes an upload, applies the requested
//! transforms and re-encodes the result.
//!
//! # Module Structure
//!
//! - `raster` - The RGB `Raster` every transform reads and produces
//! - `channel` - Red/green/blue channel overrides
//! - `convolve` - Generic 2D kernel convolution
//! - `transform` - Compositing and rotation utilities
//! - `decode` / `encode` - Conversion between rasters and image files
//! - `pipeline` - Request validation and transform ordering
//!
//! All transforms are pure: they borrow their input and return a new raster.

pub mod channel;
pub mod convolve;
pub mod decode;
pub mod encode;
pub mod pipeline;
pub mod raster;
pub mod transform;

pub use channel::{
    apply_channel_spec, apply_rgb_values, override_channel, Channel, ChannelSpec, RgbValues,
};
pub use convolve::{convolve, convolve_with, EdgeGuard, Kernel, KernelError};
pub use decode::{decode_image, DecodeError};
pub use encode::{encode, EncodeError, OutputFormat};
pub use pipeline::{
    process_image, process_raster, FormFields, PipelineError, ProcessOptions, ProcessRequest,
    ProcessedImage, RequestSummary,
};
pub use raster::{Pixel, Raster, RasterError};
pub use transform::{composite, insert, rotate, rotate_grid, CompositeError, Position};
