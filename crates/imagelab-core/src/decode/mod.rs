//! Image decoding for uploaded files.
//!
//! Uploads arrive as encoded bytes in whatever format the browser picked
//! (usually PNG or JPEG). The format is sniffed from the bytes themselves,
//! decoded with the `image` crate and flattened to RGB.
//!
//! Everything happens on in-memory buffers, so there is no temporary file
//! to clean up when a request fails part way.
//!
//! # Examples
//!
//! ```ignore
//! use imagelab_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let raster = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", raster.width(), raster.height());
//! ```

mod reader;

pub use reader::{decode_image, sniff_format, DecodeError};
