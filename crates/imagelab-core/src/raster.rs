//! The RGB raster every transform reads and produces.
//!
//! Channels are stored as `i32` rather than `u8`: channel overrides accept
//! any intensity and unnormalized convolution can leave the 0-255 band, so
//! values are carried as-is until the encoding boundary clamps them.

use thiserror::Error;

/// One RGB pixel. Index 0 is red, 1 is green, 2 is blue.
pub type Pixel = [i32; 3];

/// Lowest value a channel can take in an encoded image.
pub const CHANNEL_MIN: i32 = 0;
/// Highest value a channel can take in an encoded image.
pub const CHANNEL_MAX: i32 = 255;

/// Error types for raster construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height is zero, or `width * height` does not fit in a `u32`
    #[error(
        "Invalid dimensions: width ({width}) and height ({height}) must be non-zero with a pixel count that fits in u32"
    )]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the dimensions
    #[error("Invalid pixel data: expected {expected} pixels (width * height), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A row of a 2D grid differs in length from the first row
    #[error("Ragged grid: row {row} has {actual} pixels, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// A width x height grid of RGB pixels in row-major order, origin top-left.
///
/// A `Raster` is never mutated once built. Every transform in this crate
/// borrows its input and returns a fresh raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Raster {
    /// Create a raster from dimensions and a row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::InvalidDimensions` if either dimension is zero
    /// or the pixel count overflows, and `RasterError::InvalidPixelData` if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, RasterError> {
        let expected = Self::checked_pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(RasterError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, RasterError> {
        let count = Self::checked_pixel_count(width, height)?;
        Self::new(width, height, vec![pixel; count])
    }

    /// Number of pixels in a `width x height` raster.
    ///
    /// The count must fit in a `u32` so that it also fits in `usize` on
    /// 32-bit targets such as wasm32.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::InvalidDimensions` if either dimension is zero
    /// or the product overflows.
    pub fn checked_pixel_count(width: u32, height: u32) -> Result<usize, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height });
        }
        width
            .checked_mul(height)
            .map(|count| count as usize)
            .ok_or(RasterError::InvalidDimensions { width, height })
    }

    /// Build a raster from a 2D grid of rows.
    ///
    /// Every row must have the same length as the first one.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, RasterError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        let mut pixels = Vec::with_capacity(width * height);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(RasterError::RaggedRow {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            pixels.extend(values);
        }

        Self::new(dimension(width)?, dimension(height)?, pixels)
    }

    /// Create a raster from an `image::RgbImage`.
    pub fn from_rgb_image(img: &image::RgbImage) -> Result<Self, RasterError> {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| [p[0] as i32, p[1] as i32, p[2] as i32])
            .collect();
        Self::new(width, height, pixels)
    }

    /// Build a raster whose invariants the caller already guarantees.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        debug_assert!(width > 0 && height > 0, "Zero raster dimension");
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel buffer.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at `(row, col)`, or `None` outside the raster.
    pub fn get(&self, row: usize, col: usize) -> Option<Pixel> {
        if row >= self.height as usize || col >= self.width as usize {
            return None;
        }
        Some(self.pixels[row * self.width as usize + col])
    }

    /// Pixel at `(row, col)`. Callers must stay in bounds.
    #[inline]
    pub(crate) fn pixel(&self, row: usize, col: usize) -> Pixel {
        self.pixels[row * self.width as usize + col]
    }

    /// Iterate over the rows of the raster.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> + '_ {
        self.pixels.chunks_exact(self.width as usize)
    }

    /// Copy the raster out as a 2D grid of rows.
    pub fn to_rows(&self) -> Vec<Vec<Pixel>> {
        self.rows().map(<[Pixel]>::to_vec).collect()
    }

    /// Pack the raster into RGB8 bytes, clamping every channel to 0-255.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| p.map(clamp_channel))
            .collect()
    }

    /// Convert to an `image::RgbImage`, clamping every channel to 0-255.
    pub fn to_rgb_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.pixel(y as usize, x as usize).map(clamp_channel))
        })
    }

    /// True if any channel lies outside the encodable 0-255 band.
    pub fn has_out_of_range(&self) -> bool {
        self.pixels
            .iter()
            .flatten()
            .any(|&v| !(CHANNEL_MIN..=CHANNEL_MAX).contains(&v))
    }
}

/// Clamp a channel value into the encodable 0-255 band.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(CHANNEL_MIN, CHANNEL_MAX) as u8
}

fn dimension(len: usize) -> Result<u32, RasterError> {
    u32::try_from(len).map_err(|_| RasterError::InvalidDimensions {
        width: u32::MAX,
        height: u32::MAX,
    })
}
