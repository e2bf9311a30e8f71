//! Generic 2D convolution over an RGB raster.
//!
//! For every output pixel `(row, col)` and kernel cell `(m_r, m_c)` the
//! engine reads the source pixel at `(row - m_r, col - m_c)`, so the kernel
//! is anchored at its top-left cell and extends up and to the left.
//!
//! # Boundary handling
//!
//! Cells that would read above or left of the raster are skipped and their
//! weight is left out of the normalization total. A second, far-edge check
//! is selected with [`EdgeGuard`].
//!
//! # Normalization
//!
//! ```text
//! -1 < total_weight < 1   ->  sum                      (unnormalized)
//! otherwise               ->  floor(sum / total_weight)
//! ```
//!
//! The unnormalized branch keeps edge-detection kernels, whose weights sum
//! to roughly zero, away from a near-zero division. Results are floored to
//! integers and never clamped; the encoder clamps to 0-255.

mod kernel;

pub use kernel::{Kernel, KernelError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::raster::{Pixel, Raster};

/// Far-edge rule for skipping kernel cells.
///
/// All three variants compare `col + m_c` and `row + m_r` (the mirror of the
/// offsets actually read) against a limit; they differ in the limit and in
/// whether equality trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeGuard {
    /// Skip when `col + m_c > width` or `row + m_r > height` of the raster.
    #[default]
    Raster,
    /// Skip when `col + m_c >= width` or `row + m_r >= height` of the raster.
    RasterStrict,
    /// Skip when `col + m_c > kernel_width` or `row + m_r > kernel_height`.
    Kernel,
}

impl EdgeGuard {
    /// True if the kernel cell `(m_r, m_c)` must be skipped for `(row, col)`.
    #[inline]
    fn trips(self, row: usize, col: usize, m_r: usize, m_c: usize, limits: Limits) -> bool {
        let (r, c) = (row + m_r, col + m_c);
        match self {
            EdgeGuard::Raster => c > limits.width || r > limits.height,
            EdgeGuard::RasterStrict => c >= limits.width || r >= limits.height,
            EdgeGuard::Kernel => c > limits.kernel_width || r > limits.kernel_height,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    width: usize,
    height: usize,
    kernel_width: usize,
    kernel_height: usize,
}

/// Convolve `raster` with `kernel` using the default [`EdgeGuard::Raster`].
pub fn convolve(raster: &Raster, kernel: &Kernel) -> Raster {
    convolve_with(raster, kernel, EdgeGuard::default())
}

/// Convolve `raster` with `kernel` under an explicit far-edge rule.
///
/// Runs in O(width * height * kernel_height * kernel_width). Output rows
/// depend only on the input raster, so with the `parallel` feature they are
/// computed on the rayon pool.
pub fn convolve_with(raster: &Raster, kernel: &Kernel, guard: EdgeGuard) -> Raster {
    let width = raster.width() as usize;
    let limits = Limits {
        width,
        height: raster.height() as usize,
        kernel_width: kernel.width(),
        kernel_height: kernel.height(),
    };

    let mut output = vec![[0i32; 3]; raster.pixel_count()];

    #[cfg(feature = "parallel")]
    output
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| convolve_row(raster, kernel, guard, limits, row, out));

    #[cfg(not(feature = "parallel"))]
    output
        .chunks_mut(width)
        .enumerate()
        .for_each(|(row, out)| convolve_row(raster, kernel, guard, limits, row, out));

    Raster::from_parts(raster.width(), raster.height(), output)
}

fn convolve_row(
    raster: &Raster,
    kernel: &Kernel,
    guard: EdgeGuard,
    limits: Limits,
    row: usize,
    out: &mut [Pixel],
) {
    for (col, px) in out.iter_mut().enumerate() {
        *px = convolve_pixel(raster, kernel, guard, limits, row, col);
    }
}

fn convolve_pixel(
    raster: &Raster,
    kernel: &Kernel,
    guard: EdgeGuard,
    limits: Limits,
    row: usize,
    col: usize,
) -> Pixel {
    let mut sum = [0.0f64; 3];
    let mut total_weight = 0.0f64;

    for m_r in 0..limits.kernel_height {
        for m_c in 0..limits.kernel_width {
            // Top/left edge
            if col < m_c || row < m_r {
                continue;
            }
            if guard.trips(row, col, m_r, m_c, limits) {
                continue;
            }

            let weight = kernel.weight(m_r, m_c);
            let src = raster.pixel(row - m_r, col - m_c);
            total_weight += weight;
            for (acc, &v) in sum.iter_mut().zip(src.iter()) {
                *acc += v as f64 * weight;
            }
        }
    }

    if total_weight > -1.0 && total_weight < 1.0 {
        sum.map(to_channel)
    } else {
        sum.map(|s| to_channel(s / total_weight))
    }
}

/// Floor to an integer channel; `as` saturates at the i32 bounds.
#[inline]
fn to_channel(value: f64) -> i32 {
    value.floor() as i32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
