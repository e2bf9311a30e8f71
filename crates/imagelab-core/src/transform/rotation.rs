//! Quarter-turn rotation by grid transposition.
//!
//! Each step rotates 90 degrees clockwise: output row `p` is built by
//! walking the input rows from last to first and taking column `p` from
//! each. The step count is clamped to `[1, 3]`, so there is no zero or
//! full-turn rotation.
//!
//! ```text
//! a b c        d a
//! d e f   ->   e b
//!              f c
//! ```

use crate::raster::{Raster, RasterError};

/// Fewest quarter turns a rotation performs.
pub const MIN_STEPS: u32 = 1;
/// Most quarter turns a rotation performs.
pub const MAX_STEPS: u32 = 3;

/// Clamp a requested step count to `[MIN_STEPS, MAX_STEPS]`.
#[inline]
pub fn clamp_steps(steps: i32) -> u32 {
    steps.clamp(MIN_STEPS as i32, MAX_STEPS as i32) as u32
}

/// Rotate a 2D grid clockwise by `steps` quarter turns (clamped to 1..=3).
///
/// Works on any cloneable cell type. An empty grid rotates to an empty grid.
///
/// # Errors
///
/// Returns `RasterError::RaggedRow` if any row differs in length from the
/// first row.
pub fn rotate_grid<T: Clone>(grid: &[Vec<T>], steps: i32) -> Result<Vec<Vec<T>>, RasterError> {
    let width = grid.first().map_or(0, Vec::len);
    if let Some((row, values)) = grid.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(RasterError::RaggedRow {
            row,
            expected: width,
            actual: values.len(),
        });
    }

    let mut current = rotate_grid_once(grid);
    for _ in 1..clamp_steps(steps) {
        current = rotate_grid_once(&current);
    }
    Ok(current)
}

fn rotate_grid_once<T: Clone>(grid: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = grid.first().map_or(0, Vec::len);
    (0..width)
        .map(|p| grid.iter().rev().map(|row| row[p].clone()).collect())
        .collect()
}

/// Rotate a raster clockwise by `steps` quarter turns (clamped to 1..=3).
///
/// Width and height swap on odd step counts.
///
/// # Example
///
/// ```ignore
/// use imagelab_core::{rotate, Raster};
///
/// let raster = Raster::filled(4, 2, [0, 0, 0])?;
/// let turned = rotate(&raster, 1);
/// assert_eq!((turned.width(), turned.height()), (2, 4));
/// ```
pub fn rotate(raster: &Raster, steps: i32) -> Raster {
    let mut current = rotate_once(raster);
    for _ in 1..clamp_steps(steps) {
        current = rotate_once(&current);
    }
    current
}

fn rotate_once(raster: &Raster) -> Raster {
    let (src_w, src_h) = (raster.width() as usize, raster.height() as usize);

    // dst[p][q] = src[src_h - 1 - q][p]
    let mut pixels = Vec::with_capacity(raster.pixel_count());
    for p in 0..src_w {
        for q in 0..src_h {
            pixels.push(raster.pixel(src_h - 1 - q, p));
        }
    }

    Raster::from_parts(raster.height(), raster.width(), pixels)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
