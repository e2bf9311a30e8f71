//! Overlay one raster onto another at an anchor position.
//!
//! The anchor is clamped per axis so the overlay always lands fully inside
//! the base. Overlays are never resized, so one larger than the base on
//! either axis is rejected up front.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::Raster;

/// Errors that can occur while compositing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    /// Overlay exceeds the base on at least one axis
    #[error(
        "Overlay ({overlay_width}x{overlay_height}) does not fit inside base ({base_width}x{base_height})"
    )]
    OverlayTooLarge {
        base_width: u32,
        base_height: u32,
        overlay_width: u32,
        overlay_height: u32,
    },
}

/// Top-left anchor `(row, col)` of an overlay within a base raster.
///
/// Coordinates may be negative or past the far edge; [`composite`] clamps
/// them before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// Clamp `position` so an overlay of `overlay` size fits inside `base`.
///
/// Each axis is handled independently: an anchor that would push the
/// overlay past the far edge is pulled back to `base - overlay`, then a
/// negative anchor is raised to 0.
pub fn clamp_position(
    base: &Raster,
    overlay: &Raster,
    position: Position,
) -> Result<(usize, usize), CompositeError> {
    check_fits(base, overlay)?;

    let row = clamp_axis(position.row, overlay.height(), base.height());
    let col = clamp_axis(position.col, overlay.width(), base.width());
    Ok((row, col))
}

fn clamp_axis(anchor: i64, overlay_len: u32, base_len: u32) -> usize {
    let (overlay_len, base_len) = (i64::from(overlay_len), i64::from(base_len));
    let mut anchor = anchor;
    if anchor.saturating_add(overlay_len) > base_len {
        anchor = base_len - overlay_len;
    }
    anchor.max(0) as usize
}

fn check_fits(base: &Raster, overlay: &Raster) -> Result<(), CompositeError> {
    if overlay.width() > base.width() || overlay.height() > base.height() {
        return Err(CompositeError::OverlayTooLarge {
            base_width: base.width(),
            base_height: base.height(),
            overlay_width: overlay.width(),
            overlay_height: overlay.height(),
        });
    }
    Ok(())
}

/// Paste `overlay` onto a copy of `base` with its top-left corner at
/// `position` (after clamping).
///
/// Base pixels inside `[row, row + overlay.height) x [col, col + overlay.width)`
/// are replaced by the matching overlay pixels; everything else passes
/// through.
///
/// # Errors
///
/// Returns `CompositeError::OverlayTooLarge` if the overlay is wider or
/// taller than the base.
pub fn composite(
    base: &Raster,
    overlay: &Raster,
    position: Position,
) -> Result<Raster, CompositeError> {
    let (top, left) = clamp_position(base, overlay, position)?;

    let base_w = base.width() as usize;
    let over_w = overlay.width() as usize;

    let mut pixels = base.pixels().to_vec();
    for (r, src) in overlay.rows().enumerate() {
        let start = (top + r) * base_w + left;
        pixels[start..start + over_w].copy_from_slice(src);
    }

    Ok(Raster::from_parts(base.width(), base.height(), pixels))
}

/// Paste `overlay` at the top-left corner of `base`.
pub fn insert(base: &Raster, overlay: &Raster) -> Result<Raster, CompositeError> {
    composite(base, overlay, Position::default())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
