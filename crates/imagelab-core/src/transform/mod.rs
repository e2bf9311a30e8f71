//! Geometric raster utilities: compositing and quarter-turn rotation.
//!
//! These are not part of the request pipeline but share its `Raster` type
//! and row-major indexing.
//!
//! # Coordinate System
//!
//! - Positions are `(row, col)`, origin at the top-left corner
//! - Rotation is clockwise, in whole quarter turns

mod composite;
mod rotation;

pub use composite::{clamp_position, composite, insert, CompositeError, Position};
pub use rotation::{clamp_steps, rotate, rotate_grid, MAX_STEPS, MIN_STEPS};
