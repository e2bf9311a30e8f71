//! Per-pixel channel overrides.
//!
//! An override forces one of the red, green or blue channels to a constant
//! across the whole raster. The amount is not range-checked here; anything
//! outside 0-255 is clamped when the raster is encoded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::Raster;

/// One of the three RGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in pixel order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Index of this channel within a [`crate::Pixel`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a channel name is not `red`, `green` or `blue`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Channel::Red),
            "green" => Ok(Channel::Green),
            "blue" => Ok(Channel::Blue),
            _ => Err(UnknownChannel(s.to_string())),
        }
    }
}

/// A channel paired with the intensity that replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub channel: Channel,
    pub amount: i32,
}

impl ChannelSpec {
    pub fn new(channel: Channel, amount: i32) -> Self {
        Self { channel, amount }
    }
}

/// Replacement intensities for all three channels.
///
/// Serializes as `{ "red": n, "green": n, "blue": n }`, the shape the front
/// end posts as `rgb_values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RgbValues {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl RgbValues {
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// Expand into one spec per channel, red first.
    pub fn specs(&self) -> [ChannelSpec; 3] {
        [
            ChannelSpec::new(Channel::Red, self.red),
            ChannelSpec::new(Channel::Green, self.green),
            ChannelSpec::new(Channel::Blue, self.blue),
        ]
    }
}

/// Replace `channel` with `amount` on every pixel.
///
/// The other two channels are copied unchanged.
///
/// # Example
///
/// ```ignore
/// use imagelab_core::{override_channel, Channel, Raster};
///
/// let raster = Raster::filled(4, 4, [0, 0, 0])?;
/// let red = override_channel(&raster, Channel::Red, 255);
/// assert!(red.pixels().iter().all(|p| *p == [255, 0, 0]));
/// ```
pub fn override_channel(raster: &Raster, channel: Channel, amount: i32) -> Raster {
    let idx = channel.index();
    let pixels = raster
        .pixels()
        .iter()
        .map(|&p| {
            let mut out = p;
            out[idx] = amount;
            out
        })
        .collect();

    Raster::from_parts(raster.width(), raster.height(), pixels)
}

/// Apply a single [`ChannelSpec`].
#[inline]
pub fn apply_channel_spec(raster: &Raster, spec: ChannelSpec) -> Raster {
    override_channel(raster, spec.channel, spec.amount)
}

/// Override red, green and blue in that order.
pub fn apply_rgb_values(raster: &Raster, values: &RgbValues) -> Raster {
    let [red, green, blue] = values.specs();
    let out = apply_channel_spec(raster, red);
    let out = apply_channel_spec(&out, green);
    apply_channel_spec(&out, blue)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
