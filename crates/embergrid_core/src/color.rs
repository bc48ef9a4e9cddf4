//! Colour payloads.
//!
//! Effects carry 8-bit RGB; drawing calls take RGBA with the alpha already
//! resolved from the effect's progress.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Opaque 8-bit RGB colour.
///
/// Serialized as a `[r, g, b]` array so palette files stay compact.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Solid black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a colour from channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a colour from `0xRRGGBB`.
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Attaches an alpha in `0.0..=1.0` (clamped).
    #[inline]
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba::new(self.r, self.g, self.b, unit_to_u8(alpha))
    }

    /// Fully opaque RGBA.
    #[inline]
    #[must_use]
    pub const fn opaque(self) -> Rgba {
        Rgba::new(self.r, self.g, self.b, 255)
    }

    /// Linearly interpolates towards `other`; `t` is clamped to `0..=1`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let mix = |a: u8, b: u8| -> u8 {
            let v = f32::from(a) + (f32::from(b) - f32::from(a)) * t;
            unit_to_u8(v / 255.0)
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Multiplies every channel by `factor` (saturating).
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        let factor = if factor.is_finite() { factor.max(0.0) } else { 1.0 };
        let apply = |c: u8| unit_to_u8(f32::from(c) * factor / 255.0);
        Self::new(apply(self.r), apply(self.g), apply(self.b))
    }

    /// Luma-weighted greyscale.
    #[must_use]
    pub fn to_grey(self) -> Self {
        let luma = 0.299 * f32::from(self.r) + 0.587 * f32::from(self.g) + 0.114 * f32::from(self.b);
        let v = unit_to_u8(luma / 255.0);
        Self::new(v, v, v)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.r, c.g, c.b]
    }
}

/// 8-bit RGBA colour, straight (non-premultiplied) alpha.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a colour from channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the RGB part.
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// Multiplies alpha by `factor` in `0.0..=1.0` (clamped).
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        let alpha = unit_to_u8(f32::from(self.a) / 255.0 * clamp_unit(factor));
        Self::new(self.r, self.g, self.b, alpha)
    }

    /// Alpha as a float in `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub fn alpha_f32(self) -> f32 {
        f32::from(self.a) / 255.0
    }
}

fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_u8(v: f32) -> u8 {
    (clamp_unit(v) * 255.0).round() as u8
}
