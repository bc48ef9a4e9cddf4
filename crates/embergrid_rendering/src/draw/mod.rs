//! # Drawing Primitives Seam
//!
//! The render layer never rasterizes on its own terms: every effect, tile
//! and entity is expressed as a short sequence of primitive calls against a
//! borrowed [`Canvas`]. The canvas is never stored.
//!
//! Implementations shipped here:
//! - [`Surface`] - software RGBA8 raster (off-screen cache target, headless runs)
//! - [`CommandRecorder`] - records [`DrawCommand`]s for inspection
//! - [`Translated`] - offsets every call by a fixed origin

mod recorder;
mod surface;

pub use recorder::{CommandRecorder, DrawCommand};
pub use surface::Surface;

use embergrid_core::{Rgba, Vec2};

/// Largest surface edge in pixels; larger requests are clamped.
pub const MAX_SURFACE_EDGE: u32 = 16_384;

/// Longest path an adapter re-maps on the stack; longer paths are copied to the heap.
pub const MAX_PATH_POINTS: usize = 32;

/// An axis-aligned rectangle in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrinks the rectangle by `amount` on every side.
    #[must_use]
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    /// Returns the same rectangle moved by `offset`.
    #[must_use]
    pub fn offset(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }
}

/// Blur-style soft shadow applied to subsequent fills until cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftShadow {
    /// Blur radius in pixels.
    pub blur: f32,
    /// Shadow colour at the shape edge.
    pub color: Rgba,
}

/// The drawing-primitives collaborator.
///
/// All calls are immediate; an implementation may rasterize, record or
/// forward them. Must be used from the thread that owns the context.
pub trait Canvas {
    /// Pixel dimensions of the drawing target.
    fn size(&self) -> (u32, u32);

    /// Fills a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Strokes the outline of a rectangle, `width` pixels inward.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba);

    /// Fills a closed polygon (even-odd rule).
    fn fill_path(&mut self, points: &[Vec2], color: Rgba);

    /// Enables (`Some`) or disables (`None`) the soft shadow mask.
    fn set_soft_shadow(&mut self, shadow: Option<SoftShadow>);

    /// Copies `surface` verbatim with its top-left corner at `origin`.
    fn draw_surface(&mut self, surface: &Surface, origin: (i32, i32));
}

/// Canvas adapter that offsets every primitive by `origin`.
///
/// Paths up to [`MAX_PATH_POINTS`] long are offset on the stack.
pub struct Translated<'a, C: ?Sized> {
    inner: &'a mut C,
    origin: Vec2,
}

impl<'a, C: Canvas + ?Sized> Translated<'a, C> {
    /// Wraps `inner` so that `(0, 0)` maps to `origin`.
    pub fn new(inner: &'a mut C, origin: Vec2) -> Self {
        Self { inner, origin }
    }
}

impl<C: Canvas + ?Sized> Canvas for Translated<'_, C> {
    fn size(&self) -> (u32, u32) {
        self.inner.size()
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.inner.fill_circle(center + self.origin, radius, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.inner.fill_rect(rect.offset(self.origin), color);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba) {
        self.inner.stroke_rect(rect.offset(self.origin), width, color);
    }

    fn fill_path(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() > MAX_PATH_POINTS {
            tracing::debug!(points = points.len(), "long path, offset copy on heap");
            let moved: Vec<Vec2> = points.iter().map(|p| *p + self.origin).collect();
            self.inner.fill_path(&moved, color);
            return;
        }
        let mut moved = [Vec2::ZERO; MAX_PATH_POINTS];
        for (dst, src) in moved.iter_mut().zip(points) {
            *dst = *src + self.origin;
        }
        self.inner.fill_path(&moved[..points.len()], color);
    }

    fn set_soft_shadow(&mut self, shadow: Option<SoftShadow>) {
        self.inner.set_soft_shadow(shadow);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn draw_surface(&mut self, surface: &Surface, origin: (i32, i32)) {
        let shifted = (
            origin.0 + self.origin.x.round() as i32,
            origin.1 + self.origin.y.round() as i32,
        );
        self.inner.draw_surface(surface, shifted);
    }
}
