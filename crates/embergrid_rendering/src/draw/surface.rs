//! Software RGBA8 raster target.
//!
//! Pixel centres sit at `(x + 0.5, y + 0.5)`. Fills use source-over
//! blending with straight alpha; `draw_surface` is a verbatim copy.

use super::{Canvas, Rect, SoftShadow, MAX_SURFACE_EDGE};
use embergrid_core::{Rgba, Vec2};
use std::fmt;

/// Most edge crossings a single scanline can hold while filling a path.
const MAX_SCANLINE_CROSSINGS: usize = 64;

/// An owned off-screen drawing target.
#[derive(Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    shadow: Option<SoftShadow>,
}

impl Surface {
    /// Allocates a transparent surface. Each dimension is clamped to
    /// `1..=MAX_SURFACE_EDGE`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.clamp(1, MAX_SURFACE_EDGE);
        let height = height.clamp(1, MAX_SURFACE_EDGE);
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
            shadow: None,
        }
    }

    /// Returns `(width, height)`.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Row-major pixel slice.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA8 bytes, row-major.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Overwrites every pixel with `color` and drops the shadow mask.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
        self.shadow = None;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Visits every pixel whose centre lies in the given float bounds and
    /// blends whatever `shade` returns for that centre.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn shade<F>(&mut self, min: Vec2, max: Vec2, shade: F)
    where
        F: Fn(Vec2) -> Option<Rgba>,
    {
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let at = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(color) = shade(at) {
                    let i = self.index(x, y);
                    self.pixels[i] = blend(self.pixels[i], color);
                }
            }
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fill_span(&mut self, y: u32, from: f32, to: f32, color: Rgba) {
        // Pixel x is covered when from <= x + 0.5 < to.
        let x0 = (from - 0.5).ceil().max(0.0) as u32;
        let x1 = ((to - 0.5).ceil().max(0.0) as u32).min(self.width);
        for x in x0..x1 {
            let i = self.index(x, y);
            self.pixels[i] = blend(self.pixels[i], color);
        }
    }
}

impl PartialEq for Surface {
    /// Content equality: size and pixels. The shadow mask is drawing state.
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("shadow", &self.shadow)
            .finish_non_exhaustive()
    }
}

impl Canvas for Surface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        if let Some(shadow) = self.shadow.filter(|s| s.blur > 0.0) {
            let reach = radius + shadow.blur;
            let halo = Vec2::new(reach, reach);
            self.shade(center - halo, center + halo, |at| {
                let d = at.distance(center);
                (d > radius && d <= reach).then(|| shadow.color.fade(1.0 - (d - radius) / shadow.blur))
            });
        }
        let r2 = radius * radius;
        let extent = Vec2::new(radius, radius);
        self.shade(center - extent, center + extent, |at| {
            (at.distance_squared(center) <= r2).then_some(color)
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if !(rect.width > 0.0 && rect.height > 0.0) {
            return;
        }
        if let Some(shadow) = self.shadow.filter(|s| s.blur > 0.0) {
            let blur = shadow.blur;
            self.shade(
                Vec2::new(rect.x - blur, rect.y - blur),
                Vec2::new(rect.right() + blur, rect.bottom() + blur),
                |at| {
                    let dx = (rect.x - at.x).max(at.x - rect.right()).max(0.0);
                    let dy = (rect.y - at.y).max(at.y - rect.bottom()).max(0.0);
                    let d = dx.hypot(dy);
                    (d > 0.0 && d <= blur).then(|| shadow.color.fade(1.0 - d / blur))
                },
            );
        }
        self.shade(
            Vec2::new(rect.x, rect.y),
            Vec2::new(rect.right(), rect.bottom()),
            |at| rect.contains(at.x, at.y).then_some(color),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba) {
        let width = width.max(0.0).min(rect.width.min(rect.height) * 0.5);
        if width <= 0.0 {
            return;
        }
        let shadow = self.shadow.take();
        let inner_h = rect.height - 2.0 * width;
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, width), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - width, rect.width, width), color);
        self.fill_rect(Rect::new(rect.x, rect.y + width, width, inner_h), color);
        self.fill_rect(Rect::new(rect.right() - width, rect.y + width, width, inner_h), color);
        self.shadow = shadow;
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fill_path(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 || color.a == 0 {
            return;
        }
        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        if !(min_y.is_finite() && max_y.is_finite()) {
            return;
        }
        let y0 = min_y.floor().max(0.0) as u32;
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.height);

        // A scanline crosses at most one point per edge.
        let mut inline = [0.0_f32; MAX_SCANLINE_CROSSINGS];
        let mut spilled = Vec::new();
        let crossings: &mut [f32] = if points.len() <= MAX_SCANLINE_CROSSINGS {
            &mut inline[..]
        } else {
            tracing::debug!(points = points.len(), "long path, scanline buffer on heap");
            spilled.resize(points.len(), 0.0);
            &mut spilled[..]
        };
        for y in y0..y1 {
            let sy = y as f32 + 0.5;
            let mut count = 0;
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sy) != (b.y <= sy) {
                    crossings[count] = a.x + (sy - a.y) / (b.y - a.y) * (b.x - a.x);
                    count += 1;
                }
            }
            let row = &mut crossings[..count];
            row.sort_unstable_by(f32::total_cmp);
            for pair in 0..count / 2 {
                let (from, to) = (crossings[pair * 2], crossings[pair * 2 + 1]);
                self.fill_span(y, from, to, color);
            }
        }
    }

    fn set_soft_shadow(&mut self, shadow: Option<SoftShadow>) {
        self.shadow = shadow;
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn draw_surface(&mut self, surface: &Surface, origin: (i32, i32)) {
        let (ox, oy) = (i64::from(origin.0), i64::from(origin.1));
        let (dst_w, dst_h) = (i64::from(self.width), i64::from(self.height));
        let src_w = i64::from(surface.width);

        let x_from = (-ox).max(0);
        let x_to = src_w.min(dst_w - ox);
        if x_from >= x_to {
            return;
        }
        for sy in 0..i64::from(surface.height) {
            let dy = oy + sy;
            if dy < 0 || dy >= dst_h {
                continue;
            }
            let src_row = (sy * src_w) as usize;
            let dst_row = (dy * dst_w) as usize;
            let src = &surface.pixels[src_row + x_from as usize..src_row + x_to as usize];
            let start = dst_row + (ox + x_from) as usize;
            self.pixels[start..start + src.len()].copy_from_slice(src);
        }
    }
}

/// Source-over blend with straight alpha.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn blend(dst: Rgba, src: Rgba) -> Rgba {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    let sa = src.alpha_f32();
    let da = dst.alpha_f32() * (1.0 - sa);
    let out_a = sa + da;
    let channel = |s: u8, d: u8| -> u8 {
        ((f32::from(s) * sa + f32::from(d) * da) / out_a).round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    #[test]
    fn test_zero_size_is_clamped() {
        assert_eq!(Surface::new(0, 0).size(), (1, 1));
    }

    #[test]
    fn test_oversized_edge_is_clamped() {
        assert_eq!(Surface::new(u32::MAX, 2).size(), (MAX_SURFACE_EDGE, 2));
    }

    /// Comb with 40 teeth: 80 crossings per scanline through the teeth.
    #[test]
    fn test_fill_path_with_many_crossings() {
        let teeth = 40_u8;
        let mut points = Vec::new();
        for i in 0..teeth {
            let x = f32::from(i) * 4.0;
            points.extend([
                Vec2::new(x, 0.0),
                Vec2::new(x + 2.0, 0.0),
                Vec2::new(x + 2.0, 10.0),
                Vec2::new(x + 4.0, 10.0),
            ]);
        }
        points.extend([Vec2::new(160.0, 20.0), Vec2::new(0.0, 20.0)]);

        let mut s = Surface::new(160, 20);
        s.fill_path(&points, RED);
        assert_eq!(s.pixel(1, 5), Some(RED));
        assert_eq!(s.pixel(3, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(s.pixel(157, 5), Some(RED));
        assert_eq!(s.pixel(159, 5), Some(Rgba::TRANSPARENT));
        assert_eq!(s.pixel(159, 15), Some(RED));
    }

    #[test]
    fn test_fill_rect_covers_exact_pixels() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), RED);
        assert_eq!(s.pixel(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(s.pixel(1, 1), Some(RED));
        assert_eq!(s.pixel(2, 2), Some(RED));
        assert_eq!(s.pixel(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_fill_circle_center_and_outside() {
        let mut s = Surface::new(10, 10);
        s.fill_circle(Vec2::new(5.0, 5.0), 2.0, RED);
        assert_eq!(s.pixel(5, 5), Some(RED));
        assert_eq!(s.pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_soft_shadow_paints_halo() {
        let mut s = Surface::new(20, 20);
        s.set_soft_shadow(Some(SoftShadow { blur: 4.0, color: Rgba::new(0, 0, 0, 200) }));
        s.fill_circle(Vec2::new(10.0, 10.0), 3.0, RED);
        let halo = s.pixel(14, 10).unwrap_or(Rgba::TRANSPARENT);
        assert!(halo.a > 0 && halo.a < 200);
        assert_eq!(s.pixel(10, 10), Some(RED));
    }

    #[test]
    fn test_fill_path_triangle() {
        let mut s = Surface::new(10, 10);
        let tri = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        s.fill_path(&tri, RED);
        assert_eq!(s.pixel(1, 1), Some(RED));
        assert_eq!(s.pixel(9, 9), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blend_half_over_opaque() {
        let out = blend(Rgba::new(0, 0, 0, 255), Rgba::new(255, 255, 255, 128));
        assert_eq!(out.a, 255);
        assert!((127..=129).contains(&out.r));
    }

    #[test]
    fn test_draw_surface_is_verbatim_and_clipped() {
        let mut src = Surface::new(2, 2);
        src.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Rgba::new(1, 2, 3, 40));

        let mut dst = Surface::new(3, 3);
        dst.clear(RED);
        dst.draw_surface(&src, (2, 2));

        // Copied, not blended.
        assert_eq!(dst.pixel(2, 2), Some(Rgba::new(1, 2, 3, 40)));
        assert_eq!(dst.pixel(1, 1), Some(RED));

        dst.draw_surface(&src, (-5, -5));
        assert_eq!(dst.pixel(0, 0), Some(RED));
    }

    #[test]
    fn test_stroke_rect_leaves_interior() {
        let mut s = Surface::new(6, 6);
        s.stroke_rect(Rect::new(0.0, 0.0, 6.0, 6.0), 1.0, RED);
        assert_eq!(s.pixel(0, 3), Some(RED));
        assert_eq!(s.pixel(5, 3), Some(RED));
        assert_eq!(s.pixel(3, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_as_bytes_len() {
        let s = Surface::new(3, 2);
        assert_eq!(s.as_bytes().len(), 3 * 2 * 4);
    }
}
