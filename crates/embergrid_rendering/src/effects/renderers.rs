//! Per-kind draw routines.
//!
//! Each routine is a pure function of the slot view and the shared clock.
//! Nothing here touches slot state.

use super::kind::{EffectKind, TrailStyle};
use crate::draw::{Canvas, SoftShadow};
use embergrid_core::{Rgb, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Peak footprint opacity, reached at `progress == 1.0`.
pub const FOOTPRINT_ALPHA: f32 = 0.55;

/// Read-only projection of a live slot handed to a draw routine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectView {
    /// Spawn anchor.
    pub position: Vec2,
    /// 1.0 at spawn, 0.0 at expiry.
    pub progress: f32,
    /// Per-kind scalar.
    pub extra: f32,
    /// Primary colour.
    pub primary: Rgb,
    /// Secondary colour.
    pub secondary: Rgb,
}

/// Signature shared by every routine in the dispatch table.
pub type DrawFn = fn(&mut dyn Canvas, &EffectView, f32);

/// Looks up the routine for `kind`.
#[must_use]
pub fn routine(kind: EffectKind) -> DrawFn {
    match kind {
        EffectKind::GhostAfterimage => draw_ghost,
        EffectKind::FireEmber => draw_ember,
        EffectKind::Footprint => draw_footprint,
        EffectKind::FrostMark => draw_frost,
        EffectKind::LavaMark => draw_lava,
        EffectKind::Spark => draw_spark,
        EffectKind::MenuMote => draw_mote,
        EffectKind::CosmeticTrail(TrailStyle::Rainbow) => draw_trail_rainbow,
        EffectKind::CosmeticTrail(TrailStyle::Stardust) => draw_trail_stardust,
        EffectKind::CosmeticTrail(TrailStyle::Bubbles) => draw_trail_bubbles,
        EffectKind::CosmeticTrail(TrailStyle::Hearts) => draw_trail_hearts,
    }
}

/// Draws one effect.
#[inline]
pub fn draw(canvas: &mut dyn Canvas, kind: EffectKind, view: &EffectView, time: f32) {
    routine(kind)(canvas, view, time);
}

fn draw_ghost(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let radius = if v.extra > 0.0 { v.extra } else { 14.0 };
    // Expands and rises while it fades.
    let grow = 1.0 + (1.0 - v.progress) * 0.6;
    let center = v.position + Vec2::new(0.0, -(1.0 - v.progress) * 10.0);
    let wobble = (time * 6.0).sin() * 0.08;
    canvas.fill_circle(center, radius * grow, v.primary.with_alpha(0.35 * v.progress + wobble * v.progress));
    canvas.fill_circle(center, radius * grow * 0.55, Rgb::WHITE.with_alpha(0.25 * v.progress));
}

fn draw_ember(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let age = 1.0 - v.progress;
    let sway = (time * 9.0 + v.extra).sin() * 3.0 * age;
    let center = v.position + Vec2::new(sway, -age * 22.0);
    let color = v.secondary.lerp(v.primary, age);
    let flicker = 0.85 + 0.15 * (time * 23.0 + v.extra * 3.0).sin();
    canvas.fill_circle(center, 2.0 + 3.0 * v.progress, color.with_alpha(v.progress * flicker));
}

fn draw_footprint(canvas: &mut dyn Canvas, v: &EffectView, _time: f32) {
    let color = v.primary.with_alpha(FOOTPRINT_ALPHA * v.progress);
    let forward = Vec2::from_angle(v.extra);
    let side = forward.perp() * 4.0;
    for (foot, lead) in [(side, 3.0), (side * -1.0, -3.0)] {
        let heel = v.position + foot + forward * lead;
        canvas.fill_circle(heel, 2.5, color);
        canvas.fill_circle(heel + forward * 4.0, 1.8, color);
    }
}

fn draw_frost(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let radius = if v.extra > 0.0 { v.extra } else { 7.0 };
    let shimmer = 0.8 + 0.2 * (time * 4.0 + v.position.x * 0.05).sin();
    canvas.fill_circle(v.position, radius, v.secondary.with_alpha(0.3 * v.progress));
    let mut star = [Vec2::ZERO; 12];
    for (i, point) in star.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let angle = i as f32 * TAU / 12.0;
        let r = if i % 2 == 0 { radius } else { radius * 0.35 };
        *point = v.position + Vec2::from_angle(angle) * r;
    }
    canvas.fill_path(&star, v.primary.with_alpha(0.7 * v.progress * shimmer));
}

fn draw_lava(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let radius = if v.extra > 0.0 { v.extra } else { 7.0 };
    let pulse = 1.0 + 0.1 * (time * 5.0 + v.position.y * 0.07).sin();
    canvas.fill_circle(v.position, radius * pulse, v.primary.with_alpha(0.6 * v.progress));
    canvas.fill_circle(v.position, radius * 0.5 * pulse, v.secondary.with_alpha(0.8 * v.progress));
}

fn draw_spark(canvas: &mut dyn Canvas, v: &EffectView, _time: f32) {
    let travel = (1.0 - v.progress) * 18.0;
    let dir = Vec2::from_angle(v.extra);
    let head = v.position + dir * (travel + 4.0);
    let tail = v.position + dir * travel;
    let half = dir.perp() * 1.2;
    canvas.fill_path(
        &[tail + half, head, tail - half],
        v.primary.with_alpha(v.progress),
    );
}

fn draw_mote(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    // Fade in over the first fifth, out over the rest.
    let envelope = if v.progress > 0.8 { (1.0 - v.progress) * 5.0 } else { v.progress / 0.8 };
    let drift = Vec2::new((time * 0.7 + v.extra).sin() * 6.0, -(1.0 - v.progress) * 30.0);
    let center = v.position + drift;
    canvas.set_soft_shadow(Some(SoftShadow {
        blur: 6.0,
        color: v.primary.with_alpha(0.4 * envelope),
    }));
    canvas.fill_circle(center, 2.5, v.primary.with_alpha(0.8 * envelope.max(0.1)));
    canvas.set_soft_shadow(None);
}

fn trail_alpha(v: &EffectView) -> f32 {
    0.7 * v.progress
}

fn draw_trail_rainbow(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let t = 0.5 + 0.5 * (time * 3.0 + v.position.x * 0.02).sin();
    let color = v.primary.lerp(v.secondary, t);
    let across = Vec2::from_angle(v.extra).perp() * 3.0;
    canvas.fill_circle(v.position - across, 3.0, color.with_alpha(trail_alpha(v)));
    canvas.fill_circle(v.position + across, 3.0, v.secondary.lerp(v.primary, t).with_alpha(trail_alpha(v)));
}

fn draw_trail_stardust(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let twinkle = 0.6 + 0.4 * (time * 10.0 + v.position.y).sin();
    let r = 4.0 * twinkle;
    let p = v.position;
    let points = [
        p + Vec2::new(0.0, -r),
        p + Vec2::new(r * 0.25, -r * 0.25),
        p + Vec2::new(r, 0.0),
        p + Vec2::new(r * 0.25, r * 0.25),
        p + Vec2::new(0.0, r),
        p + Vec2::new(-r * 0.25, r * 0.25),
        p + Vec2::new(-r, 0.0),
        p + Vec2::new(-r * 0.25, -r * 0.25),
    ];
    canvas.fill_path(&points, v.primary.with_alpha(trail_alpha(v)));
    canvas.fill_circle(p, 1.0, v.secondary.with_alpha(trail_alpha(v)));
}

fn draw_trail_bubbles(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let rise = (1.0 - v.progress) * 12.0;
    let center = v.position + Vec2::new((time * 4.0 + v.extra).sin() * 2.0, -rise);
    let radius = 2.0 + (1.0 - v.progress) * 2.5;
    canvas.fill_circle(center, radius, v.primary.with_alpha(0.45 * v.progress));
    canvas.fill_circle(
        center + Vec2::new(-radius * 0.35, -radius * 0.35),
        radius * 0.3,
        v.secondary.with_alpha(0.8 * v.progress),
    );
}

fn draw_trail_hearts(canvas: &mut dyn Canvas, v: &EffectView, time: f32) {
    let beat = 1.0 + 0.15 * (time * 8.0).sin().max(0.0);
    let s = 3.0 * beat;
    let p = v.position;
    let color = v.primary.lerp(v.secondary, 1.0 - v.progress).with_alpha(trail_alpha(v));
    canvas.fill_circle(p + Vec2::new(-s * 0.5, -s * 0.3), s * 0.6, color);
    canvas.fill_circle(p + Vec2::new(s * 0.5, -s * 0.3), s * 0.6, color);
    canvas.fill_path(
        &[p + Vec2::new(-s * 1.05, -s * 0.1), p + Vec2::new(s * 1.05, -s * 0.1), p + Vec2::new(0.0, s * 1.1)],
        color,
    );
}

/// Unit offset used to spread a burst of `count` sparks evenly.
#[must_use]
pub fn burst_angle(index: u32, count: u32, base: f32) -> f32 {
    if count == 0 {
        return base;
    }
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / count as f32;
    #[allow(clippy::cast_precision_loss)]
    let angle = base + step * index as f32;
    angle.rem_euclid(TAU)
}

/// Heading snapped to the nearest grid direction, used for footprints.
#[must_use]
pub fn snap_heading(heading: f32) -> f32 {
    if !heading.is_finite() {
        return 0.0;
    }
    let quarter = (heading / FRAC_PI_2).round();
    (quarter * FRAC_PI_2).rem_euclid(TAU)
}
