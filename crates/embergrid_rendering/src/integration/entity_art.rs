//! Entity pass: primitive-only stand-ins for actors and bombs.

use super::spawn_rules::FROST_FADE_THRESHOLD;
use super::world::{EntityFlags, EntityKind, EntitySnapshot};
use crate::draw::{Canvas, Rect, SoftShadow};
use crate::theme::Palette;
use embergrid_core::{Rgb, Rgba, Vec2};

/// Opacity of the frost overlay for a given frost timer.
///
/// Full strength above the fade threshold, then linear to zero.
#[must_use]
pub fn frost_overlay_alpha(frost_timer: f32) -> f32 {
    if frost_timer <= 0.0 {
        0.0
    } else {
        (frost_timer / FROST_FADE_THRESHOLD).min(1.0)
    }
}

/// Draws one entity.
pub fn draw_entity(
    canvas: &mut dyn Canvas,
    entity: &EntitySnapshot,
    palette: &Palette,
    tile_px: f32,
    time: f32,
) {
    let pos = entity.position;
    let radius = tile_px * if entity.kind == EntityKind::Bomb { 0.3 } else { 0.36 };
    let fade = if entity.has(EntityFlags::DYING) { 0.5 } else { 1.0 };

    canvas.set_soft_shadow(Some(SoftShadow {
        blur: tile_px * 0.08,
        color: Rgba::new(0, 0, 0, 90),
    }));
    let body = match entity.kind {
        EntityKind::Player => palette.player,
        EntityKind::Enemy => palette.enemy,
        EntityKind::Bomb => palette.bomb,
    };
    let body = if entity.has(EntityFlags::DAMAGED) {
        body.lerp(Rgb::WHITE, 0.5 + 0.5 * (time * 30.0).sin().abs())
    } else {
        body
    };
    canvas.fill_circle(pos, radius, body.with_alpha(fade));
    canvas.set_soft_shadow(None);

    match entity.kind {
        EntityKind::Bomb => draw_fuse(canvas, pos, radius, entity.fuse_timer, palette, time),
        EntityKind::Player | EntityKind::Enemy => {
            let eye = Vec2::from_angle(entity.heading) * (radius * 0.45);
            canvas.fill_circle(pos + eye, radius * 0.18, Rgb::BLACK.with_alpha(fade));
        }
    }

    if entity.has(EntityFlags::FROZEN) {
        let alpha = frost_overlay_alpha(entity.frost_timer);
        if alpha > 0.0 {
            canvas.fill_circle(pos, radius * 1.1, palette.frost.with_alpha(0.45 * alpha));
        }
    }
}

fn draw_fuse(
    canvas: &mut dyn Canvas,
    pos: Vec2,
    radius: f32,
    fuse_timer: f32,
    palette: &Palette,
    time: f32,
) {
    let stem = Rect::new(pos.x + radius * 0.4, pos.y - radius * 1.25, radius * 0.2, radius * 0.5);
    canvas.fill_rect(stem, palette.wall_shade.opaque());
    if fuse_timer > 0.0 {
        // Pulses faster as the fuse runs down.
        let rate = 6.0 + 18.0 / fuse_timer.max(0.25);
        let glow = 0.6 + 0.4 * (time * rate).sin();
        let tip = Vec2::new(stem.x + stem.width * 0.5, stem.y);
        canvas.fill_circle(tip, radius * 0.22, palette.ember_hot.with_alpha(glow));
    }
}
