//! Floor layer rasterizer.
//!
//! Draws the static part of the play field: checkerboard tiles, the border
//! wall, the pillar lattice and scattered speckle decor. This is the
//! expensive draw sequence the surface cache exists to avoid repeating.
//!
//! Output depends only on `(layout, key, palette)`; the decor RNG is seeded
//! from the layout seed and the key.

use crate::draw::{Canvas, Rect};
use crate::theme::{FloorKey, Palette, VisualStyle};
use embergrid_core::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Geometry and decor seed of the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLayout {
    /// Tiles per row.
    pub columns: u32,
    /// Tile rows.
    pub rows: u32,
    /// Tile edge in pixels.
    pub tile_size: f32,
    /// Decor seed.
    pub seed: u64,
}

impl FloorLayout {
    /// Returns true for the border ring and the interior pillar lattice.
    #[must_use]
    pub fn is_wall(&self, column: u32, row: u32) -> bool {
        let border = column == 0 || row == 0 || column + 1 >= self.columns || row + 1 >= self.rows;
        border || (column % 2 == 0 && row % 2 == 0)
    }

    /// Top-left pixel of a tile.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_origin(&self, column: u32, row: u32) -> Vec2 {
        Vec2::new(column as f32 * self.tile_size, row as f32 * self.tile_size)
    }

    fn decor_seed(&self, key: FloorKey) -> u64 {
        self.seed ^ (u64::from(key.world) << 32) ^ ((key.style as u64) << 40)
    }
}

/// Draws the floor for `key` and returns the number of primitive calls made.
pub fn rasterize_floor(
    canvas: &mut dyn Canvas,
    layout: &FloorLayout,
    key: FloorKey,
    palette: &Palette,
) -> u32 {
    let mut rng = ChaCha8Rng::seed_from_u64(layout.decor_seed(key));
    let size = layout.tile_size;
    let bevel = (size * 0.12).max(1.0);
    let mut calls = 0;

    for row in 0..layout.rows {
        for column in 0..layout.columns {
            let origin = layout.tile_origin(column, row);
            let tile = Rect::new(origin.x, origin.y, size, size);

            if layout.is_wall(column, row) {
                canvas.fill_rect(tile, palette.wall.opaque());
                canvas.fill_rect(
                    Rect::new(tile.x, tile.bottom() - bevel, size, bevel),
                    palette.wall_shade.opaque(),
                );
                calls += 2;
                continue;
            }

            let base = if (column + row) % 2 == 0 {
                palette.floor_light
            } else {
                palette.floor_dark
            };
            canvas.fill_rect(tile, base.opaque());
            calls += 1;

            for _ in 0..rng.gen_range(0..3) {
                let at = origin + Vec2::new(rng.gen::<f32>() * size, rng.gen::<f32>() * size);
                let radius = 1.0 + rng.gen::<f32>() * size * 0.03;
                canvas.fill_circle(at, radius, palette.grid_line.with_alpha(0.25));
                calls += 1;
            }

            if key.style == VisualStyle::Neon {
                canvas.stroke_rect(tile, 1.0, palette.grid_line.with_alpha(0.6));
                calls += 1;
            }
        }
    }

    tracing::trace!(?key, calls, "floor rasterized");
    calls
}
