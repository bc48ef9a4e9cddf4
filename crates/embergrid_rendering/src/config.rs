//! # Render Configuration
//!
//! Loaded once at startup from TOML. Every section is optional; missing
//! fields fall back to the shipped tuning.
//!
//! ```toml
//! frame_budget_us = 16666
//!
//! [grid]
//! columns = 15
//! rows = 10
//! tile_size = 64
//!
//! [spawn]
//! footprint_spacing = 0.5
//! spark_burst = 6
//!
//! [[themes]]
//! world = 0
//! floor_light = [120, 180, 70]
//! ```

use crate::draw::MAX_SURFACE_EDGE;
use crate::error::{ConfigError, ConfigResult};
use crate::theme::{ThemeOverride, ThemeTable};
use embergrid_core::Vec2;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Play-field geometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Tiles per row.
    pub columns: u32,
    /// Tile rows.
    pub rows: u32,
    /// Tile edge in pixels.
    pub tile_size: u32,
    /// Canvas position of the grid's top-left corner.
    pub origin: [i32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 15,
            rows: 10,
            tile_size: 64,
            origin: [0, 0],
        }
    }
}

impl GridConfig {
    /// Pixel size of the whole grid.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.columns.saturating_mul(self.tile_size),
            self.rows.saturating_mul(self.tile_size),
        )
    }

    /// Shrinks tile size, then tile counts, until both pixel edges fit in
    /// [`MAX_SURFACE_EDGE`]. Returns `true` if anything changed.
    pub fn fit_surface_limit(&mut self) -> bool {
        let before = self.clone();
        self.tile_size = self.tile_size.min(MAX_SURFACE_EDGE);
        if let Some(per_edge) = MAX_SURFACE_EDGE.checked_div(self.tile_size) {
            self.columns = self.columns.min(per_edge);
            self.rows = self.rows.min(per_edge);
        }
        *self != before
    }

    /// Origin as a float offset.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn origin_vec(&self) -> Vec2 {
        Vec2::new(self.origin[0] as f32, self.origin[1] as f32)
    }

    /// Tile edge as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn tile_px(&self) -> f32 {
        self.tile_size as f32
    }
}

/// Spawn rule tuning. Spacings are in tiles, cooldowns in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    /// Player distance between footprints.
    pub footprint_spacing: f32,
    /// Distance between frost marks.
    pub frost_spacing: f32,
    /// Distance between lava marks.
    pub lava_spacing: f32,
    /// Distance between cosmetic trail puffs.
    pub trail_spacing: f32,
    /// Interval between embers of one fuse or burning entity.
    pub ember_cooldown: f32,
    /// Interval between afterimages of a dying entity.
    pub ghost_cooldown: f32,
    /// Interval between menu motes.
    pub mote_cooldown: f32,
    /// Sparks per damage hit.
    pub spark_burst: u32,
    /// Random offset applied to ember spawn points, in pixels.
    pub ember_jitter: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            footprint_spacing: 0.5,
            frost_spacing: 0.35,
            lava_spacing: 0.35,
            trail_spacing: 0.25,
            ember_cooldown: 0.08,
            ghost_cooldown: 0.12,
            mote_cooldown: 0.25,
            spark_burst: 6,
            ember_jitter: 6.0,
        }
    }
}

/// Per-kind effect lifetimes in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifetimeConfig {
    /// Footprints.
    pub footprint: f32,
    /// Frost marks.
    pub frost_mark: f32,
    /// Lava marks.
    pub lava_mark: f32,
    /// Fire embers.
    pub fire_ember: f32,
    /// Damage sparks.
    pub spark: f32,
    /// Death afterimages.
    pub ghost: f32,
    /// Menu motes.
    pub mote: f32,
    /// Cosmetic trails.
    pub trail: f32,
}

impl Default for LifetimeConfig {
    fn default() -> Self {
        Self {
            footprint: 1.2,
            frost_mark: 1.5,
            lava_mark: 1.2,
            fire_ember: 0.6,
            spark: 0.35,
            ghost: 0.5,
            mote: 3.0,
            trail: 0.8,
        }
    }
}

impl LifetimeConfig {
    fn entries(&self) -> [(&'static str, f32); 8] {
        [
            ("footprint", self.footprint),
            ("frost_mark", self.frost_mark),
            ("lava_mark", self.lava_mark),
            ("fire_ember", self.fire_ember),
            ("spark", self.spark),
            ("ghost", self.ghost),
            ("mote", self.mote),
            ("trail", self.trail),
        ]
    }
}

/// Top-level render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Grid geometry.
    pub grid: GridConfig,
    /// Spawn rule tuning.
    pub spawn: SpawnConfig,
    /// Effect lifetimes.
    pub lifetimes: LifetimeConfig,
    /// Frames slower than this are logged.
    pub frame_budget_us: u64,
    /// Palette overrides per world.
    pub themes: Vec<ThemeOverride>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            spawn: SpawnConfig::default(),
            lifetimes: LifetimeConfig::default(),
            frame_budget_us: 16_666,
            themes: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] on malformed TOML or unknown keys,
    /// [`ConfigError::Invalid`] on out-of-range values.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "render config loaded");
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        let grid = &self.grid;
        if grid.columns == 0 || grid.rows == 0 || grid.tile_size == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{} tiles of {}px",
                grid.columns, grid.rows, grid.tile_size
            )));
        }
        for (axis, tiles) in [("columns", grid.columns), ("rows", grid.rows)] {
            let edge = tiles.checked_mul(grid.tile_size);
            if edge.map_or(true, |px| px > MAX_SURFACE_EDGE) {
                return Err(ConfigError::Invalid(format!(
                    "grid.{axis} x tile_size must be at most {MAX_SURFACE_EDGE}px, got {tiles} x {}",
                    grid.tile_size
                )));
            }
        }

        let spawn = &self.spawn;
        for (name, value) in [
            ("footprint_spacing", spawn.footprint_spacing),
            ("frost_spacing", spawn.frost_spacing),
            ("lava_spacing", spawn.lava_spacing),
            ("trail_spacing", spawn.trail_spacing),
            ("ember_cooldown", spawn.ember_cooldown),
            ("ghost_cooldown", spawn.ghost_cooldown),
            ("mote_cooldown", spawn.mote_cooldown),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "spawn.{name} must be positive, got {value}"
                )));
            }
        }
        if spawn.spark_burst == 0 {
            return Err(ConfigError::Invalid("spawn.spark_burst must be positive".into()));
        }
        if !spawn.ember_jitter.is_finite() || spawn.ember_jitter < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "spawn.ember_jitter must be non-negative, got {}",
                spawn.ember_jitter
            )));
        }

        for (name, value) in self.lifetimes.entries() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "lifetimes.{name} must be positive, got {value}"
                )));
            }
        }

        if self.frame_budget_us == 0 {
            return Err(ConfigError::Invalid("frame_budget_us must be positive".into()));
        }
        Ok(())
    }

    /// Frame budget as a duration.
    #[must_use]
    pub fn frame_budget(&self) -> Duration {
        Duration::from_micros(self.frame_budget_us)
    }

    /// Built-in theme table with this config's overrides applied.
    #[must_use]
    pub fn theme_table(&self) -> ThemeTable {
        ThemeTable::builtin().with_overrides(&self.themes)
    }
}
