//! Theme/style collaborator.
//!
//! A [`FloorKey`] (world index + visual style) fully determines the floor
//! layer's pixels; a [`Palette`] supplies every colour the render layer
//! uses for that key.

use embergrid_core::Rgb;
use serde::Deserialize;

/// Discrete visual style selected by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualStyle {
    /// Original art direction.
    #[default]
    Classic,
    /// Dark floors with bright grid lines.
    Neon,
    /// Washed-out, light palette.
    Pastel,
    /// Greyscale.
    Monochrome,
}

impl VisualStyle {
    /// All styles, in menu order.
    pub const ALL: [Self; 4] = [Self::Classic, Self::Neon, Self::Pastel, Self::Monochrome];

    /// Recolours a base colour for this style.
    #[must_use]
    pub fn apply(self, color: Rgb) -> Rgb {
        match self {
            Self::Classic => color,
            Self::Neon => color.scale(0.35),
            Self::Pastel => color.lerp(Rgb::WHITE, 0.45),
            Self::Monochrome => color.to_grey(),
        }
    }

    /// Recolours an accent (lines, glows) for this style.
    #[must_use]
    pub fn apply_accent(self, color: Rgb) -> Rgb {
        match self {
            Self::Neon => color.lerp(Rgb::WHITE, 0.3).scale(1.4),
            other => other.apply(color),
        }
    }
}

/// Cache key of the floor layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloorKey {
    /// World/theme index.
    pub world: u8,
    /// Visual style.
    pub style: VisualStyle,
}

impl FloorKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(world: u8, style: VisualStyle) -> Self {
        Self { world, style }
    }
}

/// Colour lookup table for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Light checker tile.
    pub floor_light: Rgb,
    /// Dark checker tile.
    pub floor_dark: Rgb,
    /// Indestructible wall body.
    pub wall: Rgb,
    /// Wall bevel/shade.
    pub wall_shade: Rgb,
    /// Grid lines and floor speckles.
    pub grid_line: Rgb,
    /// Player body.
    pub player: Rgb,
    /// Enemy body.
    pub enemy: Rgb,
    /// Bomb body.
    pub bomb: Rgb,
    /// Footprint marks.
    pub footprint: Rgb,
    /// Frost marks.
    pub frost: Rgb,
    /// Lava mark rim.
    pub lava: Rgb,
    /// Lava mark core.
    pub lava_core: Rgb,
    /// Cooling ember.
    pub ember: Rgb,
    /// Hot ember.
    pub ember_hot: Rgb,
    /// Damage sparks.
    pub spark: Rgb,
    /// Death afterimages.
    pub ghost: Rgb,
    /// Menu ambience motes.
    pub mote: Rgb,
}

impl Palette {
    /// Returns this palette recoloured for `style`.
    #[must_use]
    pub fn styled(&self, style: VisualStyle) -> Self {
        Self {
            floor_light: style.apply(self.floor_light),
            floor_dark: style.apply(self.floor_dark),
            wall: style.apply(self.wall),
            wall_shade: style.apply(self.wall_shade),
            grid_line: style.apply_accent(self.grid_line),
            player: style.apply_accent(self.player),
            enemy: style.apply_accent(self.enemy),
            bomb: style.apply(self.bomb),
            footprint: style.apply(self.footprint),
            frost: style.apply_accent(self.frost),
            lava: style.apply_accent(self.lava),
            lava_core: style.apply_accent(self.lava_core),
            ember: style.apply_accent(self.ember),
            ember_hot: style.apply_accent(self.ember_hot),
            spark: style.apply_accent(self.spark),
            ghost: style.apply_accent(self.ghost),
            mote: style.apply_accent(self.mote),
        }
    }
}

/// Built-in world palettes, indexed by world.
const WORLDS: [(&str, Palette); 4] = [
    ("meadow", base_palette(0x7C_B3_42, 0x68_9F_38, 0x5D_40_37, 0x3E_27_23, 0x55_8B_2F)),
    ("glacier", base_palette(0xB3_E5_FC, 0x81_D4_FA, 0x45_5A_64, 0x26_32_38, 0x4F_C3_F7)),
    ("volcano", base_palette(0x6D_4C_41, 0x4E_34_2E, 0x21_21_21, 0x10_10_10, 0xFF_70_43)),
    ("haunted", base_palette(0x5E_35_B1, 0x45_27_A0, 0x26_23_3A, 0x12_10_1E, 0xB3_9D_DB)),
];

const fn base_palette(light: u32, dark: u32, wall: u32, shade: u32, line: u32) -> Palette {
    Palette {
        floor_light: Rgb::hex(light),
        floor_dark: Rgb::hex(dark),
        wall: Rgb::hex(wall),
        wall_shade: Rgb::hex(shade),
        grid_line: Rgb::hex(line),
        player: Rgb::hex(0xFA_FA_FA),
        enemy: Rgb::hex(0xE5_39_35),
        bomb: Rgb::hex(0x21_21_21),
        footprint: Rgb::new(80, 80, 80),
        frost: Rgb::hex(0xE1_F5_FE),
        lava: Rgb::hex(0xFF_57_22),
        lava_core: Rgb::hex(0xFF_EB_3B),
        ember: Rgb::hex(0xFF_6F_00),
        ember_hot: Rgb::hex(0xFF_F1_76),
        spark: Rgb::hex(0xFF_D5_4F),
        ghost: Rgb::hex(0xB0_BE_C5),
        mote: Rgb::hex(0xFF_F9_C4),
    }
}

/// Per-world overrides loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeOverride {
    /// World index the override applies to.
    pub world: u8,
    /// Light checker tile.
    #[serde(default)]
    pub floor_light: Option<Rgb>,
    /// Dark checker tile.
    #[serde(default)]
    pub floor_dark: Option<Rgb>,
    /// Wall body.
    #[serde(default)]
    pub wall: Option<Rgb>,
    /// Wall shade.
    #[serde(default)]
    pub wall_shade: Option<Rgb>,
    /// Grid lines.
    #[serde(default)]
    pub grid_line: Option<Rgb>,
}

/// The theme collaborator as seen by the frame orchestrator.
pub trait ThemeSource {
    /// Current floor key, queried once per frame.
    fn floor_key(&self) -> FloorKey;

    /// Palette for `key`.
    fn palette(&self, key: FloorKey) -> Palette;
}

/// Built-in theme table with optional per-world overrides.
#[derive(Debug, Clone)]
pub struct ThemeTable {
    worlds: Vec<(String, Palette)>,
    current: FloorKey,
}

impl ThemeTable {
    /// The four built-in worlds, current key `(0, Classic)`.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            worlds: WORLDS.iter().map(|(name, p)| ((*name).to_owned(), *p)).collect(),
            current: FloorKey::default(),
        }
    }

    /// Applies configuration overrides. Overrides for unknown worlds are ignored.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &[ThemeOverride]) -> Self {
        for o in overrides {
            let Some((_, palette)) = self.worlds.get_mut(usize::from(o.world)) else {
                tracing::warn!(world = o.world, "theme override for unknown world ignored");
                continue;
            };
            if let Some(c) = o.floor_light {
                palette.floor_light = c;
            }
            if let Some(c) = o.floor_dark {
                palette.floor_dark = c;
            }
            if let Some(c) = o.wall {
                palette.wall = c;
            }
            if let Some(c) = o.wall_shade {
                palette.wall_shade = c;
            }
            if let Some(c) = o.grid_line {
                palette.grid_line = c;
            }
        }
        self
    }

    /// Number of worlds.
    #[must_use]
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Name of a world, if it exists.
    #[must_use]
    pub fn world_name(&self, world: u8) -> Option<&str> {
        self.worlds.get(usize::from(world)).map(|(name, _)| name.as_str())
    }

    /// Selects the current key. Out-of-range worlds wrap around.
    pub fn set_key(&mut self, key: FloorKey) {
        self.current = FloorKey::new(self.wrap_world(key.world), key.style);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn wrap_world(&self, world: u8) -> u8 {
        (usize::from(world) % self.worlds.len().max(1)) as u8
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeSource for ThemeTable {
    fn floor_key(&self) -> FloorKey {
        self.current
    }

    fn palette(&self, key: FloorKey) -> Palette {
        let index = usize::from(self.wrap_world(key.world));
        let base = self.worlds.get(index).map_or(WORLDS[0].1, |(_, p)| *p);
        base.styled(key.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_identity() {
        let table = ThemeTable::builtin();
        let base = WORLDS[1].1;
        assert_eq!(table.palette(FloorKey::new(1, VisualStyle::Classic)), base);
    }

    #[test]
    fn test_styles_differ() {
        let table = ThemeTable::builtin();
        let classic = table.palette(FloorKey::new(0, VisualStyle::Classic));
        for style in [VisualStyle::Neon, VisualStyle::Pastel, VisualStyle::Monochrome] {
            assert_ne!(table.palette(FloorKey::new(0, style)).floor_light, classic.floor_light);
        }
    }

    #[test]
    fn test_world_wraps() {
        let mut table = ThemeTable::builtin();
        table.set_key(FloorKey::new(5, VisualStyle::Neon));
        assert_eq!(table.floor_key(), FloorKey::new(1, VisualStyle::Neon));
        assert_eq!(
            table.palette(FloorKey::new(4, VisualStyle::Classic)),
            table.palette(FloorKey::new(0, VisualStyle::Classic))
        );
    }

    #[test]
    fn test_overrides_apply() {
        let table = ThemeTable::builtin().with_overrides(&[ThemeOverride {
            world: 2,
            floor_light: Some(Rgb::new(1, 2, 3)),
            floor_dark: None,
            wall: None,
            wall_shade: None,
            grid_line: None,
        }]);
        let p = table.palette(FloorKey::new(2, VisualStyle::Classic));
        assert_eq!(p.floor_light, Rgb::new(1, 2, 3));
        assert_eq!(table.world_name(2), Some("volcano"));
    }
}
