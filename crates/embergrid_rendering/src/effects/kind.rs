//! Closed set of effect variants.

use serde::Deserialize;

/// Sub-style of an unlocked cosmetic trail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailStyle {
    /// Hue cycles between the two payload colours.
    #[default]
    Rainbow,
    /// Four-point twinkling stars.
    Stardust,
    /// Rising bubbles with a highlight.
    Bubbles,
    /// Small hearts.
    Hearts,
}

/// Which side of the entity pass an effect is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectLayer {
    /// Ground marks, drawn before entities.
    UnderEntities,
    /// Airborne effects, drawn after entities.
    OverEntities,
}

/// Effect variant. Selects the draw routine and which colours are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Fading copy of a dying entity; `extra` = radius.
    GhostAfterimage,
    /// Rising flame particle; `extra` = flicker phase.
    FireEmber,
    /// Pair of foot marks; `extra` = heading in radians.
    #[default]
    Footprint,
    /// Ice crystal left by frozen movers; `extra` = radius.
    FrostMark,
    /// Scorched puddle left by burning movers; `extra` = radius.
    LavaMark,
    /// Damage streak; `extra` = direction in radians.
    Spark,
    /// Menu-screen ambience glow; `extra` = drift phase.
    MenuMote,
    /// Cosmetic unlock trail; `extra` = heading in radians.
    CosmeticTrail(TrailStyle),
}

impl EffectKind {
    /// Z-layer this kind renders on.
    #[must_use]
    pub const fn layer(self) -> EffectLayer {
        match self {
            Self::Footprint | Self::FrostMark | Self::LavaMark | Self::CosmeticTrail(_) => {
                EffectLayer::UnderEntities
            }
            Self::GhostAfterimage | Self::FireEmber | Self::Spark | Self::MenuMote => {
                EffectLayer::OverEntities
            }
        }
    }

    /// Whether the draw routine reads the secondary colour.
    #[must_use]
    pub const fn uses_secondary(self) -> bool {
        matches!(
            self,
            Self::FireEmber | Self::LavaMark | Self::FrostMark | Self::CosmeticTrail(_)
        )
    }

    /// `extra` used when a caller has nothing specific to pass.
    #[must_use]
    pub const fn default_extra(self) -> f32 {
        match self {
            Self::GhostAfterimage => 14.0,
            Self::FrostMark | Self::LavaMark => 7.0,
            Self::Footprint
            | Self::FireEmber
            | Self::Spark
            | Self::MenuMote
            | Self::CosmeticTrail(_) => 0.0,
        }
    }
}
