//! Canvas that records primitive calls instead of rasterizing them.

use super::{Canvas, Rect, SoftShadow, Surface};
use embergrid_core::{Rgba, Vec2};

/// A recorded primitive call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled circle.
    FillCircle {
        /// Centre point.
        center: Vec2,
        /// Radius in pixels.
        radius: f32,
        /// Fill colour.
        color: Rgba,
    },
    /// Filled rectangle.
    FillRect {
        /// Bounds.
        rect: Rect,
        /// Fill colour.
        color: Rgba,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Bounds.
        rect: Rect,
        /// Line width.
        width: f32,
        /// Stroke colour.
        color: Rgba,
    },
    /// Filled polygon.
    FillPath {
        /// Vertices in order.
        points: Vec<Vec2>,
        /// Fill colour.
        color: Rgba,
    },
    /// Soft shadow toggle.
    SoftShadow(Option<SoftShadow>),
    /// Surface blit.
    DrawSurface {
        /// Source surface width.
        width: u32,
        /// Source surface height.
        height: u32,
        /// Destination of the top-left corner.
        origin: (i32, i32),
    },
}

impl DrawCommand {
    /// Fill/stroke colour of the command, if it has one.
    #[must_use]
    pub fn color(&self) -> Option<Rgba> {
        match self {
            Self::FillCircle { color, .. }
            | Self::FillRect { color, .. }
            | Self::StrokeRect { color, .. }
            | Self::FillPath { color, .. } => Some(*color),
            Self::SoftShadow(_) | Self::DrawSurface { .. } => None,
        }
    }

    /// Returns true for commands that put pixels on the target.
    #[must_use]
    pub fn is_paint(&self) -> bool {
        !matches!(self, Self::SoftShadow(_))
    }
}

/// Records every call for later inspection.
///
/// Used by tests and diagnostics; allocates per recorded path.
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    /// Creates a recorder reporting the given target size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(256),
        }
    }

    /// Recorded commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of pixel-producing commands.
    #[must_use]
    pub fn paint_count(&self) -> usize {
        self.commands.iter().filter(|c| c.is_paint()).count()
    }

    /// Drops everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Takes the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for CommandRecorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn fill_path(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::FillPath {
            points: points.to_vec(),
            color,
        });
    }

    fn set_soft_shadow(&mut self, shadow: Option<SoftShadow>) {
        self.commands.push(DrawCommand::SoftShadow(shadow));
    }

    fn draw_surface(&mut self, surface: &Surface, origin: (i32, i32)) {
        let (width, height) = surface.size();
        self.commands.push(DrawCommand::DrawSurface { width, height, origin });
    }
}
