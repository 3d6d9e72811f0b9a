//! Surface that records draw commands instead of painting
//!
//! Used by the headless native build and by tests that want to inspect what
//! a frame drew.

use glam::Vec2;

use super::{Color, Surface};

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything drawn so far
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Recorded circles, in draw order
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
            alpha,
        });
    }
}
