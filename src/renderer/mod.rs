//! 2D drawing surface abstraction
//!
//! Entities only ever fill circles, and the frame loop only ever washes the
//! whole canvas with a translucent rectangle. Those two commands are all a
//! backend has to provide.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCommand, RecordingSurface};

use std::fmt;

use glam::Vec2;

/// Fill color for entities and overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// 8-bit RGB
    Rgb(u8, u8, u8),
    /// Hue in degrees, saturation and lightness in percent
    Hsl { hue: f32, saturation: f32, lightness: f32 },
}

impl Color {
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);

    pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Color::Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

/// Formats as a CSS color string (`rgb(..)` / `hsl(..)`)
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgb(r, g, b) => write!(f, "rgb({}, {}, {})", r, g, b),
            Color::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({}, {}%, {}%)", hue, saturation, lightness),
        }
    }
}

/// Something the game can paint onto
///
/// `alpha` is the fill opacity in `[0, 1]`. Backends must not clear between
/// frames: the previous frame stays visible under the translucent wash.
pub trait Surface {
    /// Fill a circle centered at `center`
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32);

    /// Fill an axis-aligned rectangle with its top-left corner at `origin`
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color, alpha: f32);
}
