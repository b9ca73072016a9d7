/// Drawing surface abstraction implemented by the 2D backends
use crate::error::DrawError;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const PINK: Color = Color::rgb(255, 192, 203);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Perceived brightness in `[0, 1]` (Rec. 601 weights).
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

/// A 2D target the renderer draws into.
///
/// Coordinates are integer screen positions with the origin in the top-left
/// corner. Implementations may reject primitives they cannot draw; the
/// renderer counts those rejections and carries on.
pub trait Surface {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    fn draw_circle(
        &mut self,
        color: Color,
        center: (i32, i32),
        radius: i32,
    ) -> Result<(), DrawError>;

    fn draw_line(
        &mut self,
        color: Color,
        p1: (i32, i32),
        p2: (i32, i32),
        width: i32,
    ) -> Result<(), DrawError>;

    fn draw_polygon(&mut self, color: Color, points: &[(i32, i32)]) -> Result<(), DrawError>;
}
