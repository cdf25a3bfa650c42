//! Drawing state and coordinate transforms.
//!
//! Local coordinates (what a sketch passes to primitives) map to screen
//! coordinates as `screen = local * scale + translate`, followed by a y flip
//! when `invert_y_axis` is set. Pointer positions go through the inverse.

use avour_render::{Color, ShapeStyle};

/// A 2D position or offset.
pub type Coord = (f32, f32);

/// The mutable pen state. Last-set value wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub color: Color,
    pub thickness: f32,
    pub fill: bool,
    pub scale: f32,
    pub translate: Coord,
    pub invert_y_axis: bool,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1.0,
            fill: true,
            scale: 1.0,
            translate: (0.0, 0.0),
            invert_y_axis: false,
        }
    }
}

impl DrawState {
    pub fn to_screen(&self, (x, y): Coord) -> Coord {
        let x = x * self.scale + self.translate.0;
        let y = y * self.scale + self.translate.1;
        (x, if self.invert_y_axis { -y } else { y })
    }

    pub fn to_local(&self, (x, y): Coord) -> Coord {
        let y = if self.invert_y_axis { -y } else { y };
        (
            (x - self.translate.0) / self.scale,
            (y - self.translate.1) / self.scale,
        )
    }

    /// A length in local units converted to screen pixels.
    pub fn scaled(&self, length: f32) -> f32 {
        length * self.scale
    }

    /// Outline width in screen pixels. Mirroring scales keep it positive.
    pub fn stroke_width(&self) -> f32 {
        (self.thickness * self.scale).abs()
    }

    /// Fill or stroke style for closed shapes, from the current fill flag.
    pub fn shape_style(&self) -> ShapeStyle {
        if self.fill {
            ShapeStyle::Fill(self.color)
        } else {
            ShapeStyle::Stroke {
                color: self.color,
                thickness: self.stroke_width(),
            }
        }
    }
}
