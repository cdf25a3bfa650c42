//! The per-frame display list.
//!
//! Every drawing primitive of the facade appends one or more commands here.
//! Positions are screen coordinates in logical pixels with the origin at the
//! bottom-left corner and y pointing up; [`crate::paint`] flips them into
//! egui's top-left space.

use crate::color::Color;

/// A 2D position in screen coordinates.
pub type Point = (f32, f32);

/// Whether a closed shape is filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeStyle {
    Fill(Color),
    Stroke { color: Color, thickness: f32 },
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorX {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorY {
    Top,
    Center,
    Bottom,
    #[default]
    Baseline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub pos: Point,
    pub font_name: String,
    pub font_size: f32,
    pub anchor_x: AnchorX,
    pub anchor_y: AnchorY,
    pub bold: bool,
    pub italic: bool,
    pub multiline: bool,
    pub color: Color,
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Cover the whole frame with a color
    Background(Color),
    Circle {
        center: Point,
        radius: f32,
        style: ShapeStyle,
    },
    Ellipse {
        center: Point,
        /// Horizontal and vertical radii
        radii: (f32, f32),
        style: ShapeStyle,
    },
    Line {
        start: Point,
        end: Point,
        thickness: f32,
        color: Color,
    },
    /// Connected line strip, optionally closed back to the first point
    Polyline {
        points: Vec<Point>,
        closed: bool,
        thickness: f32,
        color: Color,
    },
    Polygon {
        points: Vec<Point>,
        style: ShapeStyle,
    },
    /// Filled pie slice; angles in radians, counter-clockwise
    Sector {
        center: Point,
        radius: f32,
        angle_start: f32,
        angle_delta: f32,
        color: Color,
    },
    /// Outline of a circle segment; angles in radians, counter-clockwise
    Arc {
        center: Point,
        radius: f32,
        angle_start: f32,
        angle_delta: f32,
        closed: bool,
        thickness: f32,
        color: Color,
    },
    /// Bezier curve through the control points, drawn up to `factor` of its length
    Bezier {
        points: Vec<Point>,
        factor: f32,
        thickness: f32,
        color: Color,
    },
    Text(TextCommand),
}
