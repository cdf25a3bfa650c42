//! Drawing state setters and primitives.
//!
//! State setters may be called from any hook. Primitives transform their
//! arguments from local to screen coordinates and append to the frame's
//! display list; they are only accepted while `draw()` runs.

use super::{Avour, Phase};
use crate::canvas::{Coord, DrawState};
use crate::error::AvourError;
use avour_render::{AnchorX, AnchorY, Color, DrawCommand, ShapeStyle, TextCommand};

/// Text layout options for [`Avour::text`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    pub font_name: String,
    pub font_size: f32,
    pub anchor_x: AnchorX,
    pub anchor_y: AnchorY,
    /// Treat `pos` as screen coordinates and skip the draw-state transform
    pub use_screen_coordinates: bool,
    pub bold: bool,
    pub italic: bool,
    pub multiline: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size: 20.0,
            anchor_x: AnchorX::Left,
            anchor_y: AnchorY::Baseline,
            use_screen_coordinates: false,
            bold: false,
            italic: false,
            multiline: false,
        }
    }
}

impl TextOptions {
    pub fn with_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_anchor(mut self, anchor_x: AnchorX, anchor_y: AnchorY) -> Self {
        self.anchor_x = anchor_x;
        self.anchor_y = anchor_y;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn in_screen_coordinates(mut self) -> Self {
        self.use_screen_coordinates = true;
        self
    }
}

// ========================================================================
// Draw state
// ========================================================================

impl Avour {
    pub fn draw_state(&self) -> &DrawState {
        &self.state
    }

    /// Accepts a grayscale `u8`, an RGB tuple or an RGBA tuple.
    pub fn color(&mut self, color: impl Into<Color>) {
        self.state.color = color.into();
    }

    pub fn thickness(&mut self, thickness: f32) {
        self.state.thickness = thickness;
    }

    pub fn fill(&mut self, fill: bool) {
        self.state.fill = fill;
    }

    pub fn scale(&mut self, scale: f32) -> Result<(), AvourError> {
        if scale == 0.0 || !scale.is_finite() {
            return Err(AvourError::InvalidScale(scale));
        }
        self.state.scale = scale;
        Ok(())
    }

    /// Set the offset added to every subsequent position. Replaces, does not accumulate.
    pub fn translate(&mut self, offset: Coord) {
        self.state.translate = offset;
    }

    pub fn invert_y_axis(&mut self, invert: bool) {
        self.state.invert_y_axis = invert;
    }

    /// Restore the default draw state. Saved states are kept.
    pub fn reset(&mut self) {
        self.state = DrawState::default();
    }

    /// Save the current draw state, optionally resetting to defaults afterwards.
    pub fn push(&mut self, reset: bool) {
        self.saved_states.push(self.state);
        if reset {
            self.reset();
        }
    }

    /// Restore the most recently pushed state. No-op when nothing was pushed.
    pub fn pop(&mut self) {
        if let Some(state) = self.saved_states.pop() {
            self.state = state;
        }
    }
}

// ========================================================================
// Primitives
// ========================================================================

impl Avour {
    fn ensure_drawing(&self) -> Result<(), AvourError> {
        if !self.window_ready {
            return Err(AvourError::NotReady);
        }
        match self.phase {
            Phase::Drawing => Ok(()),
            Phase::Physics => Err(AvourError::DrawInsidePhysics),
            Phase::Idle => Err(AvourError::OutsideFrame),
        }
    }

    fn screen_points(&self, points: &[Coord]) -> Vec<Coord> {
        points.iter().map(|&p| self.state.to_screen(p)).collect()
    }

    /// Paint the whole frame with `color`.
    pub fn background(&mut self, color: impl Into<Color>) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        self.push_command(DrawCommand::Background(color.into()));
        Ok(())
    }

    pub fn text(&mut self, text: &str, pos: Coord, options: &TextOptions) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        let pos = if options.use_screen_coordinates {
            pos
        } else {
            self.state.to_screen(pos)
        };
        self.push_command(DrawCommand::Text(TextCommand {
            text: text.to_string(),
            pos,
            font_name: options.font_name.clone(),
            font_size: options.font_size,
            anchor_x: options.anchor_x,
            anchor_y: options.anchor_y,
            bold: options.bold,
            italic: options.italic,
            multiline: options.multiline,
            color: self.state.color,
        }));
        Ok(())
    }

    pub fn line(&mut self, start: Coord, end: Coord) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        self.push_command(DrawCommand::Line {
            start: self.state.to_screen(start),
            end: self.state.to_screen(end),
            thickness: self.state.stroke_width(),
            color: self.state.color,
        });
        Ok(())
    }

    /// Connect `points` with lines.
    ///
    /// With `use_multiline` the points become a single joined strip;
    /// otherwise every segment is an independent line.
    pub fn lines(&mut self, points: &[Coord], closed: bool, use_multiline: bool) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        if points.len() < 2 {
            return Ok(());
        }
        let mut screen = self.screen_points(points);
        let thickness = self.state.stroke_width();
        let color = self.state.color;

        if use_multiline {
            self.push_command(DrawCommand::Polyline {
                points: screen,
                closed,
                thickness,
                color,
            });
            return Ok(());
        }

        if closed {
            screen.push(screen[0]);
        }
        for pair in screen.windows(2) {
            self.push_command(DrawCommand::Line {
                start: pair[0],
                end: pair[1],
                thickness,
                color,
            });
        }
        Ok(())
    }

    /// Bezier curve through the control `points`; `factor` (0..=1) draws a prefix of it.
    pub fn bezier(&mut self, points: &[Coord], factor: f32) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        if points.len() < 2 {
            return Ok(());
        }
        self.push_command(DrawCommand::Bezier {
            points: self.screen_points(points),
            factor: factor.clamp(0.0, 1.0),
            thickness: self.state.stroke_width(),
            color: self.state.color,
        });
        Ok(())
    }

    pub fn circle(&mut self, center: Coord, radius: f32) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        self.push_command(DrawCommand::Circle {
            center: self.state.to_screen(center),
            radius: self.state.scaled(radius).abs(),
            style: self.state.shape_style(),
        });
        Ok(())
    }

    /// Axis-aligned ellipse with horizontal radius `major` and vertical radius `minor`.
    pub fn ellipse(&mut self, center: Coord, major: f32, minor: f32) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        self.push_command(DrawCommand::Ellipse {
            center: self.state.to_screen(center),
            radii: (
                self.state.scaled(major).abs(),
                self.state.scaled(minor).abs(),
            ),
            style: self.state.shape_style(),
        });
        Ok(())
    }

    /// Filled pie slice. Angles are radians, counter-clockwise from +x.
    pub fn sector(
        &mut self,
        center: Coord,
        radius: f32,
        angle_start: f32,
        angle_delta: f32,
    ) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        self.push_command(DrawCommand::Sector {
            center: self.state.to_screen(center),
            radius: self.state.scaled(radius).abs(),
            angle_start,
            angle_delta,
            color: self.state.color,
        });
        Ok(())
    }

    /// Circle segment outline; `closed` joins the end points back through the chord.
    pub fn arc(
        &mut self,
        center: Coord,
        radius: f32,
        angle_start: f32,
        angle_delta: f32,
        closed: bool,
    ) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        self.push_command(DrawCommand::Arc {
            center: self.state.to_screen(center),
            radius: self.state.scaled(radius).abs(),
            angle_start,
            angle_delta,
            closed,
            thickness: self.state.stroke_width(),
            color: self.state.color,
        });
        Ok(())
    }

    /// Rectangle whose top-left corner is `pos`; it extends right and down.
    pub fn rect(&mut self, pos: Coord, width: f32, height: f32) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        let (x, y) = self.state.to_screen(pos);
        let w = self.state.scaled(width);
        let h = self.state.scaled(height);
        let corners = vec![(x, y - h), (x + w, y - h), (x + w, y), (x, y)];

        let command = match self.state.shape_style() {
            style @ ShapeStyle::Fill(_) => DrawCommand::Polygon {
                points: corners,
                style,
            },
            ShapeStyle::Stroke { color, thickness } => DrawCommand::Polyline {
                points: corners,
                closed: true,
                thickness,
                color,
            },
        };
        self.push_command(command);
        Ok(())
    }

    /// Filled (convex) polygon, or its closed outline when fill is off.
    pub fn polygon(&mut self, points: &[Coord]) -> Result<(), AvourError> {
        self.ensure_drawing()?;
        if points.len() < 3 {
            return Ok(());
        }
        let screen = self.screen_points(points);
        let command = match self.state.shape_style() {
            style @ ShapeStyle::Fill(_) => DrawCommand::Polygon {
                points: screen,
                style,
            },
            ShapeStyle::Stroke { color, thickness } => DrawCommand::Polyline {
                points: screen,
                closed: true,
                thickness,
                color,
            },
        };
        self.push_command(command);
        Ok(())
    }
}
