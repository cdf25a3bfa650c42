//! Conversion of [`DrawCommand`]s into egui shapes.
//!
//! The facade records y-up screen coordinates; egui paints in a y-down space
//! whose origin is the top-left corner. [`ScreenMapping`] does the flip, the
//! remaining helpers expand arcs and curves into point lists.

use crate::command::{AnchorX, AnchorY, DrawCommand, Point, ShapeStyle, TextCommand};
use egui::text::{LayoutJob, TextFormat};
use egui::{Align, Align2, Color32, FontFamily, FontId, Mesh, Painter, Pos2, Shape, Stroke, Vec2};
use std::f32::consts::TAU;

/// Minimum number of segments used for a full circle outline.
const MIN_CIRCLE_SEGMENTS: f32 = 14.0;

/// Segments used to flatten a bezier curve.
const BEZIER_SEGMENTS: usize = 100;

/// Maps y-up screen coordinates onto egui's y-down coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMapping {
    width: f32,
    height: f32,
}

impl ScreenMapping {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn pos(&self, (x, y): Point) -> Pos2 {
        Pos2::new(x, self.height - y)
    }

    fn positions(&self, points: &[Point]) -> Vec<Pos2> {
        points.iter().map(|&p| self.pos(p)).collect()
    }

    fn full_screen(&self) -> Vec<Pos2> {
        vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(self.width, 0.0),
            Pos2::new(self.width, self.height),
            Pos2::new(0.0, self.height),
        ]
    }
}

/// Number of segments for an arc of `radius` spanning `angle` radians.
pub fn arc_segments(radius: f32, angle: f32) -> usize {
    let full = (radius.abs() / 1.25).max(MIN_CIRCLE_SEGMENTS);
    ((full * angle.abs() / TAU).ceil() as usize).max(1)
}

/// Points along a circle segment, counter-clockwise for positive `delta`.
pub fn arc_points(center: Point, radius: f32, start: f32, delta: f32) -> Vec<Point> {
    let segments = arc_segments(radius, delta);
    (0..=segments)
        .map(|i| {
            let angle = start + delta * (i as f32 / segments as f32);
            (
                center.0 + radius * angle.cos(),
                center.1 + radius * angle.sin(),
            )
        })
        .collect()
}

/// Evaluate a bezier curve of any degree at `t` using de Casteljau's algorithm.
pub fn bezier_point(control: &[Point], t: f32) -> Option<Point> {
    let mut points = control.to_vec();
    if points.is_empty() {
        return None;
    }
    while points.len() > 1 {
        points = points
            .windows(2)
            .map(|w| {
                (
                    w[0].0 + (w[1].0 - w[0].0) * t,
                    w[0].1 + (w[1].1 - w[0].1) * t,
                )
            })
            .collect();
    }
    points.first().copied()
}

/// Flatten a bezier curve from `t = 0` to `t = factor`.
pub fn bezier_points(control: &[Point], factor: f32) -> Vec<Point> {
    let factor = factor.clamp(0.0, 1.0);
    (0..=BEZIER_SEGMENTS)
        .filter_map(|i| bezier_point(control, factor * i as f32 / BEZIER_SEGMENTS as f32))
        .collect()
}

fn stroke(thickness: f32, color: Color32) -> Stroke {
    Stroke::new(thickness, color)
}

/// Triangle fan around `points[0]`.
fn fan_mesh(points: &[Pos2], color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for &p in points {
        mesh.colored_vertex(p, color);
    }
    for i in 1..points.len().saturating_sub(1) {
        mesh.add_triangle(0, i as u32, i as u32 + 1);
    }
    mesh
}

/// Convert every non-text command into an egui shape.
///
/// Returns `None` for [`DrawCommand::Text`] (text needs the painter's fonts)
/// and for degenerate input such as polygons with fewer than two points.
pub fn shape_for(command: &DrawCommand, mapping: &ScreenMapping) -> Option<Shape> {
    let shape = match command {
        DrawCommand::Background(color) => {
            Shape::convex_polygon(mapping.full_screen(), color.to_egui(), Stroke::NONE)
        }
        DrawCommand::Circle {
            center,
            radius,
            style,
        } => match *style {
            ShapeStyle::Fill(color) => {
                Shape::circle_filled(mapping.pos(*center), *radius, color.to_egui())
            }
            ShapeStyle::Stroke { color, thickness } => Shape::circle_stroke(
                mapping.pos(*center),
                *radius,
                stroke(thickness, color.to_egui()),
            ),
        },
        DrawCommand::Ellipse {
            center,
            radii,
            style,
        } => {
            let radius = Vec2::new(radii.0, radii.1);
            match *style {
                ShapeStyle::Fill(color) => {
                    Shape::ellipse_filled(mapping.pos(*center), radius, color.to_egui())
                }
                ShapeStyle::Stroke { color, thickness } => Shape::ellipse_stroke(
                    mapping.pos(*center),
                    radius,
                    stroke(thickness, color.to_egui()),
                ),
            }
        }
        DrawCommand::Line {
            start,
            end,
            thickness,
            color,
        } => Shape::line_segment(
            [mapping.pos(*start), mapping.pos(*end)],
            stroke(*thickness, color.to_egui()),
        ),
        DrawCommand::Polyline {
            points,
            closed,
            thickness,
            color,
        } => {
            if points.len() < 2 {
                return None;
            }
            let points = mapping.positions(points);
            let stroke = stroke(*thickness, color.to_egui());
            if *closed {
                Shape::closed_line(points, stroke)
            } else {
                Shape::line(points, stroke)
            }
        }
        DrawCommand::Polygon { points, style } => {
            if points.len() < 2 {
                return None;
            }
            let points = mapping.positions(points);
            match *style {
                ShapeStyle::Fill(color) => {
                    Shape::convex_polygon(points, color.to_egui(), Stroke::NONE)
                }
                ShapeStyle::Stroke { color, thickness } => {
                    Shape::closed_line(points, stroke(thickness, color.to_egui()))
                }
            }
        }
        DrawCommand::Sector {
            center,
            radius,
            angle_start,
            angle_delta,
            color,
        } => {
            let mut points = vec![mapping.pos(*center)];
            points.extend(
                arc_points(*center, *radius, *angle_start, *angle_delta)
                    .into_iter()
                    .map(|p| mapping.pos(p)),
            );
            Shape::mesh(fan_mesh(&points, color.to_egui()))
        }
        DrawCommand::Arc {
            center,
            radius,
            angle_start,
            angle_delta,
            closed,
            thickness,
            color,
        } => {
            let points = mapping.positions(&arc_points(
                *center,
                *radius,
                *angle_start,
                *angle_delta,
            ));
            let stroke = stroke(*thickness, color.to_egui());
            if *closed {
                Shape::closed_line(points, stroke)
            } else {
                Shape::line(points, stroke)
            }
        }
        DrawCommand::Bezier {
            points,
            factor,
            thickness,
            color,
        } => {
            let curve = bezier_points(points, *factor);
            if curve.len() < 2 {
                return None;
            }
            Shape::line(
                mapping.positions(&curve),
                stroke(*thickness, color.to_egui()),
            )
        }
        DrawCommand::Text(_) => return None,
    };
    Some(shape)
}

fn font_family(name: &str) -> FontFamily {
    match name.to_ascii_lowercase().as_str() {
        "monospace" | "mono" | "courier" | "courier new" | "consolas" => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    }
}

fn text_anchor(anchor_x: AnchorX, anchor_y: AnchorY) -> Align2 {
    let x = match anchor_x {
        AnchorX::Left => Align::Min,
        AnchorX::Center => Align::Center,
        AnchorX::Right => Align::Max,
    };
    let y = match anchor_y {
        AnchorY::Top => Align::Min,
        AnchorY::Center => Align::Center,
        AnchorY::Bottom | AnchorY::Baseline => Align::Max,
    };
    Align2([x, y])
}

fn paint_text(painter: &Painter, mapping: &ScreenMapping, text: &TextCommand) {
    let content = if text.multiline {
        text.text.clone()
    } else {
        text.text.replace('\n', " ")
    };
    let color = text.color.to_egui();

    let mut job = LayoutJob::default();
    job.append(
        &content,
        0.0,
        TextFormat {
            font_id: FontId::new(text.font_size, font_family(&text.font_name)),
            color,
            italics: text.italic,
            ..Default::default()
        },
    );
    let galley = painter.layout_job(job);

    let mut anchor_pos = mapping.pos(text.pos);
    if text.anchor_y == AnchorY::Baseline {
        // Descenders hang below the baseline
        anchor_pos.y += text.font_size * 0.2;
    }
    let rect = text_anchor(text.anchor_x, text.anchor_y).anchor_size(anchor_pos, galley.size());

    if text.bold {
        // Default egui fonts ship no bold face; overdraw with a small offset instead
        painter.galley(rect.min + Vec2::new(0.6, 0.0), galley.clone(), color);
    }
    painter.galley(rect.min, galley, color);
}

/// Paint a whole display list in order.
pub fn paint_commands(painter: &Painter, mapping: &ScreenMapping, commands: &[DrawCommand]) {
    for command in commands {
        match command {
            DrawCommand::Text(text) => paint_text(painter, mapping, text),
            other => {
                if let Some(shape) = shape_for(other, mapping) {
                    painter.add(shape);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn mapping() -> ScreenMapping {
        ScreenMapping::new(800.0, 600.0)
    }

    #[test]
    fn test_mapping_flips_y() {
        let m = mapping();
        assert_eq!(m.pos((0.0, 0.0)), Pos2::new(0.0, 600.0));
        assert_eq!(m.pos((10.0, 600.0)), Pos2::new(10.0, 0.0));
        assert_eq!(m.pos((400.0, 300.0)), Pos2::new(400.0, 300.0));
    }

    #[test]
    fn test_filled_circle_shape() {
        let cmd = DrawCommand::Circle {
            center: (100.0, 100.0),
            radius: 25.0,
            style: ShapeStyle::Fill(Color::rgb(50, 180, 30)),
        };
        match shape_for(&cmd, &mapping()) {
            Some(Shape::Circle(circle)) => {
                assert_eq!(circle.center, Pos2::new(100.0, 500.0));
                assert_eq!(circle.radius, 25.0);
                assert_eq!(circle.fill, Color32::from_rgb(50, 180, 30));
            }
            other => panic!("expected circle shape, got {other:?}"),
        }
    }

    #[test]
    fn test_outlined_circle_uses_thickness() {
        let cmd = DrawCommand::Circle {
            center: (0.0, 0.0),
            radius: 5.0,
            style: ShapeStyle::Stroke {
                color: Color::WHITE,
                thickness: 3.0,
            },
        };
        match shape_for(&cmd, &mapping()) {
            Some(Shape::Circle(circle)) => {
                assert_eq!(circle.fill, Color32::TRANSPARENT);
                assert_eq!(circle.stroke.width, 3.0);
            }
            other => panic!("expected circle shape, got {other:?}"),
        }
    }

    #[test]
    fn test_text_has_no_plain_shape() {
        let cmd = DrawCommand::Text(TextCommand {
            text: "hi".to_string(),
            pos: (0.0, 0.0),
            font_name: "Arial".to_string(),
            font_size: 20.0,
            anchor_x: AnchorX::Left,
            anchor_y: AnchorY::Baseline,
            bold: false,
            italic: false,
            multiline: false,
            color: Color::WHITE,
        });
        assert!(shape_for(&cmd, &mapping()).is_none());
    }

    #[test]
    fn test_degenerate_polyline_skipped() {
        let cmd = DrawCommand::Polyline {
            points: vec![(1.0, 1.0)],
            closed: false,
            thickness: 1.0,
            color: Color::WHITE,
        };
        assert!(shape_for(&cmd, &mapping()).is_none());
    }

    #[test]
    fn test_arc_points_endpoints() {
        let points = arc_points((0.0, 0.0), 10.0, 0.0, std::f32::consts::FRAC_PI_2);
        let first = points[0];
        let last = *points.last().unwrap();
        assert!((first.0 - 10.0).abs() < 1e-4 && first.1.abs() < 1e-4);
        assert!(last.0.abs() < 1e-4 && (last.1 - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_arc_segments_scale_with_radius() {
        assert_eq!(arc_segments(1.0, TAU), 14);
        assert!(arc_segments(200.0, TAU) > arc_segments(50.0, TAU));
        assert_eq!(arc_segments(10.0, 0.0), 1);
    }

    #[test]
    fn test_bezier_endpoints_and_midpoint() {
        let control = [(0.0, 0.0), (50.0, 100.0), (100.0, 0.0)];
        let curve = bezier_points(&control, 1.0);
        assert_eq!(curve.len(), BEZIER_SEGMENTS + 1);
        assert_eq!(curve[0], (0.0, 0.0));
        let end = *curve.last().unwrap();
        assert!((end.0 - 100.0).abs() < 1e-4 && end.1.abs() < 1e-4);
        let mid = bezier_point(&control, 0.5).unwrap();
        assert!((mid.0 - 50.0).abs() < 1e-4 && (mid.1 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_bezier_factor_truncates_curve() {
        let control = [(0.0, 0.0), (100.0, 0.0)];
        let curve = bezier_points(&control, 0.5);
        let end = *curve.last().unwrap();
        assert!((end.0 - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_fan_mesh_triangle_count() {
        let points = [
            Pos2::new(0.0, 0.0),
            Pos2::new(1.0, 0.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(0.0, 1.0),
        ];
        let mesh = fan_mesh(&points, Color32::WHITE);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
    }
}
