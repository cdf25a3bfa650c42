//! Procedural snake: a constrained chain of circles that follows the pointer,
//! wrapped in a spline-smoothed outline.

use crate::app::Avour;
use crate::canvas::Coord;
use crate::error::AvourError;
use crate::sketch::Sketch;
use crate::utils::math::smoothen_tuples;
use crate::utils::{ConstrainedBody, PhysicsError, Vector2D};
use std::f32::consts::{FRAC_PI_2, PI};

const SEGMENT_RADIUS: [f32; 36] = [
    30.0, 35.0, 40.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0, 30.0,
    28.0, 25.0, 25.0, 22.0, 22.0, 20.0, 20.0, 20.0, 20.0, 20.0, 20.0, 18.0, 18.0, 16.0, 16.0,
    14.0, 14.0, 12.0, 12.0, 10.0, 10.0,
];

/// Resampling factor for the outline splines
const SMOOTHNESS: f32 = 4.0;
/// Points on the rounded head and tail caps
const CAP_SEGMENTS: usize = 6;

pub struct Snake {
    body: ConstrainedBody,
}

impl Snake {
    pub fn new() -> Result<Self, PhysicsError> {
        let mut pos = Vector2D::new(0.0, 100.0);
        let mut body = ConstrainedBody::new(pos, "0", 0.8 * PI, PI);
        for (i, radius) in SEGMENT_RADIUS.iter().enumerate().skip(1) {
            pos += Vector2D::right(*radius);
            body.add_node_to_parent(pos, &i.to_string(), &(i - 1).to_string())?;
        }
        Ok(Self { body })
    }

    pub fn body(&self) -> &ConstrainedBody {
        &self.body
    }

    pub fn move_head(&mut self, pos: Coord) {
        self.body.move_root(pos.into());
    }

    /// Half circle of `radius` around `center`, starting on the side
    /// clockwise from `facing`.
    fn cap(center: Vector2D, facing: Vector2D, radius: f32) -> Vec<Coord> {
        let mut v = (facing * radius + center).rotate(-FRAC_PI_2, Some(center));
        let mut points = Vec::with_capacity(CAP_SEGMENTS + 1);
        for _ in 0..=CAP_SEGMENTS {
            points.push(v.tuple());
            v = v.rotate(PI / CAP_SEGMENTS as f32, Some(center));
        }
        points
    }

    /// Smoothed outline as (head cap, tail cap, one side, other side).
    pub fn outline(&self) -> [Vec<Coord>; 4] {
        let nodes = self.body.nodes();
        let root = self.body.root();
        let head_dir = self
            .body
            .children(root)
            .next()
            .and_then(|child| self.body.direction_to_parent(child))
            .unwrap_or(Vector2D::left(1.0));

        let mut side_a = Vec::with_capacity(nodes.len());
        let mut side_b = Vec::with_capacity(nodes.len());
        for (node, radius) in nodes.iter().zip(SEGMENT_RADIUS) {
            let dir = self.body.direction_to_parent(node).unwrap_or(head_dir);
            let edge = (dir * radius + node.pos).rotate(FRAC_PI_2, Some(node.pos));
            side_a.push(edge.tuple());
            side_b.push(edge.rotate(-PI, Some(node.pos)).tuple());
        }

        let tail = nodes.last().copied().unwrap_or(root);
        let tail_dir = self.body.direction_to_parent(tail).unwrap_or(head_dir);
        let tail_radius = SEGMENT_RADIUS[SEGMENT_RADIUS.len() - 1];

        [
            smoothen_tuples(&Self::cap(root.pos, head_dir, SEGMENT_RADIUS[0]), SMOOTHNESS),
            smoothen_tuples(&Self::cap(tail.pos, -tail_dir, tail_radius), SMOOTHNESS),
            smoothen_tuples(&side_a, SMOOTHNESS),
            smoothen_tuples(&side_b, SMOOTHNESS),
        ]
    }

    pub fn draw(&self, app: &mut Avour) -> Result<(), AvourError> {
        app.color((255, 255, 255));
        app.fill(false);

        for (node, radius) in self.body.nodes().into_iter().zip(SEGMENT_RADIUS) {
            app.circle(node.pos.tuple(), radius)?;
            if let Some(parent) = self.body.parent(node) {
                app.line(node.pos.tuple(), parent.pos.tuple())?;
            }
        }

        for line in self.outline() {
            app.lines(&line, false, true)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SnakeSketch {
    snake: Option<Snake>,
}

impl Sketch for SnakeSketch {
    fn setup(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        let (width, height) = app.get_screen_size();
        app.translate((width as f32 / 2.0, height as f32 / 2.0));
        self.snake = Some(Snake::new()?);
        Ok(())
    }

    fn draw(&mut self, app: &mut Avour) -> anyhow::Result<()> {
        app.background((50, 50, 50))?;
        if let Some(snake) = &self.snake {
            snake.draw(app)?;
        }
        Ok(())
    }

    fn on_keydown(&mut self, app: &mut Avour, key: &str) -> anyhow::Result<()> {
        if key == "Q" || key == "ESCAPE" {
            app.exit();
        }
        Ok(())
    }

    fn on_mousemove(&mut self, _app: &mut Avour, pos: Coord) -> anyhow::Result<()> {
        if let Some(snake) = self.snake.as_mut() {
            snake.move_head(pos);
        }
        Ok(())
    }
}
