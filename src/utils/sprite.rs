//! Vector sprites: colored polygons composed hierarchically.
//!
//! A [`SpriteVertexGroup`] holds one polygon plus child groups, each placed
//! with a (position, angle, scale) relation. Flattening the hierarchy into
//! plain polygons is cached until the group changes.

use super::physics::rect_collision;
use super::vector::Vector2D;
use crate::app::Avour;
use crate::canvas::Coord;
use crate::error::AvourError;
use avour_render::Color;
use std::cell::OnceCell;

/// A flattened polygon and its color.
pub type Shape = (Vec<Vector2D>, Color);

/// Placement of a child group inside its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub position: Vector2D,
    pub angle: f32,
    pub scale: f32,
}

impl Default for Relation {
    fn default() -> Self {
        Self {
            position: Vector2D::origin(),
            angle: 0.0,
            scale: 1.0,
        }
    }
}

impl Relation {
    fn apply(&self, vertex: Vector2D) -> Vector2D {
        vertex.rotate(self.angle, None) * self.scale + self.position
    }
}

#[derive(Debug, Clone)]
pub struct SpriteVertexGroup {
    vertices: Vec<Vector2D>,
    color: Color,
    children: Vec<(SpriteVertexGroup, Relation)>,
    flattened: OnceCell<Vec<Shape>>,
}

impl Default for SpriteVertexGroup {
    fn default() -> Self {
        Self::new(Vec::<Vector2D>::new(), Color::WHITE)
    }
}

impl SpriteVertexGroup {
    pub fn new<V: Into<Vector2D>>(vertices: impl IntoIterator<Item = V>, color: impl Into<Color>) -> Self {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
            color: color.into(),
            children: Vec::new(),
            flattened: OnceCell::new(),
        }
    }

    pub fn vertices(&self) -> &[Vector2D] {
        &self.vertices
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace this group's own polygon. Clears the flattened cache.
    pub fn set_vertices<V: Into<Vector2D>>(&mut self, vertices: impl IntoIterator<Item = V>) {
        self.vertices = vertices.into_iter().map(Into::into).collect();
        self.flattened = OnceCell::new();
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.color = color.into();
        self.flattened = OnceCell::new();
    }

    /// Same color (and optionally children) with different vertices.
    fn with_vertices(&self, vertices: Vec<Vector2D>, with_children: bool) -> Self {
        let mut group = Self::new(vertices, self.color);
        if with_children {
            group.children = self.children.clone();
        }
        group
    }

    pub fn flip_on_x(&self, with_children: bool) -> Self {
        let vertices = self.vertices.iter().map(|v| Vector2D::new(-v.x, v.y)).collect();
        self.with_vertices(vertices, with_children)
    }

    pub fn flip_on_y(&self, with_children: bool) -> Self {
        let vertices = self.vertices.iter().map(|v| Vector2D::new(v.x, -v.y)).collect();
        self.with_vertices(vertices, with_children)
    }

    pub fn rotate_on_center(&self, angle: f32, with_children: bool) -> Self {
        let vertices = self.vertices.iter().map(|v| v.rotate(angle, None)).collect();
        self.with_vertices(vertices, with_children)
    }

    pub fn add_group(&mut self, child: SpriteVertexGroup, relation: Relation) {
        self.children.push((child, relation));
        self.flattened = OnceCell::new();
    }

    /// Every polygon of the hierarchy in this group's frame, children first.
    pub fn compute_vertex_groups(&self) -> &[Shape] {
        self.flattened.get_or_init(|| {
            let mut shapes = Vec::new();
            for (child, relation) in &self.children {
                for (vertices, color) in child.compute_vertex_groups() {
                    shapes.push((vertices.iter().map(|&v| relation.apply(v)).collect(), *color));
                }
            }
            shapes.push((self.vertices.clone(), self.color));
            shapes
        })
    }

    /// Flattened polygons placed in the world frame by `relation`.
    ///
    /// With `check_validity`, polygons with fewer than three vertices are skipped.
    pub fn apply_transform(&self, relation: Relation, check_validity: bool) -> Vec<Shape> {
        self.compute_vertex_groups()
            .iter()
            .filter(|(vertices, _)| !check_validity || vertices.len() >= 3)
            .map(|(vertices, color)| (vertices.iter().map(|&v| relation.apply(v)).collect(), *color))
            .collect()
    }
}

pub struct SpritePrimitive;

impl SpritePrimitive {
    /// Rectangle corners, clockwise from the top-left. Without `from_center`,
    /// `pos` is the top-left corner and the rectangle extends right and down.
    pub fn rect_primitive(pos: Coord, width: f32, height: f32, from_center: bool) -> Vec<Coord> {
        let (x, y) = pos;
        if from_center {
            let (hw, hh) = (width / 2.0, height / 2.0);
            vec![(x - hw, y + hh), (x + hw, y + hh), (x + hw, y - hh), (x - hw, y - hh)]
        } else {
            vec![(x, y), (x + width, y), (x + width, y - height), (x, y - height)]
        }
    }
}

const COLLISION_MESH_COLOR: Color = Color::rgb(45, 209, 42);

/// A placed sprite with a bounding-box collision mesh.
#[derive(Debug, Clone)]
pub struct SpriteBody {
    pub position: Vector2D,
    pub angle: f32,
    pub scale: f32,
    svg: SpriteVertexGroup,
    collision_svg: OnceCell<SpriteVertexGroup>,
}

impl Default for SpriteBody {
    fn default() -> Self {
        Self {
            position: Vector2D::origin(),
            angle: 0.0,
            scale: 1.0,
            svg: SpriteVertexGroup::default(),
            collision_svg: OnceCell::new(),
        }
    }
}

impl SpriteBody {
    pub fn new() -> Self {
        Self::default()
    }

    fn relation(&self) -> Relation {
        Relation {
            position: self.position,
            angle: self.angle,
            scale: self.scale,
        }
    }

    /// Add a rectangle at `position` relative to the sprite origin.
    pub fn add_rect(
        &mut self,
        position: impl Into<Vector2D>,
        width: f32,
        height: f32,
        from_center: bool,
        color: impl Into<Color>,
    ) {
        let corners = SpritePrimitive::rect_primitive((0.0, 0.0), width, height, from_center);
        self.svg.add_group(
            SpriteVertexGroup::new(corners, color),
            Relation {
                position: position.into(),
                ..Relation::default()
            },
        );
        self.collision_svg = OnceCell::new();
    }

    pub fn add_group(&mut self, group: SpriteVertexGroup, relation: Relation) {
        self.svg.add_group(group, relation);
        self.collision_svg = OnceCell::new();
    }

    /// Axis-aligned bounding box of every vertex, in the sprite frame.
    pub fn compute_collision_mesh(&self) -> &SpriteVertexGroup {
        self.collision_svg.get_or_init(|| {
            let mut min = Vector2D::new(f32::INFINITY, f32::INFINITY);
            let mut max = Vector2D::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
            for (vertices, _) in self.svg.compute_vertex_groups() {
                for v in vertices {
                    min = Vector2D::new(min.x.min(v.x), min.y.min(v.y));
                    max = Vector2D::new(max.x.max(v.x), max.y.max(v.y));
                }
            }
            if min.x > max.x {
                min = Vector2D::origin();
                max = Vector2D::origin();
            }
            SpriteVertexGroup::new(
                [(min.x, max.y), (max.x, max.y), (max.x, min.y), (min.x, min.y)],
                COLLISION_MESH_COLOR,
            )
        })
    }

    /// Sprite position and its collision mesh in world coordinates.
    pub fn get_collision_mesh(&self) -> (Vector2D, Vec<Vector2D>) {
        let vertices = self
            .compute_collision_mesh()
            .apply_transform(self.relation(), false)
            .into_iter()
            .next()
            .map(|(vertices, _)| vertices)
            .unwrap_or_default();
        (self.position, vertices)
    }

    /// World-space bounds of the collision mesh as (min, max) corners.
    pub fn bounds(&self) -> (Coord, Coord) {
        let (_, vertices) = self.get_collision_mesh();
        let (mut min, mut max) = ((f32::INFINITY, f32::INFINITY), (f32::NEG_INFINITY, f32::NEG_INFINITY));
        for v in &vertices {
            min = (min.0.min(v.x), min.1.min(v.y));
            max = (max.0.max(v.x), max.1.max(v.y));
        }
        (min, max)
    }

    pub fn collides_with(&self, other: &SpriteBody) -> bool {
        let (a_min, a_max) = self.bounds();
        let (b_min, b_max) = other.bounds();
        rect_collision(a_min, a_max, b_min, b_max)
    }

    /// Draw the sprite through the facade. The caller's draw state is restored.
    pub fn draw(&self, app: &mut Avour, show_collision_mesh: bool, use_sprite_color: bool) -> Result<(), AvourError> {
        app.push(false);
        let result = self.draw_shapes(app, show_collision_mesh, use_sprite_color);
        app.pop();
        result
    }

    fn draw_shapes(&self, app: &mut Avour, show_collision_mesh: bool, use_sprite_color: bool) -> Result<(), AvourError> {
        let relation = self.relation();
        app.fill(true);
        app.thickness(1.0);
        for (vertices, color) in self.svg.apply_transform(relation, true) {
            if use_sprite_color {
                app.color(color);
            }
            let points: Vec<Coord> = vertices.iter().map(|v| v.tuple()).collect();
            app.polygon(&points)?;
        }
        if show_collision_mesh {
            app.fill(false);
            for (vertices, color) in self.compute_collision_mesh().apply_transform(relation, true) {
                app.color(color);
                let points: Vec<Coord> = vertices.iter().map(|v| v.tuple()).collect();
                app.polygon(&points)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rect_primitive() {
        assert_eq!(
            SpritePrimitive::rect_primitive((0.0, 0.0), 4.0, 2.0, true),
            vec![(-2.0, 1.0), (2.0, 1.0), (2.0, -1.0), (-2.0, -1.0)]
        );
        assert_eq!(
            SpritePrimitive::rect_primitive((1.0, 1.0), 4.0, 2.0, false)[2],
            (5.0, -1.0)
        );
    }

    #[test]
    fn test_children_are_placed_by_relation() {
        let mut parent = SpriteVertexGroup::new([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], (255, 0, 0));
        let child = SpriteVertexGroup::new([(1.0, 0.0)], (0, 255, 0));
        parent.add_group(
            child,
            Relation {
                position: Vector2D::new(10.0, 0.0),
                angle: FRAC_PI_2,
                scale: 2.0,
            },
        );
        let groups = parent.compute_vertex_groups();
        assert_eq!(groups.len(), 2);
        // child first, rotated then scaled then moved
        let v = groups[0].0[0];
        assert!((v.x - 10.0).abs() < 1e-5 && (v.y - 2.0).abs() < 1e-5);
        assert_eq!(groups[1].1, Color::rgb(255, 0, 0));

        // the single-vertex child is not a valid polygon
        assert_eq!(parent.apply_transform(Relation::default(), true).len(), 1);
    }

    #[test]
    fn test_set_vertices_refreshes_flattening() {
        let mut group = SpriteVertexGroup::new([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], Color::WHITE);
        assert_eq!(group.compute_vertex_groups()[0].0[1], Vector2D::new(1.0, 0.0));

        group.set_vertices([(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)]);
        group.set_color((1, 2, 3));
        let groups = group.compute_vertex_groups();
        assert_eq!(groups[0].0[1], Vector2D::new(5.0, 0.0));
        assert_eq!(groups[0].1, Color::rgb(1, 2, 3));
        assert_eq!(group.vertices().len(), 3);
    }

    #[test]
    fn test_flips() {
        let group = SpriteVertexGroup::new([(1.0, 2.0)], Color::WHITE);
        assert_eq!(group.flip_on_x(false).vertices, vec![Vector2D::new(-1.0, 2.0)]);
        assert_eq!(group.flip_on_y(false).vertices, vec![Vector2D::new(1.0, -2.0)]);
    }

    #[test]
    fn test_collision_mesh_handles_negative_coordinates() {
        let mut body = SpriteBody::new();
        body.add_rect((-10.0, -5.0), 4.0, 2.0, false, Color::WHITE);
        body.add_rect((3.0, 8.0), 2.0, 2.0, false, Color::WHITE);
        let mesh = body.compute_collision_mesh();
        assert_eq!(
            mesh.vertices,
            vec![
                Vector2D::new(-10.0, 8.0),
                Vector2D::new(5.0, 8.0),
                Vector2D::new(5.0, -7.0),
                Vector2D::new(-10.0, -7.0),
            ]
        );
    }

    #[test]
    fn test_collides_with() {
        let mut a = SpriteBody::new();
        a.add_rect((0.0, 0.0), 10.0, 10.0, true, Color::WHITE);
        let mut b = a.clone();
        b.position = Vector2D::new(8.0, 0.0);
        assert!(a.collides_with(&b));
        b.position = Vector2D::new(30.0, 0.0);
        assert!(!a.collides_with(&b));
    }
}
