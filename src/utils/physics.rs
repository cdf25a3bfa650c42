//! Collision checks and constrained bodies (chains and trees of joints).
//!
//! A [`ConstrainedBody`] is a tree of tagged nodes stored in an arena. Each
//! non-root node keeps the distance to its parent it was created with, and
//! the angle at every joint (grandparent, parent, node) is kept within
//! `[min_angle, max_angle]`.

use super::math::sign;
use super::vector::Vector2D;
use crate::canvas::Coord;
use std::collections::{HashMap, VecDeque};
use std::f32::consts::PI;
use thiserror::Error;

/// Axis-aligned overlap test for two rectangles given by their top-left and
/// bottom-right corners. Touching edges count as a collision.
pub fn rect_collision(rect_1_tl: Coord, rect_1_br: Coord, rect_2_tl: Coord, rect_2_br: Coord) -> bool {
    rect_1_tl.0 <= rect_2_br.0
        && rect_1_br.0 >= rect_2_tl.0
        && rect_1_tl.1 <= rect_2_br.1
        && rect_1_br.1 >= rect_2_tl.1
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    #[error("unknown parent node '{0}'")]
    UnknownParent(String),

    #[error("node tag '{0}' already exists")]
    DuplicateTag(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Vector2D,
    pub tag: String,
    parent: Option<usize>,
    distance_to_parent: f32,
    children: Vec<usize>,
}

impl Node {
    fn new(pos: Vector2D, tag: &str) -> Self {
        Self {
            pos,
            tag: tag.to_string(),
            parent: None,
            distance_to_parent: 0.0,
            children: Vec::new(),
        }
    }

    pub fn distance_to_parent(&self) -> Option<f32> {
        self.parent.map(|_| self.distance_to_parent)
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

#[derive(Debug, Clone)]
pub struct ConstrainedBody {
    nodes: Vec<Node>,
    by_tag: HashMap<String, usize>,
    pub min_angle: f32,
    pub max_angle: f32,
}

const ROOT: usize = 0;

impl ConstrainedBody {
    pub fn new(root_pos: Vector2D, root_tag: &str, min_angle: f32, max_angle: f32) -> Self {
        Self {
            nodes: vec![Node::new(root_pos, root_tag)],
            by_tag: HashMap::from([(root_tag.to_string(), ROOT)]),
            min_angle,
            max_angle,
        }
    }

    /// A body whose joints may bend freely (`[0, PI]`).
    pub fn unconstrained(root_pos: Vector2D, root_tag: &str) -> Self {
        Self::new(root_pos, root_tag, 0.0, PI)
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a new node to `parent_tag`; the link length is their current distance.
    pub fn add_node_to_parent(
        &mut self,
        node_pos: Vector2D,
        node_tag: &str,
        parent_tag: &str,
    ) -> Result<(), PhysicsError> {
        let parent = *self
            .by_tag
            .get(parent_tag)
            .ok_or_else(|| PhysicsError::UnknownParent(parent_tag.to_string()))?;
        if self.by_tag.contains_key(node_tag) {
            return Err(PhysicsError::DuplicateTag(node_tag.to_string()));
        }

        let index = self.nodes.len();
        let mut node = Node::new(node_pos, node_tag);
        node.parent = Some(parent);
        node.distance_to_parent = self.nodes[parent].pos.dist(node_pos);
        self.nodes.push(node);
        self.nodes[parent].children.push(index);
        self.by_tag.insert(node_tag.to_string(), index);
        Ok(())
    }

    pub fn find_node_from_tag(&self, tag: &str) -> Option<&Node> {
        self.by_tag.get(tag).map(|&i| &self.nodes[i])
    }

    pub fn parent(&self, node: &Node) -> Option<&Node> {
        node.parent.map(|i| &self.nodes[i])
    }

    pub fn children<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.children.iter().map(|&i| &self.nodes[i])
    }

    /// Unit vector from `node` towards its parent.
    pub fn direction_to_parent(&self, node: &Node) -> Option<Vector2D> {
        self.parent(node)
            .map(|parent| (parent.pos - node.pos).normalize(true))
    }

    /// Breadth-first order starting at the root.
    fn bfs(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([ROOT]);
        while let Some(index) = queue.pop_front() {
            order.push(index);
            queue.extend(self.nodes[index].children.iter().copied());
        }
        order
    }

    /// All nodes in breadth-first order from the root.
    pub fn nodes(&self) -> Vec<&Node> {
        self.bfs().into_iter().map(|i| &self.nodes[i]).collect()
    }

    /// Node positions in breadth-first order.
    pub fn positions(&self) -> Vec<Vector2D> {
        self.bfs().into_iter().map(|i| self.nodes[i].pos).collect()
    }

    /// Move the root and let the rest of the body follow.
    pub fn move_root(&mut self, pos: Vector2D) {
        self.nodes[ROOT].pos = pos;
        self.apply_fixed_length_constraint();
        self.apply_angle_constraint(true);
    }

    /// Pull every node back to its link length, parents first.
    pub fn apply_fixed_length_constraint(&mut self) {
        for index in self.bfs() {
            let Some(parent) = self.nodes[index].parent else {
                continue;
            };
            let parent_pos = self.nodes[parent].pos;
            let node = &mut self.nodes[index];
            let to_parent = (parent_pos - node.pos).normalize(true);
            node.pos = parent_pos - to_parent * node.distance_to_parent;
        }
    }

    /// Rotate joints that bend outside `[min_angle, max_angle]` back into range.
    ///
    /// With `update_both_nodes` the correction is split between the
    /// grandparent and the node; otherwise only the grandparent moves.
    pub fn apply_angle_constraint(&mut self, update_both_nodes: bool) {
        for index in self.bfs() {
            let Some(parent) = self.nodes[index].parent else {
                continue;
            };
            let Some(grandparent) = self.nodes[parent].parent else {
                continue;
            };
            let a = self.nodes[grandparent].pos;
            let b = self.nodes[parent].pos;
            let c = self.nodes[index].pos;

            let angle = (a - b).angle(c - b);
            let abs_angle = angle.abs();
            let (delta, direction) = if abs_angle < self.min_angle {
                (self.min_angle - abs_angle, -sign(angle))
            } else if abs_angle > self.max_angle {
                (self.max_angle - abs_angle, sign(angle))
            } else {
                continue;
            };

            let (delta_a, delta_c) = if update_both_nodes {
                (delta / 2.0 * direction, delta / 2.0 * -direction)
            } else {
                (delta * direction, 0.0)
            };
            self.nodes[grandparent].pos = a.rotate(delta_a, Some(b));
            self.nodes[index].pos = c.rotate(delta_c, Some(b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize, spacing: f32, min_angle: f32) -> ConstrainedBody {
        let mut body = ConstrainedBody::new(Vector2D::origin(), "0", min_angle, PI);
        for i in 1..n {
            body.add_node_to_parent(
                Vector2D::new(i as f32 * spacing, 0.0),
                &i.to_string(),
                &(i - 1).to_string(),
            )
            .unwrap();
        }
        body
    }

    #[test]
    fn test_rect_collision() {
        assert!(rect_collision((0.0, 0.0), (10.0, 10.0), (5.0, 5.0), (15.0, 15.0)));
        assert!(rect_collision((0.0, 0.0), (10.0, 10.0), (10.0, 10.0), (20.0, 20.0)));
        assert!(!rect_collision((0.0, 0.0), (10.0, 10.0), (11.0, 0.0), (20.0, 10.0)));
    }

    #[test]
    fn test_add_node_errors() {
        let mut body = chain(2, 10.0, 0.0);
        assert_eq!(
            body.add_node_to_parent(Vector2D::origin(), "x", "missing"),
            Err(PhysicsError::UnknownParent("missing".to_string()))
        );
        assert_eq!(
            body.add_node_to_parent(Vector2D::origin(), "1", "0"),
            Err(PhysicsError::DuplicateTag("1".to_string()))
        );
        assert_eq!(body.len(), 2);
        assert_eq!(body.find_node_from_tag("1").unwrap().distance_to_parent(), Some(10.0));
        assert_eq!(body.root().distance_to_parent(), None);
    }

    #[test]
    fn test_bfs_order() {
        let mut body = ConstrainedBody::unconstrained(Vector2D::origin(), "root");
        body.add_node_to_parent(Vector2D::new(1.0, 0.0), "a", "root").unwrap();
        body.add_node_to_parent(Vector2D::new(2.0, 0.0), "a1", "a").unwrap();
        body.add_node_to_parent(Vector2D::new(-1.0, 0.0), "b", "root").unwrap();
        let tags: Vec<&str> = body.nodes().iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["root", "a", "b", "a1"]);

        let a = body.find_node_from_tag("a").unwrap();
        assert_eq!(body.parent(a).map(|n| n.tag.as_str()), Some("root"));
        assert_eq!(body.children(a).count(), 1);
        assert_eq!(body.direction_to_parent(a), Some(Vector2D::left(1.0)));
        assert_eq!(body.direction_to_parent(body.root()), None);
    }

    #[test]
    fn test_move_root_keeps_link_lengths() {
        let mut body = chain(5, 10.0, 0.0);
        body.move_root(Vector2D::new(-25.0, 40.0));
        let positions = body.positions();
        assert_eq!(positions[0], Vector2D::new(-25.0, 40.0));
        for pair in positions.windows(2) {
            assert!((pair[0].dist(pair[1]) - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_angle_constraint_opens_sharp_joint() {
        let mut body = ConstrainedBody::new(Vector2D::origin(), "0", PI / 2.0, PI);
        body.add_node_to_parent(Vector2D::new(10.0, 0.0), "1", "0").unwrap();
        // folded back almost onto the grandparent
        body.add_node_to_parent(Vector2D::new(1.0, 1.0), "2", "1").unwrap();
        body.apply_angle_constraint(false);

        let p = body.positions();
        let angle = (p[0] - p[1]).angle(p[2] - p[1]).abs();
        assert!(angle >= PI / 2.0 - 1e-3, "angle {angle}");
    }
}
