//! Helpers for writing sketches: vectors, interpolation, simple physics,
//! vector sprites and timing.

pub mod math;
pub mod physics;
pub mod sprite;
pub mod time_logger;
pub mod vector;

pub use physics::{ConstrainedBody, PhysicsError, rect_collision};
pub use sprite::{Relation, SpriteBody, SpritePrimitive, SpriteVertexGroup};
pub use time_logger::TimeLogger;
pub use vector::{Vector2D, cross_product_3d};
