//! 2D vector math for sketches.
//!
//! Angles are radians; positive rotates counter-clockwise.

use super::math::{clip, sign};
use crate::canvas::Coord;
use std::f32::consts::PI;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Cross product of two 3D vectors.
pub fn cross_product_3d(a: (f32, f32, f32), b: (f32, f32, f32)) -> (f32, f32, f32) {
    (
        a.1 * b.2 - a.2 * b.1,
        a.2 * b.0 - a.0 * b.2,
        a.0 * b.1 - a.1 * b.0,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Random vector with both components in `[-1, 1)`.
    pub fn random() -> Self {
        Self::new(
            2.0 * rand::random::<f32>() - 1.0,
            2.0 * rand::random::<f32>() - 1.0,
        )
    }

    pub const fn left(mag: f32) -> Self {
        Self::new(-mag, 0.0)
    }

    pub const fn right(mag: f32) -> Self {
        Self::new(mag, 0.0)
    }

    pub const fn up(mag: f32) -> Self {
        Self::new(0.0, mag)
    }

    pub const fn down(mag: f32) -> Self {
        Self::new(0.0, -mag)
    }

    pub fn deg2rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }

    pub fn rad2deg(radians: f32) -> f32 {
        radians * 180.0 / PI
    }

    pub fn tuple(self) -> Coord {
        (self.x, self.y)
    }

    pub fn tuple_3d(self) -> (f32, f32, f32) {
        (self.x, self.y, 0.0)
    }

    pub fn mag(self) -> f32 {
        self.mag_square().sqrt()
    }

    pub fn mag_square(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction.
    ///
    /// A zero vector yields NaN components unless `ignore_zero_mag` is set,
    /// in which case the origin is returned.
    pub fn normalize(self, ignore_zero_mag: bool) -> Self {
        let mag = self.mag();
        if ignore_zero_mag && mag == 0.0 {
            return Self::origin();
        }
        self / mag
    }

    /// Same direction with the magnitude clamped to `[min_mag, max_mag]`.
    pub fn clip(self, min_mag: f32, max_mag: f32) -> Self {
        let mag = self.mag();
        self.normalize(true) * clip(mag, min_mag, max_mag)
    }

    pub fn dist(self, other: Self) -> f32 {
        (self - other).mag()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Signed angle from `self` to `other`: positive counter-clockwise.
    pub fn angle(self, other: Self) -> f32 {
        let cos_theta = self.dot(other) / (self.mag() * other.mag());
        let plane_direction = self.x * other.y - self.y * other.x;
        clip(cos_theta, -1.0, 1.0).acos() * sign(plane_direction)
    }

    /// Rotate by `angle` around `origin` (the coordinate origin when `None`).
    pub fn rotate(self, angle: f32, origin: Option<Self>) -> Self {
        let pivot = origin.unwrap_or_default();
        let v = self - pivot;
        let (sin, cos) = angle.sin_cos();
        Self::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos) + pivot
    }

    /// Projection of `self` onto `other`.
    pub fn component_parallel(self, other: Self) -> Self {
        let dir = other.normalize(false);
        dir * self.dot(dir)
    }

    pub fn component_perpendicular(self, other: Self) -> Self {
        self - self.component_parallel(other)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V2({:.2}, {:.2})", self.x, self.y)
    }
}

impl From<Coord> for Vector2D {
    fn from((x, y): Coord) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2D> for Coord {
    fn from(v: Vector2D) -> Self {
        v.tuple()
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Adds the scalar to both components.
impl Add<f32> for Vector2D {
    type Output = Self;
    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f32> for Vector2D {
    type Output = Self;
    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2D {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
