//! Three-component vector math
use nalgebra::Vector3;
use std::ops::{Add, Mul, Neg, Sub};

/// An immutable 3D vector. Every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3(Vector3<f64>);

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    pub fn zero() -> Self {
        Self(Vector3::zeros())
    }

    pub fn x(&self) -> f64 {
        self.0.x
    }

    pub fn y(&self) -> f64 {
        self.0.y
    }

    pub fn z(&self) -> f64 {
        self.0.z
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self(self.0 * scalar)
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0.dot(&other.0)
    }

    /// Right-handed cross product; parallel inputs give the zero vector.
    pub fn cross(&self, other: &Vec3) -> Self {
        Self(self.0.cross(&other.0))
    }

    pub fn magnitude(&self) -> f64 {
        self.0.norm()
    }

    /// Unit vector in the same direction, or the zero vector when `self` has
    /// no length. Callers treat a zero result as "no defined direction".
    pub fn normalize(&self) -> Self {
        self.0
            .try_normalize(0.0)
            .map(Self)
            .unwrap_or_else(Self::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Vector3::zeros()
    }

    /// The underlying nalgebra vector
    pub fn as_vector(&self) -> &Vector3<f64> {
        &self.0
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(v: Vector3<f64>) -> Self {
        Self(v)
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3(-self.0)
    }
}

/// Unit normal of the triangle `(p1, p2, p3)` following the right-hand rule.
/// Collinear points yield the zero vector.
pub fn face_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    let edge1 = p2 - p1;
    let edge2 = p3 - p1;

    edge1.cross(&edge2).normalize()
}
