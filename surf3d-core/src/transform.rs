//! Rotation state and the rotation it describes
use crate::vector::Vec3;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }

    /// Rotate a point about X, then Y, then Z, each step acting on the
    /// coordinate produced by the previous one.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        let (x, y, z) = (point.x(), point.y(), point.z());

        let (cx, sx) = (self.x.cos(), self.x.sin());
        let (y, z) = (y * cx - z * sx, y * sx + z * cx);

        let (cy, sy) = (self.y.cos(), self.y.sin());
        let (x, z) = (x * cy + z * sy, -x * sy + z * cy);

        let (cz, sz) = (self.z.cos(), self.z.sin());
        let (x, y) = (x * cz - y * sz, x * sz + y * cz);

        Vec3::new(x, y, z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Vector3};
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).magnitude() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-12);
        assert!((state.y - 0.2).abs() < 1e-12);
        assert!((state.z - 0.3).abs() < 1e-12);

        state.reset();
        assert_eq!(state, RotationState::default());
    }

    #[test]
    fn test_identity_rotation() {
        let p = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(RotationState::zero().apply(p), p);
    }

    #[test]
    fn test_single_axis_rotations() {
        // (y, z) turns about X
        let rx = RotationState::new(FRAC_PI_2, 0.0, 0.0);
        assert_close(rx.apply(Vec3::new(0.0, 1.0, 0.0)), Vec3::new(0.0, 0.0, 1.0));

        // (x, z) turns about Y: z' = -x sin(ry)
        let ry = RotationState::new(0.0, FRAC_PI_2, 0.0);
        assert_close(ry.apply(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 0.0, -1.0));

        // (x, y) turns about Z
        let rz = RotationState::new(0.0, 0.0, FRAC_PI_2);
        assert_close(rz.apply(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotation_order_x_then_y_then_z() {
        let state = RotationState::new(0.4, -1.1, 2.3);
        let p = Vec3::new(0.7, -0.2, 1.9);

        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), state.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), state.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), state.z);
        let expected = Vec3::from(rz * ry * rx * *p.as_vector());

        assert_close(state.apply(p), expected);
    }
}
