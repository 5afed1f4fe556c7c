//! Rotation plus fixed perspective projection to integer screen coordinates
use crate::error::{Error, Result};
use crate::transform::RotationState;
use crate::vector::Vec3;

/// Field-of-view constant of the perspective divide
pub const FIELD_OF_VIEW: f64 = 320.0;
/// Distance from the viewer to the origin along Z
pub const VIEWER_DISTANCE: f64 = 50.0;

/// Integer pixel position on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Project a 3D point to screen space.
///
/// The point is rotated by `rotation` (X, then Y, then Z), divided by
/// perspective `FIELD_OF_VIEW / (VIEWER_DISTANCE + z)`, multiplied by
/// `scale`, truncated toward zero and offset by `center`.
///
/// A rotated depth of exactly `-VIEWER_DISTANCE` has no projection and is
/// reported as [`Error::SingularDepth`]. Points close to that plane, or
/// very far out, saturate at the `i32` range instead of overflowing.
pub fn project(
    point: Vec3,
    rotation: &RotationState,
    scale: f64,
    center: ScreenPoint,
) -> Result<ScreenPoint> {
    let rotated = rotation.apply(point);

    let depth = VIEWER_DISTANCE + rotated.z();
    if depth == 0.0 {
        return Err(Error::SingularDepth { z: rotated.z() });
    }

    let factor = FIELD_OF_VIEW / depth;
    // `as` truncates toward zero
    let px = (rotated.x() * factor * scale) as i32;
    let py = (rotated.y() * factor * scale) as i32;

    Ok(ScreenPoint::new(
        center.x.saturating_add(px),
        center.y.saturating_add(py),
    ))
}

/// Projection parameters for a canvas of a given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub scale: f64,
    pub center: ScreenPoint,
}

impl Projector {
    pub fn new(width: u32, height: u32, scale: f64) -> Self {
        Self {
            scale,
            center: ScreenPoint::new((width / 2) as i32, (height / 2) as i32),
        }
    }

    pub fn project(&self, point: Vec3, rotation: &RotationState) -> Result<ScreenPoint> {
        project(point, rotation, self.scale, self.center)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(800, 600, 10.0)
    }
}
