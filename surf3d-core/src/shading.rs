//! Directional light and flat shading
use crate::color::Color;
use crate::error::Result;
use crate::vector::Vec3;

/// Darkest intensity a lit face can reach
pub const MIN_INTENSITY: f64 = 0.2;
/// Brightest intensity a lit face can reach
pub const MAX_INTENSITY: f64 = 1.0;

/// Brightness of a face with unit `normal` under a directional light,
/// `0.5 + 0.5 * (normal . light_dir)` clamped to [0.2, 1.0].
///
/// A zero normal (degenerate face) gives exactly 0.5 for any light, and so
/// does a normal with non-finite components.
pub fn light_intensity(normal: &Vec3, light_dir: &Vec3) -> f64 {
    let dot = normal.dot(light_dir);
    // NaN passes through f64::clamp
    if !dot.is_finite() {
        return 0.5;
    }
    (0.5 + 0.5 * dot).clamp(MIN_INTENSITY, MAX_INTENSITY)
}

/// Shade a `#rrggbb` base color by `intensity`.
pub fn shade(base_color: &str, intensity: f64) -> Result<Color> {
    let base = Color::from_hex(base_color)?;
    Ok(base.shade(intensity))
}
