//! Surface rendering engine and the drawing-surface capability it targets
use crate::color::Color;
use crate::error::{Error, Result};
use crate::projection::{Projector, ScreenPoint};
use crate::shading::light_intensity;
use crate::surface::Mesh;
use crate::transform::RotationState;
use crate::vector::{face_normal, Vec3};

/// Color of wireframe edges
pub const WIREFRAME_COLOR: Color = Color::BLACK;
/// Default base color of filled surfaces
pub const DEFAULT_BASE_COLOR: &str = "#BDB76B";
/// Length of the reference axes drawn by [`Engine::redraw`]
pub const DEFAULT_AXIS_LENGTH: f64 = 2.0;
/// Stroke width of the reference axes
pub const AXIS_WIDTH: u32 = 2;

/// Sink for the primitives the engine emits.
///
/// Implementations own whatever they draw on; the engine keeps no reference
/// to a primitive after the call returns.
pub trait DrawingSurface {
    fn create_line(
        &mut self,
        from: ScreenPoint,
        to: ScreenPoint,
        color: Color,
        width: Option<u32>,
    );

    fn create_polygon(&mut self, points: &[ScreenPoint], fill: Color);

    fn create_text(&mut self, pos: ScreenPoint, text: &str, font: Option<&str>, color: Color);

    /// Remove everything drawn so far
    fn clear(&mut self);
}

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Projection scale
    pub scale: f64,
    /// Direction towards the light, normalized by the engine
    pub light_direction: Vec3,
}

impl EngineConfig {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "canvas size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        validate_scale(self.scale)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            scale: 10.0,
            light_direction: Vec3::new(1.0, 1.0, 1.0).normalize(),
        }
    }
}

fn validate_scale(scale: f64) -> Result<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("scale must be positive, got {}", scale)))
    }
}

/// Renders surface meshes with the current rotation.
///
/// The rotation is the only state that changes between draws, and only
/// through [`Engine::rotate_by`], [`Engine::set_rotation`] and
/// [`Engine::reset_rotation`].
#[derive(Debug, Clone)]
pub struct Engine {
    width: u32,
    height: u32,
    projector: Projector,
    light_direction: Vec3,
    rotation: RotationState,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            width: config.width,
            height: config.height,
            projector: Projector::new(config.width, config.height, config.scale),
            light_direction: config.light_direction.normalize(),
            rotation: RotationState::zero(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f64 {
        self.projector.scale
    }

    pub fn center(&self) -> ScreenPoint {
        self.projector.center
    }

    pub fn light_direction(&self) -> Vec3 {
        self.light_direction
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<()> {
        validate_scale(scale)?;
        self.projector.scale = scale;
        Ok(())
    }

    /// Change the canvas size; the projection center follows
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        EngineConfig {
            width,
            height,
            scale: self.projector.scale,
            light_direction: self.light_direction,
        }
        .validate()?;

        self.width = width;
        self.height = height;
        self.projector = Projector::new(width, height, self.projector.scale);
        Ok(())
    }

    /// A zero direction is kept as zero and lights every face at 0.5
    pub fn set_light_direction(&mut self, direction: Vec3) {
        self.light_direction = direction.normalize();
    }

    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    pub fn rotate_by(&mut self, dx: f64, dy: f64, dz: f64) {
        self.rotation.rotate(dx, dy, dz);
    }

    pub fn reset_rotation(&mut self) {
        self.rotation.reset();
    }

    pub fn project(&self, point: Vec3) -> Result<ScreenPoint> {
        self.projector.project(point, &self.rotation)
    }

    /// Draw every cell of `mesh`, row by row.
    ///
    /// Wireframe mode emits the four edges of each cell. Filled mode splits
    /// each cell into `(p1, p2, p3)` and `(p1, p3, p4)` and emits one flat
    /// shaded polygon per triangle. There is no depth sorting: later cells
    /// paint over earlier ones.
    pub fn draw_surface<S>(
        &self,
        surface: &mut S,
        mesh: &Mesh,
        base_color: &str,
        wireframe: bool,
    ) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        let base = Color::from_hex(base_color)?;

        let rows = mesh.rows().saturating_sub(1);
        let cols = mesh.cols().saturating_sub(1);
        let mut primitives = 0usize;

        for i in 0..rows {
            for j in 0..cols {
                let p1 = mesh.point(i, j)?;
                let p2 = mesh.point(i + 1, j)?;
                let p3 = mesh.point(i + 1, j + 1)?;
                let p4 = mesh.point(i, j + 1)?;

                let v1 = self.project(p1)?;
                let v2 = self.project(p2)?;
                let v3 = self.project(p3)?;
                let v4 = self.project(p4)?;

                if wireframe {
                    surface.create_line(v1, v2, WIREFRAME_COLOR, None);
                    surface.create_line(v2, v3, WIREFRAME_COLOR, None);
                    surface.create_line(v3, v4, WIREFRAME_COLOR, None);
                    surface.create_line(v4, v1, WIREFRAME_COLOR, None);
                    primitives += 4;
                } else {
                    let c1 = self.face_color(base, p1, p2, p3);
                    surface.create_polygon(&[v1, v2, v3], c1);

                    let c2 = self.face_color(base, p1, p3, p4);
                    surface.create_polygon(&[v1, v3, v4], c2);
                    primitives += 2;
                }
            }
        }

        log::debug!(
            "drew {}x{} mesh as {} ({} primitives)",
            mesh.rows(),
            mesh.cols(),
            if wireframe { "wireframe" } else { "filled" },
            primitives
        );
        Ok(())
    }

    fn face_color(&self, base: Color, p1: Vec3, p2: Vec3, p3: Vec3) -> Color {
        let normal = face_normal(p1, p2, p3);
        if normal.is_zero() {
            log::trace!("degenerate face {:?} {:?} {:?}", p1, p2, p3);
        }
        base.shade(light_intensity(&normal, &self.light_direction))
    }

    /// Draw the X, Y and Z axes from the origin to `length` in red, green
    /// and blue, each labelled at its tip.
    pub fn draw_axes<S>(&self, surface: &mut S, length: f64) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        let origin = self.project(Vec3::zero())?;
        let axes = [
            (Vec3::new(length, 0.0, 0.0), "X", Color::RED),
            (Vec3::new(0.0, length, 0.0), "Y", Color::GREEN),
            (Vec3::new(0.0, 0.0, length), "Z", Color::BLUE),
        ];

        for (tip, label, color) in axes {
            let tip = self.project(tip)?;
            surface.create_line(origin, tip, color, Some(AXIS_WIDTH));
            surface.create_text(tip, label, None, color);
        }
        Ok(())
    }

    /// Clear `surface`, then draw `mesh` and the reference axes
    pub fn redraw<S>(
        &self,
        surface: &mut S,
        mesh: &Mesh,
        base_color: &str,
        wireframe: bool,
    ) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        // Reject a bad color before wiping what is on screen
        Color::from_hex(base_color)?;

        surface.clear();
        self.draw_surface(surface, mesh, base_color, wireframe)?;
        self.draw_axes(surface, DEFAULT_AXIS_LENGTH)
    }
}

impl Default for Engine {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            width: config.width,
            height: config.height,
            projector: Projector::new(config.width, config.height, config.scale),
            light_direction: config.light_direction,
            rotation: RotationState::zero(),
        }
    }
}
