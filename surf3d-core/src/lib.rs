//! SURF3D Core Library - Parametric surface tessellation, projection and shading
//!
//! This library provides the synchronous core of the surface renderer: vector
//! math, grid generation from a surface function, rotation and perspective
//! projection, flat shading, and an engine that issues draw calls to any
//! [`DrawingSurface`].

pub mod color;
pub mod error;
pub mod projection;
pub mod renderer;
pub mod shading;
pub mod surface;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use color::Color;
pub use error::{Error, Result};
pub use projection::{project, Projector, ScreenPoint};
pub use renderer::{DrawingSurface, Engine, EngineConfig};
pub use shading::{light_intensity, shade};
pub use surface::{generate, helix, HelixParams, Mesh, SurfaceFunction, Tessellation};
pub use transform::RotationState;
pub use vector::{face_normal, Vec3};
