//! Parametric surfaces and the point grid sampled from them
use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::vector::Vec3;

/// A parametric surface `f(u, v, params) -> point`.
///
/// Each surface family has its own closed parameter record. Any function or
/// closure of the right shape is a surface.
pub trait SurfaceFunction<P> {
    fn evaluate(&self, u: f64, v: f64, params: &P) -> Vec3;
}

impl<P, F> SurfaceFunction<P> for F
where
    F: Fn(f64, f64, &P) -> Vec3,
{
    fn evaluate(&self, u: f64, v: f64, params: &P) -> Vec3 {
        self(u, v, params)
    }
}

/// Parameters of the [`helix`] surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixParams {
    /// Radial scale along X
    pub alpha: f64,
    /// Radial scale along Y
    pub beta: f64,
    /// Height limit, z is clamped to [-zlim, zlim]
    pub zlim: f64,
}

impl HelixParams {
    /// Interactive range of `alpha`
    pub const ALPHA_LIMITS: (f64, f64) = (0.01, 1.0);
    /// Interactive range of `beta`
    pub const BETA_LIMITS: (f64, f64) = (0.01, 1.0);
    /// Interactive range of `zlim`
    pub const ZLIM_LIMITS: (f64, f64) = (0.2, 1.0);

    pub fn new(alpha: f64, beta: f64, zlim: f64) -> Self {
        Self { alpha, beta, zlim }
    }

    /// Copy with every parameter pulled into its interactive range.
    /// A NaN parameter falls back to the lower limit.
    pub fn clamped(self) -> Self {
        Self {
            alpha: clamp_to(self.alpha, Self::ALPHA_LIMITS),
            beta: clamp_to(self.beta, Self::BETA_LIMITS),
            zlim: clamp_to(self.zlim, Self::ZLIM_LIMITS),
        }
    }
}

fn clamp_to(value: f64, (min, max): (f64, f64)) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

impl Default for HelixParams {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }
}

/// Helicoidal surface: `(alpha u cos u, beta u sin u, clamp(v, -zlim, zlim))`
pub fn helix(u: f64, v: f64, params: &HelixParams) -> Vec3 {
    let r = u;
    let x = params.alpha * r * u.cos();
    let y = params.beta * r * u.sin();
    // f64::clamp panics when zlim < 0
    let z = v.min(params.zlim).max(-params.zlim);
    Vec3::new(x, y, z)
}

/// A rectangular grid of surface points. Rows follow `u`, columns follow `v`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    rows: usize,
    cols: usize,
    points: Vec<Vec3>,
}

impl Mesh {
    /// Build a mesh from rows of points, rejecting rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<Vec3>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();

        let mut points = Vec::with_capacity(row_count * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(Error::JaggedMesh {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            points.extend(values);
        }

        Ok(Self {
            rows: row_count,
            cols,
            points,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Vec3> {
        if row < self.rows && col < self.cols {
            self.points.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Point at `(row, col)`, or [`Error::MissingPoint`] outside the grid
    pub fn point(&self, row: usize, col: usize) -> Result<Vec3> {
        self.get(row, col).ok_or(Error::MissingPoint { row, col })
    }

    pub fn row(&self, row: usize) -> Option<&[Vec3]> {
        if row < self.rows {
            Some(&self.points[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Vec3]> {
        (0..self.rows).filter_map(move |row| self.row(row))
    }

    /// Number of quadrilateral cells in the grid
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_sub(1) * self.cols.saturating_sub(1)
    }
}

/// Sampling ranges and step counts for [`generate`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tessellation {
    pub u_range: (f64, f64),
    pub v_range: (f64, f64),
    pub u_steps: usize,
    pub v_steps: usize,
}

impl Tessellation {
    pub fn new(u_range: (f64, f64), v_range: (f64, f64), u_steps: usize, v_steps: usize) -> Self {
        Self {
            u_range,
            v_range,
            u_steps,
            v_steps,
        }
    }

    /// Two full turns of the helix over a height of [-2, 2]
    pub fn helix_default() -> Self {
        Self::new((0.0, 4.0 * PI), (-2.0, 2.0), 50, 30)
    }

    pub fn generate<P, F>(&self, f: &F, params: &P) -> Result<Mesh>
    where
        F: SurfaceFunction<P>,
    {
        generate(f, self.u_range, self.v_range, self.u_steps, self.v_steps, params)
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Self::helix_default()
    }
}

/// Sample `f` on a `(u_steps + 1) x (v_steps + 1)` grid.
///
/// `u_i = u_min + i * du` and `v_j = v_min + j * dv`, both range endpoints
/// included. Step counts must be positive.
pub fn generate<P, F>(
    f: &F,
    u_range: (f64, f64),
    v_range: (f64, f64),
    u_steps: usize,
    v_steps: usize,
    params: &P,
) -> Result<Mesh>
where
    F: SurfaceFunction<P> + ?Sized,
{
    if u_steps == 0 || v_steps == 0 {
        return Err(Error::InvalidSteps { u_steps, v_steps });
    }

    let (u_min, u_max) = u_range;
    let (v_min, v_max) = v_range;
    let du = (u_max - u_min) / u_steps as f64;
    let dv = (v_max - v_min) / v_steps as f64;

    let cols = v_steps + 1;
    let mut points = Vec::with_capacity((u_steps + 1) * cols);
    for i in 0..=u_steps {
        let u = u_min + i as f64 * du;
        for j in 0..=v_steps {
            let v = v_min + j as f64 * dv;
            points.push(f.evaluate(u, v, params));
        }
    }

    log::debug!("generated {}x{} surface grid", u_steps + 1, cols);

    Ok(Mesh {
        rows: u_steps + 1,
        cols,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(u: f64, v: f64, _: &()) -> Vec3 {
        Vec3::new(u, v, 0.0)
    }

    #[test]
    fn test_grid_dimensions() {
        for (u_steps, v_steps) in [(1, 1), (2, 5), (7, 3), (50, 30)] {
            let mesh = generate(&flat, (0.0, 1.0), (-1.0, 1.0), u_steps, v_steps, &()).unwrap();
            assert_eq!(mesh.rows(), u_steps + 1);
            assert_eq!(mesh.cols(), v_steps + 1);
            assert!(mesh.iter_rows().all(|row| row.len() == v_steps + 1));
            assert_eq!(mesh.iter_rows().count(), u_steps + 1);
        }
    }

    #[test]
    fn test_samples_include_endpoints() {
        let mesh = generate(&flat, (1.0, 3.0), (-2.0, 2.0), 4, 2, &()).unwrap();
        assert_eq!(mesh.get(0, 0), Some(Vec3::new(1.0, -2.0, 0.0)));
        assert_eq!(mesh.get(1, 1), Some(Vec3::new(1.5, 0.0, 0.0)));
        assert_eq!(mesh.get(4, 2), Some(Vec3::new(3.0, 2.0, 0.0)));
        assert_eq!(mesh.get(5, 0), None);
        assert_eq!(mesh.point(0, 3), Err(Error::MissingPoint { row: 0, col: 3 }));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let err = generate(&flat, (0.0, 1.0), (0.0, 1.0), 0, 3, &()).unwrap_err();
        assert_eq!(err, Error::InvalidSteps { u_steps: 0, v_steps: 3 });
        assert!(generate(&flat, (0.0, 1.0), (0.0, 1.0), 3, 0, &()).is_err());
    }

    #[test]
    fn test_helix_small_grid() {
        let params = HelixParams::new(1.0, 1.0, 1.0);
        let mesh = generate(&helix, (0.0, 2.0 * PI), (-1.0, 1.0), 2, 2, &params).unwrap();
        assert_eq!(mesh.rows(), 3);
        assert_eq!(mesh.cols(), 3);

        // z follows v, which varies with the column
        for row in mesh.iter_rows() {
            let z: Vec<f64> = row.iter().map(|p| p.z()).collect();
            assert_eq!(z, vec![-1.0, 0.0, 1.0]);
        }

        // u = pi on the middle row: x = pi cos(pi) = -pi
        let mid = mesh.get(1, 0).unwrap();
        assert!((mid.x() + PI).abs() < 1e-12);
        assert!(mid.y().abs() < 1e-12);
    }

    #[test]
    fn test_helix_z_is_clamped() {
        for zlim in [0.2, 0.5, 1.0, 3.0] {
            let params = HelixParams { zlim, ..HelixParams::default() };
            let mesh = Tessellation::helix_default().generate(&helix, &params).unwrap();
            for row in mesh.iter_rows() {
                for p in row {
                    assert!(p.z() >= -zlim && p.z() <= zlim, "z = {} outside {}", p.z(), zlim);
                }
            }
        }
    }

    #[test]
    fn test_params_clamped_to_limits() {
        let inside = HelixParams::new(0.3, 0.7, 0.4);
        assert_eq!(inside.clamped(), inside);

        let wild = HelixParams::new(-2.0, 50.0, 0.0).clamped();
        assert_eq!(wild, HelixParams::new(0.01, 1.0, 0.2));

        let nan = HelixParams::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY).clamped();
        assert_eq!(nan, HelixParams::new(0.01, 1.0, 0.2));
    }

    #[test]
    fn test_closure_surface() {
        let sphere = |u: f64, v: f64, radius: &f64| {
            Vec3::new(radius * u.cos() * v.cos(), radius * u.sin() * v.cos(), radius * v.sin())
        };
        let mesh = generate(&sphere, (0.0, 2.0 * PI), (-PI / 2.0, PI / 2.0), 8, 4, &2.0).unwrap();
        for row in mesh.iter_rows() {
            for p in row {
                assert!((p.magnitude() - 2.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_mesh_from_rows() {
        let ok = Mesh::from_rows(vec![vec![Vec3::zero(); 3], vec![Vec3::zero(); 3]]).unwrap();
        assert_eq!((ok.rows(), ok.cols(), ok.cell_count()), (2, 3, 2));

        let jagged = Mesh::from_rows(vec![vec![Vec3::zero(); 3], vec![Vec3::zero(); 2]]);
        assert_eq!(
            jagged,
            Err(Error::JaggedMesh {
                row: 1,
                expected: 3,
                found: 2
            })
        );

        let empty = Mesh::from_rows(Vec::new()).unwrap();
        assert_eq!(empty.cell_count(), 0);
    }
}
