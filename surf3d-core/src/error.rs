//! Error type shared by every fallible core operation

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("step counts must be positive (u_steps = {u_steps}, v_steps = {v_steps})")]
    InvalidSteps { u_steps: usize, v_steps: usize },
    #[error("invalid color {0:?}: expected six hex digits, optionally prefixed with '#'")]
    InvalidColor(String),
    #[error("mesh row {row} has {found} points, expected {expected}")]
    JaggedMesh {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("mesh has no point at row {row}, column {col}")]
    MissingPoint { row: usize, col: usize },
    #[error("point depth z = {z} lies on the projection singularity")]
    SingularDepth { z: f64 },
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
