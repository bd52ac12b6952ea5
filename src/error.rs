// Error types for IntSar-3D transform math

use thiserror::Error;

/// Input the rotation core refuses to work with.
///
/// Numerical degeneracies (zero-norm quaternions, near-identical slerp
/// endpoints) are not errors; they fall back to documented results instead.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    /// A NaN or infinite component reached an operation that would spread it.
    #[error("non-finite {what}: ({x}, {y}, {z})")]
    NonFinite {
        what: &'static str,
        x: f32,
        y: f32,
        z: f32,
    },
    /// A NaN or infinite scalar parameter, such as an interpolation factor.
    #[error("non-finite {what}: {value}")]
    NonFiniteScalar { what: &'static str, value: f32 },
    /// Rotation axis too short to normalize.
    #[error("rotation axis has near-zero length {length}")]
    DegenerateAxis { length: f32 },
}

impl TransformError {
    pub(crate) fn non_finite(what: &'static str, [x, y, z]: [f32; 3]) -> Self {
        Self::NonFinite { what, x, y, z }
    }
}

/// Ensures a scalar parameter is finite.
pub(crate) fn check_finite_scalar(what: &'static str, value: f32) -> Result<(), TransformError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TransformError::NonFiniteScalar { what, value })
    }
}

/// Ensures all three components are finite.
pub(crate) fn check_finite(what: &'static str, components: [f32; 3]) -> Result<(), TransformError> {
    if components.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(TransformError::non_finite(what, components))
    }
}
