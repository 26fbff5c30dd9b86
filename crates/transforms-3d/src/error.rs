use thiserror::Error;

/// Error types for the 3D transforms.
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    /// The quaternion has zero (or non-finite) norm and cannot be inverted.
    #[error("cannot invert a quaternion with squared norm {0}")]
    ZeroNormQuaternion(f64),

    /// The rotation axis has zero length so no direction can be recovered.
    #[error("cannot compute a rotation from a zero axis")]
    ZeroAxis,

    /// The rotation block of a pose is singular and cannot be inverted.
    #[error("rotation block is singular, det = {0}")]
    SingularRotation(f64),
}
