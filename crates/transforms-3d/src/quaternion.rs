//! Quaternions are stored as `[x, y, z, w]` with `w` the scalar part.

use crate::error::TransformError;

/// The identity quaternion `[0, 0, 0, 1]`.
pub const QUAT_IDENTITY: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// Multiply two quaternions: `q2 * q1`.
///
/// Equivalent of accumulating the rotation `q2` onto the original `q1`, in that order.
/// In Hamilton notation the result is `q1 ⊗ q2`, i.e. `q2` is expressed in the frame of `q1`.
///
/// # Arguments
///
/// * `q2` - The rotation applied second.
/// * `q1` - The rotation applied first.
///
/// # Returns
///
/// The quaternion product `q2 * q1`.
///
/// Example:
///
/// ```
/// use transforms_3d::quaternion::{mult_quat, QUAT_IDENTITY};
///
/// let q = [0.0, 0.0, 1.0, 0.0];
/// assert_eq!(mult_quat(&q, &QUAT_IDENTITY), q);
/// ```
pub fn mult_quat(q2: &[f64; 4], q1: &[f64; 4]) -> [f64; 4] {
    let [x1, y1, z1, w1] = *q1;
    let [x2, y2, z2, w2] = *q2;

    [
        x1 * w2 + w1 * x2 + y1 * z2 - z1 * y2,
        w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
        w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
    ]
}

/// Squared norm of a quaternion.
pub fn quat_norm_squared(q: &[f64; 4]) -> f64 {
    q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]
}

/// Return the inverse quaternion.
///
/// The vector part is negated and the result divided by the squared norm of `q`,
/// so for a unit quaternion this is the conjugate.
///
/// # Errors
///
/// [`TransformError::ZeroNormQuaternion`] if the squared norm of `q` is zero or not finite.
pub fn inv_quat(q: &[f64; 4]) -> Result<[f64; 4], TransformError> {
    let norm_sq = quat_norm_squared(q);
    if norm_sq == 0.0 || !norm_sq.is_finite() {
        return Err(TransformError::ZeroNormQuaternion(norm_sq));
    }

    Ok([
        -q[0] / norm_sq,
        -q[1] / norm_sq,
        -q[2] / norm_sq,
        q[3] / norm_sq,
    ])
}

/// Return the delta quaternion `q2 * q1^-1` (Hamilton `q1^-1 ⊗ q2`).
///
/// This is the rotation `q2` with respect to `q1`: accumulating the result onto `q1`
/// with [`mult_quat`] yields `q2`.
///
/// # Errors
///
/// Fails when `q1` cannot be inverted, see [`inv_quat`].
pub fn delta_quat(q2: &[f64; 4], q1: &[f64; 4]) -> Result<[f64; 4], TransformError> {
    Ok(mult_quat(q2, &inv_quat(q1)?))
}
