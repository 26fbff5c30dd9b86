use std::f64::consts::PI;

use crate::error::TransformError;
use crate::linalg;
use crate::quaternion::{quat_norm_squared, QUAT_IDENTITY};

/// Below this value of `sqrt(1 - w^2)` the rotation axis of a quaternion is ill-defined
/// and [`rvec_from_quat`] falls back to the x-axis.
pub const AXIS_SINGULARITY_EPS: f64 = 1e-3;

/// Convert an axis-angle vector to a quaternion `[x, y, z, w]`.
///
/// # Arguments
///
/// * `rvec` - The axis-angle vector, its norm is the rotation angle in radians.
///
/// # Returns
///
/// The unit quaternion. The exact zero vector maps to the identity quaternion.
///
/// Example:
///
/// ```
/// use transforms_3d::conversions::quat_from_rvec;
///
/// let q = quat_from_rvec(&[0.0, 0.0, std::f64::consts::PI]);
/// assert!((q[2] - 1.0).abs() < 1e-12);
/// assert!(q[3].abs() < 1e-12);
/// ```
pub fn quat_from_rvec(rvec: &[f64; 3]) -> [f64; 4] {
    let angle = linalg::norm3(rvec);
    if angle > 0.0 {
        let s = (angle / 2.0).sin() / angle;
        [rvec[0] * s, rvec[1] * s, rvec[2] * s, (angle / 2.0).cos()]
    } else {
        QUAT_IDENTITY
    }
}

/// Convert a quaternion `[x, y, z, w]` to an axis-angle vector.
///
/// The quaternion is expected to be normalised. If `w > 1` it is renormalised first since
/// `acos` and `sqrt` are undefined past that point.
///
/// # Arguments
///
/// * `q` - The quaternion to convert.
///
/// # Returns
///
/// The axis-angle vector. The angle is in `[0, 2*pi]`; when the rotation is close to zero
/// the axis is meaningless and `[1, 0, 0]` is used.
pub fn rvec_from_quat(q: &[f64; 4]) -> [f64; 3] {
    let mut q = *q;
    if q[3] > 1.0 {
        let norm = quat_norm_squared(&q).sqrt();
        log::debug!("renormalizing quaternion with w = {} (norm {})", q[3], norm);
        q.iter_mut().for_each(|v| *v /= norm);
    }

    // rounding may still leave w a hair outside of the domain of acos
    let w = q[3].clamp(-1.0, 1.0);
    let angle = 2.0 * w.acos();

    let s = (1.0 - w * w).sqrt();
    let axis = if s < AXIS_SINGULARITY_EPS {
        [1.0, 0.0, 0.0]
    } else {
        [q[0] / s, q[1] / s, q[2] / s]
    };

    [axis[0] * angle, axis[1] * angle, axis[2] * angle]
}

/// Return the axis vector and angle of an axis-angle vector.
///
/// The result is canonical: the dominant component of the axis is positive and the angle
/// lies in `[-pi, pi]`, so two rvecs describing the same rotation decompose the same way.
///
/// # Arguments
///
/// * `rvec` - The axis-angle vector.
///
/// # Returns
///
/// A tuple `(axis, angle)` with a unit `axis`. The zero vector yields `([1, 0, 0], 0)`.
///
/// Example:
///
/// ```
/// use transforms_3d::conversions::axis_and_angle_from_rvec;
///
/// let (axis, angle) = axis_and_angle_from_rvec(&[0.0, -0.5, 0.0]);
/// assert_eq!(axis, [0.0, 1.0, 0.0]);
/// assert_eq!(angle, -0.5);
/// ```
pub fn axis_and_angle_from_rvec(rvec: &[f64; 3]) -> ([f64; 3], f64) {
    let norm = linalg::norm3(rvec);
    if norm == 0.0 {
        return ([1.0, 0.0, 0.0], 0.0);
    }

    let dominant = rvec
        .iter()
        .copied()
        .fold(0.0f64, |acc, v| if v.abs() > acc.abs() { v } else { acc });
    let sign = dominant.signum();

    let axis = [
        sign * rvec[0] / norm,
        sign * rvec[1] / norm,
        sign * rvec[2] / norm,
    ];
    let mut angle = sign * norm;

    if angle.abs() > PI {
        angle -= angle.signum() * 2.0 * PI;
    }

    (axis, angle)
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation, normalized internally.
/// * `angle` - The angle of rotation.
///
/// # Returns
///
/// The rotation matrix.
///
/// Example:
///
/// ```
/// use transforms_3d::conversions::axis_angle_to_rotation_matrix;
///
/// let axis = [1.0, 0.0, 0.0];
/// let angle = std::f64::consts::PI / 2.0;
/// let rotation = axis_angle_to_rotation_matrix(&axis, angle).unwrap();
/// assert!((rotation[1][2] + 1.0).abs() < 1e-12);
/// ```
pub fn axis_angle_to_rotation_matrix(
    axis: &[f64; 3],
    angle: f64,
) -> Result<[[f64; 3]; 3], TransformError> {
    let magnitude = linalg::norm3(axis);
    if magnitude < 1e-10 {
        return Err(TransformError::ZeroAxis);
    }

    let k = [axis[0] / magnitude, axis[1] / magnitude, axis[2] / magnitude];
    let (s, c) = angle.sin_cos();

    // R = cos * I + (1 - cos) * k k^T + sin * [k]x
    let cross = [[0.0, -k[2], k[1]], [k[2], 0.0, -k[0]], [-k[1], k[0], 0.0]];
    let mut rotation = [[0.0; 3]; 3];
    for (i, row) in rotation.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            let diag = if i == j { c } else { 0.0 };
            *val = diag + (1.0 - c) * k[i] * k[j] + s * cross[i][j];
        }
    }

    Ok(rotation)
}

/// Compute the rotation matrix of an axis-angle vector (Rodrigues formula).
///
/// The zero vector maps to the identity matrix.
pub fn rotation_matrix_from_rvec(rvec: &[f64; 3]) -> [[f64; 3]; 3] {
    match axis_angle_to_rotation_matrix(rvec, linalg::norm3(rvec)) {
        Ok(rotation) => rotation,
        Err(_) => [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    }
}
