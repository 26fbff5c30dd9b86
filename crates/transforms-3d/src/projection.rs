//! Poses are row-major homogeneous `4x4` matrices of the form
//!
//! ```text
//! [    R    | t ]
//! [---------+---]
//! [ 0  0  0 | 1 ]
//! ```
//!
//! Every pose returned by this module has a bottom row of exactly `[0, 0, 0, 1]`.

use faer::prelude::SpSolver;

use crate::error::TransformError;
use crate::linalg;
use crate::utils;

/// A rotation block is treated as singular when `|det| <= SINGULAR_DET_EPS * scale^3`,
/// with `scale` the largest absolute entry of the block.
pub const SINGULAR_DET_EPS: f64 = 1e-12;

const BOTTOM_ROW: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

/// Parameters of the least-squares solve used by [`delta_pose_with_params`].
#[derive(Debug, Clone)]
pub struct LstsqParams {
    /// Singular values below `rcond * max_singular_value` are treated as zero.
    pub rcond: f64,
}

impl Default for LstsqParams {
    fn default() -> Self {
        Self { rcond: 1e-12 }
    }
}

/// Return the `4x4` pose matrix from a `3x3` rotation and a translation.
///
/// # Arguments
///
/// * `rotation` - The rotation matrix `R`, not checked for orthonormality.
/// * `translation` - The translation vector `t`.
///
/// # Returns
///
/// The pose matrix `[[R, t], [0, 0, 0, 1]]`.
pub fn pose_from_rotation_translation(
    rotation: &[[f64; 3]; 3],
    translation: &[f64; 3],
) -> [[f64; 4]; 4] {
    let mut pose = [[0.0; 4]; 4];
    for i in 0..3 {
        pose[i][..3].copy_from_slice(&rotation[i]);
        pose[i][3] = translation[i];
    }
    pose[3] = BOTTOM_ROW;
    pose
}

/// Split a pose matrix into its rotation block and translation.
pub fn rotation_translation_from_pose(pose: &[[f64; 4]; 4]) -> ([[f64; 3]; 3], [f64; 3]) {
    let mut rotation = [[0.0; 3]; 3];
    let mut translation = [0.0; 3];
    for i in 0..3 {
        rotation[i].copy_from_slice(&pose[i][..3]);
        translation[i] = pose[i][3];
    }
    (rotation, translation)
}

/// Return the inverse of a pose matrix.
///
/// The rotation block is inverted with a full LU decomposition instead of being transposed,
/// which keeps the result accurate when `R` is not exactly orthonormal. When `R` is known
/// to be a proper rotation, [`invert_pose_rigid`] is several times cheaper.
///
/// # Errors
///
/// [`TransformError::SingularRotation`] if the rotation block is singular.
///
/// Example:
///
/// ```
/// use transforms_3d::projection::{invert_pose, pose_from_rotation_translation};
///
/// let rotation = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
/// let pose = pose_from_rotation_translation(&rotation, &[1.0, 2.0, 3.0]);
/// let pose_inv = invert_pose(&pose).unwrap();
/// assert!((pose_inv[0][3] + 2.0).abs() < 1e-12);
/// assert!((pose_inv[1][3] - 1.0).abs() < 1e-12);
/// ```
pub fn invert_pose(pose: &[[f64; 4]; 4]) -> Result<[[f64; 4]; 4], TransformError> {
    let (rotation, translation) = rotation_translation_from_pose(pose);

    // relative to the block scale so that uniformly scaled rotations stay invertible
    let scale = rotation.iter().flatten().fold(0.0f64, |acc, v| acc.max(v.abs()));
    let det = linalg::det_mat33(&rotation);
    if det == 0.0 || !det.is_finite() || det.abs() <= SINGULAR_DET_EPS * scale.powi(3) {
        log::warn!("cannot invert pose, rotation block has det = {det}");
        return Err(TransformError::SingularRotation(det));
    }

    let rotation_inv = {
        let lu = utils::array33_to_faer_mat33(&rotation).partial_piv_lu();
        let inv = lu.solve(faer::Mat::<f64>::identity(3, 3));
        utils::faer_mat33_to_array33(inv.as_ref())
    };

    let t = linalg::mat33_mul_vec3(&rotation_inv, &translation);

    Ok(pose_from_rotation_translation(
        &rotation_inv,
        &[-t[0], -t[1], -t[2]],
    ))
}

/// Return the inverse of a rigid pose matrix, using `R^-1 = R^T`.
///
/// PRECONDITION: the rotation block is orthonormal. Use [`invert_pose`] otherwise.
pub fn invert_pose_rigid(pose: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let (rotation, translation) = rotation_translation_from_pose(pose);
    let rotation_inv = linalg::transpose_mat33(&rotation);
    let t = linalg::mat33_mul_vec3(&rotation_inv, &translation);
    pose_from_rotation_translation(&rotation_inv, &[-t[0], -t[1], -t[2]])
}

/// Return `P = P2 '-' P1`, the difference between two poses, with default parameters.
///
/// See [`delta_pose_with_params`].
pub fn delta_pose(pose2: &[[f64; 4]; 4], pose1: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    delta_pose_with_params(pose2, pose1, &LstsqParams::default())
}

/// Return `P = P2 '-' P1`, the difference between two poses.
///
/// More accurately `P2 = P * P1` is solved for `P` in the least-squares sense, as
/// `P1^T * P^T = P2^T` through the SVD pseudo-inverse of `P1^T`. A near-singular `P1`
/// does not fail: singular values below `params.rcond` times the largest one are dropped
/// and the best fit is returned. The bottom row of the result is set to `[0, 0, 0, 1]`.
///
/// # Arguments
///
/// * `pose2` - The target pose.
/// * `pose1` - The reference pose.
/// * `params` - The least-squares parameters.
pub fn delta_pose_with_params(
    pose2: &[[f64; 4]; 4],
    pose1: &[[f64; 4]; 4],
    params: &LstsqParams,
) -> [[f64; 4]; 4] {
    // A = P1^T, B = P2^T, solve A * X = B
    let mat_a = utils::array44_to_faer_mat44(pose1).transpose().to_owned();
    let mat_b = utils::array44_to_faer_mat44(pose2).transpose();

    let svd = mat_a.svd();
    let (u, s, v) = (svd.u(), svd.s_diagonal(), svd.v());

    let s_max = (0..4).map(|k| s.read(k)).fold(0.0f64, f64::max);
    let cutoff = params.rcond * s_max;
    let s_inv: [f64; 4] = std::array::from_fn(|k| {
        let sk = s.read(k);
        if sk > cutoff {
            1.0 / sk
        } else {
            0.0
        }
    });

    let num_dropped = s_inv.iter().filter(|&&v| v == 0.0).count();
    if num_dropped > 0 {
        log::debug!(
            "delta_pose: reference pose is rank deficient, dropped {num_dropped} singular values"
        );
    }

    // X = V * S^-1 * U^T * B
    let ut_b = faer::Mat::<f64>::from_fn(4, 4, |k, j| {
        s_inv[k] * (0..4).map(|l| u.read(l, k) * mat_b.read(l, j)).sum::<f64>()
    });
    let mat_x = v * ut_b.as_ref();

    // P = X^T
    let mut pose = utils::faer_mat44_to_array44(mat_x.transpose());
    pose[3] = BOTTOM_ROW;
    pose
}

/// Return the 2D projections of 3D points through a pose and camera intrinsics.
///
/// Each point is mapped as `K * (R * p + t)` and divided by its depth, then rounded to the
/// nearest pixel (ties to even).
///
/// # Arguments
///
/// * `points` - The 3D points.
/// * `pose` - The `4x4` camera pose, mapping points into the camera frame.
/// * `k` - The `3x3` camera intrinsics matrix.
///
/// # Returns
///
/// The pixel coordinates and, for each point, whether it lies in front of the camera
/// (depth strictly positive). Points at zero depth have no meaningful pixel coordinates:
/// the division yields an infinity (saturated to `i64::MIN`/`i64::MAX`) or NaN (cast to `0`).
///
/// Example:
///
/// ```
/// use transforms_3d::projection::project_points;
///
/// let pose = [
///     [1.0, 0.0, 0.0, 0.0],
///     [0.0, 1.0, 0.0, 0.0],
///     [0.0, 0.0, 1.0, 0.0],
///     [0.0, 0.0, 0.0, 1.0],
/// ];
/// let k = [[500.0, 0.0, 320.0], [0.0, 500.0, 240.0], [0.0, 0.0, 1.0]];
/// let (pixels, in_front) = project_points(&[[1.0, 2.0, 10.0]], &pose, &k);
/// assert_eq!(pixels, vec![[370, 340]]);
/// assert_eq!(in_front, vec![true]);
/// ```
pub fn project_points(
    points: &[[f64; 3]],
    pose: &[[f64; 4]; 4],
    k: &[[f64; 3]; 3],
) -> (Vec<[i64; 2]>, Vec<bool>) {
    let (rotation, translation) = rotation_translation_from_pose(pose);

    points
        .iter()
        .map(|point| {
            let rotated = linalg::mat33_mul_vec3(&rotation, point);
            let point_in_camera = [
                rotated[0] + translation[0],
                rotated[1] + translation[1],
                rotated[2] + translation[2],
            ];
            let proj = linalg::mat33_mul_vec3(k, &point_in_camera);
            let u = (proj[0] / proj[2]).round_ties_even() as i64;
            let v = (proj[1] / proj[2]).round_ties_even() as i64;
            ([u, v], proj[2] > 0.0)
        })
        .unzip()
}

/// Return the depth (camera frame Z) of 3D points seen through a pose.
///
/// No intrinsics and no perspective division are involved: this is the third row of
/// `pose` applied to each homogeneous point.
pub fn projection_depth(points: &[[f64; 3]], pose: &[[f64; 4]; 4]) -> Vec<f64> {
    let row = &pose[2];
    points
        .iter()
        .map(|p| row[0] * p[0] + row[1] * p[1] + row[2] * p[2] + row[3])
        .collect()
}
