use crate::conversions::{quat_from_rvec, rvec_from_quat};
use crate::error::TransformError;
use crate::quaternion::{delta_quat, mult_quat};

/// Return `r = r2 '-' r1`, where `'-'` denotes the difference between rotations.
///
/// Both rotations go through their quaternion form, so composing the result onto `r1`
/// with [`compose_rvec`] yields `r2` again (modulo `2*pi` and the axis sign near zero).
///
/// Example:
///
/// ```
/// use transforms_3d::rvec::delta_rvec;
///
/// let delta = delta_rvec(&[0.0, 0.0, 0.5], &[0.0, 0.0, 0.2]).unwrap();
/// assert!((delta[2] - 0.3).abs() < 1e-12);
/// ```
pub fn delta_rvec(r2: &[f64; 3], r1: &[f64; 3]) -> Result<[f64; 3], TransformError> {
    let q = delta_quat(&quat_from_rvec(r2), &quat_from_rvec(r1))?;
    Ok(rvec_from_quat(&q))
}

/// Return `r = r2 '+' r1`: the rotation `r2` accumulated onto `r1`.
///
/// This undoes [`delta_rvec`]: `compose_rvec(&delta_rvec(&r2, &r1)?, &r1) == r2`.
pub fn compose_rvec(r2: &[f64; 3], r1: &[f64; 3]) -> [f64; 3] {
    rvec_from_quat(&mult_quat(&quat_from_rvec(r2), &quat_from_rvec(r1)))
}
