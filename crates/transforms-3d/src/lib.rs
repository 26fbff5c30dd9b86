#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! All entities are plain fixed-size arrays:
//!
//! - quaternions are `[f64; 4]` in `(x, y, z, w)` order,
//! - axis-angle rotations (rvecs) are `[f64; 3]`,
//! - poses are row-major homogeneous `[[f64; 4]; 4]` matrices.
//!
//! ```
//! use transforms_3d::{conversions, rvec};
//!
//! let r1 = [0.1, 0.2, 0.3];
//! let r2 = [0.3, -0.1, 0.2];
//! let delta = rvec::delta_rvec(&r2, &r1).unwrap();
//! let back = rvec::compose_rvec(&delta, &r1);
//! assert!((back[0] - r2[0]).abs() < 1e-9);
//! assert_eq!(conversions::quat_from_rvec(&[0.0; 3]), [0.0, 0.0, 0.0, 1.0]);
//! ```

/// Conversions between quaternions, axis-angle vectors and rotation matrices.
pub mod conversions;

/// Error types for the transforms.
pub mod error;

/// Linear algebra utilities.
pub mod linalg;

/// Pose and camera projection algebra.
pub mod projection;

/// Quaternion algebra.
pub mod quaternion;

/// Axis-angle algebra.
pub mod rvec;

/// Utilities to view fixed-size arrays as faer matrices.
pub mod utils;

pub use error::TransformError;
