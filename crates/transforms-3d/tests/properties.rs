use approx::assert_relative_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};

use transforms_3d::{
    conversions::{
        axis_and_angle_from_rvec, quat_from_rvec, rotation_matrix_from_rvec, rvec_from_quat,
    },
    linalg,
    projection::{
        delta_pose, invert_pose, invert_pose_rigid, pose_from_rotation_translation,
        project_points, projection_depth,
    },
    rvec::{compose_rvec, delta_rvec},
    TransformError,
};

const IDENTITY: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Sample a rotation with a uniformly random axis and an angle in `[min_angle, max_angle)`.
fn random_rvec(rng: &mut StdRng, min_angle: f64, max_angle: f64) -> [f64; 3] {
    let axis = loop {
        let v: [f64; 3] = std::array::from_fn(|_| rng.random_range(-1.0..1.0));
        let norm = linalg::norm3(&v);
        if norm > 1e-3 && norm <= 1.0 {
            break [v[0] / norm, v[1] / norm, v[2] / norm];
        }
    };
    let angle = rng.random_range(min_angle..max_angle);
    [axis[0] * angle, axis[1] * angle, axis[2] * angle]
}

fn random_pose(rng: &mut StdRng) -> [[f64; 4]; 4] {
    let rotation = rotation_matrix_from_rvec(&random_rvec(rng, 0.0, std::f64::consts::PI));
    let translation: [f64; 3] = std::array::from_fn(|_| rng.random_range(-5.0..5.0));
    pose_from_rotation_translation(&rotation, &translation)
}

fn assert_pose_eq(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4], epsilon: f64) {
    for i in 0..4 {
        for j in 0..4 {
            assert_relative_eq!(a[i][j], b[i][j], epsilon = epsilon);
        }
    }
}

#[test]
fn rvec_quaternion_roundtrip() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let rvec = random_rvec(&mut rng, 0.05, 3.0);
        let back = rvec_from_quat(&quat_from_rvec(&rvec));
        for i in 0..3 {
            assert_relative_eq!(back[i], rvec[i], epsilon = 1e-9);
        }
    }
}

#[test]
fn zero_rvec_is_identity_quaternion() {
    assert_eq!(quat_from_rvec(&[0.0, 0.0, 0.0]), [0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn delta_of_same_rotation_is_zero() -> Result<(), TransformError> {
    init_logger();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let r = random_rvec(&mut rng, 0.0, 3.0);
        for v in delta_rvec(&r, &r)? {
            assert_relative_eq!(v, 0.0, epsilon = 1e-6);
        }
    }
    Ok(())
}

#[test]
fn delta_composes_back_to_target() -> Result<(), TransformError> {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let r1 = random_rvec(&mut rng, 0.1, 1.5);
        let r2 = random_rvec(&mut rng, 0.1, 1.5);
        let delta = delta_rvec(&r2, &r1)?;
        let back = compose_rvec(&delta, &r1);
        for i in 0..3 {
            assert_relative_eq!(back[i], r2[i], epsilon = 1e-8);
        }
    }
    Ok(())
}

#[test]
fn equivalent_rvecs_share_axis_and_angle() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let r = random_rvec(&mut rng, 0.1, 3.0);
        let angle = linalg::norm3(&r);
        // the same rotation the long way around the opposite axis
        let scale = (angle - 2.0 * std::f64::consts::PI) / angle;
        let other = [r[0] * scale, r[1] * scale, r[2] * scale];

        let (axis1, angle1) = axis_and_angle_from_rvec(&r);
        let (axis2, angle2) = axis_and_angle_from_rvec(&other);
        for i in 0..3 {
            assert_relative_eq!(axis1[i], axis2[i], epsilon = 1e-9);
        }
        assert_relative_eq!(angle1, angle2, epsilon = 1e-9);
    }
}

#[test]
fn pose_inverse_roundtrip() -> Result<(), TransformError> {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let pose = random_pose(&mut rng);
        let pose_inv = invert_pose(&pose)?;

        assert_eq!(pose_inv[3], [0.0, 0.0, 0.0, 1.0]);
        assert_pose_eq(&invert_pose(&pose_inv)?, &pose, 1e-9);
        assert_pose_eq(&linalg::matmul44(&pose, &pose_inv), &IDENTITY, 1e-9);
        assert_pose_eq(&invert_pose_rigid(&pose), &pose_inv, 1e-9);
    }
    Ok(())
}

#[test]
fn pose_delta_recovers_relative_motion() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..20 {
        let pose1 = random_pose(&mut rng);
        let motion = random_pose(&mut rng);
        let pose2 = linalg::matmul44(&motion, &pose1);

        let delta = delta_pose(&pose2, &pose1);
        assert_eq!(delta[3], [0.0, 0.0, 0.0, 1.0]);
        assert_pose_eq(&delta, &motion, 1e-8);
    }
}

#[test]
fn projection_flags_follow_depth() {
    let k = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let (_, in_front) = project_points(&[[0.0, 0.0, 5.0], [0.0, 0.0, -5.0]], &IDENTITY, &k);
    assert_eq!(in_front, vec![true, false]);

    assert_eq!(projection_depth(&[[1.0, 2.0, 3.0]], &IDENTITY), vec![3.0]);
}

#[test]
fn projection_through_inverse_pose() -> Result<(), TransformError> {
    // a camera at `cam_pose` in world coordinates sees the world through its inverse
    let mut rng = StdRng::seed_from_u64(13);
    let k = [[600.0, 0.0, 320.0], [0.0, 600.0, 240.0], [0.0, 0.0, 1.0]];
    let cam_pose = random_pose(&mut rng);
    let world_to_cam = invert_pose(&cam_pose)?;

    // points placed in front of the camera, expressed in the world frame
    let points_cam = vec![[0.0, 0.0, 2.0], [0.5, -0.3, 4.0], [-1.0, 1.0, 8.0]];
    let points_world: Vec<[f64; 3]> = points_cam
        .iter()
        .map(|p| {
            let row = |i: usize| {
                cam_pose[i][0] * p[0] + cam_pose[i][1] * p[1] + cam_pose[i][2] * p[2]
                    + cam_pose[i][3]
            };
            [row(0), row(1), row(2)]
        })
        .collect();

    let depth = projection_depth(&points_world, &world_to_cam);
    for (d, p) in depth.iter().zip(&points_cam) {
        assert_relative_eq!(*d, p[2], epsilon = 1e-9);
    }

    let (pixels, in_front) = project_points(&points_world, &world_to_cam, &k);
    assert_eq!(pixels, vec![[320, 240], [395, 195], [245, 315]]);
    assert_eq!(in_front, vec![true, true, true]);
    Ok(())
}
