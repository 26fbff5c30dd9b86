/// Compute the dot product of two 3D vectors.
pub fn dot_product3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Compute the euclidean norm of a 3D vector.
pub fn norm3(a: &[f64; 3]) -> f64 {
    dot_product3(a, a).sqrt()
}

/// Compute the determinant of a 3x3 matrix.
pub fn det_mat33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Transpose a 3x3 matrix.
pub fn transpose_mat33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Multiply a 3x3 matrix by a 3D column vector.
pub fn mat33_mul_vec3(m: &[[f64; 3]; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        dot_product3(&m[0], v),
        dot_product3(&m[1], v),
        dot_product3(&m[2], v),
    ]
}

/// Multiply two 4x4 matrices.
pub fn matmul44(a: &[[f64; 4]; 4], b: &[[f64; 4]; 4]) -> [[f64; 4]; 4] {
    let mut m = [[0.0; 4]; 4];
    for (i, row) in m.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = (0..4).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    m
}
