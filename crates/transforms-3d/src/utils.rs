/// Utility function to convert a 3x3 array to a faer matrix 3x3.
///
/// # Arguments
///
/// * `array` - A 3x3 array.
///
/// # Returns
///
/// A faer matrix 3x3.
pub fn array33_to_faer_mat33(array: &[[f64; 3]; 3]) -> faer::MatRef<'_, f64> {
    // SAFETY: [[f64; 3]; 3] is 9 contiguous f64 values
    let array_slice =
        unsafe { std::slice::from_raw_parts(array.as_ptr() as *const f64, array.len() * 3) };
    faer::mat::from_row_major_slice(array_slice, 3, 3)
}

/// Utility function to convert a 4x4 array to a faer matrix 4x4.
pub fn array44_to_faer_mat44(array: &[[f64; 4]; 4]) -> faer::MatRef<'_, f64> {
    // SAFETY: [[f64; 4]; 4] is 16 contiguous f64 values
    let array_slice =
        unsafe { std::slice::from_raw_parts(array.as_ptr() as *const f64, array.len() * 4) };
    faer::mat::from_row_major_slice(array_slice, 4, 4)
}

/// Copy a 3x3 faer matrix into a row-major array.
///
/// PRECONDITION: the matrix has shape (3, 3).
pub fn faer_mat33_to_array33(mat: faer::MatRef<'_, f64>) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = mat.read(i, j);
        }
    }
    out
}

/// Copy a 4x4 faer matrix into a row-major array.
///
/// PRECONDITION: the matrix has shape (4, 4).
pub fn faer_mat44_to_array44(mat: faer::MatRef<'_, f64>) -> [[f64; 4]; 4] {
    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = mat.read(i, j);
        }
    }
    out
}
