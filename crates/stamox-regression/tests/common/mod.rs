use nalgebra::{DMatrix, DVector};

/// Design with an intercept column and a quadratic term
pub fn design(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, 3, |i, j| {
        let t = i as f64 / n as f64;
        t.powi(j as i32)
    })
}

/// Response `y = 0.5 - 1.5 t + 3 t^2` with a small deterministic wobble
pub fn response(x: &DMatrix<f64>) -> DVector<f64> {
    let beta = DVector::from_vec(vec![0.5, -1.5, 3.0]);
    let wobble = DVector::from_fn(x.nrows(), |i, _| 0.01 * ((i * 7) % 5) as f64 - 0.02);
    x * beta + wobble
}
