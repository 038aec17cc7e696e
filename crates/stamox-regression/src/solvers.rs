//! Least-squares solvers
//!
//! Every solver has the [`Solver`] shape so the dispatch registry can select
//! between them by name. Only [`wls`] consumes weights; the others reject
//! them.

use nalgebra::{DMatrix, DVector};
use stamox_core::{Error, Result};
use tracing::trace;

/// Solve `min ||W^(1/2) (y - X b)||` for `b`
pub type Solver = fn(&DMatrix<f64>, &DVector<f64>, Option<&DVector<f64>>) -> Result<DVector<f64>>;

/// Singular values below this (relative to the largest) are treated as zero
pub const SVD_EPSILON: f64 = 1e-12;

fn check_shapes(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(Error::size_mismatch(x.nrows(), y.len(), "design rows vs response"));
    }
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(Error::empty_input());
    }
    Ok(())
}

fn reject_weights(method: &str, weights: Option<&DVector<f64>>) -> Result<()> {
    match weights {
        Some(_) => Err(Error::InvalidParameter(format!(
            "method `{method}` does not take weights; use `wls`"
        ))),
        None => Ok(()),
    }
}

fn svd_solve(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    let eps = SVD_EPSILON * svd.singular_values.max();
    svd.solve(y, eps)
        .map_err(|e| Error::Computation(format!("SVD solve failed: {e}")))
}

/// Normal equations `X^T X b = X^T y` by Cholesky, falling back to SVD
pub fn normal_equations(x: &DMatrix<f64>, y: &DVector<f64>, weights: Option<&DVector<f64>>) -> Result<DVector<f64>> {
    check_shapes(x, y)?;
    reject_weights("ols", weights)?;
    let xt = x.transpose();
    let xtx = &xt * x;
    let xty = &xt * y;
    match xtx.clone().cholesky() {
        Some(chol) => Ok(chol.solve(&xty)),
        None => {
            // rank-deficient design
            trace!("cholesky failed, falling back to SVD");
            svd_solve(&xtx, &xty)
        }
    }
}

/// Householder QR of the design matrix
pub fn qr(x: &DMatrix<f64>, y: &DVector<f64>, weights: Option<&DVector<f64>>) -> Result<DVector<f64>> {
    check_shapes(x, y)?;
    reject_weights("qr", weights)?;
    if x.nrows() < x.ncols() {
        return Err(Error::InsufficientData {
            expected: x.ncols(),
            actual: x.nrows(),
        });
    }
    let qr = x.clone().qr();
    let qty = qr.q().transpose() * y;
    qr.r()
        .solve_upper_triangular(&qty)
        .ok_or_else(|| Error::Computation("design matrix is rank deficient".to_string()))
}

/// Minimum-norm solution through the singular value decomposition
pub fn svd(x: &DMatrix<f64>, y: &DVector<f64>, weights: Option<&DVector<f64>>) -> Result<DVector<f64>> {
    check_shapes(x, y)?;
    reject_weights("svd", weights)?;
    svd_solve(x, y)
}

/// Weighted least squares: rows scaled by `sqrt(w)`, then normal equations
pub fn wls(x: &DMatrix<f64>, y: &DVector<f64>, weights: Option<&DVector<f64>>) -> Result<DVector<f64>> {
    check_shapes(x, y)?;
    let w = weights.ok_or_else(|| Error::InvalidParameter("method `wls` requires weights".to_string()))?;
    if w.len() != y.len() {
        return Err(Error::size_mismatch(y.len(), w.len(), "weights"));
    }
    if w.iter().any(|&wi| !(wi >= 0.0) || !wi.is_finite()) {
        return Err(Error::InvalidParameter("weights must be finite and non-negative".to_string()));
    }
    let sw = w.map(f64::sqrt);
    let mut xw = x.clone();
    for (mut row, s) in xw.row_iter_mut().zip(sw.iter()) {
        row *= *s;
    }
    let yw = y.component_mul(&sw);
    normal_equations(&xw, &yw, None)
}
