//! Linear regression kernel

use crate::dispatch::dispatch;
use lazy_static::lazy_static;
use nalgebra::{DMatrix, DVector};
use ndarray::Array1;
use stamox_core::state::DF;
use stamox_core::{kernel, make_partial_pipe, Array, Bound, Error, Functional, Result, Signature, StateFunc, Value};
use tracing::{debug, instrument};

lazy_static! {
    static ref OLS: Functional = make_partial_pipe(kernel(
        Signature::new("ols")
            .required("x")
            .required("y")
            .optional("method", "ols")
            .optional("weights", Value::None)
            .optional("intercept", false),
        ols_kernel,
    ));
}

/// Least-squares fit: `ols(x, y, method="ols", weights=None, intercept=false)`
///
/// `x` is a vector (one regressor) or an `n x k` matrix. With
/// `intercept = true` a leading column of ones is added and reported as the
/// first coefficient. `method` selects the solver (see
/// [`dispatch`](crate::dispatch)); `weights` is required by `wls`.
///
/// The result state has fields `coefficients`, `residuals`, `r_squared` and
/// `df` (residual degrees of freedom). `r_squared` is centered when an
/// intercept is fitted and uncentered otherwise.
pub fn ols() -> Functional {
    OLS.clone()
}

fn design_matrix(x: &Array, intercept: bool) -> Result<DMatrix<f64>> {
    let (n, k) = match x.shape() {
        [n] => (*n, 1),
        [n, k] => (*n, *k),
        _ => {
            return Err(Error::InvalidInput(format!(
                "design must be one- or two-dimensional, got {} dimensions",
                x.ndim()
            )))
        }
    };
    let offset = usize::from(intercept);
    let x = x.view().into_shape((n, k))?;
    Ok(DMatrix::from_fn(n, k + offset, |i, j| {
        if j < offset {
            1.0
        } else {
            x[[i, j - offset]]
        }
    }))
}

fn vector(a: &Array) -> DVector<f64> {
    DVector::from_iterator(a.len(), a.iter().copied())
}

#[instrument(skip(args), fields(kernel = "ols"))]
fn ols_kernel(args: &Bound<'_>) -> Result<Value> {
    let intercept = args.bool("intercept")?;
    let x = design_matrix(&args.array("x")?, intercept)?;
    let y = args.array("y")?;
    if y.ndim() != 1 {
        return Err(Error::InvalidInput("response must be one-dimensional".to_string()));
    }
    let y = vector(&y);
    let weights = match args.optional("weights")? {
        Some(_) => Some(vector(&args.array("weights")?)),
        None => None,
    };

    let (n, p) = x.shape();
    if n <= p {
        return Err(Error::InsufficientData {
            expected: p + 1,
            actual: n,
        });
    }

    let method = args.str("method")?;
    let solver = dispatch(method)?;
    let beta = solver(&x, &y, weights.as_ref())?;
    let residuals = &y - &x * &beta;

    let w = weights.unwrap_or_else(|| DVector::from_element(n, 1.0));
    let w_sum = w.sum();
    let center = if intercept { w.dot(&y) / w_sum } else { 0.0 };
    let ssr: f64 = residuals.iter().zip(w.iter()).map(|(r, w)| w * r * r).sum();
    let sst: f64 = y.iter().zip(w.iter()).map(|(v, w)| w * (v - center).powi(2)).sum();
    let r_squared = 1.0 - ssr / sst;
    debug!(method, n, p, r_squared, "regression fitted");

    Ok(StateFunc::builder("ols")
        .field("coefficients", Array1::from(beta.as_slice().to_vec()))
        .field("residuals", Array1::from(residuals.as_slice().to_vec()))
        .field("r_squared", r_squared)
        .field(DF, (n - p) as f64)
        .build()
        .into())
}
