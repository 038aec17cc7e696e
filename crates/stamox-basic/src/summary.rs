//! Descriptive statistics
//!
//! `mean`, `var`, `sd` and `median` reduce over every element by default, or
//! along one axis when `axis` is given. A full reduction returns a float; an
//! axis reduction returns an array with that axis removed.

use lazy_static::lazy_static;
use ndarray::Axis;
use stamox_core::{kernel, make_partial_pipe, Array, Bound, Error, Functional, Result, Signature, Value};
use tracing::trace;

lazy_static! {
    static ref MEAN: Functional = make_partial_pipe(kernel(
        Signature::new("mean").required("x").optional("axis", Value::None),
        mean_kernel,
    ));
    static ref VAR: Functional = make_partial_pipe(kernel(
        Signature::new("var")
            .required("x")
            .optional("axis", Value::None)
            .optional("ddof", 0.0),
        var_kernel,
    ));
    static ref SD: Functional = make_partial_pipe(kernel(
        Signature::new("sd")
            .required("x")
            .optional("axis", Value::None)
            .optional("ddof", 0.0),
        sd_kernel,
    ));
    static ref MEDIAN: Functional = make_partial_pipe(kernel(
        Signature::new("median").required("x").optional("axis", Value::None),
        median_kernel,
    ));
}

/// Arithmetic mean: `mean(x, axis=None)`
pub fn mean() -> Functional {
    MEAN.clone()
}

/// Variance with `ddof` delta degrees of freedom: `var(x, axis=None, ddof=0)`
pub fn var() -> Functional {
    VAR.clone()
}

/// Standard deviation: `sd(x, axis=None, ddof=0)`
pub fn sd() -> Functional {
    SD.clone()
}

/// Median: `median(x, axis=None)`
pub fn median() -> Functional {
    MEDIAN.clone()
}

fn axis(args: &Bound<'_>, x: &Array) -> Result<Option<Axis>> {
    if args.optional("axis")?.is_none() {
        return Ok(None);
    }
    let axis = args.usize("axis")?;
    if axis >= x.ndim() {
        return Err(Error::InvalidParameter(format!(
            "axis {axis} is out of bounds for an array of dimension {}",
            x.ndim()
        )));
    }
    Ok(Some(Axis(axis)))
}

fn non_empty(args: &Bound<'_>) -> Result<Array> {
    let x = args.array("x")?;
    if x.is_empty() {
        return Err(Error::empty_input());
    }
    Ok(x)
}

fn mean_kernel(args: &Bound<'_>) -> Result<Value> {
    let x = non_empty(args)?;
    match axis(args, &x)? {
        None => Ok(Value::Float(x.mean().unwrap_or(f64::NAN))),
        Some(ax) => x.mean_axis(ax).map(Value::from).ok_or_else(Error::empty_input),
    }
}

fn ddof(args: &Bound<'_>, n: usize) -> Result<f64> {
    let ddof = args.f64("ddof")?;
    if !(ddof >= 0.0) {
        return Err(Error::InvalidParameter(format!("ddof must be non-negative, got {ddof}")));
    }
    if n as f64 <= ddof {
        return Err(Error::InsufficientData {
            expected: ddof as usize + 1,
            actual: n,
        });
    }
    Ok(ddof)
}

fn variance(args: &Bound<'_>) -> Result<Value> {
    let x = non_empty(args)?;
    match axis(args, &x)? {
        None => {
            let ddof = ddof(args, x.len())?;
            trace!(n = x.len(), ddof, "full variance");
            Ok(Value::Float(x.var(ddof)))
        }
        Some(ax) => {
            let ddof = ddof(args, x.len_of(ax))?;
            Ok(x.var_axis(ax, ddof).into())
        }
    }
}

fn var_kernel(args: &Bound<'_>) -> Result<Value> {
    variance(args)
}

fn sd_kernel(args: &Bound<'_>) -> Result<Value> {
    match variance(args)? {
        Value::Float(v) => Ok(Value::Float(v.sqrt())),
        other => Ok(other.into_array()?.mapv(f64::sqrt).into()),
    }
}

fn median_kernel(args: &Bound<'_>) -> Result<Value> {
    let x = non_empty(args)?;
    match axis(args, &x)? {
        None => Ok(Value::Float(median_of(x.iter().copied()))),
        Some(ax) => Ok(x.map_axis(ax, |lane| median_of(lane.iter().copied())).into()),
    }
}

/// Median of a sequence; NaN if any element is NaN or the sequence is empty
pub fn median_of(values: impl Iterator<Item = f64>) -> f64 {
    let mut v: Vec<f64> = values.collect();
    if v.is_empty() || v.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    v.sort_by(f64::total_cmp);
    let mid = v.len() / 2;
    if v.len() % 2 == 1 {
        v[mid]
    } else {
        0.5 * (v[mid - 1] + v[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use stamox_core::{args, kwargs};

    #[test]
    fn test_mean_full_and_axis() {
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(mean().call1(x.clone()).unwrap(), Value::Float(2.5));

        let cols = mean().call(args![x.clone(); axis = 0]).unwrap().into_array().unwrap();
        assert_eq!(cols.iter().copied().collect::<Vec<_>>(), vec![2.0, 3.0]);

        let rows = mean().bind(kwargs! { axis = 1 }).unwrap().call1(x).unwrap();
        let rows = rows.into_array().unwrap();
        assert_eq!(rows.iter().copied().collect::<Vec<_>>(), vec![1.5, 3.5]);
    }

    #[test]
    fn test_var_and_sd_ddof() {
        let x = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(var().call1(x.clone()).unwrap().as_f64().unwrap(), 4.0);
        assert_relative_eq!(sd().call1(x.clone()).unwrap().as_f64().unwrap(), 2.0);
        let sample = var().call(args![x; ddof = 1]).unwrap().as_f64().unwrap();
        assert_relative_eq!(sample, 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sd_axis() {
        let x = array![[1.0, 3.0], [1.0, 5.0]];
        let out = sd().call(args![x; axis = 1]).unwrap().into_array().unwrap();
        assert_relative_eq!(out[[0]], 1.0);
        assert_relative_eq!(out[[1]], 2.0);
    }

    #[test]
    fn test_ddof_too_large() {
        let err = var().call(args![vec![1.0, 2.0]; ddof = 2]).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_median() {
        assert_eq!(median().call1(vec![3.0, 1.0, 2.0]).unwrap(), Value::Float(2.0));
        assert_eq!(median().call1(vec![4.0, 1.0, 3.0, 2.0]).unwrap(), Value::Float(2.5));
        assert!(median_of([1.0, f64::NAN].into_iter()).is_nan());

        let x = array![[1.0, 9.0, 2.0], [7.0, 8.0, 6.0]];
        let out = median().call(args![x; axis = 1]).unwrap().into_array().unwrap();
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![2.0, 7.0]);
    }

    #[test]
    fn test_axis_out_of_bounds() {
        let err = mean().call(args![vec![1.0, 2.0]; axis = 1]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_input() {
        let err = mean().call1(Vec::<f64>::new()).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { .. }));
    }
}
