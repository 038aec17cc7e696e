//! Durbin–Watson test for first-order autocorrelation

use lazy_static::lazy_static;
use ndarray::{ArrayView1, Axis, IxDyn};
use stamox_core::state::STATISTIC;
use stamox_core::{kernel, make_partial_pipe, Bound, Error, Functional, Result, Signature, StateFunc, Value};
use tracing::debug;

lazy_static! {
    static ref DURBIN_WATSON_TEST: Functional = make_partial_pipe(kernel(
        Signature::new("durbin_watson_test").required("x").optional("axis", 0),
        durbin_watson_kernel,
    ));
}

/// Durbin–Watson statistic of residuals: `durbin_watson_test(x, axis=0)`
///
/// Returns a state with one field, `statistic`: an array with `axis` removed
/// (one element for a vector input). Values near 2 indicate no
/// autocorrelation. An all-zero series yields NaN.
///
/// ```rust
/// use stamox_hypothesis::durbin_watson_test;
/// use stamox_core::Pipeable;
///
/// let state = (Pipeable::new(vec![1.0, -1.0, 1.0, -1.0]) >> durbin_watson_test())
///     .run()
///     .unwrap()
///     .into_state()
///     .unwrap();
/// assert_eq!(state.statistic().unwrap().as_f64().unwrap(), 3.0);
/// ```
pub fn durbin_watson_test() -> Functional {
    DURBIN_WATSON_TEST.clone()
}

/// Durbin–Watson statistic of one series
pub fn durbin_watson(resid: ArrayView1<'_, f64>) -> f64 {
    let diffs: f64 = resid
        .windows(2)
        .into_iter()
        .map(|w| (w[1] - w[0]).powi(2))
        .sum();
    let ssr: f64 = resid.iter().map(|r| r * r).sum();
    diffs / ssr
}

fn durbin_watson_kernel(args: &Bound<'_>) -> Result<Value> {
    let x = args.array("x")?;
    let axis = args.usize("axis")?;
    if axis >= x.ndim() {
        return Err(Error::InvalidParameter(format!(
            "axis {axis} is out of bounds for an array of dimension {}",
            x.ndim()
        )));
    }
    let n = x.len_of(Axis(axis));
    if n < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: n,
        });
    }

    let statistic = x.map_axis(Axis(axis), durbin_watson);
    let statistic = if statistic.ndim() == 0 {
        statistic.into_shape(IxDyn(&[1]))?
    } else {
        statistic
    };
    debug!(n, series = statistic.len(), "durbin-watson statistic computed");

    Ok(StateFunc::builder("durbin_watson_test")
        .field(STATISTIC, statistic)
        .build()
        .into())
}
