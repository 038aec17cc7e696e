//! Binomial coefficients

use lazy_static::lazy_static;
use stamox_core::{kernel, make_partial_pipe, Bound, Functional, Result, Signature, Value};
use statrs::function::gamma::ln_gamma;

lazy_static! {
    static ref CHOOSE: Functional = make_partial_pipe(kernel(
        Signature::new("choose").required("n").required("k"),
        choose_kernel,
    ));
}

/// Number of ways to choose `k` of `n`: `choose(n, k)`
///
/// `k` may be a scalar or an array; the result always has `k`'s shape with
/// scalars promoted to one element. Entries with `k < 0` or `k > n` are 0.
pub fn choose() -> Functional {
    CHOOSE.clone()
}

fn choose_kernel(args: &Bound<'_>) -> Result<Value> {
    let n = args.f64("n")?;
    let k = args.array("k")?;
    Ok(k.mapv(|k| binomial(n, k.trunc())).into())
}

/// `n choose k` through log-gamma, rounded to the nearest integer
pub fn binomial(n: f64, k: f64) -> f64 {
    if k < 0.0 || k > n {
        return 0.0;
    }
    (ln_gamma(n + 1.0) - ln_gamma(k + 1.0) - ln_gamma(n - k + 1.0))
        .exp()
        .round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stamox_core::{args, kwargs};

    #[test]
    fn test_small_values() {
        assert_eq!(binomial(5.0, 2.0), 10.0);
        assert_eq!(binomial(10.0, 0.0), 1.0);
        assert_eq!(binomial(10.0, 10.0), 1.0);
        assert_eq!(binomial(30.0, 15.0), 155_117_520.0);
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let out = choose().call(args![4.0, vec![-1.0, 2.0, 5.0]]).unwrap();
        let out = out.into_array().unwrap();
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![0.0, 6.0, 0.0]);
    }

    #[test]
    fn test_scalar_k_promotes() {
        let out = choose().call(args![6.0, 3.0]).unwrap().into_array().unwrap();
        assert_eq!(out.shape(), &[1]);
        assert_eq!(out[[0]], 20.0);
    }

    #[test]
    fn test_bound_k_piped_n() {
        let pairs = choose().bind(kwargs! { k = vec![1.0, 2.0, 3.0] }).unwrap();
        let out = pairs.call1(10).unwrap().into_array().unwrap();
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![10.0, 45.0, 120.0]);
    }
}
