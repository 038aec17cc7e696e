//! Exponential distribution
//!
//! | kernel | signature |
//! |---|---|
//! | [`dexp`] | `dexp(x, rate=1, lower_tail=true, log_prob=false)` |
//! | [`pexp`] | `pexp(q, rate=1, lower_tail=true, log_prob=false)` |
//! | [`qexp`] | `qexp(p, rate=1, lower_tail=true, log_prob=false)` |
//! | [`rexp`] | `rexp(key, sample_shape=None, rate=1)` |
//!
//! ```rust
//! use stamox_distribution::pexp;
//! use stamox_core::{kwargs, Pipeable};
//!
//! let p = (Pipeable::new(vec![0.4]) >> pexp().bind(kwargs! { rate = 2.5 }).unwrap())
//!     .run()
//!     .unwrap();
//! assert!((p.as_f64().unwrap() - 0.6321206).abs() < 1e-6);
//! ```

use crate::utils::{domain, draw, map_probabilities, map_quantiles, sample_shape, sampling_signature, with_tail_flags};
use lazy_static::lazy_static;
use rand_distr::Exp as ExpSampler;
use stamox_core::{kernel, make_partial_pipe, Bound, Functional, Result, Signature, Value};
use statrs::distribution::{Continuous, ContinuousCDF, Exp};

lazy_static! {
    static ref DEXP: Functional = make_partial_pipe(kernel(
        with_tail_flags(Signature::new("dexp").required("x").optional("rate", 1.0)),
        dexp_kernel,
    ));
    static ref PEXP: Functional = make_partial_pipe(kernel(
        with_tail_flags(Signature::new("pexp").required("q").optional("rate", 1.0)),
        pexp_kernel,
    ));
    static ref QEXP: Functional = make_partial_pipe(kernel(
        with_tail_flags(Signature::new("qexp").required("p").optional("rate", 1.0)),
        qexp_kernel,
    ));
    static ref REXP: Functional = make_partial_pipe(kernel(
        sampling_signature("rexp").optional("rate", 1.0),
        rexp_kernel,
    ));
}

/// Exponential density
pub fn dexp() -> Functional {
    DEXP.clone()
}

/// Exponential distribution function
pub fn pexp() -> Functional {
    PEXP.clone()
}

/// Exponential quantile function
pub fn qexp() -> Functional {
    QEXP.clone()
}

/// Exponential random samples
pub fn rexp() -> Functional {
    REXP.clone()
}

fn exp(args: &Bound<'_>) -> Result<Exp> {
    Exp::new(args.f64("rate")?).map_err(domain("exponential"))
}

fn dexp_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = exp(args)?;
    map_probabilities(args, "x", |x| dist.pdf(x))
}

fn pexp_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = exp(args)?;
    map_probabilities(args, "q", |q| dist.cdf(q))
}

fn qexp_kernel(args: &Bound<'_>) -> Result<Value> {
    let rate = exp(args)?.rate();
    map_quantiles(args, "p", |p| -(-p).ln_1p() / rate)
}

fn rexp_kernel(args: &Bound<'_>) -> Result<Value> {
    let rate = exp(args)?.rate();
    let sampler = ExpSampler::new(rate).map_err(domain("exponential"))?;
    draw(&sampler, args.key("key")?, &sample_shape(args)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stamox_core::{args, kwargs, Error, PrngKey};

    #[test]
    fn test_negative_support() {
        let out = dexp().call(args![vec![-1.0]; rate = 2.0]).unwrap();
        assert_eq!(out.as_f64().unwrap(), 0.0);
        let out = pexp().call(args![vec![-1.0]; rate = 2.0]).unwrap();
        assert_eq!(out.as_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_quantile_edges() {
        let out = qexp().call1(vec![0.0, 1.0]).unwrap().into_array().unwrap();
        assert_eq!(out[[0]], 0.0);
        assert_eq!(out[[1]], f64::INFINITY);
    }

    #[test]
    fn test_upper_tail_log() {
        let out = pexp()
            .call(args![vec![1.0]; rate = 2.0, lower_tail = false, log_prob = true])
            .unwrap();
        assert_relative_eq!(out.as_f64().unwrap(), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_rate() {
        let err = pexp().call(args![vec![1.0]; rate = -1.0]).unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
        let err = rexp().call(args![PrngKey::new(0); rate = 0.0]).unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn test_default_single_draw() {
        let out = rexp().call1(PrngKey::new(3)).unwrap().into_array().unwrap();
        assert_eq!(out.shape(), &[1]);
        assert!(out[[0]] >= 0.0);
    }

    #[test]
    fn test_keyword_bound_key_needs_positional_call() {
        let bound = rexp()
            .bind(kwargs! { key = PrngKey::new(1), rate = 2.0 })
            .unwrap();
        let err = bound.run().unwrap_err();
        assert!(matches!(err, Error::MissingData { ref kernel } if kernel == "rexp"));
        let err = rexp().call(args![; key = PrngKey::new(1)]).unwrap_err();
        assert!(matches!(err, Error::MissingData { .. }));
        // the key passed positionally draws as usual
        assert!(rexp().bind(kwargs! { rate = 2.0 }).unwrap().call1(PrngKey::new(1)).is_ok());
    }
}
