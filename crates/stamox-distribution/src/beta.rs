//! Beta distribution

use crate::utils::{domain, draw, map_probabilities, map_quantiles, sample_shape, sampling_signature, with_tail_flags};
use lazy_static::lazy_static;
use rand_distr::Beta as BetaSampler;
use stamox_core::{kernel, make_partial_pipe, Bound, Functional, Result, Signature, Value};
use statrs::distribution::{Beta, Continuous, ContinuousCDF};
use statrs::function::beta::beta_reg;

/// Bracket width at which quantile bisection stops
const QUANTILE_TOLERANCE: f64 = 1e-14;
const MAX_BISECTIONS: usize = 200;

fn shaped(name: &str, lead: &str) -> Signature {
    with_tail_flags(Signature::new(name).required(lead).required("a").required("b"))
}

lazy_static! {
    static ref DBETA: Functional = make_partial_pipe(kernel(shaped("dbeta", "x"), dbeta_kernel));
    static ref PBETA: Functional = make_partial_pipe(kernel(shaped("pbeta", "q"), pbeta_kernel));
    static ref QBETA: Functional = make_partial_pipe(kernel(shaped("qbeta", "p"), qbeta_kernel));
    static ref RBETA: Functional = make_partial_pipe(kernel(
        sampling_signature("rbeta").required("a").required("b"),
        rbeta_kernel,
    ));
}

/// Beta density: `dbeta(x, a, b, lower_tail=true, log_prob=false)`
pub fn dbeta() -> Functional {
    DBETA.clone()
}

/// Beta distribution function: `pbeta(q, a, b, lower_tail=true, log_prob=false)`
pub fn pbeta() -> Functional {
    PBETA.clone()
}

/// Beta quantile function: `qbeta(p, a, b, lower_tail=true, log_prob=false)`
pub fn qbeta() -> Functional {
    QBETA.clone()
}

/// Beta random samples: `rbeta(key, sample_shape=None, a, b)`
pub fn rbeta() -> Functional {
    RBETA.clone()
}

fn beta(args: &Bound<'_>) -> Result<Beta> {
    Beta::new(args.f64("a")?, args.f64("b")?).map_err(domain("beta"))
}

fn dbeta_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = beta(args)?;
    map_probabilities(args, "x", |x| {
        if (0.0..=1.0).contains(&x) {
            dist.pdf(x)
        } else {
            0.0
        }
    })
}

fn pbeta_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = beta(args)?;
    map_probabilities(args, "q", |q| dist.cdf(q))
}

fn qbeta_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = beta(args)?;
    let (a, b) = (dist.shape_a(), dist.shape_b());
    map_quantiles(args, "p", |p| beta_quantile(p, a, b))
}

fn rbeta_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = beta(args)?;
    let sampler = BetaSampler::new(dist.shape_a(), dist.shape_b()).map_err(domain("beta"))?;
    draw(&sampler, args.key("key")?, &sample_shape(args)?)
}

/// Invert the regularized incomplete beta function by bisection
///
/// `a` and `b` must be positive and finite.
pub fn beta_quantile(p: f64, a: f64, b: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if beta_reg(a, b, mid) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < QUANTILE_TOLERANCE {
            break;
        }
    }
    0.5 * (lo + hi)
}
