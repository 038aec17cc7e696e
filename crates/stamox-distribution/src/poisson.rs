//! Poisson distribution

use crate::utils::{domain, draw, map_probabilities, sample_shape, sampling_signature, with_tail_flags};
use lazy_static::lazy_static;
use rand_distr::Poisson as PoissonSampler;
use stamox_core::{kernel, make_partial_pipe, Bound, Functional, Result, Signature, Value};
use statrs::distribution::{Discrete, DiscreteCDF, Poisson};

lazy_static! {
    static ref DPOISSON: Functional = make_partial_pipe(kernel(
        with_tail_flags(Signature::new("dpoisson").required("x").required("rate")),
        dpoisson_kernel,
    ));
    static ref PPOISSON: Functional = make_partial_pipe(kernel(
        with_tail_flags(Signature::new("ppoisson").required("q").required("rate")),
        ppoisson_kernel,
    ));
    static ref RPOISSON: Functional = make_partial_pipe(kernel(
        sampling_signature("rpoisson").required("rate"),
        rpoisson_kernel,
    ));
}

/// Poisson mass function: `dpoisson(x, rate, lower_tail=true, log_prob=false)`
///
/// Non-integer and negative `x` have zero mass.
pub fn dpoisson() -> Functional {
    DPOISSON.clone()
}

/// Poisson distribution function: `ppoisson(q, rate, lower_tail=true, log_prob=false)`
pub fn ppoisson() -> Functional {
    PPOISSON.clone()
}

/// Poisson random counts: `rpoisson(key, sample_shape=None, rate)`
pub fn rpoisson() -> Functional {
    RPOISSON.clone()
}

fn poisson(args: &Bound<'_>) -> Result<Poisson> {
    Poisson::new(args.f64("rate")?).map_err(domain("poisson"))
}

fn mass(dist: &Poisson, x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x < 0.0 || x.fract() != 0.0 || x.is_infinite() {
        0.0
    } else {
        dist.pmf(x as u64)
    }
}

fn cumulative(dist: &Poisson, q: f64) -> f64 {
    if q.is_nan() {
        f64::NAN
    } else if q < 0.0 {
        0.0
    } else if q.is_infinite() {
        1.0
    } else {
        dist.cdf(q.floor() as u64)
    }
}

fn dpoisson_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = poisson(args)?;
    map_probabilities(args, "x", |x| mass(&dist, x))
}

fn ppoisson_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = poisson(args)?;
    map_probabilities(args, "q", |q| cumulative(&dist, q))
}

fn rpoisson_kernel(args: &Bound<'_>) -> Result<Value> {
    let rate = poisson(args)?.lambda();
    let sampler = PoissonSampler::new(rate).map_err(domain("poisson"))?;
    draw(&sampler, args.key("key")?, &sample_shape(args)?)
}
