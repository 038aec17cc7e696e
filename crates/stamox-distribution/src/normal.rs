//! Normal distribution

use crate::utils::{domain, draw, map_probabilities, map_quantiles, sample_shape, sampling_signature, with_tail_flags};
use lazy_static::lazy_static;
use rand_distr::Normal as NormalSampler;
use stamox_core::{kernel, make_partial_pipe, Bound, Functional, Result, Signature, Value};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

fn located(name: &str, lead: &str) -> Signature {
    with_tail_flags(
        Signature::new(name)
            .required(lead)
            .optional("mean", 0.0)
            .optional("sd", 1.0),
    )
}

lazy_static! {
    static ref DNORM: Functional = make_partial_pipe(kernel(located("dnorm", "x"), dnorm_kernel));
    static ref PNORM: Functional = make_partial_pipe(kernel(located("pnorm", "q"), pnorm_kernel));
    static ref QNORM: Functional = make_partial_pipe(kernel(located("qnorm", "p"), qnorm_kernel));
    static ref RNORM: Functional = make_partial_pipe(kernel(
        sampling_signature("rnorm").optional("mean", 0.0).optional("sd", 1.0),
        rnorm_kernel,
    ));
}

/// Normal density: `dnorm(x, mean=0, sd=1, lower_tail=true, log_prob=false)`
pub fn dnorm() -> Functional {
    DNORM.clone()
}

/// Normal distribution function: `pnorm(q, mean=0, sd=1, lower_tail=true, log_prob=false)`
pub fn pnorm() -> Functional {
    PNORM.clone()
}

/// Normal quantile function: `qnorm(p, mean=0, sd=1, lower_tail=true, log_prob=false)`
pub fn qnorm() -> Functional {
    QNORM.clone()
}

/// Normal random samples: `rnorm(key, sample_shape=None, mean=0, sd=1)`
pub fn rnorm() -> Functional {
    RNORM.clone()
}

fn normal(args: &Bound<'_>) -> Result<Normal> {
    Normal::new(args.f64("mean")?, args.f64("sd")?).map_err(domain("normal"))
}

fn dnorm_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = normal(args)?;
    map_probabilities(args, "x", |x| dist.pdf(x))
}

fn pnorm_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = normal(args)?;
    map_probabilities(args, "q", |q| dist.cdf(q))
}

fn qnorm_kernel(args: &Bound<'_>) -> Result<Value> {
    let dist = normal(args)?;
    map_quantiles(args, "p", |p| dist.inverse_cdf(p))
}

fn rnorm_kernel(args: &Bound<'_>) -> Result<Value> {
    normal(args)?;
    let sampler = NormalSampler::new(args.f64("mean")?, args.f64("sd")?).map_err(domain("normal"))?;
    draw(&sampler, args.key("key")?, &sample_shape(args)?)
}
