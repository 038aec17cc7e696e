//! Shared plumbing for the d/p/q/r kernels

use ndarray::{ArrayD, IxDyn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::Distribution;
use stamox_core::{Bound, Error, PrngKey, Result, Signature, Value};
use std::fmt::Display;
use tracing::trace;

/// Append the `lower_tail` and `log_prob` flags to a signature
pub(crate) fn with_tail_flags(signature: Signature) -> Signature {
    signature
        .optional("lower_tail", true)
        .optional("log_prob", false)
}

fn tail_flags(args: &Bound<'_>) -> Result<(bool, bool)> {
    Ok((args.bool("lower_tail")?, args.bool("log_prob")?))
}

/// Apply the tail and log flags to a computed probability or density
///
/// `lower_tail = false` yields `1 - p`; `log_prob = true` yields `ln(p)`.
pub fn post_process(p: f64, lower_tail: bool, log_prob: bool) -> f64 {
    let p = if lower_tail { p } else { 1.0 - p };
    if log_prob {
        p.ln()
    } else {
        p
    }
}

/// Map an input probability back to a lower-tail probability in `[0, 1]`
///
/// `log_prob = true` reads the input as `ln(p)`; `lower_tail = false` reads it
/// as an upper-tail probability.
pub fn check_clip_probability(p: f64, lower_tail: bool, log_prob: bool) -> f64 {
    let p = if log_prob { p.exp() } else { p };
    let p = if lower_tail { p } else { 1.0 - p };
    p.clamp(0.0, 1.0)
}

/// Evaluate `f` on every element of `lead` and apply the tail flags
pub(crate) fn map_probabilities(args: &Bound<'_>, lead: &str, f: impl Fn(f64) -> f64) -> Result<Value> {
    let (lower_tail, log_prob) = tail_flags(args)?;
    let x = args.array(lead)?;
    Ok(x.mapv(|v| post_process(f(v), lower_tail, log_prob)).into())
}

/// Normalize every element of `lead` to a lower-tail probability, then invert
pub(crate) fn map_quantiles(args: &Bound<'_>, lead: &str, f: impl Fn(f64) -> f64) -> Result<Value> {
    let (lower_tail, log_prob) = tail_flags(args)?;
    let p = args.array(lead)?;
    Ok(p.mapv(|p| f(check_clip_probability(p, lower_tail, log_prob))).into())
}

/// Wrap a parameter error from statrs or rand_distr as a domain error
pub(crate) fn domain<E: Display>(distribution: &'static str) -> impl FnOnce(E) -> Error {
    move |e| Error::domain(format!("{distribution}: {e}"))
}

/// Append `key` and `sample_shape` for a sampling kernel
pub(crate) fn sampling_signature(name: &str) -> Signature {
    Signature::new(name)
        .required("key")
        .optional("sample_shape", Value::None)
}

/// Requested sample shape; a single draw when absent
pub(crate) fn sample_shape(args: &Bound<'_>) -> Result<Vec<usize>> {
    match args.optional("sample_shape")? {
        None => Ok(vec![1]),
        Some(_) => args.shape("sample_shape"),
    }
}

/// Draw an array of `shape` from `dist`, seeded by `key`
pub(crate) fn draw<D: Distribution<f64>>(dist: &D, key: PrngKey, shape: &[usize]) -> Result<Value> {
    trace!(seed = key.seed(), ?shape, "sampling");
    let mut rng = ChaCha8Rng::seed_from_u64(key.seed());
    let n = shape.iter().product();
    let samples: Vec<f64> = dist.sample_iter(&mut rng).take(n).collect();
    Ok(ArrayD::from_shape_vec(IxDyn(shape), samples)?.into())
}
