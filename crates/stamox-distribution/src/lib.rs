//! Density, distribution, quantile and sampling kernels
//!
//! Each distribution provides kernels named in the R convention:
//! `d*` (density or mass), `p*` (distribution function), `q*` (quantile)
//! and `r*` (random samples). All are partial pipes, so parameters can be
//! bound up front and the result piped:
//!
//! ```rust
//! use stamox_distribution::ppoisson;
//! use stamox_core::kwargs;
//!
//! let upper = ppoisson().bind(kwargs! { rate = 2.5, lower_tail = false }).unwrap();
//! let p = upper.call1(vec![1.0]).unwrap().as_f64().unwrap();
//! assert!((p - 0.7127025).abs() < 1e-6);
//! ```
//!
//! # Tail and log flags
//!
//! `d*`/`p*` kernels apply `lower_tail = false` as `1 - p` and then
//! `log_prob = true` as `ln(p)`. `q*` kernels read their input as `ln(p)`
//! when `log_prob` is set and as an upper-tail probability when
//! `lower_tail = false`, then clip it to `[0, 1]`.
//!
//! # Sampling
//!
//! `r*` kernels take a [`PrngKey`](stamox_core::PrngKey) first; the same key
//! always yields the same samples.

pub mod beta;
pub mod exp;
pub mod normal;
pub mod poisson;
pub mod utils;

pub use beta::{dbeta, pbeta, qbeta, rbeta};
pub use exp::{dexp, pexp, qexp, rexp};
pub use normal::{dnorm, pnorm, qnorm, rnorm};
pub use poisson::{dpoisson, ppoisson, rpoisson};
pub use utils::{check_clip_probability, post_process};
