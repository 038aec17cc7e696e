//! # stamox
//!
//! Composable statistics pipelines. Numeric kernels are wrapped as
//! [`Functional`](core::Functional) values that support partial binding,
//! `>>` composition, compilation through an [`Engine`](core::Engine) and
//! name-keyed method dispatch.
//!
//! ```rust
//! use stamox::prelude::*;
//!
//! let x = vec![0.5, 1.0, 1.5];
//! let upper = pexp().bind(kwargs! { rate = 2.0, lower_tail = false }).unwrap();
//! let total = (Pipeable::new(x) >> upper >> mean()).run().unwrap();
//! assert!(total.as_f64().unwrap() < 0.5);
//! ```
//!
//! ## Crates
//!
//! - [`core`]: functional wrapper, composition, engines, registries
//! - [`basic`]: descriptive statistics, bootstrap, transforms
//! - [`distribution`]: d/p/q/r kernels for exponential, Poisson, beta and normal
//! - [`hypothesis`]: Durbin-Watson and one-sample t tests
//! - [`regression`]: least squares with dispatched solvers

pub use stamox_basic as basic;
pub use stamox_core as core;
pub use stamox_distribution as distribution;
pub use stamox_hypothesis as hypothesis;
pub use stamox_regression as regression;

pub use stamox_core::{Error, Functional, Pipeable, PrngKey, Result, StateFunc, Value};

pub mod prelude {
    pub use stamox_basic::{bootstrap_sample, boxcox, choose, mean, median, sd, var, z_fisher};
    pub use stamox_core::prelude::*;
    pub use stamox_distribution::{
        dbeta, dexp, dnorm, dpoisson, pbeta, pexp, pnorm, ppoisson, qbeta, qexp, qnorm, rbeta, rexp, rnorm,
        rpoisson,
    };
    pub use stamox_hypothesis::{durbin_watson_test, t_test};
    pub use stamox_regression::{dispatch, ols};
}
