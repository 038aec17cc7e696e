//! Name-keyed solver dispatch

use crate::solvers::{normal_equations, qr, svd, wls, Solver};
use lazy_static::lazy_static;
use stamox_core::{Registry, Result};
use tracing::debug;

lazy_static! {
    static ref SOLVERS: Registry<Solver> = Registry::new(
        "solver",
        [
            ("ols", normal_equations as Solver),
            ("qr", qr as Solver),
            ("svd", svd as Solver),
            ("wls", wls as Solver),
        ],
    )
    .expect("solver names are distinct");
}

/// Look up a least-squares solver by name
///
/// Valid names are `ols`, `qr`, `svd` and `wls`.
///
/// ```rust
/// use stamox_regression::dispatch;
///
/// assert!(dispatch("qr").is_ok());
/// let err = dispatch("nonexistent").unwrap_err();
/// assert_eq!(err.to_string(), "Unknown method `nonexistent`; valid methods: ols, qr, svd, wls");
/// ```
pub fn dispatch(method: &str) -> Result<Solver> {
    let solver = SOLVERS.get(method)?;
    debug!(method, "dispatched solver");
    Ok(*solver)
}

/// Registered solver names, sorted
pub fn methods() -> impl Iterator<Item = &'static str> {
    SOLVERS.names()
}
