//! Least-squares regression with name-dispatched solvers
//!
//! [`ols`] fits a linear model and returns a result state. The solver is
//! chosen by name through [`dispatch`]:
//!
//! | method | algorithm |
//! |--------|-----------|
//! | `ols`  | normal equations (Cholesky, SVD fallback) |
//! | `qr`   | Householder QR |
//! | `svd`  | minimum-norm SVD |
//! | `wls`  | weighted normal equations |
//!
//! ```rust
//! use stamox_core::args;
//! use stamox_regression::ols;
//!
//! let fit = ols()
//!     .call(args![vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 5.0]; intercept = true, method = "qr"])
//!     .unwrap()
//!     .into_state()
//!     .unwrap();
//! let b = fit.get("coefficients").unwrap().as_array().unwrap();
//! assert!((b[[1]] - 2.0).abs() < 1e-10);
//! ```

pub mod dispatch;
pub mod ols;
pub mod solvers;

pub use dispatch::{dispatch, methods};
pub use ols::ols;
pub use solvers::{normal_equations, qr, svd, wls, Solver, SVD_EPSILON};
