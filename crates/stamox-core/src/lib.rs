//! Composable pipelines over numeric kernels
//!
//! This crate provides the plumbing that every stamox kernel crate builds on:
//! typed values, kernel signatures, partial application, left-to-right
//! composition, named-field result states, compilation hooks and method
//! registries.
//!
//! # Architecture Overview
//!
//! 1. **Kernels** ([`Kernel`], [`FnKernel`]): pure numeric functions with a
//!    fixed [`Signature`]
//! 2. **Functionals** ([`Functional`]): immutable wrappers that add keyword
//!    pre-binding and `>>` composition
//! 3. **Engines** ([`Engine`], [`NativeEngine`]): compile kernels and
//!    vectorize functionals
//! 4. **Registries** ([`Registry`]): select between interchangeable
//!    implementations by name
//!
//! # Example
//!
//! ```rust
//! use stamox_core::{args, kernel, make_partial_pipe, Pipeable, Signature};
//!
//! let scale = make_partial_pipe(kernel(
//!     Signature::new("scale").required("x").optional("by", 1.0),
//!     |a| {
//!         let by = a.f64("by")?;
//!         Ok(a.array("x")?.mapv(|v| v * by).into())
//!     },
//! ));
//!
//! let times_three = scale.apply(args![; by = 3.0]).unwrap().into_functional().unwrap();
//! let out = (Pipeable::new(vec![1.0, 2.0]) >> times_three).run().unwrap();
//! assert_eq!(out.as_array().unwrap().sum(), 9.0);
//! ```

pub mod compose;
pub mod engine;
pub mod error;
pub mod functional;
pub mod kernel;
mod macros;
pub mod pipe;
pub mod registry;
pub mod signature;
pub mod state;
pub mod value;

pub use compose::{pipe_through, select, Composable, Pipeable};
pub use engine::{default_engine, CompiledKernel, Engine, NativeEngine};
pub use error::{Error, Result};
pub use functional::{Applied, Functional};
pub use kernel::{kernel, FnKernel, Kernel};
pub use pipe::{make_partial_pipe, make_pipe, partial_pipe_jit, partial_pipe_jit_with, pipe_jit, pipe_jit_with};
pub use registry::Registry;
pub use signature::{Args, BindingPlan, Bound, Keywords, Param, Signature};
pub use state::{StateBuilder, StateFunc};
pub use value::{Array, PrngKey, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed to build and compose pipes
pub mod prelude {
    pub use crate::compose::{select, Composable, Pipeable};
    pub use crate::engine::{default_engine, Engine, NativeEngine};
    pub use crate::error::{Error, Result};
    pub use crate::functional::{Applied, Functional};
    pub use crate::kernel::{kernel, Kernel};
    pub use crate::pipe::{make_partial_pipe, make_pipe, partial_pipe_jit, pipe_jit};
    pub use crate::signature::{Args, Keywords, Signature};
    pub use crate::state::StateFunc;
    pub use crate::value::{Array, PrngKey, Value};
    pub use crate::{args, kwargs};
}
