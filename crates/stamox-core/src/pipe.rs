//! Pipe constructors
//!
//! Each constructor wraps a kernel into a [`Functional`]:
//!
//! | constructor | partial binding | compiled |
//! |---|---|---|
//! | [`make_pipe`] | no | no |
//! | [`make_partial_pipe`] | yes | no |
//! | [`pipe_jit`] | no | yes |
//! | [`partial_pipe_jit`] | yes | yes |
//!
//! Compilation happens once, here, so every partial bind of a
//! `partial_pipe_jit` functional shares the compiled kernel.

use crate::engine::{default_engine, Engine};
use crate::functional::Functional;
use crate::kernel::Kernel;
use std::sync::Arc;

/// Wrap a kernel so it can be composed with `>>`
pub fn make_pipe(kernel: Arc<dyn Kernel>) -> Functional {
    Functional::from_kernel(kernel, false)
}

/// Wrap a kernel with keyword pre-binding support
///
/// Calling the result with keywords only returns a deferred functional;
/// supplying the data argument runs the kernel.
pub fn make_partial_pipe(kernel: Arc<dyn Kernel>) -> Functional {
    Functional::from_kernel(kernel, true)
}

/// Like [`make_pipe`], compiled with the default engine
pub fn pipe_jit(kernel: Arc<dyn Kernel>) -> Functional {
    pipe_jit_with(kernel, default_engine())
}

/// Like [`make_partial_pipe`], compiled with the default engine
pub fn partial_pipe_jit(kernel: Arc<dyn Kernel>) -> Functional {
    partial_pipe_jit_with(kernel, default_engine())
}

/// Like [`make_pipe`], compiled with `engine`
pub fn pipe_jit_with(kernel: Arc<dyn Kernel>, engine: &dyn Engine) -> Functional {
    Functional::from_kernel(engine.compile(kernel), false)
}

/// Like [`make_partial_pipe`], compiled with `engine`
pub fn partial_pipe_jit_with(kernel: Arc<dyn Kernel>, engine: &dyn Engine) -> Functional {
    Functional::from_kernel(engine.compile(kernel), true)
}
