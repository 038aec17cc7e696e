//! Numeric kernel interface
//!
//! A kernel is a pure numeric function with a fixed [`Signature`]. Kernel
//! crates (distributions, hypothesis tests, regression) implement it, usually
//! through [`FnKernel`], and the pipe constructors wrap the result in a
//! [`Functional`](crate::Functional).

use crate::error::Result;
use crate::signature::{Args, Bound, Keywords, Signature};
use crate::value::Value;
use std::sync::Arc;
use tracing::trace;

/// Base trait for all kernels
pub trait Kernel: Send + Sync {
    /// The kernel's calling convention
    fn signature(&self) -> &Signature;

    /// Evaluate the kernel on bound arguments
    fn call(&self, args: &Bound<'_>) -> Result<Value>;

    /// Name of this kernel for debugging/logging
    fn name(&self) -> &str {
        self.signature().name()
    }

    /// Whether an engine has already compiled this kernel
    fn is_compiled(&self) -> bool {
        false
    }

    /// Resolve stored bindings and call-time arguments against the signature
    fn bind(&self, bindings: &Keywords, args: Args) -> Result<Bound<'_>> {
        self.signature().bind(bindings, args)
    }

    /// Bind and evaluate
    fn invoke(&self, bindings: &Keywords, args: Args) -> Result<Value> {
        let bound = self.bind(bindings, args)?;
        trace!(kernel = self.name(), "invoking kernel");
        self.call(&bound)
    }
}

/// Adapter from a plain function or closure to [`Kernel`]
#[derive(Clone)]
pub struct FnKernel<F> {
    signature: Signature,
    body: F,
}

impl<F> FnKernel<F>
where
    F: Fn(&Bound<'_>) -> Result<Value> + Send + Sync,
{
    /// Create adapter
    #[inline]
    pub fn new(signature: Signature, body: F) -> Self {
        Self { signature, body }
    }
}

impl<F> Kernel for FnKernel<F>
where
    F: Fn(&Bound<'_>) -> Result<Value> + Send + Sync,
{
    fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    fn call(&self, args: &Bound<'_>) -> Result<Value> {
        (self.body)(args)
    }
}

impl<F> std::fmt::Debug for FnKernel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnKernel")
            .field("signature", &self.signature)
            .finish()
    }
}

/// Shared kernel from a signature and a function body
pub fn kernel<F>(signature: Signature, body: F) -> Arc<dyn Kernel>
where
    F: Fn(&Bound<'_>) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(FnKernel::new(signature, body))
}
