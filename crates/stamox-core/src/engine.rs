//! Compilation and vectorization engines
//!
//! An [`Engine`] turns a kernel into an equivalent "compiled" kernel and
//! builds vectorized versions of functionals. The pipe constructors with a
//! `_jit` suffix compile through the process-wide [`default_engine`]; the
//! `_with` variants take any engine, which is how alternative backends plug
//! in.
//!
//! Compilation never changes numeric results. For [`NativeEngine`] it
//! precomputes the kernel's parameter index so argument binding skips the
//! linear signature scan.

use crate::error::{Error, Result};
use crate::functional::Functional;
use crate::kernel::{kernel, Kernel};
use crate::pipe::make_pipe;
use crate::signature::{Args, BindingPlan, Bound, Keywords, Signature};
use crate::value::{Array, Value};
use lazy_static::lazy_static;
use ndarray::{ArrayD, Axis, IxDyn};
use std::sync::Arc;
use tracing::debug;

/// Backend that compiles kernels and vectorizes functionals
pub trait Engine: Send + Sync {
    /// Return a compiled equivalent of `kernel`
    ///
    /// Must be idempotent: compiling an already compiled kernel returns it
    /// unchanged.
    fn compile(&self, kernel: Arc<dyn Kernel>) -> Arc<dyn Kernel>;

    /// Map `f` over axis 0 of its leading argument, stacking the results
    fn vmap(&self, f: &Functional) -> Functional;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}

/// Kernel with a precomputed binding plan
pub struct CompiledKernel {
    inner: Arc<dyn Kernel>,
    plan: BindingPlan,
}

impl CompiledKernel {
    /// Wrap `inner`, indexing its signature
    pub fn new(inner: Arc<dyn Kernel>) -> Self {
        let plan = BindingPlan::new(inner.signature());
        Self { inner, plan }
    }
}

impl Kernel for CompiledKernel {
    fn signature(&self) -> &Signature {
        self.inner.signature()
    }

    #[inline]
    fn call(&self, args: &Bound<'_>) -> Result<Value> {
        self.inner.call(args)
    }

    fn is_compiled(&self) -> bool {
        true
    }

    fn bind(&self, bindings: &Keywords, args: Args) -> Result<Bound<'_>> {
        self.inner
            .signature()
            .bind_indexed(bindings, args, Some(&self.plan))
    }
}

impl std::fmt::Debug for CompiledKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledKernel")
            .field("kernel", &self.inner.name())
            .finish()
    }
}

/// In-process engine
#[derive(Debug, Clone, Default)]
pub struct NativeEngine {
    parallel: bool,
}

impl NativeEngine {
    /// Sequential engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Run vectorized maps on the rayon pool
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether vectorized maps run in parallel
    pub fn is_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}

impl Engine for NativeEngine {
    fn compile(&self, kernel: Arc<dyn Kernel>) -> Arc<dyn Kernel> {
        if kernel.is_compiled() {
            return kernel;
        }
        Arc::new(CompiledKernel::new(kernel))
    }

    fn vmap(&self, f: &Functional) -> Functional {
        let inner = f.clone();
        let parallel = self.is_parallel();
        let name = format!("vmap({})", f.name());
        make_pipe(kernel(Signature::new(name).required("x"), move |args| {
            let x = args.array("x")?;
            if x.ndim() == 0 || x.len_of(Axis(0)) == 0 {
                return Err(Error::empty_input());
            }
            let rows: Vec<Array> = x.outer_iter().map(|row| row.to_owned().into_shared()).collect();
            debug!(stage = %inner.name(), rows = rows.len(), parallel, "vectorized map");
            let results = map_rows(&inner, rows, parallel)?;
            stack_results(results)
        }))
    }

    fn name(&self) -> &'static str {
        "native"
    }
}

fn eval_row(f: &Functional, row: Array) -> Result<Array> {
    match f.call1(row)? {
        Value::Float(v) => Ok(ArrayD::from_elem(IxDyn(&[]), v).into_shared()),
        Value::Int(v) => Ok(ArrayD::from_elem(IxDyn(&[]), v as f64).into_shared()),
        other => other.into_array(),
    }
}

#[cfg(feature = "parallel")]
fn map_rows(f: &Functional, rows: Vec<Array>, parallel: bool) -> Result<Vec<Array>> {
    use rayon::prelude::*;
    if parallel {
        rows.into_par_iter().map(|row| eval_row(f, row)).collect()
    } else {
        rows.into_iter().map(|row| eval_row(f, row)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_rows(f: &Functional, rows: Vec<Array>, _parallel: bool) -> Result<Vec<Array>> {
    rows.into_iter().map(|row| eval_row(f, row)).collect()
}

fn stack_results(results: Vec<Array>) -> Result<Value> {
    let views: Vec<_> = results.iter().map(|a| a.view()).collect();
    let stacked = ndarray::stack(Axis(0), &views)?;
    Ok(Value::Array(stacked.into_shared()))
}

lazy_static! {
    static ref DEFAULT_ENGINE: NativeEngine = NativeEngine::new();
}

/// Process-wide engine used by the `_jit` constructors
pub fn default_engine() -> &'static NativeEngine {
    &DEFAULT_ENGINE
}
