//! Composable kernel wrapper
//!
//! A [`Functional`] wraps a kernel, a composed chain of stages, or a call
//! seeded with a value. It is immutable: partial binding, composition and
//! compilation all return a new `Functional` that shares the original's
//! internals through `Arc`, so the unbound original stays reusable.
//!
//! # States
//!
//! A partial functional is *unbound* until a keyword-only call captures
//! keywords, producing a *partially-bound* functional
//! ([`Applied::Deferred`]). Any call that supplies the leading positional
//! argument evaluates the kernel ([`Applied::Ready`]).

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::kernel::Kernel;
use crate::signature::{Args, Keywords, Signature};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Clone)]
enum Body {
    /// A single kernel
    Kernel(Arc<dyn Kernel>),
    /// Stages evaluated left to right
    Chain(Arc<[Functional]>),
    /// A stage whose leading argument is already supplied
    Seeded { seed: Value, stage: Arc<Functional> },
}

/// Outcome of applying a [`Functional`] to arguments
#[derive(Debug, Clone)]
pub enum Applied {
    /// Keywords captured; awaiting the data argument
    Deferred(Functional),
    /// The kernel ran
    Ready(Value),
}

impl Applied {
    /// The result value, or a missing-argument error if the call was deferred
    pub fn into_value(self) -> Result<Value> {
        match self {
            Applied::Ready(value) => Ok(value),
            Applied::Deferred(f) => Err(f.missing_argument()),
        }
    }

    /// The deferred functional; a ready value is a type mismatch
    pub fn into_functional(self) -> Result<Functional> {
        match self {
            Applied::Deferred(f) => Ok(f),
            Applied::Ready(value) => Err(Error::type_mismatch(
                "partial application",
                "deferred functional",
                value.kind(),
            )),
        }
    }

    /// Whether the call was deferred
    pub fn is_deferred(&self) -> bool {
        matches!(self, Applied::Deferred(_))
    }
}

/// Composable wrapper around a kernel or a pipeline of kernels
#[derive(Clone)]
pub struct Functional {
    body: Body,
    bindings: Arc<Keywords>,
    partial: bool,
    compiled: bool,
}

impl Functional {
    pub(crate) fn from_kernel(kernel: Arc<dyn Kernel>, partial: bool) -> Self {
        let compiled = kernel.is_compiled();
        Self {
            body: Body::Kernel(kernel),
            bindings: Arc::new(Keywords::new()),
            partial,
            compiled,
        }
    }

    pub(crate) fn chain(stages: Vec<Functional>) -> Self {
        let compiled = stages.iter().all(|s| s.compiled);
        Self {
            body: Body::Chain(stages.into()),
            bindings: Arc::new(Keywords::new()),
            partial: false,
            compiled,
        }
    }

    pub(crate) fn seeded(seed: Value, stage: Functional) -> Self {
        let compiled = stage.compiled;
        Self {
            body: Body::Seeded {
                seed,
                stage: Arc::new(stage),
            },
            bindings: Arc::new(Keywords::new()),
            partial: false,
            compiled,
        }
    }

    /// Display name: the kernel name, or stage names joined by `>>`
    pub fn name(&self) -> String {
        match &self.body {
            Body::Kernel(k) => k.name().to_string(),
            Body::Chain(stages) => stages
                .iter()
                .map(Functional::name)
                .collect::<Vec<_>>()
                .join(" >> "),
            Body::Seeded { seed, stage } => format!("<{}> >> {}", seed.kind(), stage.name()),
        }
    }

    /// Calling convention of the leading kernel
    pub fn signature(&self) -> &Signature {
        match &self.body {
            Body::Kernel(k) => k.signature(),
            Body::Chain(stages) => stages[0].signature(),
            Body::Seeded { stage, .. } => stage.signature(),
        }
    }

    /// Keywords captured by partial application
    pub fn bindings(&self) -> &Keywords {
        &self.bindings
    }

    /// Whether keyword-only calls defer instead of running
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Whether every kernel in this functional has been compiled
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// Number of stages (1 for a single kernel)
    pub fn stages(&self) -> usize {
        match &self.body {
            Body::Chain(stages) => stages.iter().map(Functional::stages).sum(),
            Body::Kernel(_) => 1,
            Body::Seeded { stage, .. } => stage.stages(),
        }
    }

    pub(crate) fn chain_stages(&self) -> Option<&[Functional]> {
        match &self.body {
            Body::Chain(stages) => Some(stages),
            _ => None,
        }
    }

    /// Apply to arguments
    ///
    /// A partial functional called without positional arguments returns
    /// [`Applied::Deferred`] with the call's keywords merged into its stored
    /// bindings. Every other call evaluates and returns [`Applied::Ready`].
    pub fn apply(&self, args: Args) -> Result<Applied> {
        match &self.body {
            Body::Kernel(kernel) => {
                if self.partial && !args.has_positional() {
                    trace!(kernel = kernel.name(), "deferring partial call");
                    return Ok(Applied::Deferred(self.with_bindings(args.keywords)));
                }
                kernel.invoke(&self.bindings, args).map(Applied::Ready)
            }
            Body::Chain(stages) => {
                let (first, rest) = stages
                    .split_first()
                    .ok_or_else(|| Error::InvalidInput("empty pipeline".to_string()))?;
                let mut value = first.call(args)?;
                for stage in rest {
                    debug!(stage = %stage.name(), input = value.kind(), "entering stage");
                    value = stage.call(Args::positional(value))?;
                }
                Ok(Applied::Ready(value))
            }
            Body::Seeded { seed, stage } => {
                debug!(stage = %stage.name(), input = seed.kind(), "entering seeded stage");
                stage.call(args.with_leading(seed.clone())).map(Applied::Ready)
            }
        }
    }

    /// Apply and require a result
    pub fn call(&self, args: Args) -> Result<Value> {
        self.apply(args)?.into_value()
    }

    /// Call with a single positional argument
    pub fn call1(&self, x: impl Into<Value>) -> Result<Value> {
        self.call(Args::positional(x))
    }

    /// Evaluate a seeded pipeline that needs no further arguments
    pub fn run(&self) -> Result<Value> {
        self.call(Args::new())
    }

    /// Pre-bind keyword arguments, deferring execution
    pub fn bind(&self, keywords: Keywords) -> Result<Functional> {
        if !self.partial {
            return Err(Error::NotPartial(self.name()));
        }
        self.apply(Args::keywords(keywords))?.into_functional()
    }

    fn with_bindings(&self, keywords: Keywords) -> Functional {
        let mut merged = (*self.bindings).clone();
        merged.extend(keywords);
        Functional {
            body: self.body.clone(),
            bindings: Arc::new(merged),
            partial: self.partial,
            compiled: self.compiled,
        }
    }

    fn missing_argument(&self) -> Error {
        let signature = self.signature();
        let kernel = signature.name().to_string();
        match signature.first_unbound(&self.bindings) {
            Some(param) => Error::MissingArgument {
                kernel,
                param: param.to_string(),
            },
            None => Error::MissingData { kernel },
        }
    }

    /// Compile every kernel stage with `engine`
    ///
    /// Kernels that are already compiled are kept as they are, so compiling
    /// twice changes nothing. Stored bindings are preserved.
    pub fn compile_with(&self, engine: &dyn Engine) -> Functional {
        if self.compiled {
            return self.clone();
        }
        let body = match &self.body {
            Body::Kernel(kernel) => {
                debug!(kernel = kernel.name(), engine = engine.name(), "compiling kernel");
                Body::Kernel(engine.compile(Arc::clone(kernel)))
            }
            Body::Chain(stages) => Body::Chain(
                stages
                    .iter()
                    .map(|s| s.compile_with(engine))
                    .collect::<Vec<_>>()
                    .into(),
            ),
            Body::Seeded { seed, stage } => Body::Seeded {
                seed: seed.clone(),
                stage: Arc::new(stage.compile_with(engine)),
            },
        };
        Functional {
            body,
            bindings: Arc::clone(&self.bindings),
            partial: self.partial,
            compiled: true,
        }
    }

    /// Vectorize over axis 0 of the leading argument with `engine`
    pub fn vmap_with(&self, engine: &dyn Engine) -> Functional {
        engine.vmap(self)
    }
}

impl fmt::Debug for Functional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Functional")
            .field("name", &self.name())
            .field("bindings", &self.bindings.keys().collect::<Vec<_>>())
            .field("partial", &self.partial)
            .field("compiled", &self.compiled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::kernel;
    use crate::{args, kwargs};

    fn cube_plus() -> Arc<dyn Kernel> {
        kernel(Signature::new("k").required("x").required("y"), |args| {
            let x = args.array("x")?;
            let y = args.f64("y")?;
            Ok(x.mapv(|v| v.powi(3) + y).into())
        })
    }

    #[test]
    fn test_keyword_only_call_defers() {
        let k = Functional::from_kernel(cube_plus(), true);
        let applied = k.apply(args![; y = 1.0]).unwrap();
        assert!(applied.is_deferred());
        let bound = applied.into_functional().unwrap();
        assert_eq!(bound.bindings().len(), 1);
        assert!(k.bindings().is_empty(), "original must stay unbound");
    }

    #[test]
    fn test_non_partial_runs_immediately() {
        let k = Functional::from_kernel(cube_plus(), false);
        let err = k.apply(args![; y = 1.0]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { ref param, .. } if param == "x"));
        assert!(matches!(k.bind(kwargs! { y = 1.0 }), Err(Error::NotPartial(_))));
    }

    #[test]
    fn test_deferred_into_value_names_missing_param() {
        let k = Functional::from_kernel(cube_plus(), true);
        let err = k.call(args![; y = 1.0]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { ref param, .. } if param == "x"));
    }

    #[test]
    fn test_fully_keyword_bound_call_asks_for_data() {
        let k = Functional::from_kernel(cube_plus(), true);
        let bound = k.bind(kwargs! { x = vec![1.0], y = 1.0 }).unwrap();
        let err = bound.run().unwrap_err();
        assert!(matches!(err, Error::MissingData { ref kernel } if kernel == "k"));
        assert!(err.to_string().contains("keywords only"));
        let err = k.call(args![; x = vec![1.0], y = 1.0]).unwrap_err();
        assert!(matches!(err, Error::MissingData { .. }));
    }

    #[test]
    fn test_bound_then_called() {
        let k = Functional::from_kernel(cube_plus(), true);
        let bound = k.bind(kwargs! { y = 1.0 }).unwrap();
        let out = bound.call1(vec![1.0, 2.0]).unwrap().into_array().unwrap();
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![2.0, 9.0]);
    }

    #[test]
    fn test_rebinding_accumulates_and_overrides() {
        let k = Functional::from_kernel(cube_plus(), true);
        let once = k.bind(kwargs! { y = 1.0 }).unwrap();
        let twice = once.bind(kwargs! { y = 5.0 }).unwrap();
        assert_eq!(twice.call1(1.0).unwrap().as_f64().unwrap(), 6.0);
        assert_eq!(once.call1(1.0).unwrap().as_f64().unwrap(), 2.0);
    }

    #[test]
    fn test_debug_lists_binding_names() {
        let k = Functional::from_kernel(cube_plus(), true);
        let bound = k.bind(kwargs! { y = 1.0 }).unwrap();
        let repr = format!("{bound:?}");
        assert!(repr.contains("\"y\""));
        assert!(repr.contains("partial: true"));
    }
}
