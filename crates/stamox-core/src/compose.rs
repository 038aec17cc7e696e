//! Left-to-right composition protocol
//!
//! [`Composable::then`] is the explicit form; `>>` is the infix sugar.
//!
//! | left | right | result |
//! |---|---|---|
//! | `Functional` | `Functional` | `Functional` running left, then right |
//! | `Pipeable` | `Functional` | `Functional` seeded with the value |
//! | `StateFunc` | `Functional` | `Functional` seeded with the state |
//!
//! A `Functional >> Pipeable` has no implementation and is rejected by the
//! compiler. Each stage receives the previous stage's result as its leading
//! positional argument; its own stored bindings still apply.
//!
//! ```rust
//! use stamox_core::{kernel, make_partial_pipe, make_pipe, Signature, Value, kwargs};
//!
//! let square = make_pipe(kernel(Signature::new("f").required("x"), |a| {
//!     Ok(a.array("x")?.mapv(|v| v * v).into())
//! }));
//! let add = make_partial_pipe(kernel(
//!     Signature::new("add").required("x").required("y"),
//!     |a| { let y = a.f64("y")?; Ok(a.array("x")?.mapv(|v| v + y).into()) },
//! ));
//!
//! let h = square >> add.bind(kwargs! { y = 1.0 }).unwrap();
//! let out = h.call1(vec![1.0, 2.0]).unwrap().into_array().unwrap();
//! assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![2.0, 5.0]);
//! ```

use crate::error::Result;
use crate::functional::Functional;
use crate::kernel::kernel;
use crate::pipe::make_pipe;
use crate::signature::Signature;
use crate::state::StateFunc;
use crate::value::Value;
use std::ops::Shr;
use tracing::debug;

/// Types that can lead a pipeline
pub trait Composable {
    /// Compose with a following stage
    fn then(self, next: Functional) -> Functional;
}

impl Composable for Functional {
    fn then(self, next: Functional) -> Functional {
        debug!(left = %self.name(), right = %next.name(), "composing stages");
        let mut stages = Vec::with_capacity(self.stages() + next.stages());
        for side in [self, next] {
            match side.chain_stages() {
                Some(inner) => stages.extend(inner.iter().cloned()),
                None => stages.push(side),
            }
        }
        Functional::chain(stages)
    }
}

/// A concrete value that seeds a pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeable {
    value: Value,
}

impl Pipeable {
    /// Wrap a value
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The wrapped value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Unwrap
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Composable for Pipeable {
    fn then(self, next: Functional) -> Functional {
        Functional::seeded(self.value, next)
    }
}

impl Composable for StateFunc {
    fn then(self, next: Functional) -> Functional {
        Functional::seeded(Value::State(self), next)
    }
}

impl Shr<Functional> for Functional {
    type Output = Functional;

    fn shr(self, rhs: Functional) -> Functional {
        self.then(rhs)
    }
}

impl Shr<&Functional> for Functional {
    type Output = Functional;

    fn shr(self, rhs: &Functional) -> Functional {
        self.then(rhs.clone())
    }
}

impl Shr<Functional> for Pipeable {
    type Output = Functional;

    fn shr(self, rhs: Functional) -> Functional {
        self.then(rhs)
    }
}

impl Shr<Functional> for StateFunc {
    type Output = Functional;

    fn shr(self, rhs: Functional) -> Functional {
        self.then(rhs)
    }
}

/// Stage that extracts one field from an incoming state
pub fn select(field: impl Into<String>) -> Functional {
    let field = field.into();
    let name = format!("select[{field}]");
    make_pipe(kernel(Signature::new(name).required("state"), move |args| {
        args.state("state")?.get(&field).cloned()
    }))
}

impl Functional {
    /// Consume one field of an incoming state with this stage
    pub fn on_field(self, field: impl Into<String>) -> Functional {
        select(field).then(self)
    }
}

/// Evaluate `stages` left to right on `value`
pub fn pipe_through(value: impl Into<Value>, stages: &[Functional]) -> Result<Value> {
    stages
        .iter()
        .try_fold(value.into(), |acc, stage| stage.call1(acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::pipe::make_partial_pipe;
    use crate::{args, kwargs};

    fn square() -> Functional {
        make_pipe(kernel(Signature::new("f").required("x"), |a| {
            Ok(a.array("x")?.mapv(|v| v * v).into())
        }))
    }

    fn inc() -> Functional {
        make_pipe(kernel(Signature::new("g").required("x"), |a| {
            Ok(a.array("x")?.mapv(|v| v + 1.0).into())
        }))
    }

    fn cube_plus() -> Functional {
        make_partial_pipe(kernel(
            Signature::new("k").required("x").required("y"),
            |a| {
                let y = a.f64("y")?;
                Ok(a.array("x")?.mapv(|v| v.powi(3) + y).into())
            },
        ))
    }

    fn to_vec(v: Value) -> Vec<f64> {
        v.into_array().unwrap().iter().copied().collect()
    }

    #[test]
    fn test_chain_of_three() {
        let h = square() >> inc() >> cube_plus().bind(kwargs! { y = 1.0 }).unwrap();
        assert_eq!(h.stages(), 3);
        assert_eq!(h.name(), "f >> g >> k");
        assert_eq!(to_vec(h.call1(vec![1.0, 2.0, 3.0]).unwrap()), vec![9.0, 126.0, 1001.0]);
    }

    #[test]
    fn test_chain_flattens_both_sides() {
        let left = square() >> inc();
        let right = inc() >> square();
        let h = left >> right;
        assert_eq!(h.stages(), 4);
        assert_eq!(h.chain_stages().map(<[Functional]>::len), Some(4));
    }

    #[test]
    fn test_pipeable_seeds_call() {
        let h = Pipeable::new(vec![2.0]) >> square() >> inc();
        assert_eq!(to_vec(h.run().unwrap()), vec![5.0]);
    }

    #[test]
    fn test_pipeable_forwards_keywords_to_first_stage() {
        let h = Pipeable::new(vec![1.0]) >> cube_plus();
        assert_eq!(to_vec(h.call(args![; y = 2.0]).unwrap()), vec![3.0]);
    }

    #[test]
    fn test_state_into_array_stage_fails_fast() {
        let state = StateFunc::builder("test").field("statistic", vec![0.5]).build();
        let err = (state >> square()).run().unwrap_err();
        match err {
            Error::TypeMismatch { expected, found, .. } => {
                assert_eq!(expected, "array");
                assert_eq!(found, "state");
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_on_field_consumes_declared_field() {
        let state = StateFunc::builder("test").field("statistic", vec![3.0]).build();
        let out = (state.clone() >> square().on_field("statistic")).run().unwrap();
        let manual = square().call1(state.statistic().unwrap().clone()).unwrap();
        assert_eq!(out, manual);
    }

    #[test]
    fn test_select_unknown_field() {
        let state = StateFunc::builder("test").field("statistic", 1.0).build();
        let err = (state >> select("p_value")).run().unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_failure_aborts_pipeline() {
        let h = square() >> cube_plus() >> inc();
        // `k` never receives `y`
        let err = h.call1(vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { ref param, .. } if param == "y"));
    }

    #[test]
    fn test_pipe_through_matches_chain() {
        let stages = [square(), inc()];
        let direct = pipe_through(vec![3.0], &stages).unwrap();
        let chained = (square() >> inc()).call1(vec![3.0]).unwrap();
        assert_eq!(direct, chained);
    }
}
