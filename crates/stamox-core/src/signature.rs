//! Kernel calling conventions and argument binding
//!
//! A [`Signature`] is the fixed, introspectable parameter list of a kernel.
//! Call-time [`Args`] plus any keywords stored by partial application are
//! resolved against it into a [`Bound`] argument set, in parameter order.
//!
//! # Binding rules
//!
//! 1. Stored keywords are applied first.
//! 2. Call-time keywords replace stored keywords of the same name.
//! 3. Positional arguments fill parameters left to right and replace stored
//!    keywords; passing a parameter both positionally and by keyword in the
//!    same call is an error.
//! 4. Remaining parameters take their defaults; a parameter without a
//!    default is a missing-argument error.

use crate::error::{Error, Result};
use crate::state::StateFunc;
use crate::value::{Array, PrngKey, Value};
use std::collections::{BTreeMap, HashMap};

/// Keyword arguments, ordered by name
pub type Keywords = BTreeMap<String, Value>;

/// One positional-or-keyword parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    default: Option<Value>,
}

impl Param {
    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default value, if the parameter is optional
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the parameter must be supplied
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Ordered parameter list of a kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    params: Vec<Param>,
}

impl Signature {
    /// Create an empty signature for the kernel `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Append a required parameter
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: None,
        });
        self
    }

    /// Append an optional parameter with a default
    pub fn optional(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.params.push(Param {
            name: name.into(),
            default: Some(default.into()),
        });
        self
    }

    /// Kernel name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether the kernel takes no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Position of a parameter by linear scan
    pub fn position(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// First required parameter not covered by `bindings`
    pub fn first_unbound(&self, bindings: &Keywords) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.is_required() && !bindings.contains_key(&p.name))
            .map(|p| p.name.as_str())
    }

    /// Bind arguments using a linear parameter lookup
    pub fn bind(&self, bindings: &Keywords, args: Args) -> Result<Bound<'_>> {
        self.bind_indexed(bindings, args, None)
    }

    /// Bind arguments, resolving names through a precomputed plan when given
    pub fn bind_indexed<'a>(
        &'a self,
        bindings: &Keywords,
        args: Args,
        plan: Option<&'a BindingPlan>,
    ) -> Result<Bound<'a>> {
        let Args {
            positional,
            keywords,
        } = args;
        let n = self.params.len();
        if positional.len() > n {
            return Err(Error::TooManyArguments {
                kernel: self.name.clone(),
                expected: n,
                actual: positional.len(),
            });
        }

        let index = |name: &str| -> Result<usize> {
            plan.map_or_else(|| self.position(name), |p| p.index_of(name))
                .ok_or_else(|| Error::UnexpectedArgument {
                    kernel: self.name.clone(),
                    param: name.to_string(),
                })
        };

        let mut slots: Vec<Option<Value>> = vec![None; n];
        for (name, value) in bindings {
            slots[index(name)?] = Some(value.clone());
        }

        let mut explicit = vec![false; n];
        for (name, value) in keywords {
            let i = index(&name)?;
            slots[i] = Some(value);
            explicit[i] = true;
        }

        for (i, value) in positional.into_iter().enumerate() {
            if explicit[i] {
                return Err(Error::DuplicateArgument {
                    kernel: self.name.clone(),
                    param: self.params[i].name.clone(),
                });
            }
            slots[i] = Some(value);
        }

        let values = slots
            .into_iter()
            .zip(&self.params)
            .map(|(slot, param)| {
                slot.or_else(|| param.default.clone())
                    .ok_or_else(|| Error::MissingArgument {
                        kernel: self.name.clone(),
                        param: param.name.clone(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Bound {
            signature: self,
            plan,
            values,
        })
    }
}

/// Precomputed parameter-name index for a signature
#[derive(Debug, Clone)]
pub struct BindingPlan {
    index: HashMap<String, usize>,
}

impl BindingPlan {
    /// Build the index for `signature`
    pub fn new(signature: &Signature) -> Self {
        let index = signature
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.clone(), i))
            .collect();
        Self { index }
    }

    /// Position of a parameter
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// Call-time arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional arguments, leading data argument first
    pub positional: Vec<Value>,
    /// Keyword arguments
    pub keywords: Keywords,
}

impl Args {
    /// Empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// A single positional argument
    pub fn positional(value: impl Into<Value>) -> Self {
        Self::new().arg(value)
    }

    /// Keyword-only arguments
    pub fn keywords(keywords: Keywords) -> Self {
        Self {
            positional: Vec::new(),
            keywords,
        }
    }

    /// Append a positional argument
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Set a keyword argument
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.insert(name.into(), value.into());
        self
    }

    /// Insert `value` as the leading positional argument
    pub fn with_leading(mut self, value: Value) -> Self {
        self.positional.insert(0, value);
        self
    }

    /// Whether a positional (data) argument is present
    pub fn has_positional(&self) -> bool {
        !self.positional.is_empty()
    }
}

/// Arguments resolved against a signature
#[derive(Debug, Clone)]
pub struct Bound<'a> {
    signature: &'a Signature,
    plan: Option<&'a BindingPlan>,
    values: Vec<Value>,
}

impl<'a> Bound<'a> {
    /// The signature these arguments were bound against
    pub fn signature(&self) -> &Signature {
        self.signature
    }

    /// Bound values in parameter order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Look up a bound value by parameter name
    pub fn get(&self, name: &str) -> Result<&Value> {
        let i = self
            .plan
            .map_or_else(|| self.signature.position(name), |p| p.index_of(name))
            .ok_or_else(|| Error::UnexpectedArgument {
                kernel: self.signature.name.clone(),
                param: name.to_string(),
            })?;
        Ok(&self.values[i])
    }

    /// Optional argument; `None` when the bound value is absent
    pub fn optional(&self, name: &str) -> Result<Option<&Value>> {
        let value = self.get(name)?;
        Ok((!value.is_none()).then_some(value))
    }

    fn context(&self, name: &str) -> String {
        format!("`{}` argument `{name}`", self.signature.name)
    }

    /// Array argument
    pub fn array(&self, name: &str) -> Result<Array> {
        self.get(name)?.as_array().map_err(|e| e.in_context(self.context(name)))
    }

    /// Float argument
    pub fn f64(&self, name: &str) -> Result<f64> {
        self.get(name)?.as_f64().map_err(|e| e.in_context(self.context(name)))
    }

    /// Boolean argument
    pub fn bool(&self, name: &str) -> Result<bool> {
        self.get(name)?.as_bool().map_err(|e| e.in_context(self.context(name)))
    }

    /// Integer argument
    pub fn i64(&self, name: &str) -> Result<i64> {
        self.get(name)?.as_i64().map_err(|e| e.in_context(self.context(name)))
    }

    /// Non-negative integer argument
    pub fn usize(&self, name: &str) -> Result<usize> {
        self.get(name)?.as_usize().map_err(|e| e.in_context(self.context(name)))
    }

    /// String argument
    pub fn str(&self, name: &str) -> Result<&str> {
        self.get(name)?.as_str().map_err(|e| e.in_context(self.context(name)))
    }

    /// Shape argument
    pub fn shape(&self, name: &str) -> Result<Vec<usize>> {
        self.get(name)?.as_shape().map_err(|e| e.in_context(self.context(name)))
    }

    /// Random key argument
    pub fn key(&self, name: &str) -> Result<PrngKey> {
        self.get(name)?.as_key().map_err(|e| e.in_context(self.context(name)))
    }

    /// State argument
    pub fn state(&self, name: &str) -> Result<&StateFunc> {
        self.get(name)?.as_state().map_err(|e| e.in_context(self.context(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig() -> Signature {
        Signature::new("pexp")
            .required("q")
            .optional("rate", 1.0)
            .optional("lower_tail", true)
    }

    fn kw(pairs: &[(&str, Value)]) -> Keywords {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_defaults_fill_missing() {
        let sig = sig();
        let bound = sig.bind(&Keywords::new(), Args::positional(0.5)).unwrap();
        assert_eq!(bound.f64("q").unwrap(), 0.5);
        assert_eq!(bound.f64("rate").unwrap(), 1.0);
        assert!(bound.bool("lower_tail").unwrap());
    }

    #[test]
    fn test_call_time_keyword_beats_stored() {
        let sig = sig();
        let stored = kw(&[("rate", Value::Float(2.0))]);
        let args = Args::positional(0.5).kwarg("rate", 3.0);
        let bound = sig.bind(&stored, args).unwrap();
        assert_eq!(bound.f64("rate").unwrap(), 3.0);
    }

    #[test]
    fn test_positional_beats_stored() {
        let sig = sig();
        let stored = kw(&[("rate", Value::Float(2.0))]);
        let bound = sig.bind(&stored, Args::positional(0.5).arg(4.0)).unwrap();
        assert_eq!(bound.f64("rate").unwrap(), 4.0);
    }

    #[test]
    fn test_missing_required() {
        let sig = sig();
        let err = sig.bind(&Keywords::new(), Args::new().kwarg("rate", 2.0)).unwrap_err();
        match err {
            Error::MissingArgument { kernel, param } => {
                assert_eq!(kernel, "pexp");
                assert_eq!(param, "q");
            }
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_keyword() {
        let sig = sig();
        let err = sig
            .bind(&Keywords::new(), Args::positional(0.5).kwarg("scale", 2.0))
            .unwrap_err();
        assert!(matches!(err, Error::UnexpectedArgument { ref param, .. } if param == "scale"));
    }

    #[test]
    fn test_duplicate_in_one_call() {
        let sig = sig();
        let err = sig
            .bind(&Keywords::new(), Args::positional(0.5).arg(2.0).kwarg("rate", 3.0))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateArgument { ref param, .. } if param == "rate"));
    }

    #[test]
    fn test_too_many_positional() {
        let sig = sig();
        let args = Args::positional(0.5).arg(1.0).arg(true).arg(false);
        let err = sig.bind(&Keywords::new(), args).unwrap_err();
        assert!(matches!(err, Error::TooManyArguments { expected: 3, actual: 4, .. }));
    }

    #[test]
    fn test_plan_matches_linear_lookup() {
        let sig = sig();
        let plan = BindingPlan::new(&sig);
        let stored = kw(&[("lower_tail", Value::Bool(false))]);
        let linear = sig.bind(&stored, Args::positional(0.5).kwarg("rate", 2.0)).unwrap();
        let planned = sig
            .bind_indexed(&stored, Args::positional(0.5).kwarg("rate", 2.0), Some(&plan))
            .unwrap();
        assert_eq!(linear.values(), planned.values());
    }

    #[test]
    fn test_typed_accessor_context() {
        let sig = sig();
        let bound = sig.bind(&Keywords::new(), Args::positional(true)).unwrap();
        let err = bound.array("q").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Type mismatch in `pexp` argument `q`: expected array, found bool"
        );
    }

    #[test]
    fn test_first_unbound() {
        let sig = sig();
        assert_eq!(sig.first_unbound(&Keywords::new()), Some("q"));
        let stored = kw(&[("q", Value::Float(1.0))]);
        assert_eq!(sig.first_unbound(&stored), None);
    }
}
