//! Named-field result records
//!
//! Hypothesis tests and model fits return a [`StateFunc`]: an immutable
//! record of named fields (`statistic`, `p_value`, `df`, ...). A state is a
//! regular [`Value`](crate::Value), so it flows through pipelines like an
//! array does, and it can seed a pipeline itself via `>>`.

use crate::error::{Error, Result};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Field name of the test statistic
pub const STATISTIC: &str = "statistic";
/// Field name of the p-value
pub const P_VALUE: &str = "p_value";
/// Field name of the degrees of freedom
pub const DF: &str = "df";

/// Immutable named-field record produced by a kernel
#[derive(Debug, Clone, PartialEq)]
pub struct StateFunc {
    name: Arc<str>,
    fields: Arc<[(String, Value)]>,
}

impl StateFunc {
    /// Start building a state record for the kernel `name`
    pub fn builder(name: impl Into<String>) -> StateBuilder {
        StateBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Name of the kernel that produced this state
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a field by name
    pub fn get(&self, field: &str) -> Result<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::UnknownField {
                state: self.name.to_string(),
                field: field.to_string(),
                available: self.field_names().map(str::to_string).collect(),
            })
    }

    /// Check whether a field exists
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == field)
    }

    /// The test statistic
    pub fn statistic(&self) -> Result<&Value> {
        self.get(STATISTIC)
    }

    /// The p-value
    pub fn p_value(&self) -> Result<&Value> {
        self.get(P_VALUE)
    }

    /// The degrees of freedom
    pub fn df(&self) -> Result<&Value> {
        self.get(DF)
    }

    /// Field names in construction order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Fields in construction order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl fmt::Display for StateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Value::Float(x) => write!(f, "{name}={x:.6}")?,
                Value::Int(n) => write!(f, "{name}={n}")?,
                Value::Array(a) if a.len() <= 8 => write!(f, "{name}={:?}", a.iter().collect::<Vec<_>>())?,
                other => write!(f, "{name}=<{}>", other.kind())?,
            }
        }
        write!(f, ")")
    }
}

/// Builder for [`StateFunc`]
#[derive(Debug)]
pub struct StateBuilder {
    name: String,
    fields: Vec<(String, Value)>,
}

impl StateBuilder {
    /// Add a field; a repeated name replaces the earlier value
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Freeze the record
    pub fn build(self) -> StateFunc {
        StateFunc {
            name: self.name.into(),
            fields: self.fields.into(),
        }
    }
}
