//! Dynamic values passed between pipeline stages
//!
//! Every kernel receives and returns [`Value`]s. Arrays are shared,
//! copy-on-write `ndarray` buffers, so handing a value to the next stage or
//! seeding a [`Pipeable`](crate::Pipeable) with it never copies the data.

use crate::error::{Error, Result};
use crate::state::StateFunc;
use ndarray::{ArcArray, Array1, Array2, ArrayD, IxDyn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shared n-dimensional array of `f64`
pub type Array = ArcArray<f64, IxDyn>;

/// Seed for the keyed random kernels
///
/// Identical keys always yield identical samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrngKey(u64);

impl PrngKey {
    /// Create a key from a seed
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// The raw seed
    pub const fn seed(&self) -> u64 {
        self.0
    }

    /// Derive `n` independent keys from this one
    ///
    /// The child seeds are the first `n` draws of a ChaCha stream seeded by
    /// this key.
    pub fn split(&self, n: usize) -> Vec<PrngKey> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.0);
        (0..n).map(|_| PrngKey(rng.gen())).collect()
    }
}

/// Dynamic value type for kernel arguments and results
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent optional argument
    None,
    /// Boolean flag
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// String option such as a method name
    Str(String),
    /// Array shape
    Shape(Vec<usize>),
    /// Random key
    Key(PrngKey),
    /// Shared array
    Array(Array),
    /// Named-field result record
    State(StateFunc),
}

impl Value {
    /// Name of this value's kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Shape(_) => "shape",
            Value::Key(_) => "key",
            Value::Array(_) => "array",
            Value::State(_) => "state",
        }
    }

    /// Check for the absent value
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Get as an array; scalars become one-element arrays
    pub fn as_array(&self) -> Result<Array> {
        match self {
            Value::Array(a) => Ok(a.clone()),
            Value::Float(x) => Ok(scalar_array(*x)),
            Value::Int(i) => Ok(scalar_array(*i as f64)),
            other => Err(Error::type_mismatch("value", "array", other.kind())),
        }
    }

    /// Get as a float; one-element arrays are accepted
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Float(x) => Ok(*x),
            Value::Int(i) => Ok(*i as f64),
            Value::Array(a) if a.len() == 1 => Ok(a.iter().next().copied().unwrap_or(f64::NAN)),
            other => Err(Error::type_mismatch("value", "float", other.kind())),
        }
    }

    /// Get as a boolean
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("value", "bool", other.kind())),
        }
    }

    /// Get as a signed integer; integral floats are accepted
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Float(x) if x.fract() == 0.0 && x.is_finite() => Ok(*x as i64),
            other => Err(Error::type_mismatch("value", "int", other.kind())),
        }
    }

    /// Get as a non-negative integer
    pub fn as_usize(&self) -> Result<usize> {
        let i = self.as_i64()?;
        usize::try_from(i)
            .map_err(|_| Error::InvalidParameter(format!("expected a non-negative integer, got {i}")))
    }

    /// Get as a string
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(Error::type_mismatch("value", "string", other.kind())),
        }
    }

    /// Get as a shape; a single integer is a one-dimensional shape
    pub fn as_shape(&self) -> Result<Vec<usize>> {
        match self {
            Value::Shape(s) => Ok(s.clone()),
            Value::Int(_) | Value::Float(_) => Ok(vec![self.as_usize()?]),
            other => Err(Error::type_mismatch("value", "shape", other.kind())),
        }
    }

    /// Get as a random key
    pub fn as_key(&self) -> Result<PrngKey> {
        match self {
            Value::Key(k) => Ok(*k),
            other => Err(Error::type_mismatch("value", "key", other.kind())),
        }
    }

    /// Get as a state record
    pub fn as_state(&self) -> Result<&StateFunc> {
        match self {
            Value::State(s) => Ok(s),
            other => Err(Error::type_mismatch("value", "state", other.kind())),
        }
    }

    /// Consume into a state record
    pub fn into_state(self) -> Result<StateFunc> {
        match self {
            Value::State(s) => Ok(s),
            other => Err(Error::type_mismatch("value", "state", other.kind())),
        }
    }

    /// Consume into an array without copying array data
    pub fn into_array(self) -> Result<Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => other.as_array(),
        }
    }
}

fn scalar_array(x: f64) -> Array {
    ArrayD::from_elem(IxDyn(&[1]), x).into_shared()
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<usize>> for Value {
    fn from(shape: Vec<usize>) -> Self {
        Value::Shape(shape)
    }
}

impl From<PrngKey> for Value {
    fn from(key: PrngKey) -> Self {
        Value::Key(key)
    }
}

impl From<StateFunc> for Value {
    fn from(state: StateFunc) -> Self {
        Value::State(state)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<ArrayD<f64>> for Value {
    fn from(a: ArrayD<f64>) -> Self {
        Value::Array(a.into_shared())
    }
}

impl From<Array1<f64>> for Value {
    fn from(a: Array1<f64>) -> Self {
        Value::Array(a.into_dyn().into_shared())
    }
}

impl From<Array2<f64>> for Value {
    fn from(a: Array2<f64>) -> Self {
        Value::Array(a.into_dyn().into_shared())
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Array1::from(v).into()
    }
}

impl From<&[f64]> for Value {
    fn from(v: &[f64]) -> Self {
        Array1::from(v.to_vec()).into()
    }
}

impl<const N: usize> From<[f64; N]> for Value {
    fn from(v: [f64; N]) -> Self {
        Array1::from(v.to_vec()).into()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}
