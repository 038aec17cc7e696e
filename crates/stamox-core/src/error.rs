//! Error types for stamox pipelines
//!
//! Provides a unified error type for all stamox crates. Kernel failures,
//! argument-binding failures and composition failures all surface through
//! [`Error`] unchanged; nothing in the core recovers locally.

use thiserror::Error;

/// Core error type for pipeline and kernel operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required parameter was not supplied by the call or the stored bindings
    #[error("Missing argument: `{kernel}` requires `{param}`")]
    MissingArgument { kernel: String, param: String },

    /// Every required parameter was bound by keyword but no positional data was given
    #[error("Missing data argument: `{kernel}` was called with keywords only, so the call was deferred; pass the data positionally")]
    MissingData { kernel: String },

    /// A keyword did not name any parameter of the kernel
    #[error("Unexpected argument: `{kernel}` has no parameter `{param}`")]
    UnexpectedArgument { kernel: String, param: String },

    /// The same parameter was passed positionally and by keyword in one call
    #[error("Duplicate argument: `{kernel}` received `{param}` both positionally and by keyword")]
    DuplicateArgument { kernel: String, param: String },

    /// More positional arguments than parameters
    #[error("Too many arguments: `{kernel}` takes at most {expected} positional arguments, got {actual}")]
    TooManyArguments {
        kernel: String,
        expected: usize,
        actual: usize,
    },

    /// Keyword binding requested on a functional built without partial support
    #[error("Partial binding not supported: `{0}` was not built with a partial pipe")]
    NotPartial(String),

    /// A value had a different kind than the consumer required
    #[error("Type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A state record was asked for a field it does not carry
    #[error("Unknown field `{field}` on `{state}`; available fields: {}", .available.join(", "))]
    UnknownField {
        state: String,
        field: String,
        available: Vec<String>,
    },

    /// Dispatch lookup with an unregistered name
    #[error("Unknown method `{requested}`; valid methods: {}", .valid.join(", "))]
    UnknownMethod {
        requested: String,
        valid: Vec<String>,
    },

    /// Two registry entries share a name
    #[error("Duplicate method `{0}` in registry")]
    DuplicateMethod(String),

    /// Invalid parameter provided to a kernel
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Parameters outside a distribution's support
    #[error("Domain error: {0}")]
    Domain(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Array shape error
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for empty input
    pub fn empty_input() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a value of the wrong kind
    pub fn type_mismatch(context: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }

    /// Create an error for out-of-support distribution parameters
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    /// Replace the context of a type mismatch, leaving other errors untouched
    pub(crate) fn in_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::TypeMismatch {
                expected, found, ..
            } => Self::TypeMismatch {
                context: context.into(),
                expected,
                found,
            },
            other => other,
        }
    }
}
