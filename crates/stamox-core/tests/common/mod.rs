//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use stamox_core::{kernel, make_partial_pipe, make_pipe, Functional, Signature, Value};

pub const EPSILON: f64 = 1e-10;

/// `f(x) = x^2`
pub fn square() -> Functional {
    make_pipe(kernel(Signature::new("f").required("x"), |a| {
        Ok(a.array("x")?.mapv(|v| v * v).into())
    }))
}

/// `g(x) = x + 1`
pub fn inc() -> Functional {
    make_pipe(kernel(Signature::new("g").required("x"), |a| {
        Ok(a.array("x")?.mapv(|v| v + 1.0).into())
    }))
}

/// `k(x, y) = x^3 + y`, partially bindable
pub fn cube_plus() -> Functional {
    make_partial_pipe(kernel(
        Signature::new("k").required("x").required("y"),
        |a| {
            let y = a.f64("y")?;
            Ok(a.array("x")?.mapv(|v| v.powi(3) + y).into())
        },
    ))
}

/// `affine(x, scale=1, shift=0) = scale * x + shift`, partially bindable
pub fn affine() -> Functional {
    make_partial_pipe(kernel(
        Signature::new("affine")
            .required("x")
            .optional("scale", 1.0)
            .optional("shift", 0.0),
        |a| {
            let scale = a.f64("scale")?;
            let shift = a.f64("shift")?;
            Ok(a.array("x")?.mapv(|v| scale * v + shift).into())
        },
    ))
}

/// Flatten an array value into a vector
pub fn to_vec(value: Value) -> Vec<f64> {
    value
        .into_array()
        .expect("array result")
        .iter()
        .copied()
        .collect()
}

/// Assert two vectors are equal within tolerance
pub fn assert_vectors_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() <= tol * (1.0 + e.abs()),
            "mismatch at index {i}: {a} vs {e}"
        );
    }
}
