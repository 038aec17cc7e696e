//! Shared utilities for integration tests

#![allow(dead_code)]

use stamox_core::Value;

/// Default tolerance for single-precision reference tables
pub const REFERENCE_TOL: f64 = 1e-6;

/// Flatten an array value into a vector
pub fn to_vec(value: Value) -> Vec<f64> {
    value
        .into_array()
        .expect("array result")
        .iter()
        .copied()
        .collect()
}

/// Assert two vectors are equal within an absolute tolerance
pub fn assert_all_close(actual: &[f64], expected: &[f64], atol: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() <= atol, "mismatch at index {i}: {a} vs {e} (atol {atol})");
    }
}

/// Sample mean and unbiased sample variance
pub fn moments(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
}
