//! Shared utilities for end-to-end tests

use std::sync::Once;
use stamox::Value;

pub const COMPILE_TOL: f64 = 1e-5;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn to_vec(value: &Value) -> Vec<f64> {
    value.as_array().unwrap().iter().copied().collect()
}
