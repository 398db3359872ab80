//! Shared helpers for the workspace integration tests.

use std::sync::Once;

use polar::{compile, CompileError};

static INIT: Once = Once::new();

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Compile `source` and evaluate it at `theta`, panicking on compile errors.
pub fn radius_at(source: &str, theta: f64) -> f64 {
    match compile(source) {
        Ok(compiled) => compiled.evaluate(theta),
        Err(error) => panic!("{source:?} failed to compile: {error}"),
    }
}

/// The compile error for `source`, panicking if it compiles.
pub fn compile_error(source: &str) -> CompileError {
    match compile(source) {
        Ok(compiled) => panic!("{source:?} unexpectedly compiled to {compiled}"),
        Err(error) => error,
    }
}

/// Absolute-or-relative closeness for comparing evaluated radii.
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
