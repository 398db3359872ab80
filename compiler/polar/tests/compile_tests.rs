use std::f64::consts::{FRAC_PI_2, PI};

use polar::{compile, CompileError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn value(source: &str, theta: f64) -> f64 {
    compile(source)
        .unwrap_or_else(|e| panic!("{source}: {e}"))
        .evaluate(theta)
}

#[test]
fn test_known_values() {
    assert_eq!(value("2^3^2", 0.0), 512.0);
    assert_eq!(value("2+3*4", 0.0), 14.0);
    assert_eq!(value("-2^2", 0.0), -4.0);
    assert!((value("pi", 0.0) - 3.14159265358979).abs() < 1e-12);
    assert_eq!(value("theta", 1.5), 1.5);
    assert!((value("sin(theta)", FRAC_PI_2) - 1.0).abs() < 1e-12);
}

#[test]
fn test_radius_prefix_is_equivalent() {
    let plain = compile("theta").unwrap();
    for source in ["r = theta", "r=theta", "  r =theta  "] {
        let prefixed = compile(source).unwrap();
        assert_eq!(prefixed.ast(), plain.ast(), "{source}");
        assert_eq!(prefixed.evaluate(0.25), plain.evaluate(0.25));
    }
}

#[test]
fn test_rejected_sources() {
    for source in ["2**3", "(1+2", "1 2", "foo(1)", "", "   ", "r =", "theta theta", "sin(1, 2)"] {
        assert!(compile(source).is_err(), "{source:?} should be rejected");
    }
}

#[test]
fn test_empty_input_message() {
    let err = compile("").unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
    assert_eq!(err.to_string(), "unexpected token \"EOF\" at position 0");
}

#[test]
fn test_rose_curve() {
    let compiled = compile("r = 200*sin(2*theta)").unwrap();
    let f = compiled.function();
    assert!(f(0.0).abs() < 1e-9);
    assert!((f(PI / 4.0) - 200.0).abs() < 1e-9);
}

proptest! {
    #[test]
    fn prop_compile_is_deterministic(a in -1.0e6f64..1.0e6, b in 0.1f64..100.0, theta in -10.0f64..10.0) {
        let source = format!("{a} * cos({b} * theta) + sqrt(abs(theta))");
        let first = compile(&source).unwrap();
        let second = compile(&source).unwrap();
        prop_assert_eq!(first.ast(), second.ast());
        prop_assert_eq!(first.evaluate(theta).to_bits(), second.evaluate(theta).to_bits());
    }

    #[test]
    fn prop_evaluation_is_idempotent(theta in proptest::num::f64::ANY) {
        let compiled = compile("109*sin(4*theta)+271 - theta^2 / (1 + exp(theta))").unwrap();
        let f = compiled.function();
        prop_assert_eq!(f(theta).to_bits(), f(theta).to_bits());
        prop_assert_eq!(compiled.evaluate(theta).to_bits(), f(theta).to_bits());
    }

    #[test]
    fn prop_integers_evaluate_to_themselves(n in 0u32..1_000_000) {
        prop_assert_eq!(value(&n.to_string(), 0.0), f64::from(n));
    }
}
