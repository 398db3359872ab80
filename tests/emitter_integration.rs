use std::fs;
use std::sync::Arc;

use polar::compile;
use polar_emitter::{
    load_settings, save_settings, EmitterPath, ParticleSettings, PersistenceError, Preset,
    DEFAULT_ORIGIN,
};
use polar_tests::{approx_eq, init_test_logger};
use pretty_assertions::assert_eq;

#[test]
fn test_path_follows_polar_to_cartesian_conversion() {
    init_test_logger();
    let mut path = EmitterPath::default();
    path.set_formula("r = 109*sin(4*theta)+271").unwrap();
    path.set_speed(0.1);

    let radius = compile("109*sin(4*theta)+271").unwrap().function();
    for point in path.sample(50) {
        let r = radius(point.theta);
        assert!(approx_eq(point.radius, r));
        assert!(approx_eq(point.x, r * point.theta.cos() + DEFAULT_ORIGIN.0));
        assert!(approx_eq(point.y, r * point.theta.sin() + DEFAULT_ORIGIN.1));
        assert!(approx_eq(point.emission_angle, -(point.theta + 0.1)));
    }
}

#[test]
fn test_saved_preset_reactivates_after_reload() {
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("rainbow.json");
    save_settings(&file, &Preset::Rainbow.settings()).unwrap();

    let loaded = load_settings(&file).unwrap();
    let mut fresh = EmitterPath::default();
    fresh.apply_settings(&loaded).unwrap();

    let mut reference = EmitterPath::default();
    reference.apply_settings(&Preset::Rainbow.settings()).unwrap();
    assert_eq!(fresh.sample(20), reference.sample(20));
}

#[test]
fn test_broken_formula_in_file_keeps_running_formula() {
    init_test_logger();
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("settings.json");
    fs::write(&file, r#"{ "formula": "r = 100*cosh(theta)", "drawSpeed": 0.05 }"#).unwrap();

    let mut path = EmitterPath::default();
    path.set_formula("150").unwrap();
    let active = path.formula_handle();

    let settings = load_settings(&file).unwrap();
    assert!(path.apply_settings(&settings).is_err());
    assert!(Arc::ptr_eq(&active, &path.formula_handle()));
    assert_eq!(path.speed(), 0.05);
    assert_eq!(path.step().radius, 150.0);
}

#[test]
fn test_invalid_file_is_reported_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    fs::write(&file, r#"{ "formula": "   " }"#).unwrap();
    let err = load_settings(&file).unwrap_err();
    assert!(matches!(err, PersistenceError::Invalid { .. }));
    assert!(err.to_string().contains("bad.json"));
}

#[test]
fn test_every_preset_compiles_and_validates() {
    for preset in Preset::ALL {
        let settings: ParticleSettings = preset.settings();
        settings.validate().unwrap();
        assert!(compile(&settings.formula).is_ok(), "{preset}");
        let name: Preset = preset.name().parse().unwrap();
        assert_eq!(name, preset);
    }
}
