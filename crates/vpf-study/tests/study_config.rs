use std::path::PathBuf;
use vpf_study::*;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vpf-study-{}-{name}", std::process::id()))
}

#[test]
fn save_then_load_yaml() {
    let path = temp_path("roundtrip.yaml");
    let mut config = StudyConfig::default();
    config.sweep_points = 17;
    config.operating_points.push(OperatingPointDef {
        description: Some("hot day".into()),
        ..OperatingPointDef::new("hold", 1_500.0, 0.35)
    });

    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, config);
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let path = temp_path("invalid.yaml");
    std::fs::write(&path, "r_over_r: 1.5\n").unwrap();
    let err = load_yaml(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, StudyError::InvalidConfig { .. }));
}

#[test]
fn malformed_yaml_is_reported() {
    let path = temp_path("malformed.yaml");
    std::fs::write(&path, "mach: [not, a, number]\n").unwrap();
    let err = load_yaml(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, StudyError::Yaml(_)));
}

#[test]
fn missing_file_is_io_error() {
    let err = load_yaml(&temp_path("does-not-exist.yaml")).unwrap_err();
    assert!(matches!(err, StudyError::Io(_)));
}

#[test]
fn invalid_config_is_not_saved() {
    let path = temp_path("not-saved.yaml");
    let config = StudyConfig {
        sweep_points: 0,
        ..StudyConfig::default()
    };
    assert!(save_yaml(&path, &config).is_err());
    assert!(!path.exists());
}
