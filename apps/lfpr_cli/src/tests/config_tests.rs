use super::{apply_env, apply_file, load_settings, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_reference_deployment() {
    let settings = Settings::default();
    assert_eq!(settings.service_url, "http://127.0.0.1:5000");
    assert_eq!(settings.predict_path, "/predict");
    assert_eq!(settings.model_info_path, "/model_info");
    assert_eq!((settings.year_min, settings.year_max), (2550, 2580));
    assert!(!settings.gate_submit);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
service_url = "https://lfpr.example.org"
predict_path = "/api/predict"
year_max = 2590
gate_submit = true
"#,
    )
    .expect("apply file");

    assert_eq!(settings.service_url, "https://lfpr.example.org");
    assert_eq!(settings.predict_path, "/api/predict");
    assert_eq!(settings.model_info_path, "/model_info");
    assert_eq!(settings.year_max, 2590);
    assert!(settings.gate_submit);
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "servce_url = \"typo\"").is_err());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "service_url = \"http://from-file\"").expect("apply file");
    apply_env(
        &mut settings,
        env_from(&[
            ("LFPR_SERVICE_URL", "http://from-short-env"),
            ("APP__SERVICE_URL", "http://from-app-env"),
            ("APP__YEAR_MIN", " 2540 "),
            ("APP__GATE_SUBMIT", "yes"),
        ]),
    );

    assert_eq!(settings.service_url, "http://from-app-env");
    assert_eq!(settings.year_min, 2540);
    assert!(settings.gate_submit);
}

#[test]
fn malformed_env_values_are_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__YEAR_MAX", "soon"), ("APP__GATE_SUBMIT", "maybe")]),
    );
    assert_eq!(settings, Settings::default());
}

#[test]
fn settings_feed_controller_and_service_configs() {
    let settings = Settings {
        year_min: 2500,
        gate_submit: true,
        ..Settings::default()
    };
    let controller = settings.controller_config();
    assert_eq!(controller.rules.year_min, 2500);
    assert!(controller.gate_submit_on_validation);
    assert_eq!(
        settings.service_config().predict_url(),
        "http://127.0.0.1:5000/predict"
    );
}

#[test]
fn explicit_config_path_must_exist() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("lfpr_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");

    let missing = temp_root.join("missing.toml");
    assert!(load_settings(Some(&missing)).is_err());

    let present = temp_root.join("lfpr.toml");
    fs::write(&present, "year_min = 2551\n").expect("write config");
    let settings = load_settings(Some(&present)).expect("load");
    assert_eq!(settings.year_min, 2551);

    fs::remove_dir_all(temp_root).expect("cleanup");
}
