use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use client_core::{
    service::{DEFAULT_MODEL_INFO_PATH, DEFAULT_PREDICT_PATH},
    ControllerConfig, ServiceConfig, ValidationRules,
};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "lfpr.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub predict_path: String,
    pub model_info_path: String,
    pub year_min: i64,
    pub year_max: i64,
    pub gate_submit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            service_url: "http://127.0.0.1:5000".into(),
            predict_path: DEFAULT_PREDICT_PATH.into(),
            model_info_path: DEFAULT_MODEL_INFO_PATH.into(),
            year_min: rules.year_min,
            year_max: rules.year_max,
            gate_submit: false,
        }
    }
}

impl Settings {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            base_url: self.service_url.clone(),
            predict_path: self.predict_path.clone(),
            model_info_path: self.model_info_path.clone(),
        }
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            rules: ValidationRules {
                year_min: self.year_min,
                year_max: self.year_max,
            },
            gate_submit_on_validation: self.gate_submit,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    service_url: Option<String>,
    predict_path: Option<String>,
    model_info_path: Option<String>,
    year_min: Option<i64>,
    year_max: Option<i64>,
    gate_submit: Option<bool>,
}

/// Defaults, then the config file, then environment overrides.
///
/// An explicitly named config file must exist; the default `lfpr.toml` is
/// optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.service_url {
        settings.service_url = v;
    }
    if let Some(v) = file_cfg.predict_path {
        settings.predict_path = v;
    }
    if let Some(v) = file_cfg.model_info_path {
        settings.model_info_path = v;
    }
    if let Some(v) = file_cfg.year_min {
        settings.year_min = v;
    }
    if let Some(v) = file_cfg.year_max {
        settings.year_max = v;
    }
    if let Some(v) = file_cfg.gate_submit {
        settings.gate_submit = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("LFPR_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = var("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = var("APP__PREDICT_PATH") {
        settings.predict_path = v;
    }
    if let Some(v) = var("APP__MODEL_INFO_PATH") {
        settings.model_info_path = v;
    }

    if let Some(v) = var("APP__YEAR_MIN") {
        if let Ok(parsed) = v.trim().parse::<i64>() {
            settings.year_min = parsed;
        }
    }
    if let Some(v) = var("APP__YEAR_MAX") {
        if let Ok(parsed) = v.trim().parse::<i64>() {
            settings.year_max = parsed;
        }
    }

    if let Some(v) = var("APP__GATE_SUBMIT") {
        match v.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => settings.gate_submit = true,
            "0" | "false" | "no" | "off" => settings.gate_submit = false,
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
