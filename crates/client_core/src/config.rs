use std::{collections::HashMap, fs, path::Path};

use shared::domain::Language;

pub const SETTINGS_FILE: &str = "oracle.toml";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_HOROSCOPE_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_NATAL_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub horoscope_model: String,
    pub natal_model: String,
    pub image_model: String,
    pub language: Language,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: DEFAULT_API_BASE_URL.into(),
            horoscope_model: DEFAULT_HOROSCOPE_MODEL.into(),
            natal_model: DEFAULT_NATAL_MODEL.into(),
            image_model: DEFAULT_IMAGE_MODEL.into(),
            language: Language::default(),
        }
    }
}

/// Defaults, then `oracle.toml` in the working directory, then environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(SETTINGS_FILE));
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    match toml::from_str::<HashMap<String, String>>(&raw) {
        Ok(file_cfg) => apply_map(settings, &file_cfg),
        Err(err) => tracing::warn!("ignoring unreadable {}: {err}", path.display()),
    }
}

fn apply_map(settings: &mut Settings, file_cfg: &HashMap<String, String>) {
    if let Some(v) = file_cfg.get("api_key") {
        set_api_key(settings, v);
    }
    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("horoscope_model") {
        settings.horoscope_model = v.clone();
    }
    if let Some(v) = file_cfg.get("natal_model") {
        settings.natal_model = v.clone();
    }
    if let Some(v) = file_cfg.get("image_model") {
        settings.image_model = v.clone();
    }
    if let Some(v) = file_cfg.get("language") {
        set_language(settings, v);
    }
}

fn apply_env(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    for name in ["API_KEY", "GEMINI_API_KEY", "APP__API_KEY"] {
        if let Some(v) = var(name) {
            set_api_key(settings, &v);
        }
    }
    if let Some(v) = var("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = var("APP__HOROSCOPE_MODEL") {
        settings.horoscope_model = v;
    }
    if let Some(v) = var("APP__NATAL_MODEL") {
        settings.natal_model = v;
    }
    if let Some(v) = var("APP__IMAGE_MODEL") {
        settings.image_model = v;
    }
    if let Some(v) = var("APP__LANGUAGE") {
        set_language(settings, &v);
    }
}

fn set_api_key(settings: &mut Settings, raw: &str) {
    let key = raw.trim();
    if !key.is_empty() {
        settings.api_key = Some(key.to_string());
    }
}

fn set_language(settings: &mut Settings, raw: &str) {
    match Language::parse(raw) {
        Some(language) => settings.language = language,
        None => tracing::warn!(value = raw, "unknown language; keeping {}", settings.language.code()),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
