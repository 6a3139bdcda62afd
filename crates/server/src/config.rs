use std::{collections::HashMap, fs};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

const SETTINGS_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub assessment_url: String,
    pub reports_url: String,
    /// When set, the HTML pages reach the gateway over HTTP at this base URL
    /// instead of calling it in-process.
    pub gateway_url: Option<String>,
    pub mock_upstreams: bool,
    pub mock_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            assessment_url: "http://127.0.0.1:3000/mock/assessment".into(),
            reports_url: "http://127.0.0.1:3000/mock/reports".into(),
            gateway_url: None,
            mock_upstreams: true,
            mock_delay_ms: 1000,
        }
    }
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    load_settings_from(raw.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml`, then environment. Unparseable values are
/// ignored.
pub fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) {
            let text = |key: &str| file_cfg.get(key).map(toml_value_text);
            if let Some(v) = text("bind_addr") {
                settings.server_bind = v;
            }
            if let Some(v) = text("assessment_url") {
                settings.assessment_url = v;
            }
            if let Some(v) = text("reports_url") {
                settings.reports_url = v;
            }
            if let Some(v) = text("gateway_url") {
                settings.gateway_url = Some(v).filter(|v| !v.trim().is_empty());
            }
            if let Some(v) = text("mock_upstreams").and_then(|v| parse_flag(&v)) {
                settings.mock_upstreams = v;
            }
            if let Some(v) = text("mock_delay_ms").and_then(|v| v.parse().ok()) {
                settings.mock_delay_ms = v;
            }
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("ASSESSMENT_SERVICE_URL") {
        settings.assessment_url = v;
    }
    if let Some(v) = env("APP__ASSESSMENT_URL") {
        settings.assessment_url = v;
    }

    if let Some(v) = env("REPORTS_SERVICE_URL") {
        settings.reports_url = v;
    }
    if let Some(v) = env("APP__REPORTS_URL") {
        settings.reports_url = v;
    }

    if let Some(v) = env("APP__GATEWAY_URL") {
        settings.gateway_url = Some(v).filter(|v| !v.trim().is_empty());
    }

    if let Some(v) = env("APP__MOCK_UPSTREAMS").and_then(|v| parse_flag(&v)) {
        settings.mock_upstreams = v;
    }

    if let Some(v) = env("APP__MOCK_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.mock_delay_ms = parsed;
        }
    }

    settings
}

fn toml_value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Checks that an upstream or gateway address is an absolute http(s) URL.
pub fn prepare_endpoint(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid endpoint url '{raw}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!("endpoint url '{raw}' must use http or https");
    }
    if url.host_str().is_none() {
        bail!("endpoint url '{raw}' has no host");
    }

    Ok(raw.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
