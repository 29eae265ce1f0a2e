use crate::model::ConfigError;
use serde::Deserialize;
use std::fs;

pub const DEFAULT_API_URL: &str =
    "https://script.google.com/macros/s/AKfycbyAQ-iN-QYbI1UPFyE7ehXIow-hmiLtdJ8hl-gAoDtYXf39vvNecCNtNkaxfXz8VnjH/exec";
pub const DEFAULT_IMAGE_PROXY: &str = "https://images.weserv.nl/?url=";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub query: String,
    pub offer_type: String,
    pub only_available: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub jsonp_callback: Option<String>,
    pub request_timeout_seconds: u64,
    pub refresh_interval_seconds: u64,
    pub default_currency: String,
    pub image_proxy_url: String,
    pub mail_subject_prefix: String,
    pub filter: FilterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            jsonp_callback: Some("handleListings".into()),
            request_timeout_seconds: 12,
            refresh_interval_seconds: 0,
            default_currency: "EUR".into(),
            image_proxy_url: DEFAULT_IMAGE_PROXY.into(),
            mail_subject_prefix: "Vivienda en Orea: ".into(),
            filter: FilterConfig::default(),
        }
    }
}

impl AppConfig {
    fn validate(self) -> Result<Self, ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Invalid("api_url is empty".into()));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!("api_url is not an http(s) URL: {}", url)));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ConfigError::Invalid("request_timeout_seconds must be positive".into()));
        }
        if let Some(cb) = &self.jsonp_callback {
            let valid = !cb.is_empty()
                && cb.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');
            if !valid {
                return Err(ConfigError::Invalid(format!("jsonp_callback is not a valid name: {:?}", cb)));
            }
        }
        Ok(self)
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    config.validate()
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
