//! Backend Configuration
//!
//! Fixed production defaults; a JSON document may override any subset of
//! keys. Missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gateway::normalize_base_url;

pub const DEFAULT_BASE_URL: &str = "https://zovoaapi.lytortech.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {key}: {value}")]
    InvalidUrl { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    ZeroPageSize(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiConfig {
    pub mvp_base_url: String,
    pub website_base_url: String,
    pub three_d_base_url: String,
    pub mvp_page_size: u64,
    pub website_form_page_size: u64,
    pub three_d_form_page_size: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mvp_base_url: DEFAULT_BASE_URL.to_string(),
            website_base_url: DEFAULT_BASE_URL.to_string(),
            three_d_base_url: DEFAULT_BASE_URL.to_string(),
            mvp_page_size: 10,
            website_form_page_size: 10,
            three_d_form_page_size: 5,
        }
    }
}

impl ApiConfig {
    /// Parses overrides and validates the result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ApiConfig = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Normalizes base URLs and rejects zero page sizes.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        for (key, url) in [
            ("mvpBaseUrl", &mut self.mvp_base_url),
            ("websiteBaseUrl", &mut self.website_base_url),
            ("threeDBaseUrl", &mut self.three_d_base_url),
        ] {
            let normalized = normalize_base_url(url).map_err(|_| ConfigError::InvalidUrl {
                key,
                value: url.to_string(),
            })?;
            *url = normalized;
        }
        for (key, size) in [
            ("mvpPageSize", self.mvp_page_size),
            ("websiteFormPageSize", self.website_form_page_size),
            ("threeDFormPageSize", self.three_d_form_page_size),
        ] {
            if size == 0 {
                return Err(ConfigError::ZeroPageSize(key));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default().validate().unwrap();
        assert_eq!(config.mvp_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.three_d_form_page_size, 5);
        assert_eq!(config.website_form_page_size, 10);
    }

    #[test]
    fn test_partial_override() {
        let config = ApiConfig::from_json(r#"{ "websiteBaseUrl": "http://localhost:8080/", "mvpPageSize": 25 }"#)
            .unwrap();
        assert_eq!(config.website_base_url, "http://localhost:8080");
        assert_eq!(config.mvp_page_size, 25);
        assert_eq!(config.three_d_base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            ApiConfig::from_json(r#"{ "mvpBaseUrl": "zovoa" }"#),
            Err(ConfigError::InvalidUrl { key: "mvpBaseUrl", .. })
        ));
        assert!(matches!(
            ApiConfig::from_json(r#"{ "threeDFormPageSize": 0 }"#),
            Err(ConfigError::ZeroPageSize("threeDFormPageSize"))
        ));
        assert!(matches!(ApiConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
