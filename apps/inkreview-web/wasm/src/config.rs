//! Mount-time configuration passed in from JavaScript

use inkreview_core::{ClientConfig, ConfigError};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// DOM ids of the page regions the app drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub upload_box: String,
    pub file_input: String,
    pub file_info: String,
    pub file_name: String,
    pub loading: String,
    pub results: String,
    pub result_file_name: String,
    pub total_pages: String,
    pub results_container: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            upload_box: "uploadBox".to_string(),
            file_input: "fileInput".to_string(),
            file_info: "fileInfo".to_string(),
            file_name: "fileName".to_string(),
            loading: "loadingSection".to_string(),
            results: "resultsSection".to_string(),
            result_file_name: "resultFileName".to_string(),
            total_pages: "totalPages".to_string(),
            results_container: "resultsContainer".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    pub elements: ElementIds,
    /// Most verbose level forwarded to the browser console
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            elements: ElementIds::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read the object handed to `mount`; `undefined` and `null` mean defaults
    pub fn from_js(value: JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        // Through JSON so the flattened client fields get plain JSON numbers.
        let json = js_sys::JSON::stringify(&value)?
            .as_string()
            .ok_or("Configuration is not serializable")?;
        let config: AppConfig = serde_json::from_str(&json)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
        config
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.client.validate()
    }

    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_page_ids() {
        let config = AppConfig::default();
        assert_eq!(config.elements.upload_box, "uploadBox");
        assert_eq!(config.elements.results_container, "resultsContainer");
        assert_eq!(config.client.upload_url, "/upload");
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_client_fields_are_flattened() {
        let config: AppConfig = serde_json::from_str(
            r#"{"upload_url": "/api/upload", "elements": {"loading": "spinner"}, "log_level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.client.upload_url, "/api/upload");
        assert_eq!(config.client.upload_field, "file");
        assert_eq!(config.elements.loading, "spinner");
        assert_eq!(config.elements.file_input, "fileInput");
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }
}
