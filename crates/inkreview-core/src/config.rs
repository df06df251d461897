//! Client configuration
//!
//! Endpoints and upload limits the controller works against. Every field has
//! a default matching the review service's stock deployment, so a host page
//! only passes what it overrides.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const PDF_MIME: &str = "application/pdf";

/// The review service rejects request bodies above this size.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint receiving the multipart upload
    pub upload_url: String,
    /// Endpoint answering `{"status": "ok"}` when the service is up
    pub health_url: String,
    /// Multipart field carrying the file
    pub upload_field: String,
    /// The only MIME type accepted for upload
    pub accepted_mime: String,
    /// Largest accepted file, `None` disables the client-side check
    pub max_upload_bytes: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            upload_url: "/upload".to_string(),
            health_url: "/health".to_string(),
            upload_field: "file".to_string(),
            accepted_mime: PDF_MIME.to_string(),
            max_upload_bytes: Some(DEFAULT_MAX_UPLOAD_BYTES),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upload_url.trim().is_empty() {
            return Err(ConfigError::EmptyField("upload_url"));
        }
        if self.health_url.trim().is_empty() {
            return Err(ConfigError::EmptyField("health_url"));
        }
        if self.upload_field.trim().is_empty() {
            return Err(ConfigError::EmptyField("upload_field"));
        }
        if self.accepted_mime.trim().is_empty() {
            return Err(ConfigError::EmptyField("accepted_mime"));
        }
        if self.max_upload_bytes == Some(0) {
            return Err(ConfigError::ZeroUploadLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_service() {
        let config = ClientConfig::default();
        assert_eq!(config.upload_url, "/upload");
        assert_eq!(config.upload_field, "file");
        assert_eq!(config.accepted_mime, "application/pdf");
        assert_eq!(config.max_upload_bytes, Some(52_428_800));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{"upload_url": "/api/upload"}"#).unwrap();
        assert_eq!(config.upload_url, "/api/upload");
        assert_eq!(config.health_url, "/health");
        assert_eq!(config.upload_field, "file");
    }

    #[test]
    fn test_null_limit_disables_size_check() {
        let config = ClientConfig::from_json(r#"{"max_upload_bytes": null}"#).unwrap();
        assert_eq!(config.max_upload_bytes, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = ClientConfig {
            upload_field: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyField("upload_field"))
        );

        let config = ClientConfig {
            max_upload_bytes: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroUploadLimit));
    }
}
