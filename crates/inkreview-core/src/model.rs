//! Upload response model
//!
//! Mirrors the JSON the review service returns from its upload endpoint.
//! The service is lenient about what it emits (fields go missing or come
//! back `null` on pages without red regions, and failure responses carry
//! only `error`), so every optional field deserializes to an empty default.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ReviewError, UNKNOWN_BACKEND_ERROR};

/// Parsed body of an upload response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResult {
    pub success: bool,
    pub error: Option<String>,
    /// Identifier of the service's output directory for this upload
    pub unique_id: Option<String>,
    pub filename: String,
    pub total_pages: u32,
    pub results: Vec<PageResult>,
}

impl UploadResult {
    /// Interpret a raw response body
    ///
    /// A body that is not JSON is a transfer failure. A well-formed body with
    /// `success: false` (or no `success` at all) is a backend failure carrying
    /// the service's own message.
    pub fn from_response_body(body: &str) -> Result<Self, ReviewError> {
        let result: UploadResult = serde_json::from_str(body)
            .map_err(|e| ReviewError::TransferError(format!("Invalid response body: {}", e)))?;

        if !result.success {
            let message = result
                .error
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_BACKEND_ERROR.to_string());
            return Err(ReviewError::BackendError(message));
        }

        if result.results.len() != result.total_pages as usize {
            tracing::warn!(
                total_pages = result.total_pages,
                received = result.results.len(),
                "page count does not match the number of page results"
            );
        }

        Ok(result)
    }

    /// Number of edits found across all pages
    pub fn edit_count(&self) -> usize {
        self.results.iter().map(|page| page.edits.len()).sum()
    }
}

/// Analysis of one PDF page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageResult {
    /// Page number (1-indexed)
    pub page: u32,
    /// Rendered page image
    pub image_url: Option<String>,
    /// Page image with detected red regions outlined
    pub debug_url: Option<String>,
    pub red_regions_count: u32,
    pub edits: Vec<EditRow>,
    pub table: EditTable,
}

impl PageResult {
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditTable {
    pub headers: Vec<String>,
    pub rows: Vec<EditRow>,
}

/// One edit instruction read from the red-ink annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditRow {
    pub order: EditOrder,
    #[serde(deserialize_with = "lenient_action")]
    pub action: EditAction,
    #[serde(deserialize_with = "lenient_text")]
    pub original_text: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub new_text: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub confidence: Option<String>,
}

/// Rows come straight from the model's output, so any JSON scalar is read
/// as text; `null` is absent.
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_text)
}

fn lenient_action<'de, D>(deserializer: D) -> Result<EditAction, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(EditAction::from)
}

/// Sequence number of an edit, as emitted by the service
///
/// Usually an integer, but the model behind the service sometimes emits
/// it as a string, a float or `null`. Anything that is not an integer is
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EditOrder {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for EditOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_i64() {
            Some(n) => EditOrder::Number(n),
            None => scalar_text(value).map(EditOrder::Text).unwrap_or_default(),
        })
    }
}

impl Default for EditOrder {
    fn default() -> Self {
        EditOrder::Text(String::new())
    }
}

impl fmt::Display for EditOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOrder::Number(n) => write!(f, "{}", n),
            EditOrder::Text(s) => f.write_str(s),
        }
    }
}

/// Kind of edit, in the service's vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum EditAction {
    /// 삭제
    Delete,
    /// 수정
    Modify,
    /// 추가
    Insert,
    /// Any label the service adds later; rendered verbatim
    Other(String),
    #[default]
    Unspecified,
}

impl EditAction {
    pub fn label(&self) -> &str {
        match self {
            EditAction::Delete => "삭제",
            EditAction::Modify => "수정",
            EditAction::Insert => "추가",
            EditAction::Other(label) => label,
            EditAction::Unspecified => "",
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, EditAction::Delete)
    }
}

impl From<Option<String>> for EditAction {
    fn from(label: Option<String>) -> Self {
        match label.as_deref().map(str::trim) {
            None | Some("") => EditAction::Unspecified,
            Some("삭제") => EditAction::Delete,
            Some("수정") => EditAction::Modify,
            Some("추가") => EditAction::Insert,
            Some(other) => EditAction::Other(other.to_string()),
        }
    }
}

impl From<EditAction> for String {
    fn from(action: EditAction) -> Self {
        action.label().to_string()
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of the service's health endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
