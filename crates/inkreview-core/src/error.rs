use thiserror::Error;

use crate::selection::SelectionSource;
use crate::state::{Panel, PanelEvent};

/// Notice shown when the backend rejects an upload without saying why.
pub const UNKNOWN_BACKEND_ERROR: &str = "알 수 없는 오류가 발생했습니다.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Unsupported file type: {mime:?}")]
    InvalidFileType { mime: String },

    #[error("File is {size} bytes, limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("No file selected")]
    NoFileSelected,

    #[error("An upload is already in progress")]
    SubmissionInFlight,

    #[error("Transfer failed: {0}")]
    TransferError(String),

    #[error("Backend reported an error: {0}")]
    BackendError(String),

    #[error("Invalid panel transition: {event:?} from {from:?}")]
    InvalidTransition { from: Panel, event: PanelEvent },

    #[error("Failed to render results: {0}")]
    Render(String),
}

impl ReviewError {
    /// The notice shown to the user for this failure.
    ///
    /// Selection failures are worded after the path the file came in on.
    pub fn user_message(&self, source: Option<SelectionSource>) -> String {
        match self {
            ReviewError::InvalidFileType { .. } => match source {
                Some(SelectionSource::Drop) => "PDF 파일만 업로드 가능합니다.".to_string(),
                _ => "PDF 파일만 선택 가능합니다.".to_string(),
            },
            ReviewError::FileTooLarge { limit, .. } => format!(
                "파일 크기는 {}MB를 초과할 수 없습니다.",
                limit / (1024 * 1024)
            ),
            ReviewError::NoFileSelected => "파일을 선택해주세요.".to_string(),
            ReviewError::SubmissionInFlight => "이미 업로드가 진행 중입니다.".to_string(),
            ReviewError::TransferError(message) => {
                format!("업로드 중 오류가 발생했습니다: {}", message)
            }
            ReviewError::BackendError(message) => format!("오류: {}", message),
            ReviewError::InvalidTransition { .. } => {
                "지금은 이 작업을 할 수 없습니다.".to_string()
            }
            ReviewError::Render(_) => "결과를 표시하는 중 오류가 발생했습니다.".to_string(),
        }
    }
}

impl From<askama::Error> for ReviewError {
    fn from(err: askama::Error) -> Self {
        ReviewError::Render(err.to_string())
    }
}

/// Rejected client configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("max_upload_bytes must be greater than zero")]
    ZeroUploadLimit,
}
