//! File selection and validation
//!
//! Picker and drag-and-drop selections both end up in [`validate_candidate`],
//! so a file is accepted or rejected the same way whichever way it came in.

use crate::config::ClientConfig;
use crate::error::ReviewError;

/// A file handle as the platform reports it
pub trait FileLike {
    fn name(&self) -> String;
    /// MIME type declared by the platform, empty when unknown
    fn mime_type(&self) -> String;
    /// Size in bytes
    fn size(&self) -> u64;
}

/// How the file reached the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Picker,
    Drop,
}

/// The file currently chosen for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile<F> {
    handle: F,
    name: String,
    mime_type: String,
    size: u64,
}

impl<F> SelectedFile<F> {
    pub fn handle(&self) -> &F {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Accept `candidate` only if it declares the configured MIME type and fits
/// the upload limit
pub fn validate_candidate<F: FileLike>(
    candidate: Option<F>,
    config: &ClientConfig,
) -> Result<SelectedFile<F>, ReviewError> {
    let candidate = candidate.ok_or_else(|| ReviewError::InvalidFileType {
        mime: String::new(),
    })?;

    let mime_type = candidate.mime_type();
    if mime_type != config.accepted_mime {
        return Err(ReviewError::InvalidFileType { mime: mime_type });
    }

    let size = candidate.size();
    if let Some(limit) = config.max_upload_bytes {
        if size > limit {
            return Err(ReviewError::FileTooLarge { size, limit });
        }
    }

    Ok(SelectedFile {
        name: candidate.name(),
        mime_type,
        size,
        handle: candidate,
    })
}
