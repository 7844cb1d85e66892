// file: src/models/submission.rs
// description: submitted file descriptor handed to the analysis pipeline
// reference: internal data structures

use crate::error::{AnalyzerError, Result};
use std::path::Path;
use tokio::fs;
use tracing::debug;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A file as received from the presentation layer: raw bytes, the declared
/// media type and size, and the original file name.
#[derive(Debug, Clone)]
pub struct Submission {
    pub filename: String,
    pub media_type: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl Submission {
    pub fn new(filename: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Reads a file from disk. The media type is guessed from the extension
    /// unless `media_type` is given.
    ///
    /// Content is only loaded when the file fits within `max_size`. A larger
    /// file is described by its on-disk size with no bytes, and validation
    /// rejects it before any stage sees the content.
    pub async fn from_path(
        path: &Path,
        media_type: Option<String>,
        max_size: u64,
    ) -> Result<Self> {
        let file_error = |source| AnalyzerError::FileOperation {
            path: path.to_path_buf(),
            source,
        };

        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| AnalyzerError::InvalidFileName {
                reason: format!("path has no file name: {}", path.display()),
            })?;

        let media_type = media_type.unwrap_or_else(|| guess_media_type(path).to_string());

        let size = fs::metadata(path).await.map_err(file_error)?.len();
        if size > max_size {
            debug!(
                "Skipping read of {} ({} bytes over the {} byte limit)",
                path.display(),
                size,
                max_size
            );
            return Ok(Self {
                filename,
                media_type,
                size,
                bytes: Vec::new(),
            });
        }

        let bytes = fs::read(path).await.map_err(file_error)?;
        Ok(Self::new(filename, media_type, bytes))
    }
}

pub fn guess_media_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("pdf") => PDF_MEDIA_TYPE,
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("txt") => "text/plain",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => FALLBACK_MEDIA_TYPE,
    }
}
