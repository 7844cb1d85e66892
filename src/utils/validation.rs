// file: src/utils/validation.rs
// description: submission validation run before any pipeline stage
// reference: input validation patterns

use crate::config::PipelineConfig;
use crate::error::{AnalyzerError, Result};
use crate::models::Submission;

pub struct Validator;

impl Validator {
    /// Checks the file name, then the media type, then the size. The first
    /// failing check decides the error, so an oversized image reports
    /// [`AnalyzerError::InvalidFileType`].
    pub fn validate_submission(submission: &Submission, config: &PipelineConfig) -> Result<()> {
        Self::validate_filename(&submission.filename)?;
        Self::validate_media_type(&submission.media_type, &config.accepted_media_types)?;
        Self::validate_file_size(submission.size, config.max_file_size_bytes())?;
        Ok(())
    }

    pub fn validate_media_type(media_type: &str, accepted: &[String]) -> Result<()> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if accepted
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(&essence))
        {
            return Ok(());
        }

        Err(AnalyzerError::InvalidFileType {
            media_type: media_type.to_string(),
        })
    }

    pub fn validate_file_size(size: u64, limit: u64) -> Result<()> {
        if size > limit {
            return Err(AnalyzerError::FileTooLarge { size, limit });
        }
        Ok(())
    }

    pub fn validate_filename(filename: &str) -> Result<()> {
        if filename.trim().is_empty() {
            return Err(AnalyzerError::InvalidFileName {
                reason: "file name is empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_types() -> Vec<String> {
        PipelineConfig::default().accepted_media_types
    }

    #[test]
    fn test_validate_media_type() {
        assert!(Validator::validate_media_type("application/pdf", &pdf_types()).is_ok());
        assert!(Validator::validate_media_type("Application/PDF", &pdf_types()).is_ok());
        assert!(
            Validator::validate_media_type("application/pdf; charset=binary", &pdf_types())
                .is_ok()
        );
        assert!(Validator::validate_media_type("application/x-pdf", &pdf_types()).is_ok());

        let err = Validator::validate_media_type("image/png", &pdf_types()).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidFileType { .. }));
        assert!(Validator::validate_media_type("", &pdf_types()).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        let limit = 10 * 1024 * 1024;
        assert!(Validator::validate_file_size(0, limit).is_ok());
        assert!(Validator::validate_file_size(limit, limit).is_ok());

        let err = Validator::validate_file_size(limit + 1, limit).unwrap_err();
        assert!(matches!(
            err,
            AnalyzerError::FileTooLarge { size, limit: l } if size == limit + 1 && l == limit
        ));
    }

    #[test]
    fn test_validate_submission_checks_type_before_size() {
        let config = PipelineConfig::default();
        let submission = Submission {
            filename: "huge.png".to_string(),
            media_type: "image/png".to_string(),
            size: 50 * 1024 * 1024,
            bytes: vec![],
        };

        let err = Validator::validate_submission(&submission, &config).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidFileType { .. }));
    }

    #[test]
    fn test_validate_filename() {
        assert!(Validator::validate_filename("resume.pdf").is_ok());

        let err = Validator::validate_filename("  ").unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidFileName { .. }));
        assert!(err.is_user_correctable());
    }

    #[test]
    fn test_blank_name_is_reported_before_type() {
        let config = PipelineConfig::default();
        let submission = Submission {
            filename: String::new(),
            media_type: "image/png".to_string(),
            size: 1024,
            bytes: vec![],
        };

        let err = Validator::validate_submission(&submission, &config).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidFileName);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
    }
}
