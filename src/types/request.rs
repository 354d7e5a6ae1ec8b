// src/types/request.rs
use bytes::Bytes;

use crate::error::WorkflowError;

/// Uploaded resume blob. `Bytes` keeps the content cheaply cloneable so all
/// four workflow operations share it without copying.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub filename: String,
    pub content: Bytes,
}

impl ResumeFile {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// MIME type by extension. Only PDF and DOCX are accepted; the backend
    /// rejects anything else with a 400 anyway.
    pub fn content_type(&self) -> Result<&'static str, WorkflowError> {
        let lower_name = self.filename.to_lowercase();
        if lower_name.ends_with(".pdf") {
            Ok("application/pdf")
        } else if lower_name.ends_with(".docx") {
            Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        } else {
            Err(WorkflowError::validation(format!(
                "Unsupported file format: {}. Use PDF or DOCX.",
                self.filename
            )))
        }
    }
}

/// Request tuple shared by analyze, preview, and both downloads.
/// Constructed fresh per request and never persisted.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub file: ResumeFile,
    pub job_description: String,
    pub job_position: String,
    pub provider: String,
    pub model: String,
}

impl AnalysisRequest {
    /// Local precondition check. Any failure here means no network call is
    /// issued for the triggering operation.
    pub fn validate(&self) -> Result<(), WorkflowError> {
        if self.file.content.is_empty() {
            return Err(WorkflowError::validation("Please upload a resume file."));
        }
        if self.job_description.trim().is_empty() {
            return Err(WorkflowError::validation(
                "Please provide a job description.",
            ));
        }
        if self.job_position.trim().is_empty() {
            return Err(WorkflowError::validation("Please provide a job position."));
        }
        if self.provider.is_empty() {
            return Err(WorkflowError::validation("Please select an AI provider."));
        }
        self.file.content_type()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            file: ResumeFile::new("resume.pdf", &b"%PDF-1.4 fake"[..]),
            job_description: "Build Rust services".to_string(),
            job_position: "Backend Engineer".to_string(),
            provider: "OpenAI".to_string(),
            model: "gpt-4o".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_blank_fields_fail_locally() {
        let mut r = request();
        r.job_description = "   ".to_string();
        assert!(matches!(
            r.validate(),
            Err(WorkflowError::Validation(_))
        ));

        let mut r = request();
        r.job_position = String::new();
        assert!(r.validate().is_err());

        let mut r = request();
        r.file = ResumeFile::new("resume.pdf", Bytes::new());
        assert!(r.validate().is_err());

        let mut r = request();
        r.provider = String::new();
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_empty_model_is_allowed() {
        // A provider with no models still analyzes; model stays empty.
        let mut r = request();
        r.model = String::new();
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_content_type() {
        let pdf = ResumeFile::new("Resume.PDF", &b"x"[..]);
        assert_eq!(pdf.content_type().unwrap(), "application/pdf");

        let docx = ResumeFile::new("cv.docx", &b"x"[..]);
        assert!(docx.content_type().unwrap().contains("wordprocessingml"));

        let txt = ResumeFile::new("cv.txt", &b"x"[..]);
        assert!(txt.content_type().is_err());
    }
}
