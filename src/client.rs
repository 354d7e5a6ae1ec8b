// src/client.rs
//! HTTP client for the resume-analysis backend. All mutating endpoints take
//! the same multipart tuple: file, job_description, job_position, provider,
//! model (plus session_id on the reconstruction routes).

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Response};
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::ProviderCatalog;
use crate::config::BackendConfig;
use crate::error::WorkflowError;
use crate::types::{AnalysisRequest, AnalysisResponse, ReconstructionPreview};

const MODELS_ENDPOINT: &str = "/api/models";
const ANALYSIS_ENDPOINT: &str = "/api/analysis";
const RECONSTRUCT_ENDPOINT: &str = "/api/reconstruct";
const PREVIEW_ENDPOINT: &str = "/api/reconstruct/preview";
const PDF_ENDPOINT: &str = "/api/reconstruct/pdf";

/// FastAPI-style error body; `detail` is surfaced verbatim when present.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> Result<Self, WorkflowError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                WorkflowError::Connectivity(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// GET `/api/models`: provider/model catalog in backend order.
    /// Single attempt; re-fetch only on explicit re-invocation.
    pub async fn fetch_catalog(&self) -> Result<ProviderCatalog, WorkflowError> {
        let url = format!("{}{}", self.base_url, MODELS_ENDPOINT);
        debug!("Fetching provider catalog: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| connectivity("Could not load models", &e))?;

        decode_json(response, "Could not load models").await
    }

    /// POST `/api/analysis`: structured match report plus a session id.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, WorkflowError> {
        let url = format!("{}{}", self.base_url, ANALYSIS_ENDPOINT);
        let form = build_form(request, None)?;

        info!("Calling analysis service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| connectivity("Analysis failed", &e))?;

        decode_json(response, "Analysis failed").await
    }

    /// POST `/api/reconstruct/preview`: reconstructed text with validation
    /// and gap analysis, no document generated.
    pub async fn preview_reconstruction(
        &self,
        request: &AnalysisRequest,
        session_id: Option<&str>,
    ) -> Result<ReconstructionPreview, WorkflowError> {
        let url = format!("{}{}", self.base_url, PREVIEW_ENDPOINT);
        let form = build_form(request, Some(session_id.unwrap_or("")))?;

        info!("Calling reconstruction preview service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| connectivity("Preview failed", &e))?;

        decode_json(response, "Preview failed").await
    }

    /// POST `/api/reconstruct`: binary DOCX of the reconstructed resume.
    pub async fn reconstruct_docx(
        &self,
        request: &AnalysisRequest,
        session_id: Option<&str>,
    ) -> Result<Bytes, WorkflowError> {
        self.fetch_document(RECONSTRUCT_ENDPOINT, request, session_id, "Reconstruction failed")
            .await
    }

    /// POST `/api/reconstruct/pdf`: binary PDF of the reconstructed resume.
    pub async fn generate_pdf(
        &self,
        request: &AnalysisRequest,
        session_id: Option<&str>,
    ) -> Result<Bytes, WorkflowError> {
        self.fetch_document(PDF_ENDPOINT, request, session_id, "PDF generation failed")
            .await
    }

    async fn fetch_document(
        &self,
        endpoint: &str,
        request: &AnalysisRequest,
        session_id: Option<&str>,
        fallback: &str,
    ) -> Result<Bytes, WorkflowError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let form = build_form(request, Some(session_id.unwrap_or("")))?;

        info!("Calling document service: {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| connectivity(fallback, &e))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(error_from_response(response, fallback).await);
        }

        response
            .bytes()
            .await
            .map_err(|e| connectivity(fallback, &e))
    }
}

/// Shared multipart body. `session_id` is sent as an empty string when the
/// client has none; the backend treats "" as no session.
fn build_form(
    request: &AnalysisRequest,
    session_id: Option<&str>,
) -> Result<Form, WorkflowError> {
    let content_type = request.file.content_type()?;

    let part = Part::stream(Body::from(request.file.content.clone()))
        .file_name(request.file.filename.clone())
        .mime_str(content_type)
        .map_err(|e| {
            // form construction is local, nothing has gone over the wire yet
            WorkflowError::Validation(format!("Failed to create multipart: {}", e))
        })?;

    let mut form = Form::new()
        .part("file", part)
        .text("job_description", request.job_description.clone())
        .text("job_position", request.job_position.clone())
        .text("provider", request.provider.clone())
        .text("model", request.model.clone());

    if let Some(session_id) = session_id {
        form = form.text("session_id", session_id.to_string());
    }

    Ok(form)
}

fn connectivity(fallback: &str, err: &reqwest::Error) -> WorkflowError {
    WorkflowError::Connectivity(format!("{}: {}", fallback, err))
}

async fn decode_json<R>(response: Response, fallback: &str) -> Result<R, WorkflowError>
where
    R: serde::de::DeserializeOwned,
{
    let status = response.status();
    debug!("Response status: {}", status);

    if !status.is_success() {
        return Err(error_from_response(response, fallback).await);
    }

    let text = response
        .text()
        .await
        .map_err(|e| connectivity(fallback, &e))?;

    serde_json::from_str(&text).map_err(|e| {
        WorkflowError::Connectivity(format!("{}: unexpected response: {}", fallback, e))
    })
}

/// Non-success status: surface the body's `detail` verbatim when it parses,
/// otherwise fall back to the operation's generic message.
async fn error_from_response(response: Response, fallback: &str) -> WorkflowError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) if !detail.trim().is_empty() => WorkflowError::Backend(detail),
        _ => WorkflowError::Connectivity(format!("{} (HTTP {})", fallback, status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResumeFile;

    #[test]
    fn test_build_form_rejects_unknown_extension() {
        let request = AnalysisRequest {
            file: ResumeFile::new("resume.txt", &b"plain"[..]),
            job_description: "jd".to_string(),
            job_position: "role".to_string(),
            provider: "OpenAI".to_string(),
            model: "gpt-4o".to_string(),
        };
        assert!(matches!(
            build_form(&request, None),
            Err(WorkflowError::Validation(_))
        ));
    }

    #[test]
    fn test_error_body_detail_parsing() {
        let parsed: ErrorBody =
            serde_json::from_str(r#"{"detail": "Could not extract text from file."}"#).unwrap();
        assert_eq!(
            parsed.detail.as_deref(),
            Some("Could not extract text from file.")
        );

        let parsed: ErrorBody = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert!(parsed.detail.is_none());
    }
}
