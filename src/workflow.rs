// src/workflow.rs
//! Client-side analysis/reconstruction workflow.
//!
//! One explicit state object owns everything the session accumulates: the
//! provider catalog, the current selection, per-operation busy flags and
//! error strings, the held analysis result + session id, and the transient
//! preview. Each operation splits into a local begin step, a network call,
//! and a pure completion applier, so the state transitions are testable
//! without a live backend.

use bytes::Bytes;
use tracing::info;

use crate::catalog::{ProviderCatalog, Selection};
use crate::client::ApiClient;
use crate::download;
use crate::error::WorkflowError;
use crate::types::{
    AnalysisRequest, AnalysisResponse, AnalysisResult, ReconstructionPreview, ResumeFile,
};

/// Per-operation single-flight gates. A set flag blocks that operation from
/// re-firing; the other three stay independently triggerable.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyFlags {
    pub analyze: bool,
    pub preview: bool,
    pub docx: bool,
    pub pdf: bool,
}

/// Display strings for inline alert regions, one slot per operation. An
/// error in one slot never clears another slot's result or error.
#[derive(Debug, Clone, Default)]
pub struct OperationErrors {
    pub analyze: Option<String>,
    pub preview: Option<String>,
    pub docx: Option<String>,
    pub pdf: Option<String>,
}

/// A generated document ready for a client-side save.
#[derive(Debug, Clone)]
pub struct DocumentDownload {
    pub filename: String,
    pub content: Bytes,
}

#[derive(Debug, Default)]
pub struct Workflow {
    pub catalog: ProviderCatalog,
    pub selection: Selection,
    pub busy: BusyFlags,
    pub errors: OperationErrors,
    analysis: Option<AnalysisResult>,
    session_id: Option<String>,
    preview: Option<ReconstructionPreview>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently displayed analysis, if any.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Session id from the last successful analysis. Unset before the first
    /// analysis, cleared the moment a new one begins.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Open preview, if the preview surface is showing.
    pub fn preview(&self) -> Option<&ReconstructionPreview> {
        self.preview.as_ref()
    }

    /// The preview surface was dismissed.
    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Rehydrate a session id printed by an earlier analyze invocation, so a
    /// separate process can reuse the server-side parse state.
    pub fn resume_session(&mut self, session_id: Option<String>) {
        self.session_id = session_id.filter(|s| !s.is_empty());
    }

    /// Assemble the shared request tuple from the current selection.
    pub fn build_request(
        &self,
        file: ResumeFile,
        job_description: impl Into<String>,
        job_position: impl Into<String>,
    ) -> AnalysisRequest {
        AnalysisRequest {
            file,
            job_description: job_description.into(),
            job_position: job_position.into(),
            provider: self.selection.provider.clone(),
            model: self.selection.model.clone(),
        }
    }

    /// Fetch the catalog and apply the first-load auto-selection policy.
    pub async fn load_catalog(&mut self, client: &ApiClient) -> Result<(), WorkflowError> {
        let catalog = client.fetch_catalog().await?;
        self.catalog = catalog;
        self.selection.auto_select(&self.catalog);
        Ok(())
    }

    /// Run an analysis. Preconditions fail locally before any network call;
    /// a failed call preserves the previously displayed result.
    pub async fn analyze(
        &mut self,
        client: &ApiClient,
        request: &AnalysisRequest,
    ) -> Result<(), WorkflowError> {
        if self.busy.analyze {
            return Err(WorkflowError::Busy("Analysis"));
        }
        if let Err(err) = request.validate() {
            self.errors.analyze = Some(err.display_message());
            return Err(err);
        }

        self.begin_analyze();
        let outcome = client.analyze(request).await;
        self.finish_analyze(outcome)
    }

    /// Preview the reconstruction. Re-derives from the request fields every
    /// time; the stored analysis is not consulted, only the session id.
    pub async fn preview_reconstruction(
        &mut self,
        client: &ApiClient,
        request: &AnalysisRequest,
    ) -> Result<(), WorkflowError> {
        if self.busy.preview {
            return Err(WorkflowError::Busy("Preview"));
        }
        if let Err(err) = request.validate() {
            self.errors.preview = Some(err.display_message());
            return Err(err);
        }

        self.busy.preview = true;
        self.errors.preview = None;
        let outcome = client
            .preview_reconstruction(request, self.session_id.as_deref())
            .await;
        self.finish_preview(outcome)
    }

    /// Download the reconstructed resume as DOCX. No modal state changes;
    /// an open preview stays open.
    pub async fn download_reconstruction(
        &mut self,
        client: &ApiClient,
        request: &AnalysisRequest,
    ) -> Result<DocumentDownload, WorkflowError> {
        if self.busy.docx {
            return Err(WorkflowError::Busy("DOCX download"));
        }
        if let Err(err) = request.validate() {
            self.errors.docx = Some(err.display_message());
            return Err(err);
        }

        self.busy.docx = true;
        self.errors.docx = None;
        let outcome = client
            .reconstruct_docx(request, self.session_id.as_deref())
            .await;

        self.busy.docx = false;
        match outcome {
            Ok(content) => Ok(DocumentDownload {
                filename: download::docx_output_name(&request.file.filename),
                content,
            }),
            Err(err) => {
                self.errors.docx = Some(err.display_message());
                Err(err)
            }
        }
    }

    /// Download the upgraded resume as PDF. Independent in-flight flag from
    /// the DOCX download, so neither blocks the other.
    pub async fn download_pdf(
        &mut self,
        client: &ApiClient,
        request: &AnalysisRequest,
    ) -> Result<DocumentDownload, WorkflowError> {
        if self.busy.pdf {
            return Err(WorkflowError::Busy("PDF download"));
        }
        if let Err(err) = request.validate() {
            self.errors.pdf = Some(err.display_message());
            return Err(err);
        }

        self.busy.pdf = true;
        self.errors.pdf = None;
        let outcome = client.generate_pdf(request, self.session_id.as_deref()).await;

        self.busy.pdf = false;
        match outcome {
            Ok(content) => Ok(DocumentDownload {
                filename: download::pdf_output_name(&request.file.filename),
                content,
            }),
            Err(err) => {
                self.errors.pdf = Some(err.display_message());
                Err(err)
            }
        }
    }

    /// Starting a new analysis discards the session id and any open preview.
    /// The displayed result stays until a replacement arrives.
    fn begin_analyze(&mut self) {
        self.busy.analyze = true;
        self.errors.analyze = None;
        self.session_id = None;
        self.preview = None;
        info!("Analysis started");
    }

    /// Success replaces result and session id together; failure only sets
    /// the error slot so the previous result is never half-reset.
    fn finish_analyze(
        &mut self,
        outcome: Result<AnalysisResponse, WorkflowError>,
    ) -> Result<(), WorkflowError> {
        self.busy.analyze = false;
        match outcome {
            Ok(response) => {
                self.analysis = Some(response.analysis);
                self.session_id = Some(response.session_id);
                Ok(())
            }
            Err(err) => {
                self.errors.analyze = Some(err.display_message());
                Err(err)
            }
        }
    }

    /// Success opens (or replaces) the preview surface; failure leaves any
    /// existing preview untouched.
    fn finish_preview(
        &mut self,
        outcome: Result<ReconstructionPreview, WorkflowError>,
    ) -> Result<(), WorkflowError> {
        self.busy.preview = false;
        match outcome {
            Ok(preview) => {
                self.preview = Some(preview);
                Ok(())
            }
            Err(err) => {
                self.errors.preview = Some(err.display_message());
                Err(err)
            }
        }
    }
}
