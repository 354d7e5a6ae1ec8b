// src/error.rs
use thiserror::Error;

/// Errors surfaced by the analysis/reconstruction workflow.
///
/// The three wire-facing variants map to the places a request can die:
/// before it leaves (`Validation`), in transit (`Connectivity`), or at the
/// backend with a reported reason (`Backend`).
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A required field was missing or blank. No network call was made.
    #[error("{0}")]
    Validation(String),

    /// The backend was unreachable, timed out, or returned a non-success
    /// status without a usable `detail` body.
    #[error("{0}")]
    Connectivity(String),

    /// Non-success status whose body carried a `detail` field; the text is
    /// shown verbatim.
    #[error("{0}")]
    Backend(String),

    /// The operation's busy flag was already set when it was triggered.
    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl WorkflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        WorkflowError::Validation(msg.into())
    }

    /// Display string for inline alert regions. Every variant renders as a
    /// single line; nothing propagates uncaught past the operation boundary.
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}
