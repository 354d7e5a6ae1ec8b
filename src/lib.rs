pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod score;
pub mod types;
pub mod workflow;

pub use catalog::{ProviderCatalog, ProviderStatus, Selection};
pub use client::ApiClient;
pub use config::BackendConfig;
pub use error::WorkflowError;
pub use score::{color_band, extract_percentage, ColorBand};
pub use types::{AnalysisRequest, AnalysisResponse, AnalysisResult, ReconstructionPreview};
pub use workflow::{DocumentDownload, Workflow};
