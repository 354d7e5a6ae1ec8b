// src/types/mod.rs
pub mod analysis;
pub mod reconstruction;
pub mod request;

pub use analysis::{AnalysisResponse, AnalysisResult};
pub use reconstruction::{
    GapAnalysis, ParsedResumeSummary, ReconstructionPreview, ReconstructionValidation,
};
pub use request::{AnalysisRequest, ResumeFile};
