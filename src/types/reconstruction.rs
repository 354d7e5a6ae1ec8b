// src/types/reconstruction.rs
use serde::{Deserialize, Serialize};

/// Response from `/api/reconstruct/preview`. Held only while the preview
/// surface is open; replaced wholesale on the next preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructionPreview {
    #[serde(default)]
    pub success: bool,
    pub reconstructed_text: String,
    pub validation: ReconstructionValidation,
    pub gap_analysis: GapAnalysis,
    pub parsed_resume_summary: ParsedResumeSummary,
}

/// Sanity checks the backend runs on its own output, echoing a few fields
/// from the original parse so warnings can be cross-checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructionValidation {
    pub valid: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub original_email: String,
    #[serde(default)]
    pub original_skills_count: usize,
    #[serde(default)]
    pub original_experience_count: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapAnalysis {
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub weak_sections: Vec<String>,
    #[serde(default)]
    pub improvement_recommendations: Vec<String>,
    #[serde(default)]
    pub priority_skills: Vec<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedResumeSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills_count: usize,
    #[serde(default)]
    pub experience_count: usize,
    #[serde(default)]
    pub projects_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_parses() {
        let body = r#"{
            "success": true,
            "reconstructed_text": "JANE DOE\nSKILLS\n...",
            "validation": {
                "valid": false,
                "warnings": ["Original email may not be present in output"],
                "original_name": "Jane Doe",
                "original_email": "jane@example.com",
                "original_skills_count": 12,
                "original_experience_count": 3
            },
            "gap_analysis": {
                "missing_keywords": ["Rust"],
                "weak_sections": ["Projects"],
                "improvement_recommendations": ["Quantify impact"],
                "priority_skills": ["Rust", "Tokio"],
                "matched_skills": ["Python"]
            },
            "parsed_resume_summary": {
                "name": "Jane Doe",
                "skills_count": 12,
                "experience_count": 3,
                "projects_count": 2
            }
        }"#;

        let preview: ReconstructionPreview = serde_json::from_str(body).unwrap();
        assert!(!preview.validation.valid);
        assert_eq!(preview.validation.warnings.len(), 1);
        assert_eq!(preview.gap_analysis.priority_skills.len(), 2);
        assert_eq!(preview.parsed_resume_summary.projects_count, 2);
    }
}
