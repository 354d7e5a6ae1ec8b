// src/types/analysis.rs
use serde::{Deserialize, Serialize};

/// Structured match report returned by `/api/analysis`.
///
/// Percentage fields arrive as free text with an embedded integer
/// ("78%", "N/A"); extraction happens at render time in [`crate::score`].
/// Field names are the backend's literal JSON keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "JD Match", default)]
    pub jd_match: String,

    #[serde(rename = "MissingKeywords", default)]
    pub missing_keywords: Vec<String>,

    #[serde(rename = "KeyStrength", default)]
    pub key_strength: String,

    #[serde(rename = "Recommendations", default)]
    pub recommendations: String,

    #[serde(rename = "Profile Summary", default)]
    pub profile_summary: String,

    #[serde(rename = "ExperienceMatch", default)]
    pub experience_match: String,

    #[serde(rename = "SkillsMatch", default)]
    pub skills_match: String,

    #[serde(rename = "EducationMatch", default)]
    pub education_match: String,

    /// Echo of the uploaded filename.
    #[serde(default)]
    pub filename: String,

    /// Echo of the uploaded file extension ("pdf" or "docx").
    #[serde(default)]
    pub file_type: String,
}

/// Envelope for a successful analysis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub analysis: AnalysisResult,
    /// Opaque token correlating later reconstruction calls to the
    /// server-side parsed resume.
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_response_parses_backend_keys() {
        let body = r#"{
            "success": true,
            "analysis": {
                "JD Match": "78%",
                "MissingKeywords": ["Kubernetes", "Terraform"],
                "KeyStrength": "Strong backend experience",
                "Recommendations": "Add cloud certifications",
                "Profile Summary": "Solid fit overall",
                "ExperienceMatch": "81%",
                "SkillsMatch": "64%",
                "EducationMatch": "90%",
                "filename": "resume.pdf",
                "file_type": "pdf"
            },
            "session_id": "abc123"
        }"#;

        let parsed: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.session_id, "abc123");
        assert_eq!(parsed.analysis.jd_match, "78%");
        assert_eq!(parsed.analysis.missing_keywords.len(), 2);
        assert_eq!(parsed.analysis.file_type, "pdf");
    }

    #[test]
    fn test_missing_fields_default() {
        let body = r#"{
            "success": true,
            "analysis": {"JD Match": "50%"},
            "session_id": "s1"
        }"#;

        let parsed: AnalysisResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.analysis.jd_match, "50%");
        assert!(parsed.analysis.missing_keywords.is_empty());
        assert!(parsed.analysis.profile_summary.is_empty());
    }
}
