// src/download.rs
//! Output filenames for downloaded documents, and the save itself.

use std::path::{Path, PathBuf};

use crate::error::WorkflowError;
use crate::workflow::DocumentDownload;

/// `resume.final.docx` -> `resume.final_reconstructed.docx`. Only the last
/// extension is stripped.
pub fn docx_output_name(original: &str) -> String {
    format!("{}_reconstructed.docx", strip_last_extension(original))
}

/// `resume.final.docx` -> `resume.final_upgraded.pdf`.
pub fn pdf_output_name(original: &str) -> String {
    format!("{}_upgraded.pdf", strip_last_extension(original))
}

fn strip_last_extension(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(base, _)| base)
        .unwrap_or(filename)
}

/// Write a downloaded document into `dir`, creating it if needed.
pub async fn save_document(
    dir: &Path,
    document: &DocumentDownload,
) -> Result<PathBuf, WorkflowError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| WorkflowError::Io {
            path: dir.display().to_string(),
            source,
        })?;

    let path = dir.join(&document.filename);
    tokio::fs::write(&path, &document.content)
        .await
        .map_err(|source| WorkflowError::Io {
            path: path.display().to_string(),
            source,
        })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_output_name() {
        assert_eq!(docx_output_name("resume.pdf"), "resume_reconstructed.docx");
        assert_eq!(
            docx_output_name("resume.final.docx"),
            "resume.final_reconstructed.docx"
        );
        assert_eq!(docx_output_name("resume"), "resume_reconstructed.docx");
    }

    #[test]
    fn test_pdf_output_name() {
        assert_eq!(pdf_output_name("resume.docx"), "resume_upgraded.pdf");
        assert_eq!(pdf_output_name("my.cv.2024.pdf"), "my.cv.2024_upgraded.pdf");
    }

    #[tokio::test]
    async fn test_save_document() {
        let dir = std::env::temp_dir().join("resumatch-test-save");
        let document = DocumentDownload {
            filename: "resume_reconstructed.docx".to_string(),
            content: bytes::Bytes::from_static(b"PK fake docx"),
        };

        let path = save_document(&dir, &document).await.unwrap();
        let written = tokio::fs::read(&path).await.unwrap();
        assert_eq!(written, b"PK fake docx");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
