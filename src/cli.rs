// src/cli.rs
use anyhow::{Context, Result};
use bytes::Bytes;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::client::ApiClient;
use crate::config::BackendConfig;
use crate::score::band_for_field;
use crate::types::{AnalysisRequest, AnalysisResult, ResumeFile};
use crate::workflow::Workflow;
use crate::{download, score};

#[derive(Parser)]
#[command(name = "resumatch")]
#[command(about = "Match a resume against a job description via the analysis backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Clone)]
pub struct RequestArgs {
    /// Path to the resume (PDF or DOCX)
    pub file: PathBuf,

    /// Job description text
    #[arg(long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file instead
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    /// Job position title
    #[arg(long)]
    pub job_position: String,

    /// Override the auto-selected AI provider
    #[arg(long)]
    pub provider: Option<String>,

    /// Override the auto-selected model
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List available AI providers and their models
    Models,
    /// Analyze a resume against a job description
    Analyze {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Preview the reconstructed resume as text
    Preview {
        #[command(flatten)]
        request: RequestArgs,
        /// Session id printed by a previous analyze
        #[arg(long)]
        session_id: Option<String>,
    },
    /// Download the reconstructed resume as DOCX
    Docx {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        session_id: Option<String>,
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Generate a styled PDF resume
    Pdf {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        session_id: Option<String>,
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = BackendConfig::load()?;
    let client = ApiClient::new(&config)?;

    match cli.command {
        Command::Models => {
            let mut workflow = Workflow::new();
            workflow.load_catalog(&client).await?;
            print_catalog(&workflow);
        }

        Command::Analyze { request } => {
            let (mut workflow, request) = prepare(&client, &request).await?;
            workflow.analyze(&client, &request).await?;

            // analyze only returns Ok once both are stored
            if let (Some(result), Some(session_id)) =
                (workflow.analysis(), workflow.session_id())
            {
                print_analysis(result);
                println!();
                println!("Session: {}", session_id);
                println!("  (pass --session-id to preview/docx/pdf to reuse the parsed resume)");
            }
        }

        Command::Preview {
            request,
            session_id,
        } => {
            let (mut workflow, request) = prepare(&client, &request).await?;
            workflow.resume_session(session_id);
            workflow.preview_reconstruction(&client, &request).await?;

            if let Some(preview) = workflow.preview() {
                print_preview(preview);
            }
        }

        Command::Docx {
            request,
            session_id,
            output_dir,
        } => {
            let (mut workflow, request) = prepare(&client, &request).await?;
            workflow.resume_session(session_id);
            let document = workflow.download_reconstruction(&client, &request).await?;
            let path = download::save_document(&output_dir, &document).await?;
            println!("✓ Reconstructed resume saved to {}", path.display());
        }

        Command::Pdf {
            request,
            session_id,
            output_dir,
        } => {
            let (mut workflow, request) = prepare(&client, &request).await?;
            workflow.resume_session(session_id);
            let document = workflow.download_pdf(&client, &request).await?;
            let path = download::save_document(&output_dir, &document).await?;
            println!("✓ Upgraded resume saved to {}", path.display());
        }
    }

    Ok(())
}

/// Load the catalog, apply any provider/model overrides on top of the
/// auto-selection, and build the shared request tuple from disk.
async fn prepare(
    client: &ApiClient,
    args: &RequestArgs,
) -> Result<(Workflow, AnalysisRequest)> {
    let mut workflow = Workflow::new();
    workflow.load_catalog(client).await?;

    let catalog = workflow.catalog.clone();
    if let Some(provider) = &args.provider {
        workflow.selection.set_provider(&catalog, provider)?;
    }
    if let Some(model) = &args.model {
        workflow.selection.set_model(&catalog, model)?;
    }
    if !workflow.selection.is_set() {
        anyhow::bail!("No AI provider is available on the backend.");
    }

    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string())
        .with_context(|| format!("Invalid file path: {}", args.file.display()))?;

    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read file: {}", args.file.display()))?;

    let job_description = match (&args.job_description, &args.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description: {}", path.display()))?,
        (None, None) => String::new(), // caught by request validation
    };

    let request = workflow.build_request(
        ResumeFile::new(filename, Bytes::from(content)),
        job_description,
        args.job_position.clone(),
    );

    Ok((workflow, request))
}

fn print_catalog(workflow: &Workflow) {
    if workflow.catalog.is_empty() {
        println!("No providers reported by the backend.");
        return;
    }

    for (name, status) in workflow.catalog.iter() {
        if status.available {
            println!("✓ {}: {}", name, status.models.join(", "));
        } else {
            println!("✗ {} (unavailable)", name);
        }
    }

    if workflow.selection.is_set() {
        println!();
        println!(
            "Auto-selected: {} / {}",
            workflow.selection.provider,
            if workflow.selection.model.is_empty() {
                "(no model)"
            } else {
                &workflow.selection.model
            }
        );
    }
}

fn print_analysis(result: &AnalysisResult) {
    println!("Analysis for {}", result.filename);
    println!();
    print_match_line("JD Match", &result.jd_match);
    print_match_line("Experience", &result.experience_match);
    print_match_line("Skills", &result.skills_match);
    print_match_line("Education", &result.education_match);

    if !result.missing_keywords.is_empty() {
        println!();
        println!("Missing keywords: {}", result.missing_keywords.join(", "));
    }
    if !result.key_strength.is_empty() {
        println!();
        println!("Key strength: {}", result.key_strength);
    }
    if !result.recommendations.is_empty() {
        println!("Recommendations: {}", result.recommendations);
    }
    if !result.profile_summary.is_empty() {
        println!();
        println!("{}", result.profile_summary);
    }
}

fn print_match_line(label: &str, field: &str) {
    println!(
        "  {:<12} {:>4}%  [{}]",
        label,
        score::extract_percentage(field),
        band_for_field(field).label()
    );
}

fn print_preview(preview: &crate::types::ReconstructionPreview) {
    let summary = &preview.parsed_resume_summary;
    println!(
        "Parsed resume: {} ({} skills, {} experiences, {} projects)",
        summary.name, summary.skills_count, summary.experience_count, summary.projects_count
    );

    if !preview.validation.valid {
        for warning in &preview.validation.warnings {
            println!("⚠ {}", warning);
        }
    }

    let gaps = &preview.gap_analysis;
    if !gaps.matched_skills.is_empty() {
        println!("Matched skills: {}", gaps.matched_skills.join(", "));
    }
    if !gaps.missing_keywords.is_empty() {
        println!("Missing keywords: {}", gaps.missing_keywords.join(", "));
    }
    if !gaps.priority_skills.is_empty() {
        println!("Priority skills: {}", gaps.priority_skills.join(", "));
    }
    for recommendation in &gaps.improvement_recommendations {
        println!("- {}", recommendation);
    }

    println!();
    println!("{}", preview.reconstructed_text);
}
