use super::{format_document, write_document, Format};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use drafter_assistant::{generate_draft, shared, DraftSession, GeminiCollaborator};
use drafter_editor::EditorHost;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// What to draft, e.g. "A mutual NDA between two startups"
    pub prompt: String,

    /// Save the document (JSON form) to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How to print the draft
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: Format,

    /// Model to use (overrides config)
    #[arg(long)]
    pub model: Option<String>,
}

pub async fn draft(args: DraftArgs, config: &Config) -> Result<()> {
    let collaborator = GeminiCollaborator::new(config.gemini(args.model.as_deref())?)?;
    let session = shared(DraftSession::new(EditorHost::with_history_depth(config.history_depth)));

    eprintln!("{}", "📝 Drafting...".bright_blue().bold());
    generate_draft(&session, &collaborator, &args.prompt)
        .await
        .context("draft")?;

    let doc = session
        .lock()
        .map_err(|_| anyhow!("draft session poisoned"))?
        .doc()
        .cloned()
        .ok_or_else(|| anyhow!("draft produced no document"))?;

    if let Some(path) = &args.output {
        write_document(&doc, path)?;
        eprintln!("  {} Saved {}", "✓".green(), path.display());
    }

    println!("{}", format_document(&doc, args.format)?);
    Ok(())
}
