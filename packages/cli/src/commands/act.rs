use super::{format_document, read_document, write_document, Format};
use crate::config::Config;
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use colored::Colorize;
use drafter_assistant::{perform_action, shared, ActionOutcome, DraftSession, GeminiCollaborator, SectionAction};
use drafter_editor::{locate_selection, EditorHost, LineGeometry, Selection};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ActArgs {
    /// Document to edit (JSON form)
    pub document: PathBuf,

    /// Section to act on, counting from 1
    #[arg(short, long)]
    pub section: usize,

    /// rewrite_formal, rewrite_simple, summarize or expand
    #[arg(short, long)]
    pub action: SectionAction,

    /// Where to save the result (defaults to overwriting the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How to print the updated document
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: Format,

    /// Model to use (overrides config)
    #[arg(long)]
    pub model: Option<String>,
}

pub async fn act(args: ActArgs, config: &Config) -> Result<()> {
    let doc = read_document(&args.document)?;
    let count = doc.child_count();
    if args.section == 0 || args.section > count {
        bail!("section {} does not exist (document has {} sections)", args.section, count);
    }

    let collaborator = GeminiCollaborator::new(config.gemini(args.model.as_deref())?)?;
    let mut session = DraftSession::new(EditorHost::with_history_depth(config.history_depth));
    let handle = session.open(doc)?;

    // Put the cursor in the section's heading, then find it the way the UI would
    let heading = session
        .doc()
        .map(|doc| doc.child_offset(args.section - 1) + 2)
        .ok_or_else(|| anyhow!("document not loaded"))?;
    session.host_mut().set_selection(handle, Selection::cursor(heading))?;
    let active = locate_selection(session.host(), handle, &LineGeometry::new(config.wrap_width))
        .ok_or_else(|| anyhow!("no section at position {}", heading))?;

    tracing::debug!(section = %active.section_id, rect = ?active.anchor_rect, "Located section");
    eprintln!(
        "{} {} on \"{}\"",
        "✨".bright_blue(),
        args.action.description(),
        active.node.child(0).map(|h| h.text_content()).unwrap_or_default()
    );

    let session = shared(session);
    let outcome = perform_action(&session, &collaborator, &active, args.action)
        .await
        .context(args.action.as_str())?;

    match outcome {
        ActionOutcome::Applied { version } => {
            eprintln!("  {} Applied (version {})", "✓".green(), version);
        }
        ActionOutcome::Dropped { reason } => {
            bail!("response discarded: {:?}", reason);
        }
    }

    let doc = session
        .lock()
        .map_err(|_| anyhow!("draft session poisoned"))?
        .doc()
        .cloned()
        .ok_or_else(|| anyhow!("document not loaded"))?;

    let output = args.output.as_ref().unwrap_or(&args.document);
    write_document(&doc, output)?;
    eprintln!("  {} Saved {}", "✓".green(), output.display());

    println!("{}", format_document(&doc, args.format)?);
    Ok(())
}
