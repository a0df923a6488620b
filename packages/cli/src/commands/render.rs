use super::{format_document, read_document, Format};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document to print (JSON form)
    pub document: PathBuf,

    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: Format,
}

pub fn render(args: RenderArgs) -> Result<()> {
    let doc = read_document(&args.document)?;
    println!("{}", format_document(&doc, args.format)?);
    Ok(())
}
