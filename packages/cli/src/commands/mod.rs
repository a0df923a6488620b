pub mod act;
pub mod draft;
pub mod init;
pub mod render;

pub use act::{act, ActArgs};
pub use draft::{draft, DraftArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use clap::ValueEnum;
use drafter_schema::{to_dom, to_markdown, Node, Schema};
use std::fs;
use std::path::Path;

/// How a document is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Markdown,
    Html,
    Json,
}

pub fn format_document(doc: &Node, format: Format) -> Result<String> {
    Ok(match format {
        Format::Markdown => to_markdown(doc),
        Format::Html => to_dom(doc).to_html(),
        Format::Json => serde_json::to_string_pretty(doc)?,
    })
}

/// Read a document saved in its JSON form and validate it
pub fn read_document(path: &Path) -> Result<Node> {
    let content = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let doc: Node =
        serde_json::from_str(&content).with_context(|| format!("{} is not a document", path.display()))?;
    Schema::check(&doc).with_context(|| format!("{} breaks the document schema", path.display()))?;
    Ok(doc)
}

pub fn write_document(doc: &Node, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drafter_schema::{DocumentBuilder, Outline, SectionData};

    fn doc() -> Node {
        DocumentBuilder::new("cli").build_document(&Outline {
            sections: vec![SectionData::new("Scope", vec!["Build <it>.".into()])],
        })
    }

    #[test]
    fn test_format_document() {
        let doc = doc();
        assert_eq!(format_document(&doc, Format::Markdown).unwrap(), to_markdown(&doc));
        assert!(format_document(&doc, Format::Html).unwrap().contains("&lt;it&gt;"));

        let json = format_document(&doc, Format::Json).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_document_file_round_trip() {
        let path = std::env::temp_dir().join("drafter-cli-round-trip.json");
        write_document(&doc(), &path).unwrap();
        assert_eq!(read_document(&path).unwrap(), doc());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_document_rejected() {
        let path = std::env::temp_dir().join("drafter-cli-invalid.json");
        fs::write(&path, r#"{"type":"document","children":[]}"#).unwrap();
        assert!(read_document(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
