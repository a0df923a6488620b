//! Flat, AI-facing form of a draft.

use crate::ast::{Node, NodeKind};
use crate::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

/// Full draft as returned by the draft collaborator
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Outline {
    pub sections: Vec<SectionData>,
}

/// One section: `{ "title": "...", "content": ["...", ...] }` on the wire
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionData {
    #[serde(default)]
    pub title: String,

    #[serde(rename = "content", default)]
    pub paragraphs: Vec<String>,
}

impl SectionData {
    pub fn new(title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            title: title.into(),
            paragraphs,
        }
    }

    /// Extract plain data from a section node: heading text plus paragraph texts in order
    pub fn from_section(node: &Node) -> SchemaResult<Self> {
        if node.kind() != NodeKind::Section {
            return Err(SchemaError::NotASection(node.kind()));
        }

        let title = node
            .children()
            .iter()
            .find(|c| c.kind() == NodeKind::Heading)
            .map(Node::text_content)
            .unwrap_or_default();

        let paragraphs = node
            .children()
            .iter()
            .filter(|c| c.kind() == NodeKind::Paragraph)
            .map(Node::text_content)
            .collect();

        Ok(Self { title, paragraphs })
    }
}

impl Outline {
    /// Extract the outline back out of a document tree
    pub fn from_document(doc: &Node) -> SchemaResult<Self> {
        let sections = doc
            .sections()
            .map(SectionData::from_section)
            .collect::<SchemaResult<Vec<_>>>()?;
        Ok(Self { sections })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_uses_content() {
        let json = r#"{"sections":[{"title":"Confidentiality","content":["Both parties agree..."]}]}"#;
        let outline: Outline = serde_json::from_str(json).unwrap();

        assert_eq!(outline.sections.len(), 1);
        assert_eq!(outline.sections[0].title, "Confidentiality");
        assert_eq!(outline.sections[0].paragraphs, vec!["Both parties agree..."]);

        let back = serde_json::to_value(&outline.sections[0]).unwrap();
        assert!(back.get("content").is_some());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let data: SectionData = serde_json::from_str("{}").unwrap();
        assert_eq!(data, SectionData::default());
    }

    #[test]
    fn test_sections_field_is_required() {
        assert!(serde_json::from_str::<Outline>(r#"{"title":"x"}"#).is_err());
    }

    #[test]
    fn test_extract_rejects_non_section() {
        let para = Node::plain_paragraph("text");
        assert_eq!(
            SectionData::from_section(&para),
            Err(SchemaError::NotASection(NodeKind::Paragraph))
        );
    }
}
