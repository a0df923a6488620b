//! # Document Builder
//!
//! Converts outline data into schema-valid trees. Building never fails: empty
//! input is auto-corrected instead of rejected.

use crate::ast::Node;
use crate::id_generator::IdGenerator;
use crate::outline::{Outline, SectionData};

pub const UNTITLED_HEADING: &str = "Untitled";
pub const PLACEHOLDER_PARAGRAPH: &str = "Start typing...";

/// Builds document and section trees, assigning each section a stable id
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    ids: IdGenerator,
}

impl DocumentBuilder {
    pub fn new(seed_name: &str) -> Self {
        Self {
            ids: IdGenerator::new(seed_name),
        }
    }

    /// Builder for draft number `draft` of a session, seeded from its prompt
    pub fn for_draft(prompt: &str, draft: u64) -> Self {
        Self::from_generator(IdGenerator::for_draft(prompt, draft))
    }

    pub fn from_generator(ids: IdGenerator) -> Self {
        Self { ids }
    }

    /// Outline → full document. An empty outline yields one placeholder section.
    pub fn build_document(&mut self, outline: &Outline) -> Node {
        let mut sections: Vec<Node> = outline
            .sections
            .iter()
            .map(|data| self.build_section(data))
            .collect();

        if sections.is_empty() {
            let id = self.ids.next_id();
            sections.push(Node::Section {
                id,
                children: vec![
                    Node::plain_heading(UNTITLED_HEADING),
                    Node::plain_paragraph(PLACEHOLDER_PARAGRAPH),
                ],
            });
        }

        tracing::debug!(sections = sections.len(), seed = self.ids.seed(), issued = self.ids.issued(), "built document");

        Node::Document { children: sections }
    }

    /// Section data → detached section subtree with a fresh id
    pub fn build_section(&mut self, data: &SectionData) -> Node {
        let id = self.ids.next_id();
        build_section_with_id(id, data)
    }
}

/// Section data → section subtree carrying an existing id.
///
/// Used when a section is replaced in place and keeps its identity.
pub fn build_section_with_id(id: impl Into<String>, data: &SectionData) -> Node {
    let mut children = Vec::with_capacity(data.paragraphs.len() + 1);
    children.push(Node::plain_heading(&data.title));
    children.extend(data.paragraphs.iter().map(|p| Node::plain_paragraph(p)));

    if children.len() == 1 {
        children.push(Node::plain_paragraph(""));
    }

    Node::Section {
        id: id.into(),
        children,
    }
}
