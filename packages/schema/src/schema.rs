//! # Structural Schema
//!
//! Strict document shape:
//!
//! ```text
//! document  → section+
//! section   → heading paragraph+
//! heading   → text*            (no marks)
//! paragraph → text*            (strong, em)
//! ```
//!
//! The constructors on [`Node`] fail fast when a node would break these rules.
//! [`Schema::check`] validates whole trees that arrive from elsewhere
//! (deserialized documents, transaction results).

use crate::ast::{normalize_runs, Mark, Node, NodeKind, TextRun};
use crate::error::{SchemaError, SchemaResult};
use std::collections::HashSet;

/// Allowed child content of a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRule {
    /// `section+`
    Sections,
    /// `heading paragraph+`
    HeadingThenParagraphs,
    /// `text*`
    Text,
}

/// Per-kind rules plus the presentational tag used by the DOM serializer
#[derive(Debug, Clone, Copy)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub content: ContentRule,
    pub marks: &'static [Mark],
    pub tag: &'static str,
    /// Selection and deletion do not cross this node's boundary
    pub isolating: bool,
}

const DOCUMENT: NodeSpec = NodeSpec {
    kind: NodeKind::Document,
    content: ContentRule::Sections,
    marks: &[],
    tag: "article",
    isolating: false,
};

const SECTION: NodeSpec = NodeSpec {
    kind: NodeKind::Section,
    content: ContentRule::HeadingThenParagraphs,
    marks: &[],
    tag: "section",
    isolating: true,
};

const HEADING: NodeSpec = NodeSpec {
    kind: NodeKind::Heading,
    content: ContentRule::Text,
    marks: &[],
    tag: "h2",
    isolating: false,
};

const PARAGRAPH: NodeSpec = NodeSpec {
    kind: NodeKind::Paragraph,
    content: ContentRule::Text,
    marks: &[Mark::Strong, Mark::Em],
    tag: "p",
    isolating: false,
};

pub struct Schema;

impl Schema {
    pub fn spec(kind: NodeKind) -> &'static NodeSpec {
        match kind {
            NodeKind::Document => &DOCUMENT,
            NodeKind::Section => &SECTION,
            NodeKind::Heading => &HEADING,
            NodeKind::Paragraph => &PARAGRAPH,
        }
    }

    pub fn allows_mark(kind: NodeKind, mark: Mark) -> bool {
        Self::spec(kind).marks.contains(&mark)
    }

    /// Validate a complete tree rooted at `node`
    pub fn check(node: &Node) -> SchemaResult<()> {
        let mut seen = HashSet::new();
        Self::check_node(node, &mut seen)
    }

    fn check_node<'a>(node: &'a Node, seen: &mut HashSet<&'a str>) -> SchemaResult<()> {
        match Self::spec(node.kind()).content {
            ContentRule::Sections => {
                if node.child_count() == 0 {
                    return Err(SchemaError::EmptyDocument);
                }
                for (index, child) in node.children().iter().enumerate() {
                    if child.kind() != NodeKind::Section {
                        return Err(SchemaError::UnexpectedNode {
                            parent: node.kind(),
                            found: child.kind(),
                            index,
                        });
                    }
                    Self::check_node(child, seen)?;
                }
                Ok(())
            }
            ContentRule::HeadingThenParagraphs => {
                let id = node.section_id().unwrap_or_default();
                if !seen.insert(id) {
                    return Err(SchemaError::DuplicateSectionId(id.to_string()));
                }
                Self::check_section_children(id, node.children())?;
                for child in node.children() {
                    Self::check_node(child, seen)?;
                }
                Ok(())
            }
            ContentRule::Text => Self::check_runs(node.kind(), node.runs()),
        }
    }

    fn check_section_children(id: &str, children: &[Node]) -> SchemaResult<()> {
        match children.first() {
            Some(first) if first.kind() == NodeKind::Heading => {}
            _ => {
                return Err(SchemaError::MissingHeading { id: id.to_string() });
            }
        }

        if children.len() < 2 {
            return Err(SchemaError::EmptySection { id: id.to_string() });
        }

        for (index, child) in children.iter().enumerate().skip(1) {
            if child.kind() != NodeKind::Paragraph {
                return Err(SchemaError::UnexpectedNode {
                    parent: NodeKind::Section,
                    found: child.kind(),
                    index,
                });
            }
        }

        Ok(())
    }

    fn check_marks(kind: NodeKind, runs: &[TextRun]) -> SchemaResult<()> {
        for run in runs {
            if let Some(mark) = run.marks.iter().find(|m| !Self::allows_mark(kind, **m)) {
                return Err(SchemaError::MarkNotAllowed { mark: *mark, node: kind });
            }
        }
        Ok(())
    }

    /// Allowed marks, each mark set sorted and unique, no empty runs, and no
    /// neighbours with equal marks.
    fn check_runs(kind: NodeKind, runs: &[TextRun]) -> SchemaResult<()> {
        Self::check_marks(kind, runs)?;

        for (index, run) in runs.iter().enumerate() {
            for pair in run.marks.windows(2) {
                if pair[0] == pair[1] {
                    return Err(SchemaError::DuplicateMark {
                        mark: pair[0],
                        node: kind,
                        index,
                    });
                }
                if pair[0] > pair[1] {
                    return Err(SchemaError::UnnormalizedRun {
                        node: kind,
                        index,
                        reason: "marks out of order",
                    });
                }
            }

            if run.is_empty() {
                return Err(SchemaError::UnnormalizedRun {
                    node: kind,
                    index,
                    reason: "empty run",
                });
            }

            if index > 0 && runs[index - 1].marks == run.marks {
                return Err(SchemaError::UnnormalizedRun {
                    node: kind,
                    index,
                    reason: "same marks as the previous run",
                });
            }
        }
        Ok(())
    }
}

impl Node {
    pub fn document(sections: Vec<Node>) -> SchemaResult<Node> {
        let node = Node::Document { children: sections };
        Schema::check(&node)?;
        Ok(node)
    }

    pub fn section(id: impl Into<String>, heading: Node, paragraphs: Vec<Node>) -> SchemaResult<Node> {
        let mut children = Vec::with_capacity(paragraphs.len() + 1);
        children.push(heading);
        children.extend(paragraphs);

        let node = Node::Section {
            id: id.into(),
            children,
        };
        Schema::check(&node)?;
        Ok(node)
    }

    pub fn heading(runs: Vec<TextRun>) -> SchemaResult<Node> {
        Schema::check_marks(NodeKind::Heading, &runs)?;
        Ok(Node::Heading {
            content: normalize_runs(runs),
        })
    }

    pub fn paragraph(runs: Vec<TextRun>) -> SchemaResult<Node> {
        Schema::check_marks(NodeKind::Paragraph, &runs)?;
        Ok(Node::Paragraph {
            content: normalize_runs(runs),
        })
    }

    /// Plain-text textblocks cannot violate mark rules
    pub fn plain_heading(text: &str) -> Node {
        Node::Heading {
            content: normalize_runs(vec![TextRun::plain(text)]),
        }
    }

    pub fn plain_paragraph(text: &str) -> Node {
        Node::Paragraph {
            content: normalize_runs(vec![TextRun::plain(text)]),
        }
    }
}
