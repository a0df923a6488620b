//! # Section Locator
//!
//! Finds the section enclosing a document position, for section-scoped
//! actions and the UI anchored next to them.
//!
//! ```text
//! point ──resolve──► [document, section, paragraph]
//!                           walk innermost → outermost
//!                           first Section wins
//! ```
//!
//! A point between two sections (or at either end of the document) has no
//! enclosing section and yields `None`.

use crate::host::{EditorHandle, EditorHost};
use drafter_schema::{Node, NodeKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps document ranges to screen rectangles
pub trait Geometry {
    /// Bounding rectangle of the textblocks in `from..to`
    fn range_rect(&self, doc: &Node, from: usize, to: usize) -> Rect;
}

/// Monospace layout: every textblock starts a new row and wraps at
/// `wrap_width` characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineGeometry {
    pub wrap_width: usize,
    pub line_height: f64,
    pub char_width: f64,
}

impl LineGeometry {
    pub fn new(wrap_width: usize) -> Self {
        Self {
            wrap_width: wrap_width.max(1),
            line_height: 1.0,
            char_width: 1.0,
        }
    }

    fn rows(&self, chars: usize) -> usize {
        chars.div_ceil(self.wrap_width.max(1)).max(1)
    }
}

impl Default for LineGeometry {
    fn default() -> Self {
        Self::new(80)
    }
}

impl Geometry for LineGeometry {
    fn range_rect(&self, doc: &Node, from: usize, to: usize) -> Rect {
        let mut blocks = Vec::new();
        collect_textblocks(doc, 0, &mut blocks);

        let mut row = 0;
        let mut first_row = None;
        let mut last_row = 0;
        let mut widest = 0;

        for (before, block) in blocks {
            let chars = block.content_size();
            let rows = self.rows(chars);

            if before >= from && before < to {
                first_row.get_or_insert(row);
                last_row = row + rows;
                widest = widest.max(chars.min(self.wrap_width.max(1)));
            }
            row += rows;
        }

        let first_row = first_row.unwrap_or(row);
        let last_row = last_row.max(first_row);

        Rect {
            x: 0.0,
            y: first_row as f64 * self.line_height,
            width: widest as f64 * self.char_width,
            height: (last_row - first_row) as f64 * self.line_height,
        }
    }
}

/// Textblocks in document order with the position before each
fn collect_textblocks<'a>(node: &'a Node, start: usize, out: &mut Vec<(usize, &'a Node)>) {
    let mut pos = start;
    for child in node.children() {
        if child.is_textblock() {
            out.push((pos, child));
        } else {
            collect_textblocks(child, pos + 1, out);
        }
        pos += child.node_size();
    }
}

/// The section a position falls in, captured at one document version
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSection {
    pub handle: EditorHandle,
    pub epoch: u64,
    /// Position immediately before the section
    pub position: usize,
    pub section_id: String,
    /// Snapshot of the section node
    pub node: Node,
    pub anchor_rect: Rect,
}

/// Innermost section enclosing `point`, with its position
pub fn enclosing_section(doc: &Node, point: usize) -> Option<(usize, &Node)> {
    let resolved = doc.resolve(point).ok()?;

    for (_, step) in resolved.ancestors() {
        if step.node.kind() == NodeKind::Section {
            return step.before.map(|before| (before, step.node));
        }
    }
    None
}

pub fn locate(
    host: &EditorHost,
    handle: EditorHandle,
    point: usize,
    geometry: &dyn Geometry,
) -> Option<ActiveSection> {
    let state = host.state(handle).ok()?;
    let doc = state.doc();
    let (position, node) = enclosing_section(doc, point)?;

    Some(ActiveSection {
        handle,
        epoch: state.epoch,
        position,
        section_id: node.section_id()?.to_string(),
        node: node.clone(),
        anchor_rect: geometry.range_rect(doc, position, position + node.node_size()),
    })
}

/// Locate the section under the selection head
pub fn locate_selection(
    host: &EditorHost,
    handle: EditorHandle,
    geometry: &dyn Geometry,
) -> Option<ActiveSection> {
    let head = host.state(handle).ok()?.selection().head;
    locate(host, handle, head, geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Node {
        Node::Document {
            children: vec![
                Node::Section {
                    id: "a".to_string(),
                    children: vec![Node::plain_heading("Title"), Node::plain_paragraph("Body")],
                },
                Node::Section {
                    id: "b".to_string(),
                    children: vec![
                        Node::plain_heading("Next"),
                        Node::plain_paragraph("More"),
                        Node::plain_paragraph(&"x".repeat(25)),
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_enclosing_section() {
        let doc = doc();
        let (pos, node) = enclosing_section(&doc, 10).unwrap();
        assert_eq!(pos, 0);
        assert_eq!(node.section_id(), Some("a"));

        let (pos, node) = enclosing_section(&doc, 17).unwrap();
        assert_eq!(pos, 15);
        assert_eq!(node.section_id(), Some("b"));
    }

    #[test]
    fn test_no_section_between_sections() {
        let doc = doc();
        assert!(enclosing_section(&doc, 0).is_none());
        assert!(enclosing_section(&doc, 15).is_none());
        assert!(enclosing_section(&doc, doc.content_size()).is_none());
    }

    #[test]
    fn test_line_geometry_rows() {
        let doc = doc();
        let geometry = LineGeometry::new(10);

        // section a: heading + body = rows 0..2
        let first = geometry.range_rect(&doc, 0, 15);
        assert_eq!(first.y, 0.0);
        assert_eq!(first.height, 2.0);
        assert_eq!(first.width, 5.0);

        // section b: heading, "More", 25 chars wrapped into 3 rows
        let second = geometry.range_rect(&doc, 15, doc.content_size());
        assert_eq!(second.y, 2.0);
        assert_eq!(second.height, 5.0);
        assert_eq!(second.width, 10.0);
    }
}
