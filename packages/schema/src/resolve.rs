//! # Resolved Positions
//!
//! A document position resolved into the explicit path of ancestors that
//! contain it, from the root (depth 0) to the innermost node.
//!
//! ```text
//!  0   1   2        7    8       13  14  15
//!  |<s>|<h>| Title  |</h>|<p> Body |</p>|</s>|
//! ```
//!
//! Positions on a node boundary stay at the parent's depth; positions strictly
//! inside a node descend into it.

use crate::ast::Node;
use crate::error::{SchemaError, SchemaResult};

/// One ancestor on the path to a position
#[derive(Debug, Clone, Copy)]
pub struct PathStep<'a> {
    pub node: &'a Node,
    /// Index of `node` within its parent (0 for the root)
    pub index: usize,
    /// Position immediately before `node` (`None` for the root)
    pub before: Option<usize>,
    /// Position where `node`'s content starts
    pub start: usize,
}

#[derive(Debug, Clone)]
pub struct ResolvedPos<'a> {
    pub pos: usize,
    path: Vec<PathStep<'a>>,
}

impl<'a> ResolvedPos<'a> {
    pub fn resolve(doc: &'a Node, pos: usize) -> SchemaResult<Self> {
        let size = doc.content_size();
        if pos > size {
            return Err(SchemaError::PositionOutOfRange { pos, size });
        }

        let mut path = vec![PathStep {
            node: doc,
            index: 0,
            before: None,
            start: 0,
        }];

        let mut node = doc;
        let mut start = 0;

        while !node.is_textblock() {
            let mut offset = start;
            let mut next = None;

            for (index, child) in node.children().iter().enumerate() {
                if pos <= offset {
                    break;
                }
                let end = offset + child.node_size();
                if pos < end {
                    next = Some((index, child, offset));
                    break;
                }
                offset = end;
            }

            match next {
                Some((index, child, before)) => {
                    path.push(PathStep {
                        node: child,
                        index,
                        before: Some(before),
                        start: before + 1,
                    });
                    node = child;
                    start = before + 1;
                }
                None => break,
            }
        }

        Ok(Self { pos, path })
    }

    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    pub fn step(&self, depth: usize) -> &PathStep<'a> {
        &self.path[depth]
    }

    pub fn node(&self, depth: usize) -> &'a Node {
        self.path[depth].node
    }

    pub fn parent(&self) -> &'a Node {
        self.node(self.depth())
    }

    pub fn start(&self, depth: usize) -> usize {
        self.path[depth].start
    }

    pub fn before(&self, depth: usize) -> Option<usize> {
        self.path[depth].before
    }

    /// Offset of the position inside its innermost parent's content
    pub fn parent_offset(&self) -> usize {
        self.pos - self.start(self.depth())
    }

    /// Index of the child that starts at or after the position, within the node at `depth`
    pub fn index(&self, depth: usize) -> usize {
        match self.path.get(depth + 1) {
            Some(step) => step.index,
            None => {
                let node = self.node(depth);
                let mut offset = self.start(depth);
                let mut index = 0;
                for child in node.children() {
                    if offset >= self.pos {
                        break;
                    }
                    offset += child.node_size();
                    index += 1;
                }
                index
            }
        }
    }

    /// Whether the position lies exactly on a child boundary of the node at `depth`
    pub fn at_child_boundary(&self, depth: usize) -> bool {
        let node = self.node(depth);
        let index = self.index(depth);
        self.start(depth) + node.child_offset(index) == self.pos
    }

    /// Child indices from the root down to the innermost parent
    pub fn indices(&self) -> Vec<usize> {
        self.path.iter().skip(1).map(|s| s.index).collect()
    }

    /// Ancestors from innermost to outermost
    pub fn ancestors(&self) -> impl Iterator<Item = (usize, &PathStep<'a>)> {
        self.path.iter().enumerate().rev()
    }

    /// Whether both positions share the same innermost parent node
    pub fn same_parent(&self, other: &ResolvedPos<'_>) -> bool {
        self.depth() == other.depth() && self.before(self.depth()) == other.before(other.depth())
    }
}

impl Node {
    pub fn resolve(&self, pos: usize) -> SchemaResult<ResolvedPos<'_>> {
        ResolvedPos::resolve(self, pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    fn doc() -> Node {
        Node::Document {
            children: vec![
                Node::Section {
                    id: "a".to_string(),
                    children: vec![Node::plain_heading("Title"), Node::plain_paragraph("Body")],
                },
                Node::Section {
                    id: "b".to_string(),
                    children: vec![Node::plain_heading("Next"), Node::plain_paragraph("More")],
                },
            ],
        }
    }

    #[test]
    fn test_resolve_inside_heading() {
        let doc = doc();
        let pos = doc.resolve(4).unwrap();

        assert_eq!(pos.depth(), 2);
        assert_eq!(pos.parent().kind(), NodeKind::Heading);
        assert_eq!(pos.parent_offset(), 2);
        assert_eq!(pos.before(1), Some(0));
        assert_eq!(pos.node(1).section_id(), Some("a"));
    }

    #[test]
    fn test_resolve_between_sections() {
        let doc = doc();
        // first section: 2 + (2 + 5) + (2 + 4) = 15
        let pos = doc.resolve(15).unwrap();

        assert_eq!(pos.depth(), 0);
        assert_eq!(pos.index(0), 1);
        assert!(pos.at_child_boundary(0));
    }

    #[test]
    fn test_resolve_second_section() {
        let doc = doc();
        let pos = doc.resolve(17).unwrap();

        assert_eq!(pos.depth(), 2);
        assert_eq!(pos.node(1).section_id(), Some("b"));
        assert_eq!(pos.before(1), Some(15));
        assert_eq!(pos.indices(), vec![1, 0]);
    }

    #[test]
    fn test_resolve_out_of_range() {
        let doc = doc();
        let size = doc.content_size();
        assert!(matches!(
            doc.resolve(size + 1),
            Err(SchemaError::PositionOutOfRange { .. })
        ));
        assert!(doc.resolve(size).is_ok());
    }
}
