use drafter_schema::Node;
use serde::{Deserialize, Serialize};

/// Text selection between two document positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn cursor(pos: usize) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    pub fn range(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// Cursor at the start of the first textblock
    pub fn at_start(doc: &Node) -> Self {
        let mut pos = 0;
        let mut node = doc;
        while let Some(first) = node.child(0) {
            pos += 1;
            node = first;
        }
        Self::cursor(pos)
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn map(&self, f: impl Fn(usize) -> usize) -> Self {
        Self {
            anchor: f(self.anchor),
            head: f(self.head),
        }
    }

    pub fn fits(&self, doc: &Node) -> bool {
        self.to() <= doc.content_size()
    }
}
