//! Range slicing and replacement on document trees.
//!
//! Both ends of a range must resolve to the same parent. Inside a textblock
//! the range covers characters; anywhere else it must fall on child
//! boundaries and covers whole nodes. Replacement never mutates its input:
//! it returns a new tree, which callers validate before committing.

use crate::ast::{normalize_runs, split_runs, Node, TextRun};
use crate::error::{SchemaError, SchemaResult};
use crate::resolve::ResolvedPos;
use serde::{Deserialize, Serialize};

/// Content inserted by (or removed from) a range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum Fragment {
    Blocks(Vec<Node>),
    Inline(Vec<TextRun>),
}

impl Fragment {
    pub fn empty_inline() -> Self {
        Fragment::Inline(Vec::new())
    }

    pub fn size(&self) -> usize {
        match self {
            Fragment::Blocks(nodes) => nodes.iter().map(Node::node_size).sum(),
            Fragment::Inline(runs) => runs.iter().map(TextRun::len).sum(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Fragment::Inline(_))
    }
}

fn resolve_range(doc: &Node, from: usize, to: usize) -> SchemaResult<(ResolvedPos<'_>, ResolvedPos<'_>)> {
    if from > to {
        return Err(SchemaError::invalid_range(from, to, "start is after end"));
    }

    let start = doc.resolve(from)?;
    let end = doc.resolve(to)?;

    if !start.same_parent(&end) {
        return Err(SchemaError::invalid_range(from, to, "range crosses node boundaries"));
    }

    let depth = start.depth();
    if !start.parent().is_textblock() && !(start.at_child_boundary(depth) && end.at_child_boundary(depth)) {
        return Err(SchemaError::invalid_range(from, to, "range splits a node"));
    }

    Ok((start, end))
}

impl Node {
    /// Copy the content between two positions
    pub fn slice(&self, from: usize, to: usize) -> SchemaResult<Fragment> {
        let (start, end) = resolve_range(self, from, to)?;
        let parent = start.parent();

        if parent.is_textblock() {
            let (_, tail) = split_runs(parent.runs(), start.parent_offset());
            let (middle, _) = split_runs(&tail, end.parent_offset() - start.parent_offset());
            return Ok(Fragment::Inline(normalize_runs(middle)));
        }

        let depth = start.depth();
        let nodes = parent.children()[start.index(depth)..end.index(depth)].to_vec();
        Ok(Fragment::Blocks(nodes))
    }

    /// Return a copy of this tree with `from..to` replaced by `fragment`
    pub fn replace(&self, from: usize, to: usize, fragment: &Fragment) -> SchemaResult<Node> {
        let (start, end) = resolve_range(self, from, to)?;
        let depth = start.depth();
        let indices = start.indices();
        let is_textblock = start.parent().is_textblock();

        let (lo, hi) = if is_textblock {
            (start.parent_offset(), end.parent_offset())
        } else {
            (start.index(depth), end.index(depth))
        };

        let mut doc = self.clone();
        let mut target = &mut doc;
        for index in indices {
            target = target
                .children_mut()
                .and_then(|children| children.get_mut(index))
                .ok_or_else(|| SchemaError::invalid_range(from, to, "path no longer exists"))?;
        }

        match (fragment, is_textblock) {
            (Fragment::Inline(runs), true) => {
                let content = target
                    .runs_mut()
                    .ok_or_else(|| SchemaError::invalid_range(from, to, "target holds no text"))?;
                let (left, rest) = split_runs(content, lo);
                let (_, right) = split_runs(&rest, hi - lo);

                let mut merged = left;
                merged.extend(runs.iter().cloned());
                merged.extend(right);
                *content = normalize_runs(merged);
            }
            (Fragment::Blocks(nodes), false) => {
                let children = target
                    .children_mut()
                    .ok_or_else(|| SchemaError::invalid_range(from, to, "target holds no blocks"))?;
                children.splice(lo..hi, nodes.iter().cloned());
            }
            (Fragment::Inline(_), false) => {
                return Err(SchemaError::invalid_range(from, to, "inline content outside a textblock"));
            }
            (Fragment::Blocks(_), true) => {
                return Err(SchemaError::invalid_range(from, to, "block content inside a textblock"));
            }
        }

        Ok(doc)
    }
}
