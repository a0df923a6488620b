use crate::ast::{Mark, NodeKind};
use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Document must contain at least one section")]
    EmptyDocument,

    #[error("Section {id} must contain at least one paragraph")]
    EmptySection { id: String },

    #[error("Section {id} must start with a heading")]
    MissingHeading { id: String },

    #[error("Unexpected {found:?} at index {index} inside {parent:?}")]
    UnexpectedNode {
        parent: NodeKind,
        found: NodeKind,
        index: usize,
    },

    #[error("Mark {mark:?} is not allowed in {node:?}")]
    MarkNotAllowed { mark: Mark, node: NodeKind },

    #[error("Mark {mark:?} appears twice on run {index} of {node:?}")]
    DuplicateMark {
        mark: Mark,
        node: NodeKind,
        index: usize,
    },

    #[error("Run {index} of {node:?} is not normalized: {reason}")]
    UnnormalizedRun {
        node: NodeKind,
        index: usize,
        reason: &'static str,
    },

    #[error("Duplicate section id: {0}")]
    DuplicateSectionId(String),

    #[error("Position {pos} is outside the document (size {size})")]
    PositionOutOfRange { pos: usize, size: usize },

    #[error("Invalid range {from}..{to}: {reason}")]
    InvalidRange {
        from: usize,
        to: usize,
        reason: String,
    },

    #[error("Expected a section, found {0:?}")]
    NotASection(NodeKind),

    #[error("Unknown tag <{0}>")]
    UnknownTag(String),
}

impl SchemaError {
    pub fn invalid_range(from: usize, to: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            from,
            to,
            reason: reason.into(),
        }
    }
}
