//! # Transactions
//!
//! Every document edit is an explicit, serializable list of range
//! replacements.
//!
//! ## Design Principles
//!
//! 1. **Atomic**: all steps apply to a copy; the result is validated against
//!    the schema before anything is committed
//! 2. **Invertible**: each step records its inverse against the document it
//!    applied to, which is what the undo history stores
//! 3. **Mappable**: positions held outside the document (selection, pending
//!    lookups) can be mapped through a step

use crate::selection::Selection;
use drafter_schema::{Fragment, Node, Schema, SchemaError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One range replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Step {
    /// Replace `from..to` with `slice`
    Replace {
        from: usize,
        to: usize,
        slice: Fragment,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    #[error("Schema violation: {0}")]
    Schema(#[from] SchemaError),

    #[error("Transaction has no steps")]
    Empty,
}

impl Step {
    pub fn replace(from: usize, to: usize, slice: Fragment) -> Self {
        Step::Replace { from, to, slice }
    }

    /// Apply to `doc` without validating the result
    pub fn apply(&self, doc: &Node) -> Result<Node, TransactionError> {
        match self {
            Step::Replace { from, to, slice } => Ok(doc.replace(*from, *to, slice)?),
        }
    }

    /// Step that undoes this one, computed against the document it applies to
    pub fn invert(&self, doc: &Node) -> Result<Step, TransactionError> {
        match self {
            Step::Replace { from, to, slice } => {
                let removed = doc.slice(*from, *to)?;
                Ok(Step::Replace {
                    from: *from,
                    to: *from + slice.size(),
                    slice: removed,
                })
            }
        }
    }

    /// Map a position from before this step to after it
    pub fn map(&self, pos: usize) -> usize {
        match self {
            Step::Replace { from, to, slice } => {
                let inserted = slice.size();
                if pos < *from || (pos == *from && from != to) {
                    pos
                } else if pos > *to {
                    pos - (to - from) + inserted
                } else {
                    from + inserted
                }
            }
        }
    }
}

/// Atomic group of steps committed as one history entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Transaction {
    pub steps: Vec<Step>,

    /// Shown in history listings ("expand section", "typing")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Selection to set after commit; mapped selection otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

/// Result of applying a transaction to a document
#[derive(Debug, Clone)]
pub struct Applied {
    pub doc: Node,
    /// Inverse steps, in the order they must be applied to undo
    pub inverses: Vec<Step>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(mut self, from: usize, to: usize, slice: Fragment) -> Self {
        self.steps.push(Step::replace(from, to, slice));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Apply all steps to a copy of `doc` and validate the outcome.
    ///
    /// `doc` is never modified; on error nothing has changed.
    pub fn apply(&self, doc: &Node) -> Result<Applied, TransactionError> {
        if self.steps.is_empty() {
            return Err(TransactionError::Empty);
        }

        let mut current = doc.clone();
        let mut inverses = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let inverse = step.invert(&current)?;
            current = step.apply(&current)?;
            inverses.insert(0, inverse);
        }

        Schema::check(&current)?;

        Ok(Applied {
            doc: current,
            inverses,
        })
    }

    /// Map a position through every step
    pub fn map(&self, pos: usize) -> usize {
        self.steps.iter().fold(pos, |pos, step| step.map(pos))
    }
}
