//! # Undo/Redo Stack
//!
//! Tracks transaction history and enables undo/redo.
//!
//! ## Design
//!
//! - Each transaction records its inverse steps before being committed
//! - Undo applies the inverses and moves the entry to the redo stack
//! - Redo reapplies the original steps
//! - New transactions clear the redo stack
//! - A failed undo/redo leaves both stacks untouched
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let doc = stack.apply(&transaction, &doc)?;
//! let doc = stack.undo(&doc)?.unwrap().doc;
//! let doc = stack.redo(&doc)?.unwrap().doc;
//! ```

use crate::transaction::{Step, Transaction, TransactionError};
use drafter_schema::{Node, Schema};

/// A committed transaction and the steps that revert it
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Steps in application order
    pub steps: Vec<Step>,

    /// Inverse steps in undo order
    pub inverses: Vec<Step>,

    pub description: Option<String>,
}

/// Document after an undo or redo, with the steps that produced it
#[derive(Debug, Clone)]
pub struct Reverted {
    pub doc: Node,
    pub steps: Vec<Step>,
}

/// Undo/redo stack for one editor
#[derive(Debug)]
pub struct UndoStack {
    /// Applied entries (most recent last)
    undo_stack: Vec<HistoryEntry>,

    /// Undone entries (most recent last)
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Apply a transaction and record it for undo
    pub fn apply(&mut self, transaction: &Transaction, doc: &Node) -> Result<Node, TransactionError> {
        let applied = transaction.apply(doc)?;

        self.push(HistoryEntry {
            steps: transaction.steps.clone(),
            inverses: applied.inverses,
            description: transaction.description.clone(),
        });

        Ok(applied.doc)
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New edit invalidates the redo branch
        self.redo_stack.clear();
    }

    /// Undo the most recent entry. `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, doc: &Node) -> Result<Option<Reverted>, TransactionError> {
        let Some(entry) = self.undo_stack.last() else {
            return Ok(None);
        };

        let reverted = replay(&entry.inverses, doc)?;

        if let Some(entry) = self.undo_stack.pop() {
            self.redo_stack.push(entry);
        }
        Ok(Some(reverted))
    }

    /// Redo the most recently undone entry
    pub fn redo(&mut self, doc: &Node) -> Result<Option<Reverted>, TransactionError> {
        let Some(entry) = self.redo_stack.last() else {
            return Ok(None);
        };

        let reverted = replay(&entry.steps, doc)?;

        if let Some(entry) = self.redo_stack.pop() {
            self.undo_stack.push(entry);
        }
        Ok(Some(reverted))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|entry| entry.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

fn replay(steps: &[Step], doc: &Node) -> Result<Reverted, TransactionError> {
    let mut current = doc.clone();
    for step in steps {
        current = step.apply(&current)?;
    }
    Schema::check(&current)?;

    Ok(Reverted {
        doc: current,
        steps: steps.to_vec(),
    })
}
