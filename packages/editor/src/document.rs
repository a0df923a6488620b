//! # Editor State
//!
//! One live document plus its selection, version counters and history.
//!
//! ## Lifecycle
//!
//! ```text
//! Build → Load → Transact → (Undo/Redo) → Replace → ... → Destroy
//!   ↓       ↓        ↓                       ↓
//! Node   version  version+1               epoch+1, history reset
//! ```
//!
//! `version` counts committed document changes. `epoch` counts whole-document
//! replacements; anything computed against an older epoch is stale.

use crate::errors::EditorError;
use crate::selection::Selection;
use crate::transaction::{Step, Transaction};
use crate::undo_stack::UndoStack;
use drafter_schema::{Node, Schema};

#[derive(Debug)]
pub struct EditorState {
    doc: Node,
    selection: Selection,

    /// Increments on every committed change
    pub version: u64,

    /// Increments on every whole-document replacement
    pub epoch: u64,

    history: UndoStack,
}

impl EditorState {
    /// Create state for a schema-valid document
    pub fn new(doc: Node, history_depth: usize) -> Result<Self, EditorError> {
        Schema::check(&doc)?;
        let selection = Selection::at_start(&doc);

        Ok(Self {
            doc,
            selection,
            version: 0,
            epoch: 0,
            history: UndoStack::with_max_levels(history_depth),
        })
    }

    pub fn doc(&self) -> &Node {
        &self.doc
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Commit a transaction as one undo entry. On error nothing changes.
    pub fn apply(&mut self, transaction: &Transaction) -> Result<u64, EditorError> {
        let doc = self.history.apply(transaction, &self.doc)?;

        let selection = match transaction.selection {
            Some(selection) => selection,
            None => self.selection.map(|pos| transaction.map(pos)),
        };

        self.commit(doc, selection);
        Ok(self.version)
    }

    /// Swap in a new document, resetting history and selection
    pub fn replace_document(&mut self, doc: Node) -> Result<u64, EditorError> {
        Schema::check(&doc)?;

        self.selection = Selection::at_start(&doc);
        self.doc = doc;
        self.history.clear();
        self.version += 1;
        self.epoch += 1;
        Ok(self.epoch)
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        match self.history.undo(&self.doc)? {
            Some(reverted) => {
                let selection = map_through(self.selection, &reverted.steps);
                self.commit(reverted.doc, selection);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        match self.history.redo(&self.doc)? {
            Some(reverted) => {
                let selection = map_through(self.selection, &reverted.steps);
                self.commit(reverted.doc, selection);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_selection(&mut self, selection: Selection) -> Result<(), EditorError> {
        if !selection.fits(&self.doc) {
            return Err(EditorError::SelectionOutOfRange {
                pos: selection.to(),
                size: self.doc.content_size(),
            });
        }
        self.selection = selection;
        Ok(())
    }

    fn commit(&mut self, doc: Node, selection: Selection) {
        self.doc = doc;
        self.version += 1;

        let size = self.doc.content_size();
        self.selection = selection.map(|pos| pos.min(size));
    }
}

fn map_through(selection: Selection, steps: &[Step]) -> Selection {
    selection.map(|pos| steps.iter().fold(pos, |pos, step| step.map(pos)))
}
