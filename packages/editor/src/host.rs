//! # Editor Host
//!
//! Registry of live editors. Callers hold an opaque [`EditorHandle`]; every
//! operation on a destroyed or unknown handle fails with
//! [`EditorError::UnknownHandle`].
//!
//! ```text
//!  initialize ──► EditorHandle ──► apply_transaction / undo / redo
//!                      │             set_selection / run_command
//!                      │             replace_document (epoch+1)
//!                      ▼
//!                   destroy
//! ```
//!
//! Each committed change notifies subscribed observers exactly once before
//! the call returns.

use crate::commands::{self, Command};
use crate::document::EditorState;
use crate::errors::EditorError;
use crate::observers::{ChangeEvent, ChangeKind, Observer, Observers, SubscriptionId};
use crate::selection::Selection;
use crate::transaction::Transaction;
use drafter_schema::{DocumentBuilder, Node, Outline};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Opaque identifier of one live editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorHandle(u64);

impl fmt::Display for EditorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor-{}", self.0)
    }
}

pub struct EditorHost {
    editors: HashMap<EditorHandle, EditorState>,
    observers: Observers,
    next_handle: u64,
    history_depth: usize,
}

impl EditorHost {
    pub fn new() -> Self {
        Self::with_history_depth(DEFAULT_HISTORY_DEPTH)
    }

    pub fn with_history_depth(history_depth: usize) -> Self {
        Self {
            editors: HashMap::new(),
            observers: Observers::default(),
            next_handle: 0,
            history_depth,
        }
    }

    /// Create an editor. `None` loads the placeholder document.
    pub fn initialize(&mut self, doc: Option<Node>) -> Result<EditorHandle, EditorError> {
        self.next_handle += 1;
        let handle = EditorHandle(self.next_handle);

        let doc = match doc {
            Some(doc) => doc,
            None => DocumentBuilder::new(&handle.to_string()).build_document(&Outline::default()),
        };

        let state = EditorState::new(doc, self.history_depth)?;
        tracing::info!(%handle, sections = state.doc().child_count(), "Editor initialized");

        self.editors.insert(handle, state);
        Ok(handle)
    }

    pub fn is_alive(&self, handle: EditorHandle) -> bool {
        self.editors.contains_key(&handle)
    }

    pub fn state(&self, handle: EditorHandle) -> Result<&EditorState, EditorError> {
        self.editors
            .get(&handle)
            .ok_or(EditorError::UnknownHandle(handle))
    }

    pub fn doc(&self, handle: EditorHandle) -> Result<&Node, EditorError> {
        self.state(handle).map(EditorState::doc)
    }

    /// Swap the whole document. History is reset and the epoch advances, so
    /// anything computed against the previous document is stale.
    pub fn replace_document(&mut self, handle: EditorHandle, doc: Node) -> Result<u64, EditorError> {
        let state = state_mut(&mut self.editors, handle)?;
        let epoch = state.replace_document(doc)?;

        tracing::info!(%handle, epoch, "Document replaced");
        emit(&mut self.observers, handle, ChangeKind::Replaced, state);
        Ok(epoch)
    }

    /// Commit a transaction as a single undo entry. Returns the new version.
    pub fn apply_transaction(
        &mut self,
        handle: EditorHandle,
        transaction: &Transaction,
    ) -> Result<u64, EditorError> {
        let state = state_mut(&mut self.editors, handle)?;
        let version = state.apply(transaction)?;

        tracing::info!(
            %handle,
            version,
            steps = transaction.steps.len(),
            description = transaction.description.as_deref().unwrap_or(""),
            "Transaction committed"
        );
        emit(&mut self.observers, handle, ChangeKind::Transaction, state);
        Ok(version)
    }

    /// Returns `false` when there was nothing to undo
    pub fn undo(&mut self, handle: EditorHandle) -> Result<bool, EditorError> {
        let state = state_mut(&mut self.editors, handle)?;
        if !state.undo()? {
            return Ok(false);
        }

        tracing::debug!(%handle, version = state.version, "Undo");
        emit(&mut self.observers, handle, ChangeKind::Undo, state);
        Ok(true)
    }

    pub fn redo(&mut self, handle: EditorHandle) -> Result<bool, EditorError> {
        let state = state_mut(&mut self.editors, handle)?;
        if !state.redo()? {
            return Ok(false);
        }

        tracing::debug!(%handle, version = state.version, "Redo");
        emit(&mut self.observers, handle, ChangeKind::Redo, state);
        Ok(true)
    }

    pub fn set_selection(&mut self, handle: EditorHandle, selection: Selection) -> Result<(), EditorError> {
        let state = state_mut(&mut self.editors, handle)?;
        state.set_selection(selection)?;

        emit(&mut self.observers, handle, ChangeKind::Selection, state);
        Ok(())
    }

    /// Run an editing command against the current selection.
    ///
    /// Returns `false` when the command does not apply here.
    pub fn run_command(&mut self, handle: EditorHandle, command: &Command) -> Result<bool, EditorError> {
        let state = self.state(handle)?;
        let (doc, selection) = (state.doc(), state.selection());

        let transaction = match command {
            Command::Undo => return self.undo(handle),
            Command::Redo => return self.redo(handle),
            Command::ToggleMark(mark) => commands::toggle_mark(doc, selection, *mark),
            Command::InsertText(text) => commands::insert_text(doc, selection, text),
            Command::DeleteBackward => commands::delete_backward(doc, selection),
            Command::SplitBlock => commands::split_block(doc, selection),
        };

        match transaction {
            Some(transaction) => {
                self.apply_transaction(handle, &transaction)?;
                Ok(true)
            }
            None => {
                tracing::debug!(%handle, ?command, "Command not applicable");
                Ok(false)
            }
        }
    }

    /// Run the command bound to `key`, if any
    pub fn handle_key(&mut self, handle: EditorHandle, key: &str) -> Result<bool, EditorError> {
        self.state(handle)?;
        match commands::command_for_key(key) {
            Some(command) => self.run_command(handle, &command),
            None => Ok(false),
        }
    }

    pub fn destroy(&mut self, handle: EditorHandle) -> Result<(), EditorError> {
        self.editors
            .remove(&handle)
            .ok_or(EditorError::UnknownHandle(handle))?;

        tracing::info!(%handle, "Editor destroyed");
        Ok(())
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.observers.add(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

impl Default for EditorHost {
    fn default() -> Self {
        Self::new()
    }
}

fn state_mut(
    editors: &mut HashMap<EditorHandle, EditorState>,
    handle: EditorHandle,
) -> Result<&mut EditorState, EditorError> {
    editors
        .get_mut(&handle)
        .ok_or(EditorError::UnknownHandle(handle))
}

fn emit(observers: &mut Observers, handle: EditorHandle, kind: ChangeKind, state: &EditorState) {
    let event = ChangeEvent {
        handle,
        kind,
        version: state.version,
        epoch: state.epoch,
        selection: state.selection(),
    };
    observers.notify(&event, state.doc());
}

#[cfg(test)]
mod tests {
    use super::*;
    use drafter_schema::{Fragment, Mark, TextRun, PLACEHOLDER_PARAGRAPH, UNTITLED_HEADING};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_initialize_placeholder() {
        let mut host = EditorHost::new();
        let handle = host.initialize(None).unwrap();

        let doc = host.doc(handle).unwrap();
        assert_eq!(doc.child_count(), 1);
        let section = doc.child(0).unwrap();
        assert_eq!(section.child(0).unwrap().text_content(), UNTITLED_HEADING);
        assert_eq!(section.child(1).unwrap().text_content(), PLACEHOLDER_PARAGRAPH);
    }

    #[test]
    fn test_destroyed_handle_is_unknown() {
        let mut host = EditorHost::new();
        let handle = host.initialize(None).unwrap();
        host.destroy(handle).unwrap();

        assert!(!host.is_alive(handle));
        assert_eq!(host.undo(handle), Err(EditorError::UnknownHandle(handle)));
        assert_eq!(host.destroy(handle), Err(EditorError::UnknownHandle(handle)));
        assert!(host.handle_key(handle, "Mod-z").is_err());
    }

    #[test]
    fn test_observers_fire_once_per_change() {
        let mut host = EditorHost::new();
        let handle = host.initialize(None).unwrap();

        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        host.subscribe(move |event: &ChangeEvent, _doc: &Node| {
            sink.lock().unwrap().push(event.kind);
        });

        let tr = Transaction::new().replace(2, 2, Fragment::Inline(vec![TextRun::plain("My ")]));
        host.apply_transaction(handle, &tr).unwrap();
        host.undo(handle).unwrap();
        host.redo(handle).unwrap();
        host.set_selection(handle, Selection::cursor(3)).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                ChangeKind::Transaction,
                ChangeKind::Undo,
                ChangeKind::Redo,
                ChangeKind::Selection
            ]
        );
    }

    #[test]
    fn test_failed_change_does_not_notify() {
        let mut host = EditorHost::new();
        let handle = host.initialize(None).unwrap();

        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        host.subscribe(move |_: &ChangeEvent, _: &Node| *sink.lock().unwrap() += 1);

        // nothing to undo yet
        assert!(!host.undo(handle).unwrap());
        let bad = Transaction::new().replace(2, 2, Fragment::Inline(vec![TextRun::marked("x", [Mark::Em])]));
        assert!(host.apply_transaction(handle, &bad).is_err());

        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_keymap_toggles_strong() {
        let mut host = EditorHost::new();
        let handle = host.initialize(None).unwrap();

        // "Untitled" heading is 2..10, paragraph content starts at 12
        host.set_selection(handle, Selection::range(12, 17)).unwrap();
        assert!(host.handle_key(handle, "Mod-b").unwrap());

        let para = host.doc(handle).unwrap().child(0).unwrap().child(1).unwrap();
        assert_eq!(para.runs()[0], TextRun::marked("Start", [Mark::Strong]));

        assert!(host.handle_key(handle, "Mod-z").unwrap());
        let para = host.doc(handle).unwrap().child(0).unwrap().child(1).unwrap();
        assert_eq!(para.runs(), &[TextRun::plain(PLACEHOLDER_PARAGRAPH)]);

        assert!(!host.handle_key(handle, "Mod-k").unwrap());
    }
}
