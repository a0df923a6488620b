//! # Change Observers
//!
//! Every committed change notifies observers exactly once, synchronously,
//! before the host call that caused it returns. Observers receive the event
//! and the document as it stands after the change, so section-scoped UI can
//! recompute the active section from the new selection.

use crate::host::EditorHandle;
use crate::selection::Selection;
use drafter_schema::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A transaction was committed
    Transaction,
    /// The whole document was swapped (new draft)
    Replaced,
    Undo,
    Redo,
    /// Selection moved without a document change
    Selection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub handle: EditorHandle,
    pub kind: ChangeKind,
    pub version: u64,
    pub epoch: u64,
    pub selection: Selection,
}

/// Receives change notifications from the editor host
pub trait Observer: Send {
    fn on_change(&mut self, event: &ChangeEvent, doc: &Node);
}

impl<F> Observer for F
where
    F: FnMut(&ChangeEvent, &Node) + Send,
{
    fn on_change(&mut self, event: &ChangeEvent, doc: &Node) {
        self(event, doc)
    }
}

/// Identifies a registered observer for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Box<dyn Observer>)>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, event: &ChangeEvent, doc: &Node) {
        for (_, observer) in &mut self.entries {
            observer.on_change(event, doc);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
