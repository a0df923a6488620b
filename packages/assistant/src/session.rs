//! # Draft Session
//!
//! The single mutator of a drafting session: one editor host, the editor the
//! user is working in, and the set of section actions currently in flight.
//!
//! A pending action is identified by a [`Ticket`]: which editor, which
//! document epoch, which section id. When the AI answers, the ticket decides
//! whether the answer still applies:
//!
//! ```text
//! editor destroyed      → dropped
//! epoch changed         → dropped (a new draft replaced the document)
//! section id missing    → dropped
//! otherwise             → replace the section wherever it is now
//! ```

use crate::action::SectionAction;
use crate::error::{ActionError, DraftError};
use chrono::{DateTime, Utc};
use drafter_editor::{ActiveSection, EditorHandle, EditorHost, Selection, Transaction};
use drafter_schema::{build_section_with_id, DocumentBuilder, Fragment, Node, Outline, SectionData};
use serde::Serialize;
use std::collections::HashSet;

/// Identity of one in-flight section action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub handle: EditorHandle,
    pub epoch: u64,
    pub section_id: String,
    pub action: SectionAction,
    pub started_at: DateTime<Utc>,
}

impl Ticket {
    fn key(&self) -> (EditorHandle, u64, String) {
        (self.handle, self.epoch, self.section_id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    EditorDestroyed,
    DocumentReplaced,
    SectionRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Section replaced; the editor is now at `version`
    Applied { version: u64 },
    /// The response no longer applies and was discarded
    Dropped { reason: DropReason },
}

pub struct DraftSession {
    host: EditorHost,
    handle: Option<EditorHandle>,
    pending: HashSet<(EditorHandle, u64, String)>,
    drafts: u64,
}

impl DraftSession {
    pub fn new(host: EditorHost) -> Self {
        Self {
            host,
            handle: None,
            pending: HashSet::new(),
            drafts: 0,
        }
    }

    pub fn host(&self) -> &EditorHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut EditorHost {
        &mut self.host
    }

    /// The editor currently shown to the user
    pub fn handle(&self) -> Option<EditorHandle> {
        self.handle
    }

    pub fn doc(&self) -> Option<&Node> {
        self.handle.and_then(|handle| self.host.doc(handle).ok())
    }

    /// Open an existing document in a new editor. The previous editor is
    /// destroyed, so actions still in flight against it are dropped.
    pub fn open(&mut self, doc: Node) -> Result<EditorHandle, DraftError> {
        let handle = self.host.initialize(Some(doc))?;

        if let Some(previous) = self.handle.replace(handle) {
            if self.host.is_alive(previous) {
                self.host.destroy(previous)?;
            }
        }
        Ok(handle)
    }

    /// Build a document from the `outline` generated for `prompt` and load it,
    /// replacing the current document if there is one. Returns the editor and
    /// its new epoch.
    pub fn load_outline(&mut self, prompt: &str, outline: &Outline) -> Result<(EditorHandle, u64), DraftError> {
        self.drafts += 1;
        let doc = DocumentBuilder::for_draft(prompt, self.drafts).build_document(outline);

        match self.handle.filter(|handle| self.host.is_alive(*handle)) {
            Some(handle) => {
                let epoch = self.host.replace_document(handle, doc)?;
                Ok((handle, epoch))
            }
            None => {
                let handle = self.host.initialize(Some(doc))?;
                self.handle = Some(handle);
                Ok((handle, self.host.state(handle)?.epoch))
            }
        }
    }

    /// Mark a section as having an action in flight
    pub fn begin(&mut self, active: &ActiveSection, action: SectionAction) -> Result<Ticket, ActionError> {
        let ticket = Ticket {
            handle: active.handle,
            epoch: active.epoch,
            section_id: active.section_id.clone(),
            action,
            started_at: Utc::now(),
        };

        if !self.pending.insert(ticket.key()) {
            return Err(ActionError::Busy {
                section_id: ticket.section_id,
            });
        }

        tracing::debug!(handle = %ticket.handle, section = %ticket.section_id, %action, "Section action started");
        Ok(ticket)
    }

    pub fn finish(&mut self, ticket: &Ticket) {
        self.pending.remove(&ticket.key());
    }

    pub fn is_pending(&self, handle: EditorHandle, section_id: &str) -> bool {
        self.pending
            .iter()
            .any(|(h, _, id)| *h == handle && id == section_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Apply an AI result to the section named by `ticket`, if it still exists
    /// in the same document epoch.
    pub fn apply_section(&mut self, ticket: &Ticket, data: &SectionData) -> Result<ActionOutcome, ActionError> {
        let Ok(state) = self.host.state(ticket.handle) else {
            return Ok(dropped(ticket, DropReason::EditorDestroyed));
        };
        if state.epoch != ticket.epoch {
            return Ok(dropped(ticket, DropReason::DocumentReplaced));
        }
        let Some((pos, current)) = state.doc().find_section(&ticket.section_id) else {
            return Ok(dropped(ticket, DropReason::SectionRemoved));
        };

        let end = pos + current.node_size();
        let replacement = build_section_with_id(ticket.section_id.clone(), data);

        let mut transaction = Transaction::new()
            .replace(pos, end, Fragment::Blocks(vec![replacement]))
            .with_description(ticket.action.description());

        // Keep a cursor that was inside the section inside it
        let head = state.selection().head;
        if head > pos && head < end {
            transaction = transaction.with_selection(Selection::cursor(pos + 2));
        }

        let version = self.host.apply_transaction(ticket.handle, &transaction)?;

        let elapsed = Utc::now() - ticket.started_at;
        tracing::info!(
            handle = %ticket.handle,
            section = %ticket.section_id,
            action = %ticket.action,
            version,
            elapsed_ms = elapsed.num_milliseconds(),
            "Section action applied"
        );
        Ok(ActionOutcome::Applied { version })
    }
}

impl Default for DraftSession {
    fn default() -> Self {
        Self::new(EditorHost::new())
    }
}

fn dropped(ticket: &Ticket, reason: DropReason) -> ActionOutcome {
    tracing::warn!(
        handle = %ticket.handle,
        section = %ticket.section_id,
        action = %ticket.action,
        ?reason,
        "Dropping stale section action response"
    );
    ActionOutcome::Dropped { reason }
}
