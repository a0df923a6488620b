//! # Section Action Orchestrator
//!
//! Runs AI requests against a shared [`DraftSession`] without holding its
//! lock across the request.
//!
//! ```text
//! lock ─ begin ticket ─ unlock
//!          │
//!          ▼
//!   collaborator.edit_section(...).await      (no lock held)
//!          │
//! lock ─ re-check ticket ─ replace section ─ unlock
//!          │
//!   ticket cleared (always, including on error or cancellation)
//! ```

use crate::action::SectionAction;
use crate::error::{ActionError, DraftError};
use crate::provider::Collaborator;
use crate::session::{ActionOutcome, DraftSession, Ticket};
use drafter_editor::{ActiveSection, EditorHandle};
use drafter_schema::SectionData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type SharedSession = Arc<Mutex<DraftSession>>;

pub fn shared(session: DraftSession) -> SharedSession {
    Arc::new(Mutex::new(session))
}

pub(crate) fn lock(session: &SharedSession) -> MutexGuard<'_, DraftSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the pending ticket when dropped
struct PendingGuard<'a> {
    session: &'a SharedSession,
    ticket: Ticket,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.session).finish(&self.ticket);
    }
}

/// Ask the collaborator to transform one section and replace it in place.
///
/// The document is untouched on any error. A response that arrives after the
/// editor was destroyed, the document was replaced, or the section vanished
/// is discarded with [`ActionOutcome::Dropped`].
pub async fn perform_action<C>(
    session: &SharedSession,
    collaborator: &C,
    active: &ActiveSection,
    action: SectionAction,
) -> Result<ActionOutcome, ActionError>
where
    C: Collaborator + ?Sized,
{
    let data = SectionData::from_section(&active.node)?;
    let ticket = lock(session).begin(active, action)?;
    let guard = PendingGuard { session, ticket };

    let result = collaborator.edit_section(action, &data).await;

    let outcome = match result {
        Ok(updated) => lock(session).apply_section(&guard.ticket, &updated),
        Err(err) => {
            tracing::warn!(
                collaborator = collaborator.id(),
                section = %guard.ticket.section_id,
                %action,
                error = %err,
                "Section action failed"
            );
            Err(ActionError::Ai(err))
        }
    };

    drop(guard);
    outcome
}

/// Generate a fresh draft from `prompt` and load it into the session's editor.
///
/// Loading replaces the whole document and advances the epoch, so any section
/// action still in flight is dropped when it returns.
pub async fn generate_draft<C>(
    session: &SharedSession,
    collaborator: &C,
    prompt: &str,
) -> Result<(EditorHandle, u64), DraftError>
where
    C: Collaborator + ?Sized,
{
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(DraftError::EmptyPrompt);
    }

    let outline = collaborator.generate_draft(prompt).await.map_err(|err| {
        tracing::warn!(collaborator = collaborator.id(), error = %err, "Draft generation failed");
        err
    })?;

    let (handle, epoch) = lock(session).load_outline(prompt, &outline)?;
    tracing::info!(%handle, epoch, sections = outline.sections.len(), "Draft generated");
    Ok((handle, epoch))
}
