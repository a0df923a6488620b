//! # Drafter Assistant
//!
//! Connects the editor to a generative model.
//!
//! ```text
//! prompt ──► Collaborator::generate_draft ──► Outline
//!                                               │ DocumentBuilder
//!                                               ▼
//!                                   DraftSession (replace, epoch+1)
//!
//! ActiveSection ──► Collaborator::edit_section ──► SectionData
//!                                                    │ ticket still current?
//!                                                    ▼
//!                                   single Replace step, same section id
//! ```
//!
//! [`GeminiCollaborator`] is the HTTP implementation; tests script their own
//! [`Collaborator`].

pub mod action;
pub mod error;
pub mod gemini;
pub mod orchestrator;
pub mod prompts;
pub mod provider;
pub mod session;

pub use action::SectionAction;
pub use error::{ActionError, AiError, DraftError, UnknownAction};
pub use gemini::{GeminiCollaborator, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use orchestrator::{generate_draft, perform_action, shared, SharedSession};
pub use provider::Collaborator;
pub use session::{ActionOutcome, DraftSession, DropReason, Ticket};
