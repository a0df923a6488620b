//! Scripted in-memory collaborator shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use drafter_assistant::{AiError, Collaborator, SectionAction};
use drafter_schema::{Outline, SectionData};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Returns queued responses in order. When gated, `edit_section` signals
/// `started` and then waits for `release` before answering.
#[derive(Default)]
pub struct ScriptedCollaborator {
    drafts: Mutex<VecDeque<Result<Outline, AiError>>>,
    edits: Mutex<VecDeque<Result<SectionData, AiError>>>,
    gate: Option<Gate>,
    pub requests: Mutex<Vec<(SectionAction, SectionData)>>,
}

#[derive(Clone, Default)]
pub struct Gate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl ScriptedCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Gate) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_draft(self, outline: Outline) -> Self {
        self.drafts.lock().unwrap().push_back(Ok(outline));
        self
    }

    pub fn with_edit(self, result: Result<SectionData, AiError>) -> Self {
        self.edits.lock().unwrap().push_back(result);
        self
    }
}

#[async_trait]
impl Collaborator for ScriptedCollaborator {
    fn id(&self) -> &str {
        "scripted"
    }

    async fn generate_draft(&self, _prompt: &str) -> Result<Outline, AiError> {
        self.drafts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AiError::EmptyResponse))
    }

    async fn edit_section(&self, action: SectionAction, section: &SectionData) -> Result<SectionData, AiError> {
        self.requests.lock().unwrap().push((action, section.clone()));

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        self.edits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AiError::EmptyResponse))
    }
}

pub fn nda_outline() -> Outline {
    Outline {
        sections: vec![
            SectionData::new(
                "Definitions",
                vec!["\"Confidential Information\" means any non-public information disclosed by either party.".into()],
            ),
            SectionData::new(
                "Obligations",
                vec![
                    "The Recipient shall hold Confidential Information in strict confidence.".into(),
                    "The Recipient shall not disclose it to any third party.".into(),
                ],
            ),
            SectionData::new("Term", vec!["This Agreement remains in force for two years.".into()]),
        ],
    }
}
