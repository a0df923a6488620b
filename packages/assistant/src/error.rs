use drafter_editor::EditorError;
use drafter_schema::SchemaError;
use thiserror::Error;

/// Failures talking to an AI collaborator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AiError {
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("No response from AI")]
    EmptyResponse,

    #[error("Malformed AI response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("Section {section_id} already has an action in flight")]
    Busy { section_id: String },

    #[error("AI request failed: {0}")]
    Ai(#[from] AiError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Replacement rejected: {0}")]
    Editor(#[from] EditorError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("AI request failed: {0}")]
    Ai(#[from] AiError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown action '{0}' (expected rewrite_formal, rewrite_simple, summarize or expand)")]
pub struct UnknownAction(pub String);
