use crate::action::SectionAction;
use crate::error::AiError;
use async_trait::async_trait;
use drafter_schema::{Outline, SectionData};

/// A generative model that drafts outlines and rewrites sections.
///
/// Implementations only produce data; they never touch the editor.
#[async_trait]
pub trait Collaborator: Send + Sync {
    fn id(&self) -> &str;

    async fn generate_draft(&self, prompt: &str) -> Result<Outline, AiError>;

    async fn edit_section(&self, action: SectionAction, section: &SectionData) -> Result<SectionData, AiError>;
}
