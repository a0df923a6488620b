//! Prompt text and structured-output schemas sent to the model

use crate::action::SectionAction;
use drafter_schema::SectionData;
use serde_json::{json, Value};

pub const DRAFT_SYSTEM_INSTRUCTION: &str = "\
You are an expert legal and technical document drafter.
Your task is to generate a STRUCTURED document based on the user's prompt.

RULES:
1. Output must be strict JSON.
2. The structure represents a document outline.
3. 'sections' is an array of objects with 'title' (string) and 'content' (array of strings, where each string is a paragraph).
4. Do not use Markdown formatting in the text strings.
5. Keep it professional and clear.";

pub fn action_instruction(action: SectionAction) -> &'static str {
    match action {
        SectionAction::RewriteFormal => "Rewrite this section to be more formal, precise, and legally sound.",
        SectionAction::RewriteSimple => "Rewrite this section to be simple, easy to understand, and plain English.",
        SectionAction::Summarize => "Summarize this section into a single concise paragraph, preserving key points.",
        SectionAction::Expand => "Expand this section with more detail, examples, or necessary clauses.",
    }
}

pub fn section_action_prompt(action: SectionAction, section: &SectionData) -> String {
    let content = section
        .paragraphs
        .iter()
        .map(|p| format!("- {}", p))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Target Action: {}\n\n\
         Current Section Title: \"{}\"\n\
         Current Content:\n{}\n\n\
         Output the updated section structure. You may update the title if needed to reflect the change, but usually keep it similar.",
        action_instruction(action),
        section.title,
        content
    )
}

/// Response schema for one section (`title` + `content`)
pub fn section_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "content": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["title", "content"]
    })
}

/// Response schema for a whole outline
pub fn outline_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sections": {
                "type": "ARRAY",
                "items": section_schema()
            }
        },
        "required": ["sections"]
    })
}
