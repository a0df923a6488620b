use crate::error::UnknownAction;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AI transformation applied to one section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionAction {
    RewriteFormal,
    RewriteSimple,
    Summarize,
    Expand,
}

impl SectionAction {
    pub const ALL: [SectionAction; 4] = [
        SectionAction::RewriteFormal,
        SectionAction::RewriteSimple,
        SectionAction::Summarize,
        SectionAction::Expand,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionAction::RewriteFormal => "rewrite_formal",
            SectionAction::RewriteSimple => "rewrite_simple",
            SectionAction::Summarize => "summarize",
            SectionAction::Expand => "expand",
        }
    }

    /// Label recorded in the undo history
    pub fn description(&self) -> &'static str {
        match self {
            SectionAction::RewriteFormal => "rewrite section formally",
            SectionAction::RewriteSimple => "rewrite section simply",
            SectionAction::Summarize => "summarize section",
            SectionAction::Expand => "expand section",
        }
    }
}

impl fmt::Display for SectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionAction {
    type Err = UnknownAction;

    /// Accepts `rewrite_formal` and `rewrite-formal` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        SectionAction::ALL
            .into_iter()
            .find(|action| action.as_str() == normalized)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}
