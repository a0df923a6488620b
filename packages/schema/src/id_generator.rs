//! Section ids
//!
//! Every draft gets its own seed: CRC32 over the trimmed prompt and the
//! draft's number within its session. Sections are numbered from 1 under that
//! seed, so regenerating from the same prompt yields ids an in-flight action
//! from the previous draft can never match.

use crc32fast::Hasher;

#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    issued: u32,
}

impl IdGenerator {
    /// Ids for draft number `draft` produced from `prompt`
    pub fn for_draft(prompt: &str, draft: u64) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(prompt.trim().as_bytes());
        hasher.update(&draft.to_le_bytes());
        Self::from_seed(format!("{:08x}", hasher.finalize()))
    }

    /// Ids for a standalone document that is not part of a session
    pub fn new(name: &str) -> Self {
        Self::for_draft(name, 0)
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            issued: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{}-{}", self.seed, self.issued)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn issued(&self) -> u32 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_depends_on_prompt_and_draft_number() {
        let first = IdGenerator::for_draft("Draft a 1-page NDA", 1);

        assert_eq!(first.seed(), IdGenerator::for_draft("  Draft a 1-page NDA\n", 1).seed());
        assert_ne!(first.seed(), IdGenerator::for_draft("Draft a 1-page NDA", 2).seed());
        assert_ne!(first.seed(), IdGenerator::for_draft("Draft a lease", 1).seed());
        assert_eq!(first.seed().len(), 8);
    }

    #[test]
    fn test_ids_are_numbered_under_the_seed() {
        let mut ids = IdGenerator::from_seed("nda");

        assert_eq!(ids.next_id(), "nda-1");
        assert_eq!(ids.next_id(), "nda-2");
        assert_eq!(ids.issued(), 2);
    }
}
