//! Debate transcript value objects.

use serde::{Deserialize, Serialize};

/// One persona's response in one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub round: u32,
    pub persona: String,
    pub response: String,
}

impl TranscriptEntry {
    pub fn new(round: u32, persona: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            round,
            persona: persona.into(),
            response: response.into(),
        }
    }
}

/// Append-only record of a debate, one entry per persona per round.
///
/// Entries are appended in persona-list order after each round settles and
/// are never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: TranscriptEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TranscriptEntry>) {
        self.entries.extend(entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Render the transcript as readable text, grouped by round.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        let mut current_round = 0;
        for entry in &self.entries {
            if entry.round != current_round {
                current_round = entry.round;
                lines.push(format!("\n--- Round {} ---\n", current_round));
            }
            lines.push(format!("**{}:**\n{}\n", entry.persona, entry.response));
        }
        lines.join("\n")
    }
}
