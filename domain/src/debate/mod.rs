//! Debate domain: roundtable definitions, transcripts, and prompts.
//!
//! A roundtable is a declarative definition of a multi-persona debate:
//! which personas participate, how many rounds they get, and how the
//! orchestrator judges convergence and synthesizes the result.

pub mod config;
pub mod prompt;
pub mod transcript;

pub use config::{OrchestratorPolicy, PersonaConfig, RoundsPolicy, RoundtableConfig, TriggerMode};
pub use prompt::DebatePrompt;
pub use transcript::{Transcript, TranscriptEntry};
