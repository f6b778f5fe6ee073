//! Domain layer for roundtable
//!
//! This crate contains the conversation, tool, and debate vocabulary shared
//! by every caller of the agent execution core. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tool loop
//!
//! A conversational turn alternates between model calls and tool execution
//! until the model produces a plain-text answer. The vocabulary for that
//! loop ([`Message`], [`ToolCallRequest`], [`LlmResponse`]) lives here.
//!
//! ## Roundtable debate
//!
//! A roundtable runs several personas through that same loop in parallel
//! across bounded rounds, judges convergence, and synthesizes a final
//! recommendation from the [`Transcript`].

pub mod conversation;
pub mod core;
pub mod debate;
pub mod tool;

// Re-export commonly used types
pub use conversation::{
    entities::{Message, Role},
    response::{FinishReason, LlmResponse, TokenUsage, ToolCallRequest},
    thinking::strip_think,
};
pub use core::{error::DomainError, string::truncate};
pub use debate::{
    config::{OrchestratorPolicy, PersonaConfig, RoundsPolicy, RoundtableConfig, TriggerMode},
    prompt::DebatePrompt,
    transcript::{Transcript, TranscriptEntry},
};
pub use tool::entities::ToolDefinition;
