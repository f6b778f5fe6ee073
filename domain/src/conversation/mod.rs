//! Conversation vocabulary shared by every caller of the tool loop.
//!
//! A conversation is an append-only sequence of [`Message`]s. The tool loop
//! mutates a caller-owned `Vec<Message>` in place: assistant turns carrying
//! tool calls are followed by one tool-role message per call, matched by
//! `tool_call_id`. Messages are never reordered or deleted.

pub mod entities;
pub mod response;
pub mod thinking;

pub use entities::{Message, Role};
pub use response::{FinishReason, LlmResponse, TokenUsage, ToolCallRequest};
pub use thinking::strip_think;
