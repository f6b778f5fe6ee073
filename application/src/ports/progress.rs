//! Progress and logging sink ports
//!
//! Optional side channels: calling code fails closed (no-op) when they are
//! absent and never changes loop semantics based on their presence.

/// Sink for intermediate progress text during a loop or debate.
///
/// The tool loop sends stripped think-text and tool-call hints; the debate
/// orchestrator sends round/convergence/synthesis notices.
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, text: &str);
}

/// No-op progress sink for when progress reporting is not needed
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _text: &str) {}
}

/// Sink invoked synchronously once per tool call with the tool name and its
/// serialized arguments. When no sink is supplied the loop logs the same
/// information instead.
pub trait ToolCallSink: Send + Sync {
    fn on_tool_call(&self, name: &str, args_json: &str);
}
