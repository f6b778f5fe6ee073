//! Reusable LLM <-> tool execution loop.
//!
//! Alternates model calls and tool execution until the model produces a
//! plain-text answer or the iteration cap is hit. Used directly by the main
//! conversational agent and, with tighter caps, by each debate persona.
//!
//! The loop mutates a caller-owned message buffer in place: one assistant
//! message per turn with tool calls, one tool-role message per executed
//! call. Ownership of the buffer returns to the caller when `run` exits.

use crate::ports::llm_provider::{GenerationParams, LlmProviderPort, ProviderError};
use crate::ports::progress::{ProgressSink, ToolCallSink};
use crate::ports::tool_provider::ToolCapabilityPort;
use roundtable_domain::core::string::truncate;
use roundtable_domain::{Message, ToolCallRequest, strip_think};
use tracing::{debug, info};

/// Default safety cap on model calls per loop invocation
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Result of one loop invocation
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    /// Final text answer; `None` when the iteration cap was exhausted.
    pub final_text: Option<String>,
    /// Names of tools invoked, in call order.
    pub tools_used: Vec<String>,
}

/// The reusable tool execution loop.
///
/// Configured once, then run against a caller-owned message history.
pub struct ToolLoop<'a> {
    provider: &'a dyn LlmProviderPort,
    tools: &'a dyn ToolCapabilityPort,
    params: GenerationParams,
    max_iterations: u32,
    text_only_retry: bool,
    progress: Option<&'a dyn ProgressSink>,
    tool_log: Option<&'a dyn ToolCallSink>,
}

impl<'a> ToolLoop<'a> {
    pub fn new(
        provider: &'a dyn LlmProviderPort,
        tools: &'a dyn ToolCapabilityPort,
        params: GenerationParams,
    ) -> Self {
        Self {
            provider,
            tools,
            params,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            text_only_retry: true,
            progress: None,
            tool_log: None,
        }
    }

    /// Override the safety cap on model calls.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enable or disable the one-shot retry when the model answers in plain
    /// text before any tool has been used.
    pub fn with_text_only_retry(mut self, enabled: bool) -> Self {
        self.text_only_retry = enabled;
        self
    }

    /// Attach a progress sink for stripped interim text and tool hints.
    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Attach a tool-call sink; without one, calls are logged instead.
    pub fn with_tool_log(mut self, tool_log: &'a dyn ToolCallSink) -> Self {
        self.tool_log = Some(tool_log);
        self
    }

    /// Run the loop to completion over `messages`.
    ///
    /// Provider transport errors propagate; tool results are always plain
    /// text appended verbatim. Cap exhaustion is not an error: the outcome
    /// carries `final_text: None` and whatever tools ran.
    pub async fn run(&self, messages: &mut Vec<Message>) -> Result<LoopOutcome, ProviderError> {
        let mut iteration = 0;
        let mut final_text: Option<String> = None;
        let mut tools_used: Vec<String> = Vec::new();
        let mut text_only_retried = false;

        let definitions = self.tools.definitions();
        let tool_defs = if definitions.is_empty() {
            None
        } else {
            Some(definitions.as_slice())
        };

        while iteration < self.max_iterations {
            iteration += 1;

            let response = self
                .provider
                .chat(messages, tool_defs, &self.params)
                .await?;

            if response.has_tool_calls() {
                if let Some(progress) = self.progress {
                    if let Some(clean) = response.content.as_deref().and_then(strip_think) {
                        progress.on_progress(&clean);
                    }
                    progress.on_progress(&tool_hint(&response.tool_calls));
                }

                let tool_calls = response.tool_calls.clone();
                messages.push(Message::assistant_tool_calls(
                    response.content.clone(),
                    tool_calls.clone(),
                    response.reasoning_content.clone(),
                ));

                for call in &tool_calls {
                    tools_used.push(call.name.clone());
                    let args_json = call.arguments_json();

                    match self.tool_log {
                        Some(sink) => sink.on_tool_call(&call.name, &args_json),
                        None => info!("Tool call: {}({})", call.name, truncate(&args_json, 200)),
                    }

                    let result = self.tools.execute(&call.name, &call.arguments).await;
                    messages.push(Message::tool(&call.id, &call.name, result));
                }
            } else {
                final_text = response.content.as_deref().and_then(strip_think);
                // Some models send an interim text response before their
                // first tool call. Give them one retry; the discarded text
                // never enters the history.
                if self.text_only_retry
                    && tools_used.is_empty()
                    && !text_only_retried
                    && final_text.is_some()
                {
                    text_only_retried = true;
                    debug!(
                        "Interim text response (no tools used yet), retrying: {}",
                        truncate(final_text.as_deref().unwrap_or(""), 80)
                    );
                    final_text = None;
                    continue;
                }
                break;
            }
        }

        Ok(LoopOutcome {
            final_text,
            tools_used,
        })
    }
}

/// Format tool calls as a concise hint, e.g. `web_search("query")`.
fn tool_hint(tool_calls: &[ToolCallRequest]) -> String {
    fn fmt(call: &ToolCallRequest) -> String {
        let preview = call.arguments.values().next().and_then(|v| v.as_str());
        match preview {
            Some(s) if s.len() > 40 => format!("{}(\"{}\")", call.name, truncate(s, 43)),
            Some(s) => format!("{}(\"{}\")", call.name, s),
            None => call.name.clone(),
        }
    }

    tool_calls.iter().map(fmt).collect::<Vec<_>>().join(", ")
}
