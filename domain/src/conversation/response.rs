//! Provider response types.
//!
//! One call to the LLM provider yields one [`LlmResponse`]: text content
//! and/or a sequence of requested tool calls, with an optional reasoning
//! trace and token accounting. Tool call requests are immutable once
//! produced by the provider.

use serde::{Deserialize, Serialize};
use serde_json::Map;

/// A tool invocation requested by the model.
///
/// `id` is unique within the assistant turn that produced it and is echoed
/// back on the matching tool-role message. Arguments keep the order the
/// model issued them in, so "first argument" is well defined for previews.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    pub arguments: Map<String, serde_json::Value>,
}

impl ToolCallRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Serialize the arguments as a JSON object string.
    pub fn arguments_json(&self) -> String {
        serde_json::to_string(&self.arguments).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of response.
    Stop,
    /// The model wants tool results before continuing.
    ToolCalls,
    /// Hit the token limit; content may be truncated.
    Length,
    /// Provider-specific reason.
    Other(String),
}

/// Token accounting for one provider call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One assistant turn returned by the LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Text content, if any.
    pub content: Option<String>,
    /// Requested tool calls, in the order the model issued them.
    pub tool_calls: Vec<ToolCallRequest>,
    /// Optional reasoning trace some providers expose.
    pub reasoning_content: Option<String>,
    /// Why generation stopped.
    pub finish_reason: Option<FinishReason>,
    /// Token accounting.
    pub usage: TokenUsage,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: Some(text.into()),
            tool_calls: Vec::new(),
            reasoning_content: None,
            finish_reason: Some(FinishReason::Stop),
            usage: TokenUsage::default(),
        }
    }

    /// Create a response requesting tool calls, with optional interim text.
    pub fn from_tool_calls(content: Option<String>, tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            content,
            tool_calls,
            reasoning_content: None,
            finish_reason: Some(FinishReason::ToolCalls),
            usage: TokenUsage::default(),
        }
    }

    /// Returns `true` iff the response contains any tool call requests.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let response = LlmResponse::from_text("Hello");
        assert_eq!(response.content.as_deref(), Some("Hello"));
        assert!(!response.has_tool_calls());
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    }

    #[test]
    fn test_from_tool_calls() {
        let call = ToolCallRequest::new("call_1", "web_search").with_arg("query", "rust");
        let response = LlmResponse::from_tool_calls(None, vec![call]);
        assert!(response.has_tool_calls());
        assert_eq!(response.tool_calls[0].name, "web_search");
        assert_eq!(
            response.tool_calls[0].arguments.get("query"),
            Some(&serde_json::json!("rust"))
        );
        assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
    }

    #[test]
    fn test_arguments_json_round_trips() {
        let call = ToolCallRequest::new("call_1", "exec").with_arg("command", "ls");
        let parsed: serde_json::Value = serde_json::from_str(&call.arguments_json()).unwrap();
        assert_eq!(parsed["command"], "ls");
    }

    #[test]
    fn test_arguments_preserve_insertion_order() {
        let call = ToolCallRequest::new("call_1", "web_search")
            .with_arg("query", "rust")
            .with_arg("lang", "en")
            .with_arg("limit", 10)
            .with_arg("safe", true);
        let keys: Vec<_> = call.arguments.keys().map(String::as_str).collect();
        assert_eq!(keys, ["query", "lang", "limit", "safe"]);
        assert!(call.arguments_json().starts_with("{\"query\""));
    }
}
