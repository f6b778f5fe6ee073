//! OpenAI-compatible chat completions adapter.
//!
//! Speaks the `/chat/completions` wire format used by OpenAI and the many
//! compatible endpoints (OpenRouter, DeepSeek, vLLM, ...). Tool calls travel
//! as JSON-string arguments on the wire and are parsed back into typed
//! requests here.

use async_trait::async_trait;
use roundtable_application::ports::llm_provider::{
    GenerationParams, LlmProviderPort, ProviderError,
};
use roundtable_domain::{
    FinishReason, LlmResponse, Message, Role, TokenUsage, ToolCallRequest, ToolDefinition,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Provider over an OpenAI-compatible HTTP endpoint.
pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiCompatProvider {
    pub fn new(
        api_base: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key,
            model: model.into(),
        }
    }
}

#[async_trait]
impl LlmProviderPort for OpenAiCompatProvider {
    async fn chat(
        &self,
        messages: &[Message],
        tools: Option<&[ToolDefinition]>,
        params: &GenerationParams,
    ) -> Result<LlmResponse, ProviderError> {
        let request = ChatRequest {
            model: &params.model,
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: tools.map(|defs| defs.iter().map(WireTool::from).collect()),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let url = format!("{}/chat/completions", self.api_base);
        debug!("POST {} model={}", url, params.model);

        let mut http_request = self.client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!("{status}: {body}")));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parse_response(body)
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

/// Convert a parsed wire response into a domain response.
fn parse_response(body: ChatResponse) -> Result<LlmResponse, ProviderError> {
    let choice = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))?;

    let tool_calls = choice
        .message
        .tool_calls
        .into_iter()
        .map(|call| {
            let arguments: Map<String, Value> =
                serde_json::from_str(&call.function.arguments).unwrap_or_else(|e| {
                    warn!(
                        "Unparsable arguments for tool call {}: {}",
                        call.function.name, e
                    );
                    Map::new()
                });
            ToolCallRequest {
                id: call.id,
                name: call.function.name,
                arguments,
            }
        })
        .collect::<Vec<_>>();

    let finish_reason = choice.finish_reason.map(|reason| match reason.as_str() {
        "stop" => FinishReason::Stop,
        "tool_calls" => FinishReason::ToolCalls,
        "length" => FinishReason::Length,
        other => FinishReason::Other(other.to_string()),
    });

    let usage = body
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(LlmResponse {
        content: choice.message.content,
        tool_calls,
        reasoning_content: choice.message.reasoning_content,
        finish_reason,
        usage,
    })
}

// -- Wire DTOs ---------------------------------------------------------------

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage {
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
            tool_calls: message.tool_calls.iter().map(WireToolCall::from).collect(),
            tool_call_id: message.tool_call_id.clone(),
            name: message.name.clone(),
        }
    }
}

#[derive(Serialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionCall,
}

impl From<&ToolCallRequest> for WireToolCall {
    fn from(call: &ToolCallRequest) -> Self {
        Self {
            id: call.id.clone(),
            kind: "function",
            function: WireFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments_json(),
            },
        }
    }
}

#[derive(Serialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunctionDef,
}

impl From<&ToolDefinition> for WireTool {
    fn from(def: &ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: WireFunctionDef {
                name: def.name.clone(),
                description: def.description.clone(),
                parameters: def.parameters.clone(),
            },
        }
    }
}

#[derive(Serialize)]
struct WireFunctionDef {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<RespToolCall>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

#[derive(Deserialize)]
struct RespToolCall {
    id: String,
    function: RespFunction,
}

#[derive(Deserialize)]
struct RespFunction {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_tool_call_serializes_arguments_as_string() {
        let call = ToolCallRequest::new("call_1", "web_search").with_arg("query", "rust");
        let message = Message::assistant_tool_calls(None, vec![call], None);
        let wire = serde_json::to_value(WireMessage::from(&message)).unwrap();

        assert_eq!(wire["role"], "assistant");
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(wire["tool_calls"][0]["function"]["name"], "web_search");
        let args = wire["tool_calls"][0]["function"]["arguments"].as_str().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(args).unwrap();
        assert_eq!(parsed["query"], "rust");
    }

    #[test]
    fn test_tool_message_carries_call_id_and_name() {
        let message = Message::tool("call_1", "web_search", "results");
        let wire = serde_json::to_value(WireMessage::from(&message)).unwrap();
        assert_eq!(wire["role"], "tool");
        assert_eq!(wire["tool_call_id"], "call_1");
        assert_eq!(wire["name"], "web_search");
        assert!(wire.get("tool_calls").is_none());
    }

    #[test]
    fn test_tool_definition_wire_shape() {
        let def = ToolDefinition::new("web_search", "Search the web");
        let wire = serde_json::to_value(WireTool::from(&def)).unwrap();
        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "web_search");
        assert_eq!(wire["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_parse_text_response() {
        let body: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"content": "Hello"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
            }"#,
        )
        .unwrap();
        let response = parse_response(body).unwrap();
        assert_eq!(response.content.as_deref(), Some("Hello"));
        assert!(!response.has_tool_calls());
        assert_eq!(response.finish_reason, Some(FinishReason::Stop));
        assert_eq!(response.usage.total_tokens, 12);
    }

    #[test]
    fn test_parse_tool_call_response() {
        let body: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{
                    "message": {
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {"name": "exec", "arguments": "{\"command\": \"ls\"}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            }"#,
        )
        .unwrap();
        let response = parse_response(body).unwrap();
        assert!(response.has_tool_calls());
        assert_eq!(response.tool_calls[0].id, "call_1");
        assert_eq!(response.tool_calls[0].name, "exec");
        assert_eq!(
            response.tool_calls[0].arguments.get("command"),
            Some(&serde_json::json!("ls"))
        );
        assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
    }

    #[test]
    fn test_malformed_arguments_degrade_to_empty_map() {
        let body: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{
                    "message": {
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {"name": "exec", "arguments": "not json"}
                        }]
                    }
                }]
            }"#,
        )
        .unwrap();
        let response = parse_response(body).unwrap();
        assert!(response.tool_calls[0].arguments.is_empty());
    }

    #[test]
    fn test_empty_choices_is_invalid() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(
            parse_response(body),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let provider =
            OpenAiCompatProvider::new("https://api.openai.com/v1/", None, "gpt-4.1");
        assert_eq!(provider.api_base, "https://api.openai.com/v1");
        assert_eq!(provider.default_model(), "gpt-4.1");
    }
}
