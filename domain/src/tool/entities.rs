//! Tool domain entities

use serde::{Deserialize, Serialize};

/// Schema of a tool exposed by a capability provider.
///
/// `parameters` is a JSON-schema object describing the tool's arguments,
/// passed through to the LLM provider verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g. "web_search")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON-schema parameter object
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
            }),
        }
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = parameters;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_defaults_to_empty_object_schema() {
        let def = ToolDefinition::new("web_search", "Search the web");
        assert_eq!(def.name, "web_search");
        assert_eq!(def.parameters["type"], "object");
    }

    #[test]
    fn test_with_parameters() {
        let def = ToolDefinition::new("exec", "Run a command").with_parameters(serde_json::json!({
            "type": "object",
            "properties": { "command": { "type": "string" } },
            "required": ["command"],
        }));
        assert_eq!(def.parameters["required"][0], "command");
    }
}
