//! Tool capability port
//!
//! Defines the interface for the external tool capability provider: named
//! tools with JSON-schema parameter definitions and an asynchronous execute
//! entry point. Tool failures are encoded as error-describing text results,
//! never as errors at this layer.

use async_trait::async_trait;
use roundtable_domain::ToolDefinition;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Port for tool capabilities
#[async_trait]
pub trait ToolCapabilityPort: Send + Sync {
    /// Definitions of all available tools, in a stable listing order.
    fn definitions(&self) -> Vec<ToolDefinition>;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.definitions().iter().any(|d| d.name == name)
    }

    /// Whether this provider exposes no tools at all
    fn is_empty(&self) -> bool {
        self.definitions().is_empty()
    }

    /// Execute a tool call and return its textual result.
    ///
    /// An unknown tool name yields an error-describing string, not an error.
    async fn execute(&self, name: &str, arguments: &Map<String, Value>) -> String;
}

/// A capability provider exposing no tools.
///
/// Used for personas configured without any tool access.
pub struct NoTools;

#[async_trait]
impl ToolCapabilityPort for NoTools {
    fn definitions(&self) -> Vec<ToolDefinition> {
        Vec::new()
    }

    async fn execute(&self, name: &str, _arguments: &Map<String, Value>) -> String {
        format!("Error: unknown tool '{name}'")
    }
}

/// A filtered view over a parent capability provider.
///
/// Personas receive one of these instead of the parent registry: only the
/// allowed names are listed, and execution re-checks membership so a model
/// hallucinating a parent-only tool name gets a textual error, not the tool.
pub struct ToolSubset {
    parent: Arc<dyn ToolCapabilityPort>,
    allowed: Vec<String>,
}

impl ToolSubset {
    /// Build a subset view. `allowed` is expected to already be vetted
    /// against the parent registry and the denylist by the caller.
    pub fn new(parent: Arc<dyn ToolCapabilityPort>, allowed: Vec<String>) -> Self {
        Self { parent, allowed }
    }

    pub fn allowed_names(&self) -> &[String] {
        &self.allowed
    }
}

#[async_trait]
impl ToolCapabilityPort for ToolSubset {
    fn definitions(&self) -> Vec<ToolDefinition> {
        let parent_defs = self.parent.definitions();
        self.allowed
            .iter()
            .filter_map(|name| parent_defs.iter().find(|d| &d.name == name).cloned())
            .collect()
    }

    fn has_tool(&self, name: &str) -> bool {
        self.allowed.iter().any(|n| n == name) && self.parent.has_tool(name)
    }

    async fn execute(&self, name: &str, arguments: &Map<String, Value>) -> String {
        if !self.allowed.iter().any(|n| n == name) {
            return format!("Error: tool '{name}' is not available to this participant");
        }
        self.parent.execute(name, arguments).await
    }
}
