//! Roundtable debate configuration.
//!
//! Deserialized once per debate invocation from a declarative definition
//! file and treated as immutable for the debate's lifetime.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Configuration for a single debate persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Unique name within the roundtable.
    pub name: String,
    /// Base system prompt; round-aware instructions are appended at runtime.
    pub system_prompt: String,
    /// Model override; absent means "use the parent session's model".
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature override.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Max tokens override.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Names of tools this persona may use, resolved against the parent
    /// registry minus the agent-only denylist.
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Configuration for the debate orchestrator's own judge calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorPolicy {
    /// Model override for convergence checks and synthesis.
    pub model: Option<String>,
    /// Instruction prepended to the synthesis prompt.
    pub synthesis_prompt: String,
}

impl Default for OrchestratorPolicy {
    fn default() -> Self {
        Self {
            model: None,
            synthesis_prompt: "Synthesize the debate into a clear recommendation with rationale, \
                               noting points of agreement and disagreement."
                .to_string(),
        }
    }
}

/// Round bounds and convergence policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundsPolicy {
    /// Upper bound on rounds (inclusive).
    pub max: u32,
    /// Rounds to run before convergence checking may stop the debate.
    pub min: u32,
    /// Whether to check convergence between rounds at all.
    pub convergence: bool,
}

impl Default for RoundsPolicy {
    fn default() -> Self {
        Self {
            max: 3,
            min: 1,
            convergence: true,
        }
    }
}

/// How a roundtable may be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// The agent may pick this roundtable on its own.
    #[default]
    Auto,
    /// Only runs when named explicitly.
    Explicit,
}

/// A full roundtable definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundtableConfig {
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trigger: TriggerMode,
    #[serde(default)]
    pub orchestrator: OrchestratorPolicy,
    #[serde(default)]
    pub rounds: RoundsPolicy,
    #[serde(default)]
    pub personas: Vec<PersonaConfig>,
}

impl RoundtableConfig {
    /// Check the definition is runnable: at least one persona, unique
    /// persona names, and coherent round bounds.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.personas.is_empty() {
            return Err(DomainError::NoPersonas(self.name.clone()));
        }
        for (i, persona) in self.personas.iter().enumerate() {
            if self.personas[..i].iter().any(|p| p.name == persona.name) {
                return Err(DomainError::InvalidDefinition(format!(
                    "duplicate persona name '{}'",
                    persona.name
                )));
            }
        }
        if self.rounds.max == 0 {
            return Err(DomainError::InvalidDefinition(
                "rounds.max must be at least 1".to_string(),
            ));
        }
        if self.rounds.min > self.rounds.max {
            return Err(DomainError::InvalidDefinition(format!(
                "rounds.min ({}) exceeds rounds.max ({})",
                self.rounds.min, self.rounds.max
            )));
        }
        Ok(())
    }
}
