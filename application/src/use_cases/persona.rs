//! Debate persona: one participant's specialized tool loop.
//!
//! Each persona carries its own resolved provider/model pair, an isolated
//! tool subset (possibly empty), and a round-aware prompt. A persona that
//! exhausts its iteration cap answers with a named sentinel instead of
//! silence, so the orchestrator can always print something for it.

use crate::ports::llm_provider::{GenerationParams, LlmProviderPort, ProviderError};
use crate::ports::tool_provider::ToolCapabilityPort;
use crate::use_cases::run_tool_loop::ToolLoop;
use roundtable_domain::{DebatePrompt, Message, PersonaConfig};
use std::sync::Arc;
use tracing::info;

/// Iteration cap for a persona's inner loop, tighter than the main loop's.
const PERSONA_MAX_ITERATIONS: u32 = 10;

/// A debate participant bound to a provider, model, and tool subset.
pub struct Persona {
    config: PersonaConfig,
    provider: Arc<dyn LlmProviderPort>,
    params: GenerationParams,
    tools: Arc<dyn ToolCapabilityPort>,
}

impl Persona {
    /// Build a persona. `temperature`/`max_tokens` are the debate-level
    /// defaults; the persona's own overrides win when present.
    pub fn new(
        config: PersonaConfig,
        provider: Arc<dyn LlmProviderPort>,
        model: String,
        tools: Arc<dyn ToolCapabilityPort>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        let params = GenerationParams::new(model)
            .with_temperature(config.temperature.unwrap_or(temperature))
            .with_max_tokens(config.max_tokens.unwrap_or(max_tokens));
        Self {
            config,
            provider,
            params,
            tools,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn model(&self) -> &str {
        &self.params.model
    }

    /// Generate this persona's response for one round.
    ///
    /// `transcript` is the rendered debate so far (`None` for round 1).
    /// Provider transport errors propagate; the enclosing round isolates
    /// them per task. Cap exhaustion yields a sentinel, not an error.
    pub async fn respond(
        &self,
        question: &str,
        transcript: Option<&str>,
        round: u32,
    ) -> Result<String, ProviderError> {
        let system =
            DebatePrompt::persona_system(&self.config.system_prompt, &self.config.name, round);
        let user = DebatePrompt::persona_user(question, transcript, &self.config.name, round);

        let mut messages = vec![Message::system(system), Message::user(user)];

        let outcome = ToolLoop::new(self.provider.as_ref(), self.tools.as_ref(), self.params.clone())
            .with_max_iterations(PERSONA_MAX_ITERATIONS)
            .with_text_only_retry(false)
            .run(&mut messages)
            .await?;

        let text = outcome.final_text.unwrap_or_else(|| {
            format!(
                "[{} did not produce a response after {} iterations]",
                self.config.name, PERSONA_MAX_ITERATIONS
            )
        });

        info!(
            "Persona [{}] round {} response ({} chars)",
            self.config.name,
            round,
            text.len()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::tool_provider::NoTools;
    use async_trait::async_trait;
    use roundtable_domain::{LlmResponse, ToolDefinition};
    use std::sync::Mutex;

    /// Provider that records the request and replays scripted responses.
    struct InspectingProvider {
        responses: Mutex<Vec<LlmResponse>>,
        seen: Mutex<Vec<(Vec<Message>, bool)>>,
    }

    impl InspectingProvider {
        fn new(responses: Vec<LlmResponse>) -> Self {
            Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProviderPort for InspectingProvider {
        async fn chat(
            &self,
            messages: &[Message],
            tools: Option<&[ToolDefinition]>,
            _params: &GenerationParams,
        ) -> Result<LlmResponse, ProviderError> {
            self.seen
                .lock()
                .unwrap()
                .push((messages.to_vec(), tools.is_some()));
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                return Ok(LlmResponse::from_tool_calls(
                    None,
                    vec![
                        roundtable_domain::ToolCallRequest::new("call_n", "noop")
                            .with_arg("x", "y"),
                    ],
                ));
            }
            Ok(responses.remove(0))
        }

        fn default_model(&self) -> &str {
            "parent-model"
        }
    }

    fn persona_config(name: &str) -> PersonaConfig {
        PersonaConfig {
            name: name.to_string(),
            system_prompt: "You design systems.".to_string(),
            model: None,
            temperature: None,
            max_tokens: None,
            tools: Vec::new(),
        }
    }

    fn make_persona(provider: Arc<InspectingProvider>) -> Persona {
        Persona::new(
            persona_config("Architect"),
            provider,
            "parent-model".to_string(),
            Arc::new(NoTools),
            0.7,
            4096,
        )
    }

    #[tokio::test]
    async fn test_round_one_prompt_has_no_transcript() {
        let provider = Arc::new(InspectingProvider::new(vec![LlmResponse::from_text(
            "My analysis",
        )]));
        let persona = make_persona(provider.clone());

        let text = persona.respond("Should we rewrite?", None, 1).await.unwrap();
        assert_eq!(text, "My analysis");

        let seen = provider.seen.lock().unwrap();
        let (messages, had_tools) = &seen[0];
        assert!(!had_tools, "empty tool subset must not be advertised");
        let system = messages[0].content.as_deref().unwrap();
        assert!(system.contains("round 1"));
        assert!(system.contains("initial analysis"));
        let user = messages[1].content.as_deref().unwrap();
        assert!(user.contains("**Question:** Should we rewrite?"));
        assert!(!user.contains("transcript"));
    }

    #[tokio::test]
    async fn test_later_round_includes_transcript() {
        let provider = Arc::new(InspectingProvider::new(vec![LlmResponse::from_text(
            "I disagree",
        )]));
        let persona = make_persona(provider.clone());

        persona
            .respond("Q?", Some("--- Round 1 ---\n**Skeptic:**\nNo"), 2)
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap();
        let (messages, _) = &seen[0];
        let system = messages[0].content.as_deref().unwrap();
        assert!(system.contains("previous rounds"));
        let user = messages[1].content.as_deref().unwrap();
        assert!(user.contains("--- Round 1 ---"));
    }

    #[tokio::test]
    async fn test_cap_exhaustion_yields_named_sentinel() {
        // Empty script: provider replays tool calls forever.
        let provider = Arc::new(InspectingProvider::new(vec![]));
        let persona = make_persona(provider);

        let text = persona.respond("Q?", None, 1).await.unwrap();
        assert!(text.contains("Architect"));
        assert!(text.contains("10 iterations"));
    }

    #[tokio::test]
    async fn test_overrides_win_over_defaults() {
        let mut config = persona_config("Tuned");
        config.temperature = Some(0.1);
        config.max_tokens = Some(512);
        let provider = Arc::new(InspectingProvider::new(vec![LlmResponse::from_text("ok")]));
        let persona = Persona::new(
            config,
            provider,
            "parent-model".to_string(),
            Arc::new(NoTools),
            0.7,
            4096,
        );
        assert_eq!(persona.params.temperature, 0.1);
        assert_eq!(persona.params.max_tokens, 512);
    }
}
