//! Debate orchestration: rounds, convergence, and synthesis.
//!
//! Creates one persona per configured participant (with capability
//! isolation), runs bounded rounds of parallel persona responses, judges
//! convergence between rounds, and synthesizes a final recommendation.
//! Persona failures degrade to inline transcript markers so a debate always
//! produces something printable.

use crate::ports::llm_provider::{GenerationParams, LlmProviderPort, ProviderError};
use crate::ports::progress::ProgressSink;
use crate::ports::provider_resolver::ProviderResolverPort;
use crate::ports::roundtable_source::RoundtableSourcePort;
use crate::ports::tool_provider::{ToolCapabilityPort, ToolSubset};
use crate::use_cases::persona::Persona;
use roundtable_domain::{
    DebatePrompt, DomainError, Message, PersonaConfig, RoundtableConfig, Transcript,
    TranscriptEntry,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Tools personas must never receive: agent-level capabilities that would
/// let a participant message channels, spawn sub-tasks, re-enter debate, or
/// schedule jobs.
pub const BLOCKED_PERSONA_TOOLS: [&str; 4] = ["message", "spawn", "debate", "cron"];

/// Sampling temperature for convergence judge calls
const CONVERGENCE_TEMPERATURE: f32 = 0.3;
/// Output budget for the binary convergence verdict
const CONVERGENCE_MAX_TOKENS: u32 = 50;
/// Sampling temperature for the synthesis call
const SYNTHESIS_TEMPERATURE: f32 = 0.5;

/// Errors that can occur while running a debate
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("{0}")]
    Definition(#[from] DomainError),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Orchestrates multi-persona roundtable debates.
pub struct DebateOrchestrator {
    source: Arc<dyn RoundtableSourcePort>,
    provider: Arc<dyn LlmProviderPort>,
    model: String,
    parent_tools: Arc<dyn ToolCapabilityPort>,
    resolver: Arc<dyn ProviderResolverPort>,
    temperature: f32,
    max_tokens: u32,
    cancellation_token: Option<CancellationToken>,
}

impl DebateOrchestrator {
    /// Create an orchestrator bound to the parent session's provider and
    /// full tool registry. The parent model defaults to the provider's.
    pub fn new(
        source: Arc<dyn RoundtableSourcePort>,
        provider: Arc<dyn LlmProviderPort>,
        parent_tools: Arc<dyn ToolCapabilityPort>,
        resolver: Arc<dyn ProviderResolverPort>,
    ) -> Self {
        let model = provider.default_model().to_string();
        Self {
            source,
            provider,
            model,
            parent_tools,
            resolver,
            temperature: 0.7,
            max_tokens: 4096,
            cancellation_token: None,
        }
    }

    /// Override the parent session's model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the debate-level sampling defaults.
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Set a cancellation token for graceful interruption.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// List all loadable roundtable definitions.
    pub fn list_roundtables(&self) -> Vec<RoundtableConfig> {
        self.source.list()
    }

    /// Resolve a roundtable by definition key (filename stem) first, then by
    /// case-insensitive display name among all listed definitions.
    pub fn get_roundtable(&self, name: &str) -> Option<RoundtableConfig> {
        if let Some(config) = self.source.load(name) {
            return Some(config);
        }
        let needle = name.to_lowercase();
        self.list_roundtables()
            .into_iter()
            .find(|rt| rt.name.to_lowercase() == needle)
    }

    /// Resolve a roundtable by name and run a full debate on it.
    pub async fn run_named_debate(
        &self,
        name: &str,
        question: &str,
        progress: &dyn ProgressSink,
    ) -> Result<String, RunDebateError> {
        let Some(roundtable) = self.get_roundtable(name) else {
            if self.list_roundtables().is_empty() {
                return Err(DomainError::NoRoundtables.into());
            }
            return Err(DomainError::RoundtableNotFound(name.to_string()).into());
        };
        self.run_debate(question, &roundtable, progress).await
    }

    /// Run a full debate and return the synthesized result.
    pub async fn run_debate(
        &self,
        question: &str,
        roundtable: &RoundtableConfig,
        progress: &dyn ProgressSink,
    ) -> Result<String, RunDebateError> {
        roundtable.validate()?;
        self.check_cancelled()?;

        info!(
            "Starting debate '{}' with {} personas, max {} rounds",
            roundtable.name,
            roundtable.personas.len(),
            roundtable.rounds.max
        );

        let names: Vec<&str> = roundtable.personas.iter().map(|p| p.name.as_str()).collect();
        progress.on_progress(&format!(
            "debate({}): {}",
            roundtable.name,
            names.join(", ")
        ));

        let personas = self.create_personas(roundtable);
        let mut transcript = Transcript::new();

        for round in 1..=roundtable.rounds.max {
            self.check_cancelled()?;

            info!(
                "Debate '{}' round {}/{}",
                roundtable.name, round, roundtable.rounds.max
            );
            progress.on_progress(&format!("debate round {}/{}", round, roundtable.rounds.max));

            let transcript_text = if transcript.is_empty() {
                None
            } else {
                Some(transcript.render())
            };

            let entries = self
                .run_round(&personas, question, transcript_text.as_deref(), round)
                .await?;
            transcript.extend(entries);

            // Convergence checking only applies strictly between min and max.
            if roundtable.rounds.convergence
                && round >= roundtable.rounds.min
                && round < roundtable.rounds.max
                && self.check_convergence(question, &transcript, roundtable).await?
            {
                info!("Debate '{}' converged at round {}", roundtable.name, round);
                progress.on_progress(&format!("debate converged at round {}", round));
                break;
            }
        }

        progress.on_progress("debate synthesis");
        let result = self.synthesize(question, &transcript, roundtable).await?;
        info!("Debate '{}' completed", roundtable.name);
        Ok(result)
    }

    /// Run one round: all personas respond concurrently; a failing task
    /// becomes an inline error marker instead of aborting the round.
    /// Entries come back in persona-list order, not completion order.
    async fn run_round(
        &self,
        personas: &[Arc<Persona>],
        question: &str,
        transcript_text: Option<&str>,
        round: u32,
    ) -> Result<Vec<TranscriptEntry>, RunDebateError> {
        let mut join_set = JoinSet::new();

        for (index, persona) in personas.iter().enumerate() {
            let persona = Arc::clone(persona);
            let question = question.to_string();
            let transcript_text = transcript_text.map(str::to_string);

            join_set.spawn(async move {
                let result = persona
                    .respond(&question, transcript_text.as_deref(), round)
                    .await;
                (index, result)
            });
        }

        let mut responses: Vec<Option<String>> = vec![None; personas.len()];

        loop {
            let joined = if let Some(token) = &self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        // Cancel and drain in-flight persona tasks before
                        // propagating, so no model call is left dangling.
                        join_set.shutdown().await;
                        return Err(RunDebateError::Cancelled);
                    }
                    joined = join_set.join_next() => joined,
                }
            } else {
                join_set.join_next().await
            };

            let Some(joined) = joined else { break };

            match joined {
                Ok((index, Ok(text))) => {
                    responses[index] = Some(text);
                }
                Ok((index, Err(e))) => {
                    error!(
                        "Persona [{}] round {} failed: {}",
                        personas[index].name(),
                        round,
                        e
                    );
                    responses[index] = Some(format!("[Error: {e}]"));
                }
                Err(e) => {
                    // A panicked task has no index; it surfaces when its
                    // persona's slot is backfilled below.
                    warn!("Persona task join error: {e}");
                }
            }
        }

        Ok(personas
            .iter()
            .zip(responses)
            .map(|(persona, response)| {
                let text =
                    response.unwrap_or_else(|| "[Error: persona task aborted]".to_string());
                TranscriptEntry::new(round, persona.name(), text)
            })
            .collect())
    }

    /// Create persona instances with isolated providers and tool subsets.
    fn create_personas(&self, roundtable: &RoundtableConfig) -> Vec<Arc<Persona>> {
        roundtable
            .personas
            .iter()
            .map(|pc| {
                let (provider, model) = self.resolve_provider(pc.model.as_deref());
                let tools = self.build_persona_tools(pc);
                Arc::new(Persona::new(
                    pc.clone(),
                    provider,
                    model,
                    tools,
                    self.temperature,
                    self.max_tokens,
                ))
            })
            .collect()
    }

    /// Resolve the provider/model pair for a model override.
    ///
    /// No override, or the parent's own model, reuses the parent provider.
    /// Otherwise the resolver constructs an independent provider; a missing
    /// credential falls back to the parent provider with a warning.
    fn resolve_provider(&self, model_override: Option<&str>) -> (Arc<dyn LlmProviderPort>, String) {
        let model = model_override.unwrap_or(&self.model).to_string();
        if model == self.model {
            return (Arc::clone(&self.provider), model);
        }
        match self.resolver.resolve(&model) {
            Some(provider) => (provider, model),
            None => {
                warn!(
                    "No credentials for model {}, falling back to parent provider",
                    model
                );
                (Arc::clone(&self.provider), model)
            }
        }
    }

    /// Build the isolated tool subset for a persona: only named tools that
    /// exist in the parent registry and are not agent-only.
    fn build_persona_tools(&self, pc: &PersonaConfig) -> Arc<dyn ToolCapabilityPort> {
        let mut allowed = Vec::new();
        for name in &pc.tools {
            if BLOCKED_PERSONA_TOOLS.contains(&name.as_str()) {
                warn!("Persona '{}' cannot use blocked tool '{}'", pc.name, name);
                continue;
            }
            if !self.parent_tools.has_tool(name) {
                warn!(
                    "Tool '{}' not found in parent registry for persona '{}'",
                    name, pc.name
                );
                continue;
            }
            allowed.push(name.clone());
        }
        Arc::new(ToolSubset::new(Arc::clone(&self.parent_tools), allowed))
    }

    /// Ask the judge whether the debate has converged.
    async fn check_convergence(
        &self,
        question: &str,
        transcript: &Transcript,
        roundtable: &RoundtableConfig,
    ) -> Result<bool, RunDebateError> {
        let (provider, model) = self.resolve_provider(roundtable.orchestrator.model.as_deref());

        let messages = vec![
            Message::system(DebatePrompt::convergence_system()),
            Message::user(DebatePrompt::convergence_user(question, &transcript.render())),
        ];
        let params = GenerationParams::new(model)
            .with_temperature(CONVERGENCE_TEMPERATURE)
            .with_max_tokens(CONVERGENCE_MAX_TOKENS);

        let response = provider.chat(&messages, None, &params).await?;
        let reply = response.content.unwrap_or_default();
        Ok(DebatePrompt::verdict_is_converged(&reply))
    }

    /// Synthesize the debate into the final recommendation.
    async fn synthesize(
        &self,
        question: &str,
        transcript: &Transcript,
        roundtable: &RoundtableConfig,
    ) -> Result<String, RunDebateError> {
        let (provider, model) = self.resolve_provider(roundtable.orchestrator.model.as_deref());

        let messages = vec![
            Message::system(DebatePrompt::synthesis_system()),
            Message::user(DebatePrompt::synthesis_user(
                &roundtable.orchestrator.synthesis_prompt,
                question,
                &transcript.render(),
            )),
        ];
        let params = GenerationParams::new(model)
            .with_temperature(SYNTHESIS_TEMPERATURE)
            .with_max_tokens(self.max_tokens);

        let response = provider.chat(&messages, None, &params).await?;
        Ok(match response.content {
            Some(text) if !text.is_empty() => text,
            _ => DebatePrompt::synthesis_fallback().to_string(),
        })
    }

    fn check_cancelled(&self) -> Result<(), RunDebateError> {
        if let Some(token) = &self.cancellation_token
            && token.is_cancelled()
        {
            return Err(RunDebateError::Cancelled);
        }
        Ok(())
    }
}
