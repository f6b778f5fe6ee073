//! Prompt templates for the debate flow.

/// Templates for persona and judge prompts.
pub struct DebatePrompt;

impl DebatePrompt {
    /// Full system prompt for a persona in a given round: the persona's base
    /// prompt plus round-aware debate instructions.
    pub fn persona_system(base: &str, persona_name: &str, round: u32) -> String {
        let mut prompt = format!(
            "{}\n\nYou are participating in a structured multi-persona debate as \
             **{}**. This is round {}.",
            base.trim(),
            persona_name,
            round
        );
        if round == 1 {
            prompt.push_str(
                " Provide your initial analysis from your perspective. \
                 Be specific and substantive.",
            );
        } else {
            prompt.push_str(
                " Review the other participants' responses from previous rounds. \
                 React, critique, refine your position, and highlight agreements \
                 or disagreements. Be constructive but honest.",
            );
        }
        prompt
    }

    /// User message for a persona: the question, plus the transcript so far
    /// for rounds after the first.
    pub fn persona_user(
        question: &str,
        transcript: Option<&str>,
        persona_name: &str,
        round: u32,
    ) -> String {
        let mut parts = vec![format!("**Question:** {}", question)];
        if round > 1 {
            if let Some(transcript) = transcript {
                parts.push(format!("\n**Debate transcript so far:**\n\n{}", transcript));
            }
        }
        parts.push(format!(
            "\n**Your response as {} (round {}):**",
            persona_name, round
        ));
        parts.join("\n")
    }

    /// System prompt for the convergence judge.
    pub fn convergence_system() -> &'static str {
        "You are a debate moderator. Assess convergence concisely."
    }

    /// User prompt asking for a binary convergence verdict.
    pub fn convergence_user(question: &str, transcript: &str) -> String {
        format!(
            "Analyze this debate transcript and determine if the participants have \
             converged on a shared position or if further debate rounds would be \
             productive.\n\n\
             **Question:** {}\n\n\
             **Transcript:**\n{}\n\n\
             Respond with ONLY 'CONVERGED' if participants largely agree and further \
             rounds would not add value, or 'CONTINUE' if there are still meaningful \
             disagreements worth exploring.",
            question, transcript
        )
    }

    /// Liberal verdict match: the debate stops iff the judge's reply contains
    /// the converged marker anywhere, case-insensitively.
    pub fn verdict_is_converged(reply: &str) -> bool {
        reply.to_uppercase().contains("CONVERGED")
    }

    /// System prompt for the synthesis call.
    pub fn synthesis_system() -> &'static str {
        "You are an expert debate synthesizer."
    }

    /// User prompt for synthesis, led by the roundtable's configured
    /// synthesis instruction.
    pub fn synthesis_user(synthesis_prompt: &str, question: &str, transcript: &str) -> String {
        format!(
            "{}\n\n**Question:** {}\n\n**Debate transcript:**\n{}",
            synthesis_prompt.trim(),
            question,
            transcript
        )
    }

    /// Returned when the synthesis call produces no text at all.
    pub fn synthesis_fallback() -> &'static str {
        "[Synthesis produced no output]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_one_asks_for_initial_analysis() {
        let prompt = DebatePrompt::persona_system("You design systems.", "Architect", 1);
        assert!(prompt.starts_with("You design systems."));
        assert!(prompt.contains("round 1"));
        assert!(prompt.contains("initial analysis"));
        assert!(!prompt.contains("previous rounds"));
    }

    #[test]
    fn test_later_rounds_ask_for_review() {
        let prompt = DebatePrompt::persona_system("You poke holes.", "Skeptic", 2);
        assert!(prompt.contains("round 2"));
        assert!(prompt.contains("previous rounds"));
        assert!(prompt.contains("agreements"));
    }

    #[test]
    fn test_user_message_includes_transcript_after_round_one() {
        let msg = DebatePrompt::persona_user("Should we rewrite?", Some("--- Round 1 ---"), "Skeptic", 2);
        assert!(msg.contains("**Question:** Should we rewrite?"));
        assert!(msg.contains("--- Round 1 ---"));
        assert!(msg.contains("Skeptic (round 2)"));
    }

    #[test]
    fn test_user_message_omits_transcript_in_round_one() {
        let msg = DebatePrompt::persona_user("Q?", Some("stale"), "A", 1);
        assert!(!msg.contains("stale"));
    }

    #[test]
    fn test_verdict_match_is_case_insensitive_substring() {
        assert!(DebatePrompt::verdict_is_converged("CONVERGED"));
        assert!(DebatePrompt::verdict_is_converged("The debate has converged."));
        assert!(DebatePrompt::verdict_is_converged("Converged\n"));
        assert!(!DebatePrompt::verdict_is_converged("CONTINUE"));
        assert!(!DebatePrompt::verdict_is_converged(""));
    }
}
