//! Prompt templates for the text-generation service.

use super::Technique;

/// Upper bound on the personalized message, in words.
pub const MAX_INTERVENTION_WORDS: usize = 100;

/// Builds the constrained-answer prompt used to classify a barrier.
pub fn classification_prompt(barrier: &str) -> String {
    format!(
        r#"You are a psychology expert. Analyze this barrier:

"{barrier}"

Which COM-B component is missing?
- Capability: lack of skills, knowledge, or ability (they don't know HOW)
- Opportunity: lack of time, resources, or external support (external barriers)
- Motivation: lack of desire, willpower, or interest (they don't WANT to)

Respond with ONLY ONE WORD: Capability, Opportunity, or Motivation

Answer:"#
    )
}

/// Builds the instruction for a personalized micro-intervention.
///
/// `filled_template` is the technique template with the goal already
/// substituted. `context` is optional background the user volunteered.
pub fn intervention_prompt(
    goal: &str,
    barrier: &str,
    context: Option<&str>,
    technique: &Technique,
    filled_template: &str,
) -> String {
    let context_line = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("User's Context: {c}\n"))
        .unwrap_or_default();

    format!(
        r#"You are a warm, supportive behavior change coach.

User's Goal: {goal}
User's Barrier: {barrier}
{context_line}Technique: {name} (based on {theory})

Your task:
Create a personalized, friendly micro-intervention (2-3 sentences) using this framework:
{filled_template}

Requirements:
- Be warm and empathetic, like a supportive friend
- Make it personal to THEIR specific situation
- Be specific and actionable
- Keep it under {max_words} words
- Sound encouraging, not preachy

Generate the intervention now:"#,
        name = technique.name,
        theory = technique.theory,
        max_words = MAX_INTERVENTION_WORDS,
    )
}

/// Deterministic message used when generation fails.
///
/// Depends only on the goal and the technique, never on the barrier.
pub fn fallback_message(goal: &str, filled_template: &str) -> String {
    format!("Let's work on {goal}. {filled_template}")
}
