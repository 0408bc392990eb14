//! GenerateInterventionHandler - Turns a selected technique into a
//! personalized message.

use std::sync::Arc;

use super::GenerationSettings;
use crate::domain::coaching::{
    fallback_message, intervention_prompt, CoachingError, InterventionResult, InterventionSource,
    Technique,
};
use crate::domain::foundation::RequestId;
use crate::ports::{AIProvider, CompletionPurpose, CompletionRequest, RequestMetadata};

/// Command to generate an intervention message.
#[derive(Debug, Clone)]
pub struct GenerateInterventionCommand {
    pub request_id: RequestId,
    pub goal: String,
    pub barrier: String,
    pub context: Option<String>,
    pub technique: Technique,
}

/// Handler for intervention generation.
///
/// Makes exactly one generation call. On failure, or when the provider
/// returns only whitespace, the result carries the deterministic fallback
/// message instead.
pub struct GenerateInterventionHandler {
    ai_provider: Arc<dyn AIProvider>,
    settings: GenerationSettings,
}

impl GenerateInterventionHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>, settings: GenerationSettings) -> Self {
        Self {
            ai_provider,
            settings,
        }
    }

    pub async fn handle(&self, cmd: GenerateInterventionCommand) -> InterventionResult {
        let filled_template = cmd.technique.fill_template(&cmd.goal);

        match self.ask_provider(&cmd, &filled_template).await {
            Ok(text) => {
                InterventionResult::from_technique(&cmd.technique, text, InterventionSource::Generated)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %cmd.request_id,
                    technique = %cmd.technique.name,
                    error = %e,
                    "Intervention generation failed, using fallback message"
                );
                InterventionResult::from_technique(
                    &cmd.technique,
                    fallback_message(&cmd.goal, &filled_template),
                    InterventionSource::Fallback,
                )
            }
        }
    }

    async fn ask_provider(
        &self,
        cmd: &GenerateInterventionCommand,
        filled_template: &str,
    ) -> Result<String, CoachingError> {
        let prompt = intervention_prompt(
            &cmd.goal,
            &cmd.barrier,
            cmd.context.as_deref(),
            &cmd.technique,
            filled_template,
        );
        let request = self.settings.apply(CompletionRequest::new(
            prompt,
            RequestMetadata::new(cmd.request_id, CompletionPurpose::Intervention),
        ));

        let response = self.ai_provider.complete(request).await?;
        let text = response.content.trim();
        if text.is_empty() {
            return Err(CoachingError::GenerationUnavailable(
                "provider returned an empty message".to_string(),
            ));
        }
        Ok(text.to_string())
    }
}
