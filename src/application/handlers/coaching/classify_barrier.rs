//! ClassifyBarrierHandler - Maps a barrier description to a COM-B category.

use std::sync::Arc;

use super::GenerationSettings;
use crate::domain::coaching::{classification_prompt, BarrierCategory, CoachingError};
use crate::domain::foundation::RequestId;
use crate::ports::{AIProvider, CompletionPurpose, CompletionRequest, RequestMetadata};

/// Command to classify one barrier.
#[derive(Debug, Clone)]
pub struct ClassifyBarrierCommand {
    pub request_id: RequestId,
    pub barrier: String,
}

/// Handler for barrier classification.
///
/// Makes exactly one generation call. Never fails: any provider error
/// yields [`BarrierCategory::Motivation`].
pub struct ClassifyBarrierHandler {
    ai_provider: Arc<dyn AIProvider>,
    settings: GenerationSettings,
}

impl ClassifyBarrierHandler {
    pub fn new(ai_provider: Arc<dyn AIProvider>, settings: GenerationSettings) -> Self {
        Self {
            ai_provider,
            settings,
        }
    }

    pub async fn handle(&self, cmd: ClassifyBarrierCommand) -> BarrierCategory {
        match self.ask_provider(&cmd).await {
            Ok(answer) => {
                let category = BarrierCategory::from_model_answer(&answer);
                tracing::debug!(
                    request_id = %cmd.request_id,
                    answer = %answer.trim(),
                    %category,
                    "Classified barrier"
                );
                category
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %cmd.request_id,
                    error = %e,
                    "Barrier classification failed, defaulting to motivation"
                );
                BarrierCategory::default()
            }
        }
    }

    async fn ask_provider(&self, cmd: &ClassifyBarrierCommand) -> Result<String, CoachingError> {
        let request = self.settings.apply(CompletionRequest::new(
            classification_prompt(&cmd.barrier),
            RequestMetadata::new(cmd.request_id, CompletionPurpose::Classification),
        ));

        let response = self.ai_provider.complete(request).await?;
        Ok(response.content)
    }
}
