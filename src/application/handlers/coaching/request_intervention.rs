//! RequestInterventionHandler - Full coaching flow for one user request.
//!
//! Validate → classify → select → generate. At most two generation calls
//! are made, sequentially.

use std::sync::Arc;

use super::{
    ClassifyBarrierCommand, ClassifyBarrierHandler, GenerateInterventionCommand,
    GenerateInterventionHandler, GenerationSettings,
};
use crate::domain::coaching::{
    select_technique, CoachingError, InterventionOutcome, InterventionRequest, TechniqueCatalog,
};
use crate::domain::foundation::RequestId;
use crate::ports::AIProvider;

/// Command to request an intervention.
#[derive(Debug, Clone)]
pub struct RequestInterventionCommand {
    pub goal: String,
    pub barrier: String,
    pub context: Option<String>,
}

/// Result of an intervention request.
pub type RequestInterventionResult = InterventionOutcome;

/// Handler orchestrating classification, selection and generation.
pub struct RequestInterventionHandler {
    catalog: Arc<TechniqueCatalog>,
    classifier: ClassifyBarrierHandler,
    generator: GenerateInterventionHandler,
}

impl RequestInterventionHandler {
    pub fn new(
        catalog: Arc<TechniqueCatalog>,
        ai_provider: Arc<dyn AIProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            catalog,
            classifier: ClassifyBarrierHandler::new(Arc::clone(&ai_provider), settings),
            generator: GenerateInterventionHandler::new(ai_provider, settings),
        }
    }

    pub async fn handle(
        &self,
        cmd: RequestInterventionCommand,
    ) -> Result<RequestInterventionResult, CoachingError> {
        let request = InterventionRequest::new(cmd.goal, cmd.barrier, cmd.context)?;

        // Nothing can be selected, so skip the generation calls entirely.
        if self.catalog.is_empty() {
            tracing::warn!("Intervention requested with an empty technique catalog");
            return Err(CoachingError::EmptyCatalog);
        }

        let request_id = RequestId::new();
        let category = self
            .classifier
            .handle(ClassifyBarrierCommand {
                request_id,
                barrier: request.barrier().to_string(),
            })
            .await;

        let selection = select_technique(&self.catalog, request.barrier(), category)?;
        tracing::info!(
            %request_id,
            %category,
            technique = %selection.technique.name,
            reason = ?selection.reason,
            "Selected technique"
        );

        let intervention = self
            .generator
            .handle(GenerateInterventionCommand {
                request_id,
                goal: request.goal().to_string(),
                barrier: request.barrier().to_string(),
                context: request.context().map(str::to_string),
                technique: selection.technique.clone(),
            })
            .await;

        Ok(InterventionOutcome {
            request_id,
            barrier_category: category,
            selection: selection.reason,
            intervention,
        })
    }
}
