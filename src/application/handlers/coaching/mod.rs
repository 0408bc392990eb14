//! Coaching handlers - classification, generation and the full request flow.

mod classify_barrier;
mod generate_intervention;
mod generation_settings;
mod request_intervention;

pub use classify_barrier::{ClassifyBarrierCommand, ClassifyBarrierHandler};
pub use generate_intervention::{GenerateInterventionCommand, GenerateInterventionHandler};
pub use generation_settings::GenerationSettings;
pub use request_intervention::{
    RequestInterventionCommand, RequestInterventionHandler, RequestInterventionResult,
};
