// Business logic services

pub mod biometrics_service;
pub mod diet_plan_service;
pub mod inference_service;
pub mod note_interpretation_service;
pub mod plan_generation_service;
pub mod workout_plan_service;

pub use biometrics_service::BiometricsService;
pub use diet_plan_service::DietPlanService;
pub use inference_service::{InferenceService, ModelBundle};
pub use note_interpretation_service::NoteInterpretationService;
pub use plan_generation_service::PlanGenerationService;
pub use workout_plan_service::WorkoutPlanService;
