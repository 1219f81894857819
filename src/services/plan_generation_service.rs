use std::sync::Arc;

use tracing::info;

use crate::error::EngineError;
use crate::models::{Profile, RecommendationResult};
use crate::services::inference_service::ModelBundle;
use crate::services::{
    BiometricsService, DietPlanService, InferenceService, NoteInterpretationService,
    WorkoutPlanService,
};

/// Orchestrates one generation request in strict order: validation →
/// biometrics → model inference → note interpretation → plan generation.
/// Stateless across requests; the model bundle is the only shared resource
/// and is read-only, so the service can be cloned and used concurrently.
#[derive(Clone)]
pub struct PlanGenerationService {
    inference: InferenceService,
    interpreter: NoteInterpretationService,
}

impl PlanGenerationService {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        let interpreter = NoteInterpretationService::new(bundle.embedder.clone());
        Self {
            inference: InferenceService::new(bundle),
            interpreter,
        }
    }

    /// The single inbound operation. Either a complete result or a typed
    /// error; partial plans are never returned.
    pub fn generate_plan(&self, profile: &Profile) -> Result<RecommendationResult, EngineError> {
        profile.validate()?;

        let health_metrics = BiometricsService::compute(profile);
        let inference = self.inference.infer(profile, &health_metrics)?;
        let adjustment_signals = self.interpreter.interpret(profile.notes.as_deref());

        let macro_split =
            DietPlanService::macro_split(profile.fitness_goal, inference.predicted_calories);
        let equipment = profile.effective_equipment();

        // The two generators are independent; neither sees the other's output.
        let workout_plan = WorkoutPlanService::generate(
            inference.fitness_level,
            profile.fitness_goal,
            &equipment,
            &adjustment_signals,
        );
        let diet_plan = DietPlanService::generate(
            inference.predicted_calories,
            &macro_split,
            profile.dietary_preference,
            profile.cultural_cuisine,
            profile.daily_budget_usd,
            &adjustment_signals,
        )?;

        info!(
            fitness_cluster = inference.fitness_cluster,
            predicted_calories = inference.predicted_calories,
            signals = adjustment_signals.len(),
            "recommendation assembled"
        );

        Ok(RecommendationResult {
            health_metrics,
            inference,
            adjustment_signals,
            macro_split,
            workout_plan,
            diet_plan,
        })
    }
}
