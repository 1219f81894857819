use serde::{Deserialize, Serialize};

use super::adjustment::AdjustmentSignal;
use super::diet_plan::{DietPlan, MacroSplit};
use super::health_metrics::HealthMetrics;
use super::inference::InferenceResult;
use super::workout_plan::WorkoutPlan;

/// Complete recommendation for one request. Plain, acyclic value object;
/// assembled once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub health_metrics: HealthMetrics,
    pub inference: InferenceResult,
    pub adjustment_signals: Vec<AdjustmentSignal>,
    pub macro_split: MacroSplit,
    pub workout_plan: WorkoutPlan,
    pub diet_plan: DietPlan,
}

impl RecommendationResult {
    /// Field-for-field JSON export for download/persistence by the host
    /// application.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
