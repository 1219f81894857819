use serde::{Deserialize, Serialize};

/// Output of the pretrained model stage. Produced once per request and
/// read-only downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Raw cluster id from the assignment model.
    pub fitness_cluster: usize,
    /// Coarse skill tier, mapped from the cluster id by a lookup fixed at
    /// model-fit time.
    pub fitness_level: FitnessLevel,
    /// Daily calorie target from the regression model, kcal/day.
    pub predicted_calories: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn label(self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }
}
