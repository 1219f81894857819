use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// User profile as supplied by the caller. Immutable once constructed;
/// `validate` must pass before any computation runs against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age: u32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    pub dietary_preference: DietaryPreference,
    pub cultural_cuisine: CulturalCuisine,
    pub daily_budget_usd: f64,
    /// Available equipment. An empty list is treated as bodyweight-only.
    pub equipment: Vec<Equipment>,
    /// Free-text preferences and injury notes.
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Five ordered activity levels, sedentary through extremely active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    /// Ordinal position, sedentary = 0.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|a| *a == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Endurance,
    GeneralFitness,
    Maintenance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    NonVegetarian,
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CulturalCuisine {
    SouthAsian,
    Western,
    MiddleEastern,
    EastAsian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Bodyweight,
    Dumbbells,
    Barbell,
    ResistanceBands,
    Machines,
}

impl Profile {
    /// Range validation. Callers are expected to submit sane values; anything
    /// outside the documented ranges fails fast here before any model runs.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(16..=80).contains(&self.age) {
            return Err(EngineError::InvalidProfile {
                field: "age",
                reason: format!("must be between 16 and 80, got {}", self.age),
            });
        }
        if !self.height_cm.is_finite() || !(140.0..=230.0).contains(&self.height_cm) {
            return Err(EngineError::InvalidProfile {
                field: "height_cm",
                reason: format!("must be between 140 and 230, got {}", self.height_cm),
            });
        }
        if !self.weight_kg.is_finite() || !(30.0..=200.0).contains(&self.weight_kg) {
            return Err(EngineError::InvalidProfile {
                field: "weight_kg",
                reason: format!("must be between 30 and 200, got {}", self.weight_kg),
            });
        }
        if !self.daily_budget_usd.is_finite() || self.daily_budget_usd < 2.0 {
            return Err(EngineError::InvalidProfile {
                field: "daily_budget_usd",
                reason: format!("must be at least 2.0, got {}", self.daily_budget_usd),
            });
        }
        Ok(())
    }

    /// Equipment set actually used by the generators. Bodyweight is always
    /// available, and an empty selection degrades to bodyweight-only.
    pub fn effective_equipment(&self) -> Vec<Equipment> {
        let mut set = self.equipment.clone();
        if !set.contains(&Equipment::Bodyweight) {
            set.push(Equipment::Bodyweight);
        }
        set
    }
}
