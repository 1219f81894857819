use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Seven-day meal plan with an optional note describing note-driven and
/// budget-driven adjustments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub days: Vec<DayMealPlan>,
    pub nlp_adjustment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayMealPlan {
    pub day: Weekday,
    pub meals: Vec<Meal>,
    pub total_calories: f64,
    pub total_cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub slot: MealSlot,
    pub description: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub cost_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    EveningSnack,
}

impl MealSlot {
    pub fn label(self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
            MealSlot::EveningSnack => "Evening Snack",
        }
    }
}

/// Target proportions of daily calories from protein/carbs/fat, with the
/// derived gram targets. Grams use the 4/4/9 kcal-per-gram conversion and are
/// clipped so macro calories never exceed the target by more than rounding
/// tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_pct: u8,
    pub carbs_pct: u8,
    pub fat_pct: u8,
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
}

impl MacroSplit {
    pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
    pub const CARBS_KCAL_PER_G: f64 = 4.0;
    pub const FAT_KCAL_PER_G: f64 = 9.0;

    /// Total calories implied by the gram targets.
    pub fn macro_calories(&self) -> f64 {
        f64::from(self.protein_g) * Self::PROTEIN_KCAL_PER_G
            + f64::from(self.carbs_g) * Self::CARBS_KCAL_PER_G
            + f64::from(self.fat_g) * Self::FAT_KCAL_PER_G
    }
}
