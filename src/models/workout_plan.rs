use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Seven-day workout plan, Monday through Sunday in fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub days: Vec<DayPlan>,
}

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One day of the plan: either a rest day or a training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum DayPlan {
    Rest {
        day: Weekday,
        focus: DayFocus,
        notes: Vec<String>,
    },
    Training {
        day: Weekday,
        focus: DayFocus,
        exercises: Vec<Exercise>,
        estimated_duration_minutes: u32,
        notes: Vec<String>,
    },
}

impl DayPlan {
    pub fn day(&self) -> Weekday {
        match self {
            DayPlan::Rest { day, .. } | DayPlan::Training { day, .. } => *day,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, DayPlan::Rest { .. })
    }
}

/// Day-type assigned by the weekly policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayFocus {
    UpperStrength,
    LowerStrength,
    FullBodyStrength,
    Cardio,
    Mobility,
    ActiveRecovery,
    Rest,
}

impl DayFocus {
    pub fn label(self) -> &'static str {
        match self {
            DayFocus::UpperStrength => "Upper Body Strength",
            DayFocus::LowerStrength => "Lower Body Strength",
            DayFocus::FullBodyStrength => "Full Body Strength",
            DayFocus::Cardio => "Cardio & Conditioning",
            DayFocus::Mobility => "Mobility & Core",
            DayFocus::ActiveRecovery => "Active Recovery",
            DayFocus::Rest => "Rest",
        }
    }
}

/// A prescribed exercise with its set/rep scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Target rep range or duration, e.g. "8-10" or "20 min".
    pub reps: String,
    pub primary_muscle: MuscleGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Quads,
    Hamstrings,
    Glutes,
    Core,
    FullBody,
}
