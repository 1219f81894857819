use tracing::debug;

use crate::models::{ActivityLevel, BmiCategory, Gender, HealthMetrics, Profile};

/// Activity multipliers applied to BMR, indexed by `ActivityLevel`.
/// Monotonically increasing from sedentary to extremely active.
const ACTIVITY_MULTIPLIERS: [f64; 5] = [1.2, 1.375, 1.55, 1.725, 1.9];

/// Pure closed-form health equations. No failure paths beyond the range
/// validation already performed on the profile.
pub struct BiometricsService;

impl BiometricsService {
    /// Compute BMI, BMR and TDEE for a validated profile. Outputs keep full
    /// precision; rounding is left to the presentation boundary so downstream
    /// thresholds are not compounded by early rounding.
    pub fn compute(profile: &Profile) -> HealthMetrics {
        let bmi = Self::bmi(profile.weight_kg, profile.height_cm);
        let bmr = Self::bmr(profile.gender, profile.weight_kg, profile.height_cm, profile.age);
        let tdee = bmr * Self::activity_multiplier(profile.activity_level);

        debug!(bmi, bmr, tdee, "computed health metrics");

        HealthMetrics {
            bmi,
            bmi_category: BmiCategory::from_bmi(bmi),
            bmr,
            tdee,
        }
    }

    pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
        let height_m = height_cm / 100.0;
        weight_kg / (height_m * height_m)
    }

    /// Harris-Benedict revised equation, gender-branched. `Other` averages
    /// the male and female formulas; this is a documented approximation, not
    /// a clinical standard.
    pub fn bmr(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
        let age = f64::from(age);
        let male = 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age;
        let female = 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age;
        match gender {
            Gender::Male => male,
            Gender::Female => female,
            Gender::Other => (male + female) / 2.0,
        }
    }

    pub fn activity_multiplier(level: ActivityLevel) -> f64 {
        ACTIVITY_MULTIPLIERS[level.index()]
    }
}
