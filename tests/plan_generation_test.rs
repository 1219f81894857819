use std::sync::Arc;

use fitplan::models::{
    ActivityLevel, BmiCategory, CulturalCuisine, DayPlan, DietaryPreference, Equipment,
    FitnessGoal, Gender, Profile, SignalKind,
};
use fitplan::services::inference_service::ModelBundle;
use fitplan::{EngineError, PlanGenerationService};
use pretty_assertions::assert_eq;

fn service() -> PlanGenerationService {
    PlanGenerationService::new(Arc::new(ModelBundle::pretrained()))
}

/// The documented reference scenario: 28-year-old male, 170 cm, 70 kg,
/// moderately active, weight-loss goal, vegetarian South Asian diet at
/// $10/day, bodyweight + dumbbells, with a knee complaint in the notes.
fn reference_profile() -> Profile {
    Profile {
        age: 28,
        gender: Gender::Male,
        height_cm: 170.0,
        weight_kg: 70.0,
        activity_level: ActivityLevel::ModeratelyActive,
        fitness_goal: FitnessGoal::WeightLoss,
        dietary_preference: DietaryPreference::Vegetarian,
        cultural_cuisine: CulturalCuisine::SouthAsian,
        daily_budget_usd: 10.0,
        equipment: vec![Equipment::Bodyweight, Equipment::Dumbbells],
        notes: Some("bad left knee".to_string()),
    }
}

#[test]
fn reference_scenario_health_metrics() {
    let result = service().generate_plan(&reference_profile()).unwrap();
    assert!((result.health_metrics.bmi - 24.22).abs() < 0.01);
    assert_eq!(result.health_metrics.bmi_category, BmiCategory::Normal);
    assert!(result.health_metrics.bmr > 1600.0 && result.health_metrics.bmr < 1800.0);
    assert!(result.health_metrics.tdee > result.health_metrics.bmr);
}

#[test]
fn reference_scenario_macro_split_is_protein_forward() {
    let result = service().generate_plan(&reference_profile()).unwrap();
    assert!(result.macro_split.protein_pct >= 30);
    let macro_total = result.macro_split.macro_calories();
    let target = result.inference.predicted_calories;
    assert!((macro_total - target).abs() <= target * 0.01);
}

#[test]
fn reference_scenario_excludes_knee_loading_exercises() {
    let result = service().generate_plan(&reference_profile()).unwrap();

    assert!(result
        .adjustment_signals
        .iter()
        .any(|s| matches!(s.kind, SignalKind::InjuryNote(_))));

    let knee_loading = [
        "Jump Squat",
        "Bodyweight Squat",
        "Goblet Squat",
        "Walking Lunge",
        "Step-Up",
        "High Knees",
        "Jumping Jacks",
        "Steady-State Jog",
        "Burpee",
    ];
    for day in &result.workout_plan.days {
        if let DayPlan::Training { exercises, .. } = day {
            assert!(!exercises.is_empty(), "training day left empty");
            for ex in exercises {
                assert!(
                    !knee_loading.contains(&ex.name.as_str()),
                    "{} should have been excluded for the knee note",
                    ex.name
                );
            }
        }
    }
}

#[test]
fn reference_scenario_diet_is_strictly_vegetarian() {
    let result = service().generate_plan(&reference_profile()).unwrap();
    let animal_dishes = [
        "Chicken", "Fish", "Salmon", "Beef", "Turkey", "Lamb", "Steak", "Kofta", "Shawarma",
        "Sashimi", "Teriyaki",
    ];
    for day in &result.diet_plan.days {
        assert_eq!(day.meals.len(), 4);
        for meal in &day.meals {
            for dish in &animal_dishes {
                assert!(
                    !meal.description.contains(dish),
                    "{} is not vegetarian",
                    meal.description
                );
            }
        }
        assert!(day.total_cost_usd <= 10.0 + 1e-9);
    }
}

#[test]
fn equipment_constrained_profile_never_gets_gym_exercises() {
    let mut profile = reference_profile();
    profile.equipment = vec![Equipment::Bodyweight];
    profile.notes = None;
    let result = service().generate_plan(&profile).unwrap();

    let gym_only = [
        "Barbell Bench Press",
        "Barbell Overhead Press",
        "Barbell Back Squat",
        "Barbell Hip Thrust",
        "Barbell Deadlift",
        "Romanian Deadlift",
        "Chest Press Machine",
        "Lat Pulldown",
        "Triceps Pushdown",
        "Leg Press",
        "Lying Leg Curl",
        "Rowing Machine",
        "Stationary Bike",
        "Dumbbell Bench Press",
        "One-Arm Dumbbell Row",
        "Dumbbell Shoulder Press",
        "Lateral Raise",
        "Dumbbell Curl",
        "Goblet Squat",
        "Dumbbell Romanian Deadlift",
        "Dumbbell Thruster",
        "Dumbbell Farmer Carry",
        "Resistance Band Row",
        "Band Pull-Apart",
        "Band Curl",
        "Band Leg Curl",
        "Band Lateral Walk",
        "Band Squat to Press",
    ];
    for day in &result.workout_plan.days {
        if let DayPlan::Training { exercises, .. } = day {
            for ex in exercises {
                assert!(
                    !gym_only.contains(&ex.name.as_str()),
                    "{} requires unavailable equipment",
                    ex.name
                );
            }
        }
    }
}

#[test]
fn minimum_budget_still_produces_a_complete_week() {
    let mut profile = reference_profile();
    profile.daily_budget_usd = 2.0;
    profile.notes = None;
    let result = service().generate_plan(&profile).unwrap();

    assert_eq!(result.diet_plan.days.len(), 7);
    for day in &result.diet_plan.days {
        assert_eq!(day.meals.len(), 4, "no slot may be left empty");
    }
}

#[test]
fn generate_plan_is_idempotent_byte_for_byte() {
    let svc = service();
    let profile = reference_profile();
    let a = svc.generate_plan(&profile).unwrap();
    let b = svc.generate_plan(&profile).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn out_of_range_profile_is_rejected_with_field_context() {
    let mut profile = reference_profile();
    profile.age = 12;
    match service().generate_plan(&profile) {
        Err(EngineError::InvalidProfile { field, .. }) => assert_eq!(field, "age"),
        other => panic!("expected InvalidProfile, got {other:?}"),
    }
}

#[test]
fn notes_change_plans_but_not_health_metrics() {
    let svc = service();
    let with_notes = svc.generate_plan(&reference_profile()).unwrap();
    let mut quiet = reference_profile();
    quiet.notes = None;
    let without_notes = svc.generate_plan(&quiet).unwrap();

    assert_eq!(with_notes.health_metrics, without_notes.health_metrics);
    assert_eq!(with_notes.inference, without_notes.inference);
    assert!(without_notes.adjustment_signals.is_empty());
    assert!(!with_notes.adjustment_signals.is_empty());
    assert_ne!(with_notes.workout_plan, without_notes.workout_plan);
}
