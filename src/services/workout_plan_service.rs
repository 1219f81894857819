use std::collections::HashMap;

use tracing::{debug, warn};

use crate::models::{
    AdjustmentSignal, BodyArea, DayFocus, DayPlan, Equipment, Exercise, FitnessGoal, FitnessLevel,
    IntensityHint, MuscleGroup, SignalKind, WorkoutPlan, WEEK,
};

/// Catalog entry: what an exercise needs and what it stresses.
struct ExerciseTemplate {
    name: &'static str,
    primary_muscle: MuscleGroup,
    /// Day focuses this exercise can serve.
    serves: &'static [DayFocus],
    /// Required equipment; must be a subset of the available set.
    equipment: &'static [Equipment],
    /// Body areas loaded by the movement, used for injury exclusions.
    stress: &'static [BodyArea],
    /// Estimated time cost including work sets, minutes.
    minutes: u32,
}

use DayFocus::{ActiveRecovery, Cardio, FullBodyStrength, LowerStrength, Mobility, Rest, UpperStrength};
use Equipment::{Barbell, Bodyweight, Dumbbells, Machines, ResistanceBands};
use MuscleGroup::{Arms, Back, Chest, Core, FullBody, Glutes, Hamstrings, Quads, Shoulders};

const CATALOG: &[ExerciseTemplate] = &[
    // Upper body
    ExerciseTemplate { name: "Push-Up", primary_muscle: Chest, serves: &[UpperStrength, FullBodyStrength], equipment: &[Bodyweight], stress: &[BodyArea::Wrist], minutes: 6 },
    ExerciseTemplate { name: "Incline Push-Up", primary_muscle: Chest, serves: &[UpperStrength, FullBodyStrength], equipment: &[Bodyweight], stress: &[BodyArea::Wrist], minutes: 5 },
    ExerciseTemplate { name: "Dumbbell Bench Press", primary_muscle: Chest, serves: &[UpperStrength, FullBodyStrength], equipment: &[Dumbbells], stress: &[BodyArea::Shoulder], minutes: 8 },
    ExerciseTemplate { name: "Barbell Bench Press", primary_muscle: Chest, serves: &[UpperStrength], equipment: &[Barbell], stress: &[BodyArea::Shoulder], minutes: 10 },
    ExerciseTemplate { name: "Chest Press Machine", primary_muscle: Chest, serves: &[UpperStrength], equipment: &[Machines], stress: &[], minutes: 8 },
    ExerciseTemplate { name: "One-Arm Dumbbell Row", primary_muscle: Back, serves: &[UpperStrength, FullBodyStrength], equipment: &[Dumbbells], stress: &[BodyArea::LowerBack], minutes: 8 },
    ExerciseTemplate { name: "Resistance Band Row", primary_muscle: Back, serves: &[UpperStrength, FullBodyStrength], equipment: &[ResistanceBands], stress: &[], minutes: 6 },
    ExerciseTemplate { name: "Lat Pulldown", primary_muscle: Back, serves: &[UpperStrength], equipment: &[Machines], stress: &[], minutes: 8 },
    ExerciseTemplate { name: "Superman Hold", primary_muscle: Back, serves: &[UpperStrength, FullBodyStrength], equipment: &[Bodyweight], stress: &[BodyArea::LowerBack], minutes: 4 },
    ExerciseTemplate { name: "Dumbbell Shoulder Press", primary_muscle: Shoulders, serves: &[UpperStrength], equipment: &[Dumbbells], stress: &[BodyArea::Shoulder], minutes: 8 },
    ExerciseTemplate { name: "Barbell Overhead Press", primary_muscle: Shoulders, serves: &[UpperStrength], equipment: &[Barbell], stress: &[BodyArea::Shoulder, BodyArea::LowerBack], minutes: 10 },
    ExerciseTemplate { name: "Lateral Raise", primary_muscle: Shoulders, serves: &[UpperStrength], equipment: &[Dumbbells], stress: &[BodyArea::Shoulder], minutes: 6 },
    ExerciseTemplate { name: "Band Pull-Apart", primary_muscle: Shoulders, serves: &[UpperStrength], equipment: &[ResistanceBands], stress: &[], minutes: 5 },
    ExerciseTemplate { name: "Pike Push-Up", primary_muscle: Shoulders, serves: &[UpperStrength], equipment: &[Bodyweight], stress: &[BodyArea::Shoulder, BodyArea::Wrist], minutes: 6 },
    ExerciseTemplate { name: "Wall Slide", primary_muscle: Shoulders, serves: &[UpperStrength, Mobility], equipment: &[Bodyweight], stress: &[], minutes: 5 },
    ExerciseTemplate { name: "Dumbbell Curl", primary_muscle: Arms, serves: &[UpperStrength], equipment: &[Dumbbells], stress: &[], minutes: 6 },
    ExerciseTemplate { name: "Band Curl", primary_muscle: Arms, serves: &[UpperStrength], equipment: &[ResistanceBands], stress: &[], minutes: 5 },
    ExerciseTemplate { name: "Bench Dip", primary_muscle: Arms, serves: &[UpperStrength], equipment: &[Bodyweight], stress: &[BodyArea::Shoulder, BodyArea::Wrist], minutes: 6 },
    ExerciseTemplate { name: "Triceps Pushdown", primary_muscle: Arms, serves: &[UpperStrength], equipment: &[Machines], stress: &[], minutes: 6 },
    // Lower body
    ExerciseTemplate { name: "Bodyweight Squat", primary_muscle: Quads, serves: &[LowerStrength, FullBodyStrength], equipment: &[Bodyweight], stress: &[BodyArea::Knee], minutes: 6 },
    ExerciseTemplate { name: "Jump Squat", primary_muscle: Quads, serves: &[LowerStrength, Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Knee, BodyArea::Ankle], minutes: 6 },
    ExerciseTemplate { name: "Goblet Squat", primary_muscle: Quads, serves: &[LowerStrength, FullBodyStrength], equipment: &[Dumbbells], stress: &[BodyArea::Knee], minutes: 8 },
    ExerciseTemplate { name: "Barbell Back Squat", primary_muscle: Quads, serves: &[LowerStrength], equipment: &[Barbell], stress: &[BodyArea::Knee, BodyArea::LowerBack], minutes: 10 },
    ExerciseTemplate { name: "Leg Press", primary_muscle: Quads, serves: &[LowerStrength], equipment: &[Machines], stress: &[BodyArea::Knee], minutes: 8 },
    ExerciseTemplate { name: "Walking Lunge", primary_muscle: Quads, serves: &[LowerStrength], equipment: &[Bodyweight], stress: &[BodyArea::Knee], minutes: 6 },
    ExerciseTemplate { name: "Step-Up", primary_muscle: Quads, serves: &[LowerStrength, Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Knee], minutes: 6 },
    ExerciseTemplate { name: "Romanian Deadlift", primary_muscle: Hamstrings, serves: &[LowerStrength], equipment: &[Barbell], stress: &[BodyArea::LowerBack], minutes: 10 },
    ExerciseTemplate { name: "Dumbbell Romanian Deadlift", primary_muscle: Hamstrings, serves: &[LowerStrength, FullBodyStrength], equipment: &[Dumbbells], stress: &[BodyArea::LowerBack], minutes: 8 },
    ExerciseTemplate { name: "Lying Leg Curl", primary_muscle: Hamstrings, serves: &[LowerStrength], equipment: &[Machines], stress: &[BodyArea::Knee], minutes: 6 },
    ExerciseTemplate { name: "Band Leg Curl", primary_muscle: Hamstrings, serves: &[LowerStrength], equipment: &[ResistanceBands], stress: &[], minutes: 5 },
    ExerciseTemplate { name: "Glute Bridge", primary_muscle: Glutes, serves: &[LowerStrength, FullBodyStrength, Mobility], equipment: &[Bodyweight], stress: &[], minutes: 5 },
    ExerciseTemplate { name: "Barbell Hip Thrust", primary_muscle: Glutes, serves: &[LowerStrength], equipment: &[Barbell], stress: &[], minutes: 8 },
    ExerciseTemplate { name: "Band Lateral Walk", primary_muscle: Glutes, serves: &[LowerStrength], equipment: &[ResistanceBands], stress: &[], minutes: 5 },
    // Full body
    ExerciseTemplate { name: "Burpee", primary_muscle: FullBody, serves: &[FullBodyStrength, Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Knee, BodyArea::Wrist], minutes: 6 },
    ExerciseTemplate { name: "Dumbbell Thruster", primary_muscle: FullBody, serves: &[FullBodyStrength], equipment: &[Dumbbells], stress: &[BodyArea::Knee, BodyArea::Shoulder], minutes: 8 },
    ExerciseTemplate { name: "Barbell Deadlift", primary_muscle: FullBody, serves: &[FullBodyStrength], equipment: &[Barbell], stress: &[BodyArea::LowerBack], minutes: 10 },
    ExerciseTemplate { name: "Bear Crawl", primary_muscle: FullBody, serves: &[FullBodyStrength, Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Wrist], minutes: 5 },
    ExerciseTemplate { name: "Band Squat to Press", primary_muscle: FullBody, serves: &[FullBodyStrength], equipment: &[ResistanceBands], stress: &[BodyArea::Knee, BodyArea::Shoulder], minutes: 6 },
    ExerciseTemplate { name: "Dumbbell Farmer Carry", primary_muscle: FullBody, serves: &[FullBodyStrength, Cardio], equipment: &[Dumbbells], stress: &[], minutes: 6 },
    // Cardio
    ExerciseTemplate { name: "Brisk Walk", primary_muscle: FullBody, serves: &[Cardio, ActiveRecovery], equipment: &[Bodyweight], stress: &[], minutes: 20 },
    ExerciseTemplate { name: "Steady-State Jog", primary_muscle: FullBody, serves: &[Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Knee, BodyArea::Ankle], minutes: 20 },
    ExerciseTemplate { name: "Jumping Jacks", primary_muscle: FullBody, serves: &[Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Knee, BodyArea::Ankle], minutes: 5 },
    ExerciseTemplate { name: "High Knees", primary_muscle: FullBody, serves: &[Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Knee], minutes: 5 },
    ExerciseTemplate { name: "Mountain Climbers", primary_muscle: Core, serves: &[Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Wrist], minutes: 5 },
    ExerciseTemplate { name: "Rowing Machine", primary_muscle: Back, serves: &[Cardio], equipment: &[Machines], stress: &[], minutes: 15 },
    ExerciseTemplate { name: "Stationary Bike", primary_muscle: Quads, serves: &[Cardio], equipment: &[Machines], stress: &[], minutes: 15 },
    ExerciseTemplate { name: "Shadow Boxing", primary_muscle: FullBody, serves: &[Cardio], equipment: &[Bodyweight], stress: &[BodyArea::Shoulder], minutes: 8 },
    // Mobility and recovery
    ExerciseTemplate { name: "Cat-Cow Stretch", primary_muscle: Core, serves: &[Mobility, ActiveRecovery], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "World's Greatest Stretch", primary_muscle: FullBody, serves: &[Mobility], equipment: &[Bodyweight], stress: &[], minutes: 5 },
    ExerciseTemplate { name: "Hip Flexor Stretch", primary_muscle: Glutes, serves: &[Mobility, ActiveRecovery], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "Thoracic Rotation", primary_muscle: Core, serves: &[Mobility], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "Hamstring Stretch", primary_muscle: Hamstrings, serves: &[Mobility, ActiveRecovery], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "Forearm Plank", primary_muscle: Core, serves: &[Mobility, FullBodyStrength], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "Side Plank", primary_muscle: Core, serves: &[Mobility], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "Dead Bug", primary_muscle: Core, serves: &[Mobility, FullBodyStrength], equipment: &[Bodyweight], stress: &[], minutes: 4 },
    ExerciseTemplate { name: "Bird Dog", primary_muscle: Core, serves: &[Mobility], equipment: &[Bodyweight], stress: &[BodyArea::Wrist], minutes: 4 },
];

/// Rule-based expansion of level, goal, equipment and adjustment signals into
/// a seven-day workout plan.
pub struct WorkoutPlanService;

impl WorkoutPlanService {
    pub fn generate(
        level: FitnessLevel,
        goal: FitnessGoal,
        equipment: &[Equipment],
        signals: &[AdjustmentSignal],
    ) -> WorkoutPlan {
        let mut available = equipment.to_vec();
        if !available.contains(&Bodyweight) {
            available.push(Bodyweight);
        }

        let injuries: Vec<(BodyArea, &str)> = signals
            .iter()
            .filter_map(|s| match &s.kind {
                SignalKind::InjuryNote(area) => Some((*area, s.note.as_str())),
                _ => None,
            })
            .collect();
        let avoided: Vec<(Equipment, &str)> = signals
            .iter()
            .filter_map(|s| match &s.kind {
                SignalKind::EquipmentAvoid(eq) => Some((*eq, s.note.as_str())),
                _ => None,
            })
            .collect();
        let shorter = signals
            .iter()
            .any(|s| s.kind == SignalKind::IntensityHint(IntensityHint::ShorterSessions));
        let easier = signals
            .iter()
            .any(|s| s.kind == SignalKind::IntensityHint(IntensityHint::Easier));

        let mut muscle_load: HashMap<MuscleGroup, u32> = HashMap::new();
        let mut days = Vec::with_capacity(7);

        for (slot, focus) in Self::weekly_focus(goal, level).into_iter().enumerate() {
            let day = WEEK[slot];
            if focus == Rest {
                days.push(DayPlan::Rest {
                    day,
                    focus,
                    notes: vec!["Full rest. Hydrate and prioritize sleep.".to_string()],
                });
                continue;
            }

            let mut count = Self::exercise_count(level, focus);
            let mut notes = Vec::new();
            if shorter && count > 1 {
                count -= 1;
                notes.push("Shortened session per your notes.".to_string());
            }

            let (templates, day_notes) =
                Self::select_for_day(CATALOG, focus, count, &available, &injuries, &avoided, &mut muscle_load);
            notes.extend(day_notes);

            let mut exercises: Vec<Exercise> = templates
                .iter()
                .map(|t| Self::prescribe(t, goal, focus))
                .collect();
            if easier {
                for ex in &mut exercises {
                    if ex.sets > 2 {
                        ex.sets -= 1;
                    }
                }
                notes.push("Reduced set volume per your notes.".to_string());
            }

            let estimated_duration_minutes =
                10 + templates.iter().map(|t| t.minutes).sum::<u32>();

            days.push(DayPlan::Training {
                day,
                focus,
                exercises,
                estimated_duration_minutes,
                notes,
            });
        }

        debug!(?goal, ?level, "workout plan generated");
        WorkoutPlan { days }
    }

    /// Day-type policy table, indexed by goal and level. Beginners get two
    /// rest days, intermediates one; advanced plans swap the rest slot for an
    /// active-recovery day.
    fn weekly_focus(goal: FitnessGoal, level: FitnessLevel) -> [DayFocus; 7] {
        use FitnessGoal::*;
        use FitnessLevel::*;
        match (goal, level) {
            (WeightLoss, Beginner) => [Cardio, FullBodyStrength, Rest, Cardio, FullBodyStrength, Cardio, Rest],
            (WeightLoss, Intermediate) => [Cardio, FullBodyStrength, Cardio, UpperStrength, Cardio, LowerStrength, Rest],
            (WeightLoss, Advanced) => [Cardio, UpperStrength, Cardio, LowerStrength, Cardio, FullBodyStrength, ActiveRecovery],
            (MuscleGain, Beginner) => [UpperStrength, LowerStrength, Rest, FullBodyStrength, UpperStrength, LowerStrength, Rest],
            (MuscleGain, Intermediate) => [UpperStrength, LowerStrength, Cardio, UpperStrength, LowerStrength, FullBodyStrength, Rest],
            (MuscleGain, Advanced) => [UpperStrength, LowerStrength, FullBodyStrength, UpperStrength, LowerStrength, FullBodyStrength, ActiveRecovery],
            (Endurance, Beginner) => [Cardio, Mobility, Rest, Cardio, FullBodyStrength, Cardio, Rest],
            (Endurance, Intermediate) => [Cardio, FullBodyStrength, Cardio, Mobility, Cardio, Cardio, Rest],
            (Endurance, Advanced) => [Cardio, Cardio, FullBodyStrength, Cardio, Mobility, Cardio, ActiveRecovery],
            (GeneralFitness, Beginner) => [FullBodyStrength, Cardio, Rest, FullBodyStrength, Mobility, Cardio, Rest],
            (GeneralFitness, Intermediate) => [FullBodyStrength, Cardio, UpperStrength, Mobility, LowerStrength, Cardio, Rest],
            (GeneralFitness, Advanced) => [FullBodyStrength, Cardio, UpperStrength, LowerStrength, Cardio, FullBodyStrength, ActiveRecovery],
            (Maintenance, Beginner) => [FullBodyStrength, Mobility, Rest, Cardio, FullBodyStrength, Mobility, Rest],
            (Maintenance, Intermediate) => [FullBodyStrength, Cardio, Mobility, FullBodyStrength, Cardio, Mobility, Rest],
            (Maintenance, Advanced) => [FullBodyStrength, Cardio, Mobility, FullBodyStrength, Cardio, FullBodyStrength, ActiveRecovery],
        }
    }

    fn exercise_count(level: FitnessLevel, focus: DayFocus) -> usize {
        if matches!(focus, Mobility | ActiveRecovery) {
            return 3;
        }
        match level {
            FitnessLevel::Beginner => 3,
            FitnessLevel::Intermediate => 4,
            FitnessLevel::Advanced => 5,
        }
    }

    /// Pick `count` exercises for one day, balancing muscle coverage across
    /// the week. Falls back to bodyweight-only alternatives when filtering
    /// leaves the pool empty, so a training day is never without exercises.
    fn select_for_day<'a>(
        catalog: &'a [ExerciseTemplate],
        focus: DayFocus,
        count: usize,
        available: &[Equipment],
        injuries: &[(BodyArea, &str)],
        avoided: &[(Equipment, &str)],
        muscle_load: &mut HashMap<MuscleGroup, u32>,
    ) -> (Vec<&'a ExerciseTemplate>, Vec<String>) {
        let mut notes = Vec::new();
        let serves_focus = |t: &ExerciseTemplate| t.serves.contains(&focus);
        let equipment_ok = |t: &ExerciseTemplate| {
            t.equipment.iter().all(|e| available.contains(e))
                && !t.equipment.iter().any(|e| avoided.iter().any(|(a, _)| a == e))
        };
        let injury_ok = |t: &ExerciseTemplate| {
            !t.stress.iter().any(|s| injuries.iter().any(|(area, _)| area == s))
        };

        // Surface which signals shaped the day.
        let skipped_by_injury: Vec<&ExerciseTemplate> = catalog
            .iter()
            .filter(|t| serves_focus(t) && equipment_ok(t) && !injury_ok(t))
            .collect();
        for (area, note) in injuries {
            let names: Vec<&str> = skipped_by_injury
                .iter()
                .filter(|t| t.stress.contains(area))
                .map(|t| t.name)
                .collect();
            if !names.is_empty() {
                notes.push(format!("Skipped {}. {}", names.join(", "), note));
            }
        }
        for (eq, note) in avoided {
            let skipped: Vec<&str> = catalog
                .iter()
                .filter(|t| {
                    serves_focus(t)
                        && t.equipment.iter().all(|e| available.contains(e))
                        && t.equipment.contains(eq)
                })
                .map(|t| t.name)
                .collect();
            if !skipped.is_empty() {
                notes.push(format!("Skipped {}. {}", skipped.join(", "), note));
            }
        }

        let mut pool: Vec<&ExerciseTemplate> = catalog
            .iter()
            .filter(|t| serves_focus(t) && equipment_ok(t) && injury_ok(t))
            .collect();

        if pool.is_empty() {
            // Nearest bodyweight-only alternatives for the same focus.
            pool = catalog
                .iter()
                .filter(|t| serves_focus(t) && matches!(t.equipment, [Bodyweight]) && injury_ok(t))
                .collect();
            if !pool.is_empty() {
                warn!(?focus, "no equipment-compatible exercise; substituting bodyweight work");
                notes.push("Substituted bodyweight alternatives for this focus.".to_string());
            }
        }
        if pool.is_empty() {
            // Last resort: any unloaded bodyweight movement keeps the day alive.
            pool = catalog
                .iter()
                .filter(|t| matches!(t.equipment, [Bodyweight]) && t.stress.is_empty())
                .collect();
            if !pool.is_empty() {
                notes.push("Substituted low-impact bodyweight work for this focus.".to_string());
            }
        }

        let mut chosen = Vec::new();
        for _ in 0..count {
            let Some(best) = pool
                .iter()
                .enumerate()
                .min_by_key(|(idx, t)| {
                    (muscle_load.get(&t.primary_muscle).copied().unwrap_or(0), *idx)
                })
                .map(|(idx, _)| idx)
            else {
                break;
            };
            let template = pool.remove(best);
            *muscle_load.entry(template.primary_muscle).or_insert(0) += 1;
            chosen.push(template);
        }

        (chosen, notes)
    }

    /// Goal-specific set/rep scheme. Timed movements (long cardio pieces,
    /// mobility holds) are prescribed by duration instead.
    fn prescribe(template: &ExerciseTemplate, goal: FitnessGoal, focus: DayFocus) -> Exercise {
        let (sets, reps) = match focus {
            Cardio | ActiveRecovery => {
                if template.minutes >= 10 {
                    (1, format!("{} min", template.minutes))
                } else {
                    (3, "45 sec".to_string())
                }
            }
            Mobility => (2, "45 sec".to_string()),
            _ => {
                let (sets, reps) = Self::strength_scheme(goal);
                (sets, reps.to_string())
            }
        };

        Exercise {
            name: template.name.to_string(),
            sets,
            reps,
            primary_muscle: template.primary_muscle,
        }
    }

    fn strength_scheme(goal: FitnessGoal) -> (u32, &'static str) {
        match goal {
            FitnessGoal::MuscleGain => (4, "8-10"),
            FitnessGoal::WeightLoss => (3, "12-15"),
            FitnessGoal::Endurance => (3, "15-20"),
            FitnessGoal::GeneralFitness | FitnessGoal::Maintenance => (3, "10-12"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    fn injury(area: BodyArea) -> AdjustmentSignal {
        AdjustmentSignal {
            kind: SignalKind::InjuryNote(area),
            note: format!("Excluding exercises that load the {area:?}"),
        }
    }

    fn catalog_entry(name: &str) -> &'static ExerciseTemplate {
        CATALOG.iter().find(|t| t.name == name).expect("catalog entry")
    }

    #[test]
    fn plan_has_seven_days_in_fixed_order() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::GeneralFitness,
            &[Bodyweight],
            &[],
        );
        let days: Vec<Weekday> = plan.days.iter().map(|d| d.day()).collect();
        assert_eq!(days, WEEK.to_vec());
    }

    #[test]
    fn rest_day_counts_follow_level_policy() {
        for goal in [
            FitnessGoal::WeightLoss,
            FitnessGoal::MuscleGain,
            FitnessGoal::Endurance,
            FitnessGoal::GeneralFitness,
            FitnessGoal::Maintenance,
        ] {
            let rest = |level| {
                WorkoutPlanService::generate(level, goal, &[Bodyweight], &[])
                    .days
                    .iter()
                    .filter(|d| d.is_rest())
                    .count()
            };
            assert_eq!(rest(FitnessLevel::Beginner), 2, "{goal:?} beginner");
            assert_eq!(rest(FitnessLevel::Intermediate), 1, "{goal:?} intermediate");
            assert_eq!(rest(FitnessLevel::Advanced), 0, "{goal:?} advanced");
        }
    }

    #[test]
    fn advanced_plans_have_one_active_recovery_day() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Advanced,
            FitnessGoal::WeightLoss,
            &[Bodyweight],
            &[],
        );
        let recovery = plan
            .days
            .iter()
            .filter(|d| matches!(d, DayPlan::Training { focus: ActiveRecovery, .. }))
            .count();
        assert_eq!(recovery, 1);
    }

    #[test]
    fn every_training_day_has_exercises() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Beginner,
            FitnessGoal::MuscleGain,
            &[Bodyweight],
            &[],
        );
        for day in &plan.days {
            if let DayPlan::Training { exercises, .. } = day {
                assert!(!exercises.is_empty());
            }
        }
    }

    #[test]
    fn knee_injury_excludes_knee_loading_exercises() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::WeightLoss,
            &[Bodyweight, Dumbbells],
            &[injury(BodyArea::Knee)],
        );
        for day in &plan.days {
            if let DayPlan::Training { exercises, .. } = day {
                for ex in exercises {
                    let template = catalog_entry(&ex.name);
                    assert!(
                        !template.stress.contains(&BodyArea::Knee),
                        "{} loads the knee",
                        ex.name
                    );
                }
            }
        }
    }

    #[test]
    fn injury_exclusions_are_noted_for_explainability() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::WeightLoss,
            &[Bodyweight, Dumbbells],
            &[injury(BodyArea::Knee)],
        );
        let noted = plan.days.iter().any(|d| match d {
            DayPlan::Training { notes, .. } => notes.iter().any(|n| n.contains("Skipped")),
            _ => false,
        });
        assert!(noted, "expected at least one day to note the exclusion");
    }

    #[test]
    fn selected_exercises_respect_available_equipment() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Advanced,
            FitnessGoal::MuscleGain,
            &[Bodyweight, ResistanceBands],
            &[],
        );
        for day in &plan.days {
            if let DayPlan::Training { exercises, .. } = day {
                for ex in exercises {
                    let template = catalog_entry(&ex.name);
                    assert!(template
                        .equipment
                        .iter()
                        .all(|e| [Bodyweight, ResistanceBands].contains(e)));
                }
            }
        }
    }

    #[test]
    fn muscle_gain_uses_hypertrophy_scheme() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::MuscleGain,
            &[Bodyweight, Barbell, Dumbbells],
            &[],
        );
        let strength_sets: Vec<u32> = plan
            .days
            .iter()
            .filter_map(|d| match d {
                DayPlan::Training { focus: UpperStrength, exercises, .. } => {
                    Some(exercises.iter().map(|e| e.sets).collect::<Vec<_>>())
                }
                _ => None,
            })
            .flatten()
            .collect();
        assert!(!strength_sets.is_empty());
        assert!(strength_sets.iter().all(|&s| s == 4));
    }

    #[test]
    fn shorter_sessions_hint_trims_exercise_count() {
        let full = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::GeneralFitness,
            &[Bodyweight],
            &[],
        );
        let trimmed = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::GeneralFitness,
            &[Bodyweight],
            &[AdjustmentSignal {
                kind: SignalKind::IntensityHint(IntensityHint::ShorterSessions),
                note: "Keeping sessions short".to_string(),
            }],
        );
        let count = |plan: &WorkoutPlan| -> usize {
            plan.days
                .iter()
                .filter_map(|d| match d {
                    DayPlan::Training { exercises, .. } => Some(exercises.len()),
                    _ => None,
                })
                .sum()
        };
        assert!(count(&trimmed) < count(&full));
    }

    #[test]
    fn equipment_avoid_signal_overrides_available_equipment() {
        let plan = WorkoutPlanService::generate(
            FitnessLevel::Intermediate,
            FitnessGoal::MuscleGain,
            &[Bodyweight, Barbell],
            &[AdjustmentSignal {
                kind: SignalKind::EquipmentAvoid(Barbell),
                note: "Avoiding barbell exercises".to_string(),
            }],
        );
        for day in &plan.days {
            if let DayPlan::Training { exercises, .. } = day {
                for ex in exercises {
                    assert!(!catalog_entry(&ex.name).equipment.contains(&Barbell));
                }
            }
        }
    }

    #[test]
    fn fallback_substitutes_bodyweight_when_pool_is_empty() {
        // Synthetic catalog where the focus only has a barbell option.
        let catalog = [
            ExerciseTemplate {
                name: "Barbell Only Move",
                primary_muscle: Quads,
                serves: &[LowerStrength],
                equipment: &[Barbell],
                stress: &[],
                minutes: 8,
            },
            ExerciseTemplate {
                name: "Floor Bridge",
                primary_muscle: Glutes,
                serves: &[LowerStrength],
                equipment: &[Bodyweight],
                stress: &[BodyArea::Knee],
                minutes: 5,
            },
            ExerciseTemplate {
                name: "Neutral Hold",
                primary_muscle: Core,
                serves: &[Mobility],
                equipment: &[Bodyweight],
                stress: &[],
                minutes: 4,
            },
        ];
        let mut load = HashMap::new();
        // Barbell unavailable and the bodyweight option is knee-flagged: the
        // last-resort rule must still produce something.
        let (chosen, notes) = WorkoutPlanService::select_for_day(
            &catalog,
            LowerStrength,
            2,
            &[Bodyweight],
            &[(BodyArea::Knee, "knee note")],
            &[],
            &mut load,
        );
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].name, "Neutral Hold");
        assert!(notes.iter().any(|n| n.contains("Substituted")));
    }

    #[test]
    fn generation_is_deterministic() {
        let gen = || {
            WorkoutPlanService::generate(
                FitnessLevel::Intermediate,
                FitnessGoal::WeightLoss,
                &[Bodyweight, Dumbbells],
                &[injury(BodyArea::Shoulder)],
            )
        };
        assert_eq!(gen(), gen());
    }
}
