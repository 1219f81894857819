use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{
    AdjustmentSignal, CulturalCuisine, DayMealPlan, DietPlan, DietaryPreference, FitnessGoal,
    MacroSplit, Meal, MealSlot, SignalKind, WEEK,
};

/// Catalog entry: one dish with per-serving macros and cost.
struct MealTemplate {
    name: &'static str,
    cuisine: CulturalCuisine,
    slots: &'static [MealSlot],
    /// Most specific dietary memberships; `satisfies` applies the hierarchy.
    diets: &'static [DietaryPreference],
    /// Avoidance tags matched against cuisine-avoid signals.
    tags: &'static [&'static str],
    kcal: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    cost_usd: f64,
}

use CulturalCuisine::{EastAsian, MiddleEastern, SouthAsian, Western};
use DietaryPreference::{Keto, Paleo, Pescatarian, Vegan, Vegetarian};
use MealSlot::{Breakfast, Dinner, EveningSnack, Lunch, Snack};

const MAINS: &[MealSlot] = &[Lunch, Dinner];
const SNACKS: &[MealSlot] = &[Snack, EveningSnack];

const CATALOG: &[MealTemplate] = &[
    // South Asian
    MealTemplate { name: "Masala Oats", cuisine: SouthAsian, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 320.0, protein_g: 12.0, carbs_g: 55.0, fat_g: 6.0, cost_usd: 0.80 },
    MealTemplate { name: "Vegetable Poha", cuisine: SouthAsian, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 350.0, protein_g: 9.0, carbs_g: 65.0, fat_g: 7.0, cost_usd: 0.70 },
    MealTemplate { name: "Moong Dal Chilla", cuisine: SouthAsian, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 300.0, protein_g: 18.0, carbs_g: 40.0, fat_g: 8.0, cost_usd: 0.60 },
    MealTemplate { name: "Egg Bhurji", cuisine: SouthAsian, slots: &[Breakfast], diets: &[Vegetarian, Keto, Paleo], tags: &["spicy"], kcal: 320.0, protein_g: 20.0, carbs_g: 8.0, fat_g: 24.0, cost_usd: 0.70 },
    MealTemplate { name: "Chicken Curry with Rice", cuisine: SouthAsian, slots: MAINS, diets: &[], tags: &["spicy"], kcal: 650.0, protein_g: 40.0, carbs_g: 70.0, fat_g: 20.0, cost_usd: 2.50 },
    MealTemplate { name: "Dal Tadka with Brown Rice", cuisine: SouthAsian, slots: MAINS, diets: &[Vegan], tags: &["spicy"], kcal: 550.0, protein_g: 22.0, carbs_g: 85.0, fat_g: 12.0, cost_usd: 0.90 },
    MealTemplate { name: "Palak Paneer with Roti", cuisine: SouthAsian, slots: MAINS, diets: &[Vegetarian], tags: &["dairy"], kcal: 520.0, protein_g: 24.0, carbs_g: 45.0, fat_g: 26.0, cost_usd: 1.60 },
    MealTemplate { name: "Chana Masala with Rice", cuisine: SouthAsian, slots: MAINS, diets: &[Vegan], tags: &["spicy"], kcal: 580.0, protein_g: 20.0, carbs_g: 90.0, fat_g: 12.0, cost_usd: 0.80 },
    MealTemplate { name: "Fish Curry with Rice", cuisine: SouthAsian, slots: MAINS, diets: &[Pescatarian], tags: &["spicy"], kcal: 600.0, protein_g: 38.0, carbs_g: 65.0, fat_g: 18.0, cost_usd: 2.20 },
    MealTemplate { name: "Tandoori Chicken Salad", cuisine: SouthAsian, slots: MAINS, diets: &[Keto, Paleo], tags: &[], kcal: 420.0, protein_g: 45.0, carbs_g: 12.0, fat_g: 20.0, cost_usd: 2.40 },
    MealTemplate { name: "Paneer Tikka", cuisine: SouthAsian, slots: MAINS, diets: &[Vegetarian, Keto], tags: &["dairy"], kcal: 380.0, protein_g: 28.0, carbs_g: 10.0, fat_g: 26.0, cost_usd: 1.80 },
    MealTemplate { name: "Roasted Chana", cuisine: SouthAsian, slots: SNACKS, diets: &[Vegan], tags: &[], kcal: 180.0, protein_g: 9.0, carbs_g: 25.0, fat_g: 4.0, cost_usd: 0.30 },
    MealTemplate { name: "Masala Buttermilk", cuisine: SouthAsian, slots: SNACKS, diets: &[Vegetarian], tags: &["dairy"], kcal: 90.0, protein_g: 5.0, carbs_g: 8.0, fat_g: 3.0, cost_usd: 0.25 },
    MealTemplate { name: "Boiled Eggs", cuisine: SouthAsian, slots: SNACKS, diets: &[Vegetarian, Keto, Paleo], tags: &[], kcal: 140.0, protein_g: 12.0, carbs_g: 1.0, fat_g: 10.0, cost_usd: 0.40 },
    // Western
    MealTemplate { name: "Oatmeal with Berries", cuisine: Western, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 350.0, protein_g: 10.0, carbs_g: 60.0, fat_g: 7.0, cost_usd: 0.80 },
    MealTemplate { name: "Greek Yogurt Parfait", cuisine: Western, slots: &[Breakfast], diets: &[Vegetarian], tags: &["dairy"], kcal: 320.0, protein_g: 22.0, carbs_g: 40.0, fat_g: 8.0, cost_usd: 1.20 },
    MealTemplate { name: "Avocado Toast", cuisine: Western, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 380.0, protein_g: 10.0, carbs_g: 45.0, fat_g: 18.0, cost_usd: 1.30 },
    MealTemplate { name: "Veggie Omelette", cuisine: Western, slots: &[Breakfast], diets: &[Vegetarian, Keto, Paleo], tags: &[], kcal: 350.0, protein_g: 22.0, carbs_g: 8.0, fat_g: 26.0, cost_usd: 1.10 },
    MealTemplate { name: "Grilled Chicken with Quinoa", cuisine: Western, slots: MAINS, diets: &[], tags: &[], kcal: 620.0, protein_g: 50.0, carbs_g: 55.0, fat_g: 18.0, cost_usd: 2.80 },
    MealTemplate { name: "Baked Salmon with Vegetables", cuisine: Western, slots: MAINS, diets: &[Pescatarian, Keto, Paleo], tags: &[], kcal: 550.0, protein_g: 42.0, carbs_g: 18.0, fat_g: 32.0, cost_usd: 3.50 },
    MealTemplate { name: "Turkey Meatballs with Pasta", cuisine: Western, slots: MAINS, diets: &[], tags: &[], kcal: 650.0, protein_g: 40.0, carbs_g: 70.0, fat_g: 20.0, cost_usd: 2.20 },
    MealTemplate { name: "Lentil Soup with Bread", cuisine: Western, slots: MAINS, diets: &[Vegan], tags: &[], kcal: 480.0, protein_g: 24.0, carbs_g: 75.0, fat_g: 8.0, cost_usd: 0.90 },
    MealTemplate { name: "Steak with Sweet Potato", cuisine: Western, slots: MAINS, diets: &[Paleo], tags: &[], kcal: 680.0, protein_g: 48.0, carbs_g: 45.0, fat_g: 30.0, cost_usd: 4.00 },
    MealTemplate { name: "Veggie Burrito Bowl", cuisine: Western, slots: MAINS, diets: &[Vegan], tags: &[], kcal: 560.0, protein_g: 18.0, carbs_g: 85.0, fat_g: 16.0, cost_usd: 1.50 },
    MealTemplate { name: "Cobb Salad", cuisine: Western, slots: MAINS, diets: &[Keto], tags: &["dairy"], kcal: 480.0, protein_g: 35.0, carbs_g: 12.0, fat_g: 32.0, cost_usd: 2.60 },
    MealTemplate { name: "Protein Shake", cuisine: Western, slots: SNACKS, diets: &[Vegetarian], tags: &["dairy"], kcal: 200.0, protein_g: 25.0, carbs_g: 10.0, fat_g: 4.0, cost_usd: 1.00 },
    MealTemplate { name: "Mixed Nuts", cuisine: Western, slots: SNACKS, diets: &[Vegan, Keto, Paleo], tags: &["nuts"], kcal: 210.0, protein_g: 6.0, carbs_g: 8.0, fat_g: 18.0, cost_usd: 0.60 },
    MealTemplate { name: "Apple with Peanut Butter", cuisine: Western, slots: SNACKS, diets: &[Vegan], tags: &["nuts"], kcal: 220.0, protein_g: 6.0, carbs_g: 25.0, fat_g: 11.0, cost_usd: 0.50 },
    // Middle Eastern
    MealTemplate { name: "Shakshuka", cuisine: MiddleEastern, slots: &[Breakfast], diets: &[Vegetarian, Keto, Paleo], tags: &["spicy"], kcal: 380.0, protein_g: 20.0, carbs_g: 22.0, fat_g: 24.0, cost_usd: 1.20 },
    MealTemplate { name: "Labneh with Zaatar Flatbread", cuisine: MiddleEastern, slots: &[Breakfast], diets: &[Vegetarian], tags: &["dairy"], kcal: 360.0, protein_g: 14.0, carbs_g: 45.0, fat_g: 14.0, cost_usd: 0.90 },
    MealTemplate { name: "Ful Medames", cuisine: MiddleEastern, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 340.0, protein_g: 18.0, carbs_g: 50.0, fat_g: 8.0, cost_usd: 0.60 },
    MealTemplate { name: "Chicken Shawarma Bowl", cuisine: MiddleEastern, slots: MAINS, diets: &[], tags: &[], kcal: 600.0, protein_g: 42.0, carbs_g: 55.0, fat_g: 22.0, cost_usd: 2.40 },
    MealTemplate { name: "Falafel Wrap with Tahini", cuisine: MiddleEastern, slots: MAINS, diets: &[Vegan], tags: &["fried"], kcal: 580.0, protein_g: 18.0, carbs_g: 75.0, fat_g: 22.0, cost_usd: 1.20 },
    MealTemplate { name: "Grilled Fish with Couscous", cuisine: MiddleEastern, slots: MAINS, diets: &[Pescatarian], tags: &[], kcal: 560.0, protein_g: 40.0, carbs_g: 55.0, fat_g: 18.0, cost_usd: 2.80 },
    MealTemplate { name: "Lamb Kofta with Rice", cuisine: MiddleEastern, slots: MAINS, diets: &[], tags: &[], kcal: 680.0, protein_g: 38.0, carbs_g: 60.0, fat_g: 30.0, cost_usd: 3.20 },
    MealTemplate { name: "Hummus Mezze Plate", cuisine: MiddleEastern, slots: MAINS, diets: &[Vegan], tags: &[], kcal: 520.0, protein_g: 16.0, carbs_g: 60.0, fat_g: 24.0, cost_usd: 1.00 },
    MealTemplate { name: "Grilled Halloumi Salad", cuisine: MiddleEastern, slots: MAINS, diets: &[Vegetarian, Keto], tags: &["dairy"], kcal: 450.0, protein_g: 24.0, carbs_g: 15.0, fat_g: 34.0, cost_usd: 2.00 },
    MealTemplate { name: "Grilled Chicken Skewers", cuisine: MiddleEastern, slots: MAINS, diets: &[Keto, Paleo], tags: &[], kcal: 480.0, protein_g: 40.0, carbs_g: 20.0, fat_g: 26.0, cost_usd: 2.20 },
    MealTemplate { name: "Hummus with Carrots", cuisine: MiddleEastern, slots: SNACKS, diets: &[Vegan], tags: &[], kcal: 160.0, protein_g: 6.0, carbs_g: 18.0, fat_g: 7.0, cost_usd: 0.40 },
    MealTemplate { name: "Dates and Almonds", cuisine: MiddleEastern, slots: SNACKS, diets: &[Vegan, Paleo], tags: &["nuts"], kcal: 200.0, protein_g: 4.0, carbs_g: 32.0, fat_g: 8.0, cost_usd: 0.50 },
    // East Asian
    MealTemplate { name: "Congee with Scallions", cuisine: EastAsian, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 300.0, protein_g: 8.0, carbs_g: 60.0, fat_g: 3.0, cost_usd: 0.50 },
    MealTemplate { name: "Miso Soup with Rice", cuisine: EastAsian, slots: &[Breakfast], diets: &[Vegan], tags: &[], kcal: 320.0, protein_g: 12.0, carbs_g: 55.0, fat_g: 6.0, cost_usd: 0.70 },
    MealTemplate { name: "Tamagoyaki with Rice", cuisine: EastAsian, slots: &[Breakfast], diets: &[Vegetarian], tags: &[], kcal: 380.0, protein_g: 16.0, carbs_g: 50.0, fat_g: 12.0, cost_usd: 0.90 },
    MealTemplate { name: "Chicken Teriyaki Bowl", cuisine: EastAsian, slots: MAINS, diets: &[], tags: &[], kcal: 620.0, protein_g: 40.0, carbs_g: 75.0, fat_g: 15.0, cost_usd: 2.30 },
    MealTemplate { name: "Tofu Stir-Fry with Rice", cuisine: EastAsian, slots: MAINS, diets: &[Vegan], tags: &[], kcal: 540.0, protein_g: 24.0, carbs_g: 70.0, fat_g: 16.0, cost_usd: 1.10 },
    MealTemplate { name: "Salmon Sashimi with Rice", cuisine: EastAsian, slots: MAINS, diets: &[Pescatarian], tags: &[], kcal: 480.0, protein_g: 36.0, carbs_g: 50.0, fat_g: 12.0, cost_usd: 3.00 },
    MealTemplate { name: "Beef and Broccoli", cuisine: EastAsian, slots: MAINS, diets: &[Keto, Paleo], tags: &[], kcal: 580.0, protein_g: 38.0, carbs_g: 30.0, fat_g: 32.0, cost_usd: 2.80 },
    MealTemplate { name: "Vegetable Ramen", cuisine: EastAsian, slots: MAINS, diets: &[Vegan], tags: &[], kcal: 550.0, protein_g: 16.0, carbs_g: 85.0, fat_g: 14.0, cost_usd: 1.30 },
    MealTemplate { name: "Kung Pao Chicken", cuisine: EastAsian, slots: MAINS, diets: &[], tags: &["spicy", "nuts"], kcal: 600.0, protein_g: 35.0, carbs_g: 45.0, fat_g: 28.0, cost_usd: 2.20 },
    MealTemplate { name: "Egg Fried Rice", cuisine: EastAsian, slots: MAINS, diets: &[Vegetarian], tags: &["fried"], kcal: 560.0, protein_g: 18.0, carbs_g: 80.0, fat_g: 16.0, cost_usd: 0.90 },
    MealTemplate { name: "Edamame", cuisine: EastAsian, slots: SNACKS, diets: &[Vegan, Keto], tags: &[], kcal: 150.0, protein_g: 12.0, carbs_g: 10.0, fat_g: 6.0, cost_usd: 0.50 },
    MealTemplate { name: "Seaweed and Rice Crackers", cuisine: EastAsian, slots: SNACKS, diets: &[Vegan], tags: &[], kcal: 130.0, protein_g: 4.0, carbs_g: 22.0, fat_g: 3.0, cost_usd: 0.40 },
];

/// Goal-specific macro percentages (protein, carbs, fat). Each row sums to
/// 100; weight loss skews high-protein.
fn macro_table(goal: FitnessGoal) -> (u8, u8, u8) {
    match goal {
        FitnessGoal::WeightLoss => (40, 30, 30),
        FitnessGoal::MuscleGain => (30, 45, 25),
        FitnessGoal::Endurance => (25, 55, 20),
        FitnessGoal::GeneralFitness => (30, 40, 30),
        FitnessGoal::Maintenance => (25, 45, 30),
    }
}

/// Calorie share per meal slot. Fixed proportions keep the generator
/// deterministic and explainable; higher targets add an evening snack.
fn slot_split(calorie_target: f64) -> &'static [(MealSlot, f64)] {
    if calorie_target < 2400.0 {
        &[
            (Breakfast, 0.25),
            (Lunch, 0.30),
            (Dinner, 0.30),
            (Snack, 0.15),
        ]
    } else {
        &[
            (Breakfast, 0.22),
            (Lunch, 0.28),
            (Dinner, 0.28),
            (Snack, 0.11),
            (EveningSnack, 0.11),
        ]
    }
}

/// Portion scaling bounds relative to a catalog serving.
const MIN_PORTION: f64 = 0.5;
const MAX_PORTION: f64 = 2.0;

/// Rule-based expansion of calorie target, macros, dietary preference,
/// cuisine, budget and signals into a seven-day meal plan.
pub struct DietPlanService;

impl DietPlanService {
    /// Goal macro split converted to gram targets via 4/4/9, with the carb
    /// grams balancing the total so macro calories track the target within
    /// rounding tolerance.
    pub fn macro_split(goal: FitnessGoal, calorie_target: f64) -> MacroSplit {
        let (protein_pct, carbs_pct, fat_pct) = macro_table(goal);

        let protein_g = (calorie_target * f64::from(protein_pct) / 100.0
            / MacroSplit::PROTEIN_KCAL_PER_G)
            .round()
            .max(0.0) as u32;
        let fat_g = (calorie_target * f64::from(fat_pct) / 100.0 / MacroSplit::FAT_KCAL_PER_G)
            .round()
            .max(0.0) as u32;
        // Carb grams absorb the protein/fat rounding so the 4/4/9 total lands
        // in (target - 4 kcal, target] and never overshoots.
        let remaining = calorie_target
            - f64::from(protein_g) * MacroSplit::PROTEIN_KCAL_PER_G
            - f64::from(fat_g) * MacroSplit::FAT_KCAL_PER_G;
        let carbs_g = (remaining / MacroSplit::CARBS_KCAL_PER_G).floor().max(0.0) as u32;

        MacroSplit {
            protein_pct,
            carbs_pct,
            fat_pct,
            protein_g,
            carbs_g,
            fat_g,
        }
    }

    pub fn generate(
        calorie_target: f64,
        macros: &MacroSplit,
        preference: DietaryPreference,
        cuisine: CulturalCuisine,
        budget_usd: f64,
        signals: &[AdjustmentSignal],
    ) -> Result<DietPlan, EngineError> {
        let avoided_tags: Vec<(&str, &str)> = signals
            .iter()
            .filter_map(|s| match &s.kind {
                SignalKind::CuisineAvoid(tag) => Some((tag.as_str(), s.note.as_str())),
                _ => None,
            })
            .collect();

        debug!(
            calorie_target,
            protein_g = macros.protein_g,
            ?preference,
            ?cuisine,
            budget_usd,
            "generating diet plan"
        );

        let slots = slot_split(calorie_target);
        let mut adjustments: Vec<String> = avoided_tags
            .iter()
            .map(|(_, note)| (*note).to_string())
            .collect();
        let mut days = Vec::with_capacity(7);

        for (day_idx, day) in WEEK.iter().enumerate() {
            let mut picks: Vec<(MealSlot, f64, &MealTemplate)> = Vec::with_capacity(slots.len());
            for (slot_idx, (slot, fraction)) in slots.iter().enumerate() {
                let target = calorie_target * fraction;
                // Offsetting by the slot index keeps lunch and dinner from
                // landing on the same catalog item every day.
                let template = Self::select_item(
                    day_idx + slot_idx,
                    *slot,
                    preference,
                    cuisine,
                    &avoided_tags,
                    &mut adjustments,
                )?;
                picks.push((*slot, target, template));
            }

            Self::enforce_budget(
                &mut picks,
                preference,
                cuisine,
                budget_usd,
                &avoided_tags,
                &mut adjustments,
            );

            let meals: Vec<Meal> = picks
                .iter()
                .map(|(slot, target, template)| Self::portion(*slot, *target, template))
                .collect();
            let total_calories = meals.iter().map(|m| m.calories).sum();
            let total_cost_usd = meals.iter().map(|m| m.cost_usd).sum();

            days.push(DayMealPlan {
                day: *day,
                meals,
                total_calories,
                total_cost_usd,
            });
        }

        let nlp_adjustment = if adjustments.is_empty() {
            None
        } else {
            Some(adjustments.join(" "))
        };

        Ok(DietPlan {
            days,
            nlp_adjustment,
        })
    }

    /// Dietary satisfaction hierarchy. The dietary preference is a hard
    /// constraint and is never relaxed anywhere in the selection chain.
    fn satisfies(diets: &[DietaryPreference], preference: DietaryPreference) -> bool {
        match preference {
            DietaryPreference::NonVegetarian => true,
            DietaryPreference::Vegetarian => {
                diets.contains(&Vegetarian) || diets.contains(&Vegan)
            }
            DietaryPreference::Vegan => diets.contains(&Vegan),
            DietaryPreference::Pescatarian => {
                diets.contains(&Pescatarian)
                    || diets.contains(&Vegetarian)
                    || diets.contains(&Vegan)
            }
            DietaryPreference::Keto => diets.contains(&Keto),
            DietaryPreference::Paleo => diets.contains(&Paleo),
        }
    }

    fn tag_avoided(template: &MealTemplate, avoided: &[(&str, &str)]) -> bool {
        template.tags.iter().any(|t| avoided.iter().any(|(a, _)| a == t))
    }

    /// Pick the item for one slot. Relaxation order: same-cuisine honoring
    /// avoid-tags, same-cuisine ignoring them, cross-cuisine honoring them,
    /// cross-cuisine ignoring them, then cross-cuisine ignoring slot
    /// suitability. Day-index rotation provides variety within a pool.
    fn select_item(
        rotation: usize,
        slot: MealSlot,
        preference: DietaryPreference,
        cuisine: CulturalCuisine,
        avoided: &[(&str, &str)],
        adjustments: &mut Vec<String>,
    ) -> Result<&'static MealTemplate, EngineError> {
        let fits =
            |t: &MealTemplate| t.slots.contains(&slot) && Self::satisfies(t.diets, preference);
        let pick = |pool: Vec<&'static MealTemplate>| pool[rotation % pool.len()];
        let relax = |adjustments: &mut Vec<String>, note: String| {
            warn!(?slot, "meal selection relaxed a soft constraint");
            if !adjustments.contains(&note) {
                adjustments.push(note);
            }
        };

        let pool: Vec<&'static MealTemplate> = CATALOG
            .iter()
            .filter(|t| fits(t) && t.cuisine == cuisine && !Self::tag_avoided(t, avoided))
            .collect();
        if !pool.is_empty() {
            return Ok(pick(pool));
        }

        let pool: Vec<&'static MealTemplate> = CATALOG
            .iter()
            .filter(|t| fits(t) && t.cuisine == cuisine)
            .collect();
        if !pool.is_empty() {
            relax(
                adjustments,
                format!(
                    "No {} option free of avoided ingredients for {}; relaxed the avoidance for that slot.",
                    cuisine_label(cuisine),
                    slot.label()
                ),
            );
            return Ok(pick(pool));
        }

        let pool: Vec<&'static MealTemplate> = CATALOG
            .iter()
            .filter(|t| fits(t) && !Self::tag_avoided(t, avoided))
            .collect();
        if !pool.is_empty() {
            relax(
                adjustments,
                format!(
                    "No compliant {} dish for {}; substituted from another cuisine.",
                    cuisine_label(cuisine),
                    slot.label()
                ),
            );
            return Ok(pick(pool));
        }

        let pool: Vec<&'static MealTemplate> = CATALOG.iter().filter(|t| fits(t)).collect();
        if !pool.is_empty() {
            relax(
                adjustments,
                format!(
                    "No dish for {} avoids the flagged ingredients in any cuisine; relaxed the avoidance.",
                    slot.label()
                ),
            );
            return Ok(pick(pool));
        }

        let pool: Vec<&'static MealTemplate> = CATALOG
            .iter()
            .filter(|t| Self::satisfies(t.diets, preference))
            .collect();
        if !pool.is_empty() {
            relax(
                adjustments,
                format!(
                    "No slot-appropriate dish for {}; reused a compliant dish from another slot.",
                    slot.label()
                ),
            );
            return Ok(pick(pool));
        }

        Err(EngineError::ConstraintUnsatisfiable {
            slot,
            constraint: format!("dietary preference {preference:?}"),
        })
    }

    /// Budget pass: while the day exceeds budget, swap the most expensive
    /// replaceable meal for a cheaper compliant alternative. Same-cuisine
    /// substitutes are tried before cross-cuisine ones; when the floor is
    /// reached and the total still exceeds budget the plan ships as-is with
    /// an explanatory note.
    fn enforce_budget(
        picks: &mut [(MealSlot, f64, &'static MealTemplate)],
        preference: DietaryPreference,
        cuisine: CulturalCuisine,
        budget_usd: f64,
        avoided: &[(&str, &str)],
        adjustments: &mut Vec<String>,
    ) {
        let cheaper_than = |slot: MealSlot, cost: f64| -> Option<&'static MealTemplate> {
            let by_cost = |a: &&MealTemplate, b: &&MealTemplate| {
                a.cost_usd
                    .partial_cmp(&b.cost_usd)
                    .expect("catalog costs are finite")
            };
            let stage = |same_cuisine: bool, honor_avoided: bool| {
                CATALOG
                    .iter()
                    .filter(|t| {
                        t.slots.contains(&slot)
                            && Self::satisfies(t.diets, preference)
                            && (!same_cuisine || t.cuisine == cuisine)
                            && (!honor_avoided || !Self::tag_avoided(t, avoided))
                    })
                    .min_by(by_cost)
                    .filter(|t| t.cost_usd < cost)
            };
            stage(true, true)
                .or_else(|| stage(true, false))
                .or_else(|| stage(false, true))
                .or_else(|| stage(false, false))
        };

        // Each slot can be swapped at most twice (same-cuisine floor, then
        // cross-cuisine floor); one extra pass fires the floor note when
        // nothing is left to swap.
        for _ in 0..=(2 * picks.len()) {
            let total: f64 = picks.iter().map(|(_, _, t)| t.cost_usd).sum();
            if total <= budget_usd {
                return;
            }

            // Most expensive slot that still has a cheaper compliant option.
            let mut candidate: Option<(usize, &'static MealTemplate)> = None;
            for (idx, (slot, _, current)) in picks.iter().enumerate() {
                if let Some(cheaper) = cheaper_than(*slot, current.cost_usd) {
                    let is_pricier = match candidate {
                        Some((best_idx, _)) => current.cost_usd > picks[best_idx].2.cost_usd,
                        None => true,
                    };
                    if is_pricier {
                        candidate = Some((idx, cheaper));
                    }
                }
            }

            match candidate {
                Some((idx, cheaper)) => {
                    let note = format!(
                        "Swapped {} for {} to stay within the ${budget_usd:.2} daily budget.",
                        picks[idx].2.name, cheaper.name
                    );
                    if !adjustments.contains(&note) {
                        adjustments.push(note);
                    }
                    picks[idx].2 = cheaper;
                }
                None => {
                    let note = format!(
                        "Cheapest compliant selection still exceeds the ${budget_usd:.2} daily budget."
                    );
                    warn!("budget floor reached");
                    if !adjustments.contains(&note) {
                        adjustments.push(note);
                    }
                    return;
                }
            }
        }
    }

    /// Scale a catalog serving toward the slot calorie target. Macros scale
    /// with the portion; cost is per serving and does not.
    fn portion(slot: MealSlot, target_kcal: f64, template: &MealTemplate) -> Meal {
        let factor = (target_kcal / template.kcal).clamp(MIN_PORTION, MAX_PORTION);
        Meal {
            slot,
            description: template.name.to_string(),
            calories: template.kcal * factor,
            protein_g: template.protein_g * factor,
            carbs_g: template.carbs_g * factor,
            fat_g: template.fat_g * factor,
            cost_usd: template.cost_usd,
        }
    }
}

fn cuisine_label(cuisine: CulturalCuisine) -> &'static str {
    match cuisine {
        SouthAsian => "South Asian",
        Western => "Western",
        MiddleEastern => "Middle Eastern",
        EastAsian => "East Asian",
    }
}
