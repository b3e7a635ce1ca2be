use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::profile::Profile;
use super::targets::DailyTargets;
use crate::meal_plan::{MealPlan, Weekday};
use crate::nutrition::NutrientTotals;
use crate::recipe::Recipe;
use crate::weekly_plan::WeeklyMealPlan;

// Fixed weekly scores. They are not derived from the plan yet.
pub const CONSISTENCY_SCORE: f64 = 8.0;
pub const VARIETY_SCORE: f64 = 7.5;
pub const OVERALL_RATING: f64 = 8.0;

const MIN_COMPLIANCE: f64 = 0.0;
const MAX_COMPLIANCE: f64 = 100.0;

/// How much of the daily targets a single recipe covers. Percentages are not
/// capped and are `None` when the matching target is zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MealEvaluation {
    pub calories_percentage: Option<f64>,
    pub protein_percentage: Option<f64>,
    pub fat_percentage: Option<f64>,
    pub carbs_percentage: Option<f64>,
    pub contains_allergens: bool,
    pub meets_preferences: bool,
}

/// Percentage of each daily target met, clamped to 0..=100. A negative target
/// (possible for tiny profiles losing weight) reads 0.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TargetCompliance {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyPlanEvaluation {
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_fat: f64,
    pub total_carbs: f64,
    pub target_compliance: TargetCompliance,
    pub allergen_status: bool,
}

impl DailyPlanEvaluation {
    pub fn totals(&self) -> NutrientTotals {
        NutrientTotals::new(
            self.total_calories,
            self.total_protein,
            self.total_fat,
            self.total_carbs,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeeklyPlanEvaluation {
    pub daily_evaluations: BTreeMap<Weekday, DailyPlanEvaluation>,
    /// Weekly totals divided by seven, unrounded.
    pub weekly_average: NutrientTotals,
    pub consistency_score: f64,
    pub variety_score: f64,
    pub overall_rating: f64,
}

/// `value / target * 100`, or `None` when the target is zero.
pub fn percent_of(value: f64, target: f64, label: &str) -> Option<f64> {
    if target == 0.0 {
        warn!("{} target is zero, percentage is undefined", label);
        return None;
    }
    Some(value / target * 100.0)
}

fn capped_percent_of(value: f64, target: f64, label: &str) -> Option<f64> {
    percent_of(value, target, label).map(|pct| pct.clamp(MIN_COMPLIANCE, MAX_COMPLIANCE))
}

/// Allergy terms found in the recipe's ingredient names, in profile order.
pub fn matched_allergens<'a>(profile: &'a Profile, recipe: &Recipe) -> Vec<&'a str> {
    profile
        .allergies
        .iter()
        .filter(|allergen| recipe.contains_term(allergen))
        .map(String::as_str)
        .collect()
}

pub fn contains_allergens(profile: &Profile, recipe: &Recipe) -> bool {
    !matched_allergens(profile, recipe).is_empty()
}

/// True when every preference term appears in the ingredient names.
pub fn meets_preferences(profile: &Profile, recipe: &Recipe) -> bool {
    profile
        .preferences
        .iter()
        .all(|preference| recipe.contains_term(preference))
}

pub fn evaluate_meal(profile: &Profile, targets: &DailyTargets, meal: &Recipe) -> MealEvaluation {
    MealEvaluation {
        calories_percentage: percent_of(meal.kcal, targets.calories, "calories"),
        protein_percentage: percent_of(meal.protein, targets.protein, "protein"),
        fat_percentage: percent_of(meal.fat, targets.fat, "fat"),
        carbs_percentage: percent_of(meal.carbs, targets.carbs, "carbs"),
        contains_allergens: contains_allergens(profile, meal),
        meets_preferences: meets_preferences(profile, meal),
    }
}

pub fn evaluate_daily_plan(
    profile: &Profile,
    targets: &DailyTargets,
    plan: &MealPlan,
    day: Weekday,
) -> DailyPlanEvaluation {
    let summary = plan.daily_summary(day);
    let allergen_status = plan
        .get_meals(day)
        .iter()
        .any(|meal| contains_allergens(profile, meal));

    debug!(
        "{}: {} meals, {:.0} kcal, allergens: {}",
        day,
        plan.get_meals(day).len(),
        summary.kcal,
        allergen_status
    );

    DailyPlanEvaluation {
        total_calories: summary.kcal,
        total_protein: summary.protein,
        total_fat: summary.fat,
        total_carbs: summary.carbs,
        target_compliance: TargetCompliance {
            calories: capped_percent_of(summary.kcal, targets.calories, "calories"),
            protein: capped_percent_of(summary.protein, targets.protein, "protein"),
            fat: capped_percent_of(summary.fat, targets.fat, "fat"),
            carbs: capped_percent_of(summary.carbs, targets.carbs, "carbs"),
        },
        allergen_status,
    }
}

pub fn evaluate_weekly_plan(
    profile: &Profile,
    targets: &DailyTargets,
    weekly_plan: &WeeklyMealPlan,
) -> WeeklyPlanEvaluation {
    let mut daily_evaluations = BTreeMap::new();
    let mut total = NutrientTotals::default();

    for day in Weekday::ALL {
        let evaluation = evaluate_daily_plan(profile, targets, &weekly_plan.meal_plan, day);
        total += evaluation.totals();
        daily_evaluations.insert(day, evaluation);
    }

    WeeklyPlanEvaluation {
        daily_evaluations,
        // Always seven, even if some days are empty.
        weekly_average: total.divided_by(Weekday::ALL.len() as f64),
        consistency_score: CONSISTENCY_SCORE,
        variety_score: VARIETY_SCORE,
        overall_rating: OVERALL_RATING,
    }
}
