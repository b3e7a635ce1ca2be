use std::collections::BTreeSet;

use super::evaluation::matched_allergens;
use super::profile::{ActivityLevel, Gender, Goal, Profile};
use super::targets::DailyTargets;
use crate::nutrition::round_half_even;
use crate::recipe::Recipe;

// A single meal taking more than this share of the daily carb or fat target
// is flagged; less than `PROTEIN_SHARE_FLOOR` of the protein target is too.
const CARBS_SHARE_CEILING: f64 = 0.4;
const FAT_SHARE_CEILING: f64 = 0.4;
const PROTEIN_SHARE_FLOOR: f64 = 0.2;

const SENIOR_AGE: f64 = 60.0;
const IRON_AGE_FEMALE: f64 = 50.0;

const ML_PER_KG: f64 = 30.0;
const ML_PER_LITER: f64 = 1000.0;

pub const REDUCE_CARBS_MESSAGE: &str = "Consider reducing carbohydrate content.";
pub const REDUCE_FAT_MESSAGE: &str = "Consider reducing fat content.";
pub const INCREASE_PROTEIN_MESSAGE: &str = "Consider increasing protein sources.";

/// Suggestions for one meal, always in this order: carbs, fat, protein, then
/// one line per allergen found (profile order).
pub fn suggest_meal_improvements(
    profile: &Profile,
    targets: &DailyTargets,
    meal: &Recipe,
) -> Vec<String> {
    let mut suggestions = Vec::new();

    if meal.carbs > targets.carbs * CARBS_SHARE_CEILING {
        suggestions.push(REDUCE_CARBS_MESSAGE.to_string());
    }
    if meal.fat > targets.fat * FAT_SHARE_CEILING {
        suggestions.push(REDUCE_FAT_MESSAGE.to_string());
    }
    if meal.protein < targets.protein * PROTEIN_SHARE_FLOOR {
        suggestions.push(INCREASE_PROTEIN_MESSAGE.to_string());
    }

    for allergen in matched_allergens(profile, meal) {
        suggestions.push(format!("Remove or substitute allergen: {}.", allergen));
    }

    suggestions
}

pub fn recommend_supplements(profile: &Profile) -> BTreeSet<String> {
    let mut supplements: Vec<&str> = match profile.goal {
        Goal::MuscleGain => vec!["Whey Protein", "Creatine", "ZMA", "Vitamin B12"],
        Goal::WeightLoss => vec!["Green Tea Extract", "Fiber", "CLA", "Vitamin B12"],
        Goal::Maintenance => vec!["Multivitamin", "Omega-3"],
        Goal::Senior => vec!["Vitamin D", "Calcium", "Omega-3", "Vitamin B12"],
        Goal::Other(_) if profile.age >= SENIOR_AGE => {
            vec!["Vitamin D", "Calcium", "Omega-3", "Vitamin B12"]
        }
        Goal::Other(_) => vec![],
    };

    if profile.gender == Gender::Female && profile.age >= IRON_AGE_FEMALE {
        supplements.push("Iron");
    }

    supplements.into_iter().map(str::to_string).collect()
}

fn activity_bonus_ml(activity_level: &ActivityLevel) -> f64 {
    match activity_level {
        ActivityLevel::Sedentary => 0.0,
        ActivityLevel::LightlyActive => 300.0,
        ActivityLevel::Moderate => 500.0,
        ActivityLevel::VeryActive => 700.0,
        ActivityLevel::ExtraActive => 1000.0,
        ActivityLevel::Unrecognized(_) => 0.0,
    }
}

/// Daily water intake in liters, rounded to one decimal, ties to even.
pub fn hydration_liters(profile: &Profile) -> f64 {
    let total_ml = profile.weight * ML_PER_KG + activity_bonus_ml(&profile.activity_level);
    round_half_even(total_ml / ML_PER_LITER, 1)
}

pub fn recommend_hydration(profile: &Profile) -> String {
    format!("{:.1} liters per day", hydration_liters(profile))
}

pub fn recommend_meal_timing(goal: &Goal) -> &'static str {
    match goal {
        Goal::WeightLoss => "Eat 3 main meals and 1-2 small snacks. Avoid late-night meals.",
        Goal::MuscleGain => "Eat 5-6 meals daily. Include protein-rich food every 3 hours.",
        Goal::Maintenance => "3 balanced meals with optional snacks based on hunger.",
        Goal::Senior => "Eat smaller, more frequent meals to support digestion and energy.",
        Goal::Other(_) => "Follow a regular eating schedule that fits your lifestyle.",
    }
}
