use serde::{Deserialize, Serialize};

use super::profile::{ActivityLevel, Gender, Goal, Profile};
use crate::nutrition::{KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};

const WEIGHT_LOSS_KCAL_ADJUSTMENT: f64 = -500.0;
const MUSCLE_GAIN_KCAL_ADJUSTMENT: f64 = 300.0;

/// Share of daily calories coming from each macronutrient. Always sums to 1.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MacroDistribution {
    pub protein_ratio: f64,
    pub fat_ratio: f64,
    pub carbs_ratio: f64,
}

/// Daily energy (kcal) and macronutrient (g) targets for a profile.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DailyTargets {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl DailyTargets {
    /// Each value rounded on its own (ties to even), so the grams no longer add
    /// back up to exactly `calories`.
    pub fn rounded(&self) -> Self {
        DailyTargets {
            calories: self.calories.round_ties_even(),
            protein: self.protein.round_ties_even(),
            fat: self.fat.round_ties_even(),
            carbs: self.carbs.round_ties_even(),
        }
    }
}

/// Mifflin-St Jeor basal metabolic rate in kcal/day.
///
/// Genders other than male/female get the mean of both formulas.
pub fn calculate_bmr(profile: &Profile) -> f64 {
    let base = 10.0 * profile.weight + 6.25 * profile.height - 5.0 * profile.age;
    let male = base + 5.0;
    let female = base - 161.0;
    match profile.gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Other(_) => (male + female) / 2.0,
    }
}

pub fn activity_multiplier(activity_level: &ActivityLevel) -> f64 {
    match activity_level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::VeryActive => 1.725,
        ActivityLevel::ExtraActive => 1.9,
        ActivityLevel::Unrecognized(_) => 1.2,
    }
}

/// Total daily energy expenditure: BMR scaled by activity.
pub fn calculate_tdee(profile: &Profile) -> f64 {
    calculate_bmr(profile) * activity_multiplier(&profile.activity_level)
}

pub fn generate_macro_distribution(goal: &Goal) -> MacroDistribution {
    let (protein_ratio, fat_ratio, carbs_ratio) = match goal {
        Goal::WeightLoss => (0.35, 0.30, 0.35),
        Goal::MuscleGain => (0.35, 0.25, 0.40),
        Goal::Maintenance => (0.25, 0.30, 0.45),
        // Senior and anything unrecognised.
        Goal::Senior | Goal::Other(_) => (0.20, 0.25, 0.55),
    };
    MacroDistribution {
        protein_ratio,
        fat_ratio,
        carbs_ratio,
    }
}

fn calorie_adjustment(goal: &Goal) -> f64 {
    match goal {
        Goal::WeightLoss => WEIGHT_LOSS_KCAL_ADJUSTMENT,
        Goal::MuscleGain => MUSCLE_GAIN_KCAL_ADJUSTMENT,
        _ => 0.0,
    }
}

/// Targets before rounding. Protein, fat and carbs reconstruct `calories`
/// exactly (up to floating point) through the 4/9/4 kcal-per-gram factors.
pub fn calculate_raw_targets(profile: &Profile) -> DailyTargets {
    let calories = calculate_tdee(profile) + calorie_adjustment(&profile.goal);
    let macros = generate_macro_distribution(&profile.goal);

    DailyTargets {
        calories,
        protein: calories * macros.protein_ratio / KCAL_PER_GRAM_PROTEIN,
        fat: calories * macros.fat_ratio / KCAL_PER_GRAM_FAT,
        carbs: calories * macros.carbs_ratio / KCAL_PER_GRAM_CARBS,
    }
}

/// Daily targets with every field rounded to the nearest whole number.
pub fn calculate_daily_targets(profile: &Profile) -> DailyTargets {
    calculate_raw_targets(profile).rounded()
}
