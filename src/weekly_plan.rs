use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::meal_plan::{MealPlan, Weekday};
use crate::nutrition::{round_half_even, NutrientTotals};
use crate::recipe::Recipe;
use crate::shopping_list::generate_shopping_list;

const DAYS_PER_WEEK: f64 = 7.0;

// Reference protein/fat/carbs split (by grams) for `balance_score`.
const IDEAL_PROTEIN_RATIO: f64 = 0.3;
const IDEAL_FAT_RATIO: f64 = 0.3;
const IDEAL_CARBS_RATIO: f64 = 0.4;
const BALANCE_DEVIATION_PENALTY: f64 = 30.0;
const MAX_BALANCE_SCORE: f64 = 10.0;

/// A `MealPlan` plus week-level analytics.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct WeeklyMealPlan {
    pub meal_plan: MealPlan,
}

impl WeeklyMealPlan {
    pub fn new(meal_plan: MealPlan) -> Self {
        Self { meal_plan }
    }

    pub fn add_meal(&mut self, day: Weekday, recipe: Recipe) {
        self.meal_plan.add_meal(day, recipe);
    }

    pub fn weekly_summary(&self) -> NutrientTotals {
        Weekday::ALL
            .iter()
            .map(|day| self.meal_plan.daily_summary(*day))
            .sum()
    }

    /// Weekly totals over seven days, each field rounded to a whole number.
    pub fn daily_average(&self) -> NutrientTotals {
        self.weekly_summary().divided_by(DAYS_PER_WEEK).rounded()
    }

    pub fn generate_shopping_list(&self) -> BTreeMap<String, f64> {
        generate_shopping_list(self.meal_plan.all_meals())
    }

    /// Distinct recipes by name, in plan order.
    pub fn unique_recipes(&self) -> Vec<&Recipe> {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for recipe in self.meal_plan.all_meals() {
            if seen.insert(recipe.name.as_str()) {
                unique.push(recipe);
            }
        }
        unique
    }

    pub fn count_recipes_by_day(&self) -> BTreeMap<Weekday, usize> {
        self.meal_plan
            .iter()
            .map(|(day, meals)| (day, meals.len()))
            .collect()
    }

    /// Share of planned meals that are distinct recipes, in `[0, 1]`.
    pub fn meal_variety(&self) -> f64 {
        let total = self.meal_plan.total_meals();
        if total == 0 {
            return 0.0;
        }
        self.unique_recipes().len() as f64 / total as f64
    }

    /// `day2 - day1`, field by field.
    pub fn compare_daily_nutrition(&self, day1: Weekday, day2: Weekday) -> NutrientTotals {
        self.meal_plan.daily_summary(day2) - self.meal_plan.daily_summary(day1)
    }

    pub fn day_with_highest_calories(&self) -> Weekday {
        self.day_with_highest(|totals| totals.kcal)
    }

    pub fn day_with_highest_protein(&self) -> Weekday {
        self.day_with_highest(|totals| totals.protein)
    }

    // Earliest day wins ties.
    fn day_with_highest(&self, field: impl Fn(&NutrientTotals) -> f64) -> Weekday {
        let mut best = Weekday::Monday;
        let mut best_value = f64::NEG_INFINITY;
        for day in Weekday::ALL {
            let value = field(&self.meal_plan.daily_summary(day));
            if value > best_value {
                best = day;
                best_value = value;
            }
        }
        best
    }

    /// Score out of 10 for how close the average macro split (by grams) is to
    /// 30% protein, 30% fat, 40% carbs. Rounded to two decimals.
    pub fn balance_score(&self) -> f64 {
        let avg = self.daily_average();
        let total = avg.macro_grams();
        if total == 0.0 {
            return 0.0;
        }

        let deviation = (avg.protein / total - IDEAL_PROTEIN_RATIO).abs()
            + (avg.fat / total - IDEAL_FAT_RATIO).abs()
            + (avg.carbs / total - IDEAL_CARBS_RATIO).abs();

        let score = (MAX_BALANCE_SCORE - deviation * BALANCE_DEVIATION_PENALTY).max(0.0);
        round_half_even(score, 2)
    }
}
