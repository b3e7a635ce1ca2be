pub mod advice;
pub mod evaluation;
pub mod profile;
pub mod targets;

pub use evaluation::{DailyPlanEvaluation, MealEvaluation, TargetCompliance, WeeklyPlanEvaluation};
pub use profile::{ActivityLevel, Gender, Goal, Profile};
pub use targets::{DailyTargets, MacroDistribution};

use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::meal_plan::{MealPlan, Weekday};
use crate::recipe::Recipe;
use crate::weekly_plan::WeeklyMealPlan;

/// Computes targets for one validated profile and scores meals and plans
/// against them.
///
/// Targets are recomputed on every call; nothing is cached and no input is
/// ever modified.
#[derive(Debug, Clone)]
pub struct NutritionalRecommendation {
    profile: Profile,
}

impl NutritionalRecommendation {
    pub fn new(profile: Profile) -> Result<Self> {
        profile.validate()?;
        debug!(
            "Recommendation engine ready: goal {:?}, activity {:?}",
            profile.goal, profile.activity_level
        );
        Ok(Self { profile })
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        Self::new(Profile::from_value(value)?)
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn calculate_bmr(&self) -> f64 {
        targets::calculate_bmr(&self.profile)
    }

    pub fn calculate_tdee(&self) -> f64 {
        targets::calculate_tdee(&self.profile)
    }

    pub fn generate_macro_distribution(&self) -> MacroDistribution {
        targets::generate_macro_distribution(&self.profile.goal)
    }

    pub fn calculate_daily_targets(&self) -> DailyTargets {
        targets::calculate_daily_targets(&self.profile)
    }

    pub fn evaluate_meal(&self, meal: &Recipe) -> MealEvaluation {
        evaluation::evaluate_meal(&self.profile, &self.calculate_daily_targets(), meal)
    }

    pub fn evaluate_daily_plan(&self, plan: &MealPlan, day: Weekday) -> DailyPlanEvaluation {
        evaluation::evaluate_daily_plan(&self.profile, &self.calculate_daily_targets(), plan, day)
    }

    pub fn evaluate_weekly_plan(&self, weekly_plan: &WeeklyMealPlan) -> WeeklyPlanEvaluation {
        let evaluation = evaluation::evaluate_weekly_plan(
            &self.profile,
            &self.calculate_daily_targets(),
            weekly_plan,
        );
        info!(
            "Evaluated week: {:.0} kcal/day on average over {} meals",
            evaluation.weekly_average.kcal,
            weekly_plan.meal_plan.total_meals()
        );
        evaluation
    }

    pub fn suggest_meal_improvements(&self, meal: &Recipe) -> Vec<String> {
        advice::suggest_meal_improvements(&self.profile, &self.calculate_daily_targets(), meal)
    }

    pub fn recommend_supplements(&self) -> BTreeSet<String> {
        advice::recommend_supplements(&self.profile)
    }

    pub fn recommend_hydration(&self) -> String {
        advice::recommend_hydration(&self.profile)
    }

    pub fn recommend_meal_timing(&self) -> &'static str {
        advice::recommend_meal_timing(&self.profile.goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MealPlannerError;
    use serde_json::json;

    #[test]
    fn test_new_rejects_negative_metrics() {
        let profile = Profile {
            gender: Gender::Female,
            age: 40.0,
            weight: -60.0,
            height: 165.0,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintenance,
            allergies: vec![],
            preferences: vec![],
        };
        assert!(matches!(
            NutritionalRecommendation::new(profile),
            Err(MealPlannerError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_engine_delegates_to_profile() {
        let engine = NutritionalRecommendation::from_value(&json!({
            "gender": "male",
            "age": 30,
            "weight": 80,
            "height": 180,
            "activity_level": "sedentary",
            "goal": "maintenance",
            "allergies": [],
            "preferences": []
        }))
        .unwrap();

        assert_eq!(engine.calculate_bmr(), 1780.0);
        assert!((engine.calculate_tdee() - 2136.0).abs() < 1e-9);
        assert_eq!(engine.calculate_daily_targets().calories, 2136.0);
        assert_eq!(engine.recommend_hydration(), "2.4 liters per day");
        assert_eq!(engine.profile().goal, Goal::Maintenance);
    }
}
