use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tokio::fs;

use meal_planner::cli::{parse_args, Command};
use meal_planner::config::AppConfig;
use meal_planner::meal_plan::MealPlan;
use meal_planner::plan_loader::{load_meal_plan, parse_profile};
use meal_planner::recipe::Recipe;
use meal_planner::recommendation::NutritionalRecommendation;
use meal_planner::shopping_list::ShoppingList;
use meal_planner::weekly_plan::WeeklyMealPlan;

fn init_logging(filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

async fn load_engine(path: &Path) -> Result<NutritionalRecommendation> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read profile file '{}'", path.display()))?;
    let profile = parse_profile(&content)
        .with_context(|| format!("Invalid profile in '{}'", path.display()))?;
    Ok(NutritionalRecommendation::new(profile)?)
}

fn find_recipe<'a>(plan: &'a MealPlan, name: &str) -> Result<&'a Recipe> {
    plan.all_meals()
        .find(|recipe| recipe.name == name)
        .ok_or_else(|| anyhow!("Recipe '{}' not found in the meal plan", name))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();
    let config = AppConfig::from_env().with_overrides(cli_args.profile.clone(), cli_args.plan.clone());
    init_logging(&config.log_filter);

    let engine = if cli_args.command.needs_profile() {
        Some(load_engine(&config.profile_path).await?)
    } else {
        None
    };
    let plan = if cli_args.command.needs_plan() {
        load_meal_plan(&config.plan_path)?
    } else {
        MealPlan::new()
    };
    let engine = || engine.as_ref().ok_or_else(|| anyhow!("No profile loaded"));

    match &cli_args.command {
        Command::Targets => {
            let engine = engine()?;
            print_json(&json!({
                "bmr": engine.calculate_bmr(),
                "tdee": engine.calculate_tdee(),
                "macro_distribution": engine.generate_macro_distribution(),
                "daily_targets": engine.calculate_daily_targets(),
            }))?;
        }
        Command::EvaluateMeal { recipe } => {
            let recipe = find_recipe(&plan, recipe)?;
            print_json(&engine()?.evaluate_meal(recipe))?;
        }
        Command::EvaluateDay { day } => {
            print_json(&engine()?.evaluate_daily_plan(&plan, *day))?;
        }
        Command::EvaluateWeek => {
            let weekly_plan = WeeklyMealPlan::new(plan);
            print_json(&engine()?.evaluate_weekly_plan(&weekly_plan))?;
        }
        Command::Suggest { recipe } => {
            let recipe = find_recipe(&plan, recipe)?;
            print_json(&engine()?.suggest_meal_improvements(recipe))?;
        }
        Command::Recommend => {
            let engine = engine()?;
            print_json(&json!({
                "supplements": engine.recommend_supplements(),
                "hydration": engine.recommend_hydration(),
                "meal_timing": engine.recommend_meal_timing(),
            }))?;
        }
        Command::ShoppingList { threshold, scale } => {
            let mut list = ShoppingList::new();
            list.add_from_meal_plan(&plan);
            if let Some(factor) = scale {
                list.scale_quantities(*factor)?;
            }
            if let Some(threshold) = threshold {
                list = list.filter_by_threshold(*threshold);
            }
            print_json(&list.categorized_items())?;
        }
        Command::WeekStats => {
            let weekly_plan = WeeklyMealPlan::new(plan);
            print_json(&json!({
                "weekly_summary": weekly_plan.weekly_summary(),
                "daily_average": weekly_plan.daily_average(),
                "recipes_by_day": weekly_plan.count_recipes_by_day(),
                "unique_recipes": weekly_plan.unique_recipes().len(),
                "meal_variety": weekly_plan.meal_variety(),
                "day_with_highest_calories": weekly_plan.day_with_highest_calories(),
                "day_with_highest_protein": weekly_plan.day_with_highest_protein(),
                "balance_score": weekly_plan.balance_score(),
            }))?;
        }
    }

    Ok(())
}
