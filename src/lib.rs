pub mod cli;
pub mod config;
pub mod error;
pub mod meal_plan;
pub mod nutrition;
pub mod plan_loader;
pub mod recipe;
pub mod recommendation;
pub mod shopping_list;
pub mod weekly_plan;

pub use error::{MealPlannerError, Result};
