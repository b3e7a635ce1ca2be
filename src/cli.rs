use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::meal_plan::Weekday;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the profile JSON file
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,

    /// Path to the weekly meal plan CSV file
    #[arg(long, global = true)]
    pub plan: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// BMR, TDEE, macro split and daily targets for the profile
    Targets,
    /// Score one recipe from the plan against the daily targets
    EvaluateMeal {
        #[arg(short, long)]
        recipe: String,
    },
    /// Totals and target compliance for one day of the plan
    EvaluateDay {
        #[arg(short, long)]
        day: Weekday,
    },
    /// Evaluate every day of the plan and the weekly average
    EvaluateWeek,
    /// Improvement suggestions for one recipe from the plan
    Suggest {
        #[arg(short, long)]
        recipe: String,
    },
    /// Supplements, hydration and meal timing advice
    Recommend,
    /// Aggregated ingredient list for the whole plan
    ShoppingList {
        /// Keep only items with at least this quantity
        #[arg(long)]
        threshold: Option<f64>,
        /// Multiply every quantity, e.g. 2 for two people
        #[arg(long)]
        scale: Option<f64>,
    },
    /// Weekly totals, averages, variety and balance score
    WeekStats,
}

impl Command {
    /// Whether the subcommand reads the meal plan file.
    pub fn needs_plan(&self) -> bool {
        !matches!(self, Command::Targets | Command::Recommend)
    }

    /// Whether the subcommand reads the profile file.
    pub fn needs_profile(&self) -> bool {
        !matches!(self, Command::ShoppingList { .. } | Command::WeekStats)
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
