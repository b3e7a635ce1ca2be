use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MealPlannerError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    #[error("Invalid day: {0}")]
    InvalidDay(String),

    #[error("Scale factor must be non-negative, got {0}")]
    InvalidScaleFactor(f64),
}

pub type Result<T> = std::result::Result<T, MealPlannerError>;
