use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MealPlannerError, Result};

/// Keys a profile document must carry, even when a list is empty.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "gender",
    "age",
    "weight",
    "height",
    "activity_level",
    "goal",
    "allergies",
    "preferences",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    /// Anything else, including an empty string.
    Other(String),
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other(value),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Male => "male".to_string(),
            Gender::Female => "female".to_string(),
            Gender::Other(other) => other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    Moderate,
    VeryActive,
    ExtraActive,
    /// Treated like `Sedentary` by every calculation.
    Unrecognized(String),
}

impl From<String> for ActivityLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "lightly_active" => ActivityLevel::LightlyActive,
            "moderate" => ActivityLevel::Moderate,
            "very_active" => ActivityLevel::VeryActive,
            "extra_active" => ActivityLevel::ExtraActive,
            _ => ActivityLevel::Unrecognized(value),
        }
    }
}

impl From<ActivityLevel> for String {
    fn from(value: ActivityLevel) -> Self {
        match value {
            ActivityLevel::Sedentary => "sedentary".to_string(),
            ActivityLevel::LightlyActive => "lightly_active".to_string(),
            ActivityLevel::Moderate => "moderate".to_string(),
            ActivityLevel::VeryActive => "very_active".to_string(),
            ActivityLevel::ExtraActive => "extra_active".to_string(),
            ActivityLevel::Unrecognized(other) => other,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    Senior,
    Other(String),
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        match value.as_str() {
            "weight_loss" => Goal::WeightLoss,
            "muscle_gain" => Goal::MuscleGain,
            "maintenance" => Goal::Maintenance,
            "senior" => Goal::Senior,
            _ => Goal::Other(value),
        }
    }
}

impl From<Goal> for String {
    fn from(value: Goal) -> Self {
        match value {
            Goal::WeightLoss => "weight_loss".to_string(),
            Goal::MuscleGain => "muscle_gain".to_string(),
            Goal::Maintenance => "maintenance".to_string(),
            Goal::Senior => "senior".to_string(),
            Goal::Other(other) => other,
        }
    }
}

/// A person's body metrics, activity and dietary constraints.
///
/// `age` is in years, `weight` in kg and `height` in cm. Allergies and
/// preferences are matched as case-insensitive substrings of ingredient names.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    pub gender: Gender,
    pub age: f64,
    pub weight: f64,
    pub height: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub allergies: Vec<String>,
    pub preferences: Vec<String>,
}

impl Profile {
    /// Builds a profile from a loosely typed JSON document.
    ///
    /// Fails with `InvalidProfile` if the document is not an object, a
    /// required key is absent, a field has the wrong type, or a body metric is
    /// negative.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            MealPlannerError::InvalidProfile("profile must be a JSON object".to_string())
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|field| !map.contains_key(**field)) {
            return Err(MealPlannerError::InvalidProfile(format!(
                "missing required field: {}",
                missing
            )));
        }

        let profile: Profile = serde_json::from_value(value.clone())
            .map_err(|e| MealPlannerError::InvalidProfile(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("age", self.age), ("weight", self.weight), ("height", self.height)] {
            // Written this way round so NaN is rejected as well.
            if !(value >= 0.0) {
                return Err(MealPlannerError::InvalidProfile(format!(
                    "invalid value for {}: must be non-negative, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}
