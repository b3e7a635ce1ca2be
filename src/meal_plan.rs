use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MealPlannerError;
use crate::nutrition::NutrientTotals;
use crate::recipe::Recipe;

/// The seven plan days, in canonical order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = MealPlannerError;

    /// Only the canonical capitalisation ("Monday") is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .iter()
            .copied()
            .find(|day| day.name() == s)
            .ok_or_else(|| MealPlannerError::InvalidDay(s.to_string()))
    }
}

/// Ordered list of recipes for each day of one week.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MealPlan {
    days: [Vec<Recipe>; 7],
}

impl MealPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_meal(&mut self, day: Weekday, meal: Recipe) {
        self.days[day.index()].push(meal);
    }

    /// Removes the first meal called `name` on `day`.
    pub fn remove_meal(&mut self, day: Weekday, name: &str) -> Option<Recipe> {
        let meals = &mut self.days[day.index()];
        let position = meals.iter().position(|meal| meal.name == name)?;
        Some(meals.remove(position))
    }

    pub fn get_meals(&self, day: Weekday) -> &[Recipe] {
        &self.days[day.index()]
    }

    pub fn daily_summary(&self, day: Weekday) -> NutrientTotals {
        self.get_meals(day)
            .iter()
            .map(Recipe::total_nutrients)
            .sum()
    }

    /// Days with their meals, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Recipe])> {
        Weekday::ALL
            .iter()
            .map(move |day| (*day, self.get_meals(*day)))
    }

    pub fn all_meals(&self) -> impl Iterator<Item = &Recipe> {
        self.days.iter().flatten()
    }

    pub fn total_meals(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }
}
