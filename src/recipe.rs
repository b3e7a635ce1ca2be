use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MealPlannerError, Result};
use crate::nutrition::NutrientTotals;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    /// Ingredient name -> quantity, in whatever unit the recipe author used.
    pub ingredients: BTreeMap<String, f64>,
    pub kcal: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        ingredients: BTreeMap<String, f64>,
        kcal: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
    ) -> Result<Self> {
        let recipe = Recipe {
            name: name.into(),
            ingredients,
            kcal,
            protein,
            fat,
            carbs,
        };
        recipe.validate()?;
        Ok(recipe)
    }

    /// Checks the invariants `new` enforces. Useful for recipes built through serde.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MealPlannerError::InvalidRecipe("name cannot be empty".to_string()));
        }
        for (label, value) in [
            ("kcal", self.kcal),
            ("protein", self.protein),
            ("fat", self.fat),
            ("carbs", self.carbs),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(MealPlannerError::InvalidRecipe(format!(
                    "{} for '{}' must be non-negative, got {}",
                    label, self.name, value
                )));
            }
        }
        for (ingredient, quantity) in &self.ingredients {
            if quantity.is_nan() || *quantity < 0.0 {
                return Err(MealPlannerError::InvalidRecipe(format!(
                    "ingredient quantity for '{}' cannot be negative",
                    ingredient
                )));
            }
        }
        Ok(())
    }

    pub fn total_nutrients(&self) -> NutrientTotals {
        NutrientTotals::new(self.kcal, self.protein, self.fat, self.carbs)
    }

    /// Lowercased ingredient names, used for allergen and preference matching.
    ///
    /// Matching against this text is a plain substring search, so "nuts" also
    /// hits "peanuts" and a term may match across two adjacent names.
    pub fn ingredient_text(&self) -> String {
        self.ingredients
            .keys()
            .map(|name| name.to_lowercase())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.ingredient_text().contains(&term.to_lowercase())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recipe(name={}, kcal={}, protein={}, fat={}, carbs={})",
            self.name, self.kcal, self.protein, self.fat, self.carbs
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_recipe(
    name: &str,
    ingredients: &[(&str, f64)],
    kcal: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
) -> Recipe {
    let ingredients = ingredients
        .iter()
        .map(|(n, q)| (n.to_string(), *q))
        .collect();
    Recipe::new(name, ingredients, kcal, protein, fat, carbs).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_creation_and_totals() {
        let recipe = sample_recipe("Toast", &[("bread", 2.0)], 150.0, 5.0, 2.0, 20.0);
        assert_eq!(recipe.total_nutrients(), NutrientTotals::new(150.0, 5.0, 2.0, 20.0));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let result = Recipe::new("", BTreeMap::new(), 100.0, 1.0, 1.0, 1.0);
        assert!(matches!(result, Err(MealPlannerError::InvalidRecipe(_))));
    }

    #[test]
    fn test_blank_name_is_accepted() {
        let recipe = Recipe::new("  ", BTreeMap::new(), 100.0, 1.0, 1.0, 1.0).unwrap();
        assert_eq!(recipe.name, "  ");
    }

    #[test]
    fn test_negative_nutrients_are_rejected() {
        for (kcal, protein, fat, carbs) in [
            (-1.0, 0.0, 0.0, 0.0),
            (0.0, -1.0, 0.0, 0.0),
            (0.0, 0.0, -1.0, 0.0),
            (0.0, 0.0, 0.0, -1.0),
        ] {
            let result = Recipe::new("Bad", BTreeMap::new(), kcal, protein, fat, carbs);
            assert!(result.is_err(), "accepted {} {} {} {}", kcal, protein, fat, carbs);
        }
    }

    #[test]
    fn test_negative_ingredient_quantity_is_rejected() {
        let mut ingredients = BTreeMap::new();
        ingredients.insert("sugar".to_string(), -5.0);
        let err = Recipe::new("Cake", ingredients, 300.0, 4.0, 10.0, 50.0).unwrap_err();
        assert!(err.to_string().contains("sugar"));
    }

    #[test]
    fn test_zero_values_are_allowed() {
        let recipe = Recipe::new("Water", BTreeMap::new(), 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(recipe.total_nutrients(), NutrientTotals::default());
    }

    #[test]
    fn test_display() {
        let recipe = sample_recipe("Toast", &[("bread", 2.0)], 150.0, 5.0, 2.0, 20.0);
        assert_eq!(
            recipe.to_string(),
            "Recipe(name=Toast, kcal=150, protein=5, fat=2, carbs=20)"
        );
    }

    #[test]
    fn test_contains_term_is_case_insensitive_substring() {
        let recipe = sample_recipe("Satay", &[("Roasted Peanuts", 30.0), ("rice", 100.0)], 500.0, 20.0, 25.0, 50.0);
        assert!(recipe.contains_term("nuts"));
        assert!(recipe.contains_term("PEANUT"));
        assert!(!recipe.contains_term("milk"));
        // Quantities are not part of the matched text.
        assert!(!recipe.contains_term("30"));
    }
}
