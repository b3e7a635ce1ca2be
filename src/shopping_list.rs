use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{MealPlannerError, Result};
use crate::meal_plan::MealPlan;
use crate::recipe::Recipe;

/// Bucket every ingredient currently lands in.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Sums ingredient quantities across `recipes`.
pub fn generate_shopping_list<'a>(
    recipes: impl IntoIterator<Item = &'a Recipe>,
) -> BTreeMap<String, f64> {
    let mut list = BTreeMap::new();
    for recipe in recipes {
        for (ingredient, quantity) in &recipe.ingredients {
            *list.entry(ingredient.clone()).or_insert(0.0) += quantity;
        }
    }
    list
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: BTreeMap<String, f64>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to the running total; non-positive quantities are ignored.
    pub fn add_item(&mut self, ingredient: &str, quantity: f64) {
        if quantity > 0.0 {
            *self.items.entry(ingredient.to_string()).or_insert(0.0) += quantity;
        }
    }

    pub fn items(&self) -> &BTreeMap<String, f64> {
        &self.items
    }

    pub fn add_from_recipe(&mut self, recipe: &Recipe) {
        for (ingredient, quantity) in &recipe.ingredients {
            self.add_item(ingredient, *quantity);
        }
    }

    pub fn add_from_meal_plan(&mut self, meal_plan: &MealPlan) {
        for recipe in meal_plan.all_meals() {
            self.add_from_recipe(recipe);
        }
    }

    pub fn filter_by_threshold(&self, threshold: f64) -> ShoppingList {
        let mut filtered = ShoppingList::new();
        for (ingredient, quantity) in &self.items {
            if *quantity >= threshold {
                filtered.add_item(ingredient, *quantity);
            }
        }
        filtered
    }

    pub fn remove_item(&mut self, ingredient: &str) -> Option<f64> {
        self.items.remove(ingredient)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Overwrites the quantity of an existing item. Unknown items and
    /// non-positive quantities leave the list untouched.
    pub fn update_item_quantity(&mut self, ingredient: &str, quantity: f64) {
        if quantity <= 0.0 {
            return;
        }
        if let Some(current) = self.items.get_mut(ingredient) {
            *current = quantity;
        }
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> f64 {
        self.items.values().sum()
    }

    pub fn categorized_items(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        let mut categories: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (ingredient, quantity) in &self.items {
            categories
                .entry(DEFAULT_CATEGORY.to_string())
                .or_default()
                .insert(ingredient.clone(), *quantity);
        }
        categories
    }

    pub fn has_item(&self, ingredient: &str) -> bool {
        self.items.contains_key(ingredient)
    }

    pub fn item_quantity(&self, ingredient: &str) -> f64 {
        self.items.get(ingredient).copied().unwrap_or(0.0)
    }

    pub fn export(&self) -> BTreeMap<String, f64> {
        self.items.clone()
    }

    /// Replaces the current contents with `data` as-is.
    pub fn import(&mut self, data: BTreeMap<String, f64>) {
        self.items = data;
    }

    pub fn merge(&self, other: &ShoppingList) -> ShoppingList {
        let mut merged = self.clone();
        for (ingredient, quantity) in &other.items {
            merged.add_item(ingredient, *quantity);
        }
        merged
    }

    pub fn scale_quantities(&mut self, factor: f64) -> Result<()> {
        if factor.is_nan() || factor < 0.0 {
            return Err(MealPlannerError::InvalidScaleFactor(factor));
        }
        for quantity in self.items.values_mut() {
            *quantity *= factor;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal_plan::Weekday;
    use crate::recipe::sample_recipe;

    fn omelette() -> Recipe {
        sample_recipe("Omelette", &[("egg", 3.0), ("milk", 50.0)], 300.0, 20.0, 22.0, 3.0)
    }

    fn pancakes() -> Recipe {
        sample_recipe("Pancakes", &[("egg", 2.0), ("flour", 200.0), ("milk", 250.0)], 600.0, 18.0, 12.0, 100.0)
    }

    #[test]
    fn test_generate_shopping_list_sums_quantities() {
        let recipes = vec![omelette(), pancakes()];
        let list = generate_shopping_list(&recipes);
        assert_eq!(list.get("egg"), Some(&5.0));
        assert_eq!(list.get("milk"), Some(&300.0));
        assert_eq!(list.get("flour"), Some(&200.0));
    }

    #[test]
    fn test_add_item_ignores_non_positive() {
        let mut list = ShoppingList::new();
        list.add_item("salt", 0.0);
        list.add_item("pepper", -1.0);
        list.add_item("rice", 100.0);
        list.add_item("rice", 50.0);
        assert_eq!(list.total_items(), 1);
        assert_eq!(list.item_quantity("rice"), 150.0);
        assert_eq!(list.item_quantity("salt"), 0.0);
    }

    #[test]
    fn test_add_from_meal_plan() {
        let mut plan = MealPlan::new();
        plan.add_meal(Weekday::Monday, omelette());
        plan.add_meal(Weekday::Sunday, pancakes());

        let mut list = ShoppingList::new();
        list.add_from_meal_plan(&plan);
        assert_eq!(list.item_quantity("egg"), 5.0);
        assert_eq!(list.total_quantity(), 505.0);
    }

    #[test]
    fn test_filter_by_threshold_is_inclusive() {
        let mut list = ShoppingList::new();
        list.add_item("egg", 5.0);
        list.add_item("milk", 300.0);
        list.add_item("flour", 200.0);

        let filtered = list.filter_by_threshold(200.0);
        assert_eq!(filtered.total_items(), 2);
        assert!(filtered.has_item("flour"));
        assert!(!filtered.has_item("egg"));
    }

    #[test]
    fn test_update_item_quantity_only_for_existing_positive() {
        let mut list = ShoppingList::new();
        list.add_item("egg", 5.0);
        list.update_item_quantity("egg", 12.0);
        list.update_item_quantity("egg", 0.0);
        list.update_item_quantity("bacon", 3.0);
        assert_eq!(list.item_quantity("egg"), 12.0);
        assert!(!list.has_item("bacon"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut list = ShoppingList::new();
        list.add_item("egg", 5.0);
        list.add_item("milk", 1.0);
        assert_eq!(list.remove_item("egg"), Some(5.0));
        assert_eq!(list.remove_item("egg"), None);
        list.clear();
        assert_eq!(list.total_items(), 0);
    }

    #[test]
    fn test_categorized_items_single_bucket() {
        let mut list = ShoppingList::new();
        list.add_item("egg", 5.0);
        list.add_item("milk", 1.0);
        let categories = list.categorized_items();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[DEFAULT_CATEGORY].len(), 2);
    }

    #[test]
    fn test_export_import_and_merge() {
        let mut a = ShoppingList::new();
        a.add_item("egg", 2.0);
        let mut b = ShoppingList::new();
        b.import(a.export());
        b.add_item("milk", 1.0);

        let merged = a.merge(&b);
        assert_eq!(merged.item_quantity("egg"), 4.0);
        assert_eq!(merged.item_quantity("milk"), 1.0);
        // Inputs are untouched.
        assert_eq!(a.item_quantity("egg"), 2.0);
    }

    #[test]
    fn test_scale_quantities() {
        let mut list = ShoppingList::new();
        list.add_item("egg", 2.0);
        list.scale_quantities(2.5).unwrap();
        assert_eq!(list.item_quantity("egg"), 5.0);

        assert_eq!(
            list.scale_quantities(-1.0),
            Err(MealPlannerError::InvalidScaleFactor(-1.0))
        );
        assert_eq!(list.item_quantity("egg"), 5.0);
    }
}
