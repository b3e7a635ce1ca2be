use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::meal_plan::{MealPlan, Weekday};
use crate::recipe::Recipe;
use crate::recommendation::Profile;

// Expected column headers
pub const DAY_COL: &str = "day";
pub const NAME_COL: &str = "name";
pub const KCAL_COL: &str = "kcal";
pub const PROTEIN_COL: &str = "protein";
pub const FAT_COL: &str = "fat";
pub const CARBS_COL: &str = "carbs";
pub const INGREDIENTS_COL: &str = "ingredients";

const INGREDIENT_SEPARATOR: char = ';';
const QUANTITY_SEPARATOR: char = ':';

/// Parses `"bread:2;butter:0.5"` into an ingredient map. Repeated names are summed.
pub fn parse_ingredients(text: &str) -> Result<BTreeMap<String, f64>> {
    let mut ingredients = BTreeMap::new();
    for entry in text.split(INGREDIENT_SEPARATOR) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (name, quantity) = entry
            .rsplit_once(QUANTITY_SEPARATOR)
            .ok_or_else(|| anyhow!("Ingredient '{}' is not in 'name:quantity' form", entry))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Ingredient '{}' has no name", entry));
        }
        let quantity: f64 = quantity
            .trim()
            .parse()
            .with_context(|| format!("Invalid quantity for ingredient '{}'", name))?;
        *ingredients.entry(name.to_string()).or_insert(0.0) += quantity;
    }
    Ok(ingredients)
}

fn parse_number(value: &str, column: &str, row_index: usize) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid {} '{}' at row {}", column, value, row_index))
}

/// Reads a meal plan from CSV with one recipe per row.
///
/// Header: `day,name,kcal,protein,fat,carbs,ingredients`. Column order is free.
pub fn read_meal_plan<R: Read>(reader: R) -> Result<MealPlan> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found", name))
    };
    let day_idx = column(DAY_COL)?;
    let name_idx = column(NAME_COL)?;
    let kcal_idx = column(KCAL_COL)?;
    let protein_idx = column(PROTEIN_COL)?;
    let fat_idx = column(FAT_COL)?;
    let carbs_idx = column(CARBS_COL)?;
    let ingredients_idx = column(INGREDIENTS_COL)?;

    let mut plan = MealPlan::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let day: Weekday = field(day_idx)
            .parse()
            .with_context(|| format!("Invalid day at row {}", row_index))?;
        let recipe = Recipe::new(
            field(name_idx),
            parse_ingredients(field(ingredients_idx))
                .with_context(|| format!("Invalid ingredients at row {}", row_index))?,
            parse_number(field(kcal_idx), KCAL_COL, row_index)?,
            parse_number(field(protein_idx), PROTEIN_COL, row_index)?,
            parse_number(field(fat_idx), FAT_COL, row_index)?,
            parse_number(field(carbs_idx), CARBS_COL, row_index)?,
        )
        .with_context(|| format!("Invalid recipe at row {}", row_index))?;

        debug!("{}: {}", day, recipe);
        plan.add_meal(day, recipe);
    }

    Ok(plan)
}

pub fn load_meal_plan(csv_path: &Path) -> Result<MealPlan> {
    if !csv_path.exists() {
        return Err(anyhow!("Meal plan CSV file not found at: {:?}", csv_path));
    }
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open meal plan CSV file at {:?}", csv_path))?;
    let plan = read_meal_plan(file)
        .with_context(|| format!("Failed to load meal plan from {:?}", csv_path))?;
    info!("Loaded {} meals from {:?}", plan.total_meals(), csv_path);
    Ok(plan)
}

/// Parses and validates a JSON profile document.
pub fn parse_profile(json: &str) -> Result<Profile> {
    let value: serde_json::Value =
        serde_json::from_str(json).context("Profile is not valid JSON")?;
    Ok(Profile::from_value(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MealPlannerError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "day,name,kcal,protein,fat,carbs,ingredients";

    fn create_test_csv_file(rows: &[&str]) -> Result<NamedTempFile> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "{}", HEADER)?;
        for row in rows {
            writeln!(file, "{}", row)?;
        }
        file.flush()?;
        Ok(file)
    }

    #[test]
    fn test_parse_ingredients() -> Result<()> {
        let ingredients = parse_ingredients("bread:2; butter : 0.5;;bread:1")?;
        assert_eq!(ingredients.len(), 2);
        assert_eq!(ingredients["bread"], 3.0);
        assert_eq!(ingredients["butter"], 0.5);
        assert!(parse_ingredients("")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_ingredients_errors() {
        assert!(parse_ingredients("bread").is_err());
        assert!(parse_ingredients(":2").is_err());
        assert!(parse_ingredients("bread:two").is_err());
    }

    #[test]
    fn test_load_meal_plan_success() -> Result<()> {
        let file = create_test_csv_file(&[
            "Monday,Toast,150,5,2,20,bread:2",
            "Monday,Omelette,300,20,22,3,egg:3;milk:50",
            "Sunday,Pancakes,600,18,12,100,egg:2;flour:200;milk:250",
        ])?;
        let plan = load_meal_plan(file.path())?;

        assert_eq!(plan.total_meals(), 3);
        assert_eq!(plan.get_meals(Weekday::Monday).len(), 2);
        assert_eq!(plan.daily_summary(Weekday::Monday).kcal, 450.0);
        assert_eq!(plan.get_meals(Weekday::Sunday)[0].ingredients["flour"], 200.0);
        Ok(())
    }

    #[test]
    fn test_load_meal_plan_invalid_day() -> Result<()> {
        let file = create_test_csv_file(&["Funday,Toast,150,5,2,20,bread:2"])?;
        let err = load_meal_plan(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid day: Funday"));
        Ok(())
    }

    #[test]
    fn test_load_meal_plan_negative_nutrient() -> Result<()> {
        let file = create_test_csv_file(&["Monday,Toast,-150,5,2,20,bread:2"])?;
        let err = load_meal_plan(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid recipe at row 0"));
        Ok(())
    }

    #[test]
    fn test_load_meal_plan_missing_column() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "day,name,protein,fat,carbs,ingredients")?;
        writeln!(file, "Monday,Toast,5,2,20,bread:2")?;
        file.flush()?;

        let err = load_meal_plan(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains(&format!("Column '{}' not found", KCAL_COL)));
        Ok(())
    }

    #[test]
    fn test_load_meal_plan_file_not_found() {
        let path = Path::new("this_plan_does_not_exist.csv");
        let result = load_meal_plan(path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Meal plan CSV file not found"));
    }

    #[test]
    fn test_parse_profile() -> Result<()> {
        let profile = parse_profile(
            r#"{"gender": "female", "age": 52, "weight": 64.5, "height": 168,
                "activity_level": "lightly_active", "goal": "senior",
                "allergies": ["nuts"], "preferences": []}"#,
        )?;
        assert_eq!(profile.allergies, vec!["nuts".to_string()]);

        let err = parse_profile(r#"{"gender": "female"}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<MealPlannerError>(),
            Some(MealPlannerError::InvalidProfile(_))
        ));
        assert!(parse_profile("not json").is_err());
        Ok(())
    }
}
