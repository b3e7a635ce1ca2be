use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Energy density of protein and carbohydrates (kcal per gram).
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
/// Energy density of fat (kcal per gram).
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Rounds to `decimals` places, ties to even, judged on the exact binary value
/// of `value` (so 2.25 gives 2.2 but 2.45, stored just above, gives 2.5).
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    // The product may itself have been rounded onto a midpoint.
    let error = value.mul_add(factor, -scaled);
    let rounded = if scaled.fract().abs() == 0.5 && error != 0.0 {
        if error > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    rounded / factor
}

/// Absolute amounts of energy and macronutrients for a recipe, a day or a week.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct NutrientTotals {
    pub kcal: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

macro_rules! map_fields {
    ($lhs:expr, $rhs:expr, $op:tt) => {
        NutrientTotals {
            kcal: $lhs.kcal $op $rhs.kcal,
            protein: $lhs.protein $op $rhs.protein,
            fat: $lhs.fat $op $rhs.fat,
            carbs: $lhs.carbs $op $rhs.carbs,
        }
    };
}

impl NutrientTotals {
    pub fn new(kcal: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self { kcal, protein, fat, carbs }
    }

    /// Divides every field by `divisor`.
    pub fn divided_by(&self, divisor: f64) -> Self {
        NutrientTotals {
            kcal: self.kcal / divisor,
            protein: self.protein / divisor,
            fat: self.fat / divisor,
            carbs: self.carbs / divisor,
        }
    }

    pub fn rounded(&self) -> Self {
        NutrientTotals {
            kcal: self.kcal.round_ties_even(),
            protein: self.protein.round_ties_even(),
            fat: self.fat.round_ties_even(),
            carbs: self.carbs.round_ties_even(),
        }
    }

    /// Grams of protein, fat and carbs combined.
    pub fn macro_grams(&self) -> f64 {
        self.protein + self.fat + self.carbs
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, rhs: Self) -> Self::Output {
        map_fields!(self, rhs, +)
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for NutrientTotals {
    type Output = NutrientTotals;

    fn sub(self, rhs: Self) -> Self::Output {
        map_fields!(self, rhs, -)
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutrientTotals::default(), |acc, n| acc + n)
    }
}

impl<'a> Sum<&'a NutrientTotals> for NutrientTotals {
    fn sum<I: Iterator<Item = &'a NutrientTotals>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
