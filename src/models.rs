// ABOUTME: Core data structures for the nutrition estimation pipeline
// ABOUTME: Quantities, nutrition records/vectors, processed ingredients, dish categories and estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Data Model
//!
//! Shared types flowing through the estimation pipeline. All wire-facing
//! types serialize with `snake_case` field names matching the published
//! estimate shape (`dish_name`, `estimated_nutrition_per_serving`, ...).
//!
//! Values read from the reference table are coerced into the fixed
//! [`NutritionRecord`] shape at the load boundary; nothing downstream ever
//! sees loosely-typed rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// A parsed (value, unit) pair extracted from a free-text amount.
///
/// `value` is `None` when the input could not be parsed numerically
/// ("to taste", "a pinch"); `raw` always preserves the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// Numeric value, if the text parsed
    pub value: Option<f64>,
    /// Lower-cased unit word, if one was present
    pub unit: Option<String>,
    /// Original input text, preserved verbatim
    pub raw: String,
}

impl Quantity {
    /// A quantity that could not be parsed numerically
    #[must_use]
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self {
            value: None,
            unit: None,
            raw: raw.into(),
        }
    }
}

/// One recipe ingredient as supplied by the recipe collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name (free text)
    pub name: String,
    /// Quantity exactly as supplied ("2 tbsp", "1/2 cup", "to taste")
    pub quantity: String,
}

/// A candidate recipe for a dish, as produced by the recipe collaborator
/// or the static fallback table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Main ingredients with household-measure quantities
    pub ingredients: Vec<Ingredient>,
}

/// Per-100g nutrition values for one food in the reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionRecord {
    /// Food name as it appears in the reference table
    pub food_name: String,
    /// Energy in kcal per 100g
    pub calories_per_100g: f64,
    /// Protein in grams per 100g
    pub protein_per_100g: f64,
    /// Carbohydrates in grams per 100g
    pub carbs_per_100g: f64,
    /// Fat in grams per 100g
    pub fat_per_100g: f64,
    /// Fibre in grams per 100g
    pub fiber_per_100g: f64,
}

/// A plain numeric nutrition tuple
///
/// Used for per-ingredient contributions, running dish totals, and the final
/// per-serving result. Addition is field-wise; all fields default to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionVector {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Fibre in grams
    pub fiber: f64,
}

impl NutritionVector {
    /// Construct a vector from explicit field values
    #[must_use]
    pub const fn new(calories: f64, protein: f64, carbs: f64, fat: f64, fiber: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            fiber,
        }
    }

    /// Multiply every field by `factor`
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
        }
    }

    /// Round every field to one decimal place
    #[must_use]
    pub fn round_to_tenths(&self) -> Self {
        let tenth = |v: f64| (v * 10.0).round() / 10.0;
        Self {
            calories: tenth(self.calories),
            protein: tenth(self.protein),
            carbs: tenth(self.carbs),
            fat: tenth(self.fat),
            fiber: tenth(self.fiber),
        }
    }

    /// Round every field to the nearest whole number
    #[must_use]
    pub fn round_whole(&self) -> Self {
        Self {
            calories: self.calories.round(),
            protein: self.protein.round(),
            carbs: self.carbs.round(),
            fat: self.fat.round(),
            fiber: self.fiber.round(),
        }
    }

    /// True when every field is finite and non-negative
    #[must_use]
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat, self.fiber]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

impl Add for NutritionVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
            fiber: self.fiber + rhs.fiber,
        }
    }
}

impl AddAssign for NutritionVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Per-ingredient pipeline output record; one per input ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedIngredient {
    /// Ingredient name as supplied
    pub name: String,
    /// Quantity text exactly as supplied
    pub original_quantity: String,
    /// Normalized "<value> <unit>" form, or the raw text when unparseable
    pub standard_quantity: String,
    /// Estimated weight in grams (never negative)
    pub weight_in_grams: f64,
    /// Nutrition contribution of this ingredient
    pub nutrition: NutritionVector,
    /// False when the nutrition came from a fallback rather than the
    /// reference table
    pub matched: bool,
}

/// Fixed dish category enumeration
///
/// Each category maps to a (serving size, total cooked weight) assumption in
/// the serving normalizer. Labels follow the reference category table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DishCategory {
    /// Gravy-based vegetable dish
    WetSabzi,
    /// Dry-cooked vegetable dish
    DrySabzi,
    /// Lentil preparation
    Dal,
    /// Meat or fish curry
    NonVegCurry,
    /// Rice-based dish (pulao, biryani, ...)
    RiceDish,
    /// Flatbreads
    RotiBread,
    /// Sweets and desserts
    SweetDessert,
    /// Default when the dish cannot be categorized
    Unknown,
}

impl DishCategory {
    /// Canonical label for this category
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WetSabzi => "Wet Sabzi",
            Self::DrySabzi => "Dry Sabzi",
            Self::Dal => "Dal",
            Self::NonVegCurry => "Non-Veg Curry",
            Self::RiceDish => "Rice Dish",
            Self::RotiBread => "Roti/Bread",
            Self::SweetDessert => "Sweet/Dessert",
            Self::Unknown => "Unknown",
        }
    }

    /// Strict parse of a classifier label
    ///
    /// Accepts only the exact enumerated labels (after trimming). A label
    /// outside the enumeration yields `None`, which sends callers to the
    /// keyword-based inference instead.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Wet Sabzi" => Some(Self::WetSabzi),
            "Dry Sabzi" => Some(Self::DrySabzi),
            "Dal" => Some(Self::Dal),
            "Non-Veg Curry" => Some(Self::NonVegCurry),
            "Rice Dish" => Some(Self::RiceDish),
            "Roti/Bread" => Some(Self::RotiBread),
            "Sweet/Dessert" => Some(Self::SweetDessert),
            _ => None,
        }
    }

    /// Deterministic keyword-based category inference from the dish name
    #[must_use]
    pub fn infer_from_name(dish_name: &str) -> Self {
        let dish = dish_name.to_lowercase();

        if dish.contains("dal") || dish.contains("dhal") {
            return Self::Dal;
        }
        if dish.contains("curry") || dish.contains("masala") {
            let non_veg = ["chicken", "mutton", "fish", "prawn"]
                .iter()
                .any(|kw| dish.contains(kw));
            return if non_veg {
                Self::NonVegCurry
            } else {
                Self::WetSabzi
            };
        }
        if dish.contains("rice") || dish.contains("pulao") || dish.contains("biryani") {
            return Self::RiceDish;
        }
        if dish.contains("roti") || dish.contains("naan") || dish.contains("paratha") {
            return Self::RotiBread;
        }
        if dish.contains("sweet") || dish.contains("halwa") || dish.contains("kheer") {
            return Self::SweetDessert;
        }

        Self::DrySabzi
    }
}

/// One row of the `ingredients_used` list in a dish estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSummary {
    /// Ingredient name
    pub ingredient: String,
    /// Quantity text as supplied by the recipe
    pub quantity: String,
    /// Estimated weight rounded to whole grams
    pub weight_grams: u32,
}

/// Complete per-serving nutrition estimate for a dish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishEstimate {
    /// Dish name as requested
    pub dish_name: String,
    /// Category label used for serving normalization
    pub dish_type: String,
    /// Per-serving nutrition, integer-rounded per field
    pub estimated_nutrition_per_serving: NutritionVector,
    /// Ingredients that contributed to the estimate
    pub ingredients_used: Vec<IngredientSummary>,
    /// When this estimate was produced
    pub generated_at: DateTime<Utc>,
}
