// ABOUTME: Food table rows, dietary preference, meal slots, and diet plan definitions
// ABOUTME: Serde names follow the food table columns (Food, Type, Calories, ...)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::meal_shares;

/// Vegetarian / non-vegetarian tag on a food item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FoodType {
    /// Vegetarian
    #[serde(rename = "Veg")]
    Veg,
    /// Non-vegetarian
    #[serde(rename = "Non-Veg", alias = "NonVeg", alias = "Non Veg", alias = "non-veg")]
    NonVeg,
}

/// Meal slot within a day, ordered by time of day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealSlot {
    /// Breakfast (25% of the daily target)
    Breakfast,
    /// Lunch (35%)
    Lunch,
    /// Snacks (10%)
    #[serde(alias = "Snack")]
    Snacks,
    /// Dinner (30%)
    Dinner,
}

impl MealSlot {
    /// All slots in plan order
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Snacks, Self::Dinner];

    /// Fraction of the daily calorie target assigned to this slot
    #[must_use]
    pub const fn calorie_share(self) -> f64 {
        match self {
            Self::Breakfast => meal_shares::BREAKFAST,
            Self::Lunch => meal_shares::LUNCH,
            Self::Snacks => meal_shares::SNACKS,
            Self::Dinner => meal_shares::DINNER,
        }
    }

    /// Display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Snacks => "Snacks",
            Self::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the food table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Food name
    #[serde(rename = "Food")]
    pub name: String,
    /// Veg / Non-Veg tag
    #[serde(rename = "Type")]
    pub food_type: FoodType,
    /// Calories per serving (kcal)
    #[serde(rename = "Calories")]
    pub calories: f64,
    /// Protein per serving (grams)
    #[serde(rename = "Protein")]
    pub protein_g: f64,
    /// Carbohydrates per serving (grams)
    #[serde(rename = "Carbs")]
    pub carbs_g: f64,
    /// Fat per serving (grams)
    #[serde(rename = "Fat")]
    pub fat_g: f64,
    /// Meal slot this item is intended for
    #[serde(rename = "Meal")]
    pub meal: MealSlot,
}

/// Dietary preference supplied with a request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DietPreference {
    /// Vegetarian items only
    Veg,
    /// Eats everything
    NonVeg,
    /// Unrecognized preference; treated like `NonVeg`
    Other,
}

impl DietPreference {
    /// Parse preference from string, case-insensitively.
    ///
    /// `"veg"` and `"non-veg"` are recognized; anything else is `Other`,
    /// which applies no filter.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "veg" => Self::Veg,
            "non-veg" => Self::NonVeg,
            _ => Self::Other,
        }
    }

    /// Whether an item of this type may be recommended under the preference
    #[must_use]
    pub const fn allows(self, food_type: FoodType) -> bool {
        match self {
            Self::Veg => matches!(food_type, FoodType::Veg),
            Self::NonVeg | Self::Other => true,
        }
    }
}

/// Selected food items per meal slot
///
/// Slots that were not populated are absent; an empty plan has no slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct DietPlan {
    meals: BTreeMap<MealSlot, Vec<FoodItem>>,
}

impl DietPlan {
    /// Plan with no populated slots
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record the items chosen for a slot, replacing any previous choice
    pub fn insert(&mut self, slot: MealSlot, items: Vec<FoodItem>) {
        self.meals.insert(slot, items);
    }

    /// Items chosen for a slot, if the slot is populated
    #[must_use]
    pub fn get(&self, slot: MealSlot) -> Option<&[FoodItem]> {
        self.meals.get(&slot).map(Vec::as_slice)
    }

    /// Whether no slot is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Number of populated slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.meals.len()
    }

    /// Iterate populated slots in time-of-day order
    pub fn iter(&self) -> impl Iterator<Item = (MealSlot, &[FoodItem])> {
        self.meals.iter().map(|(slot, items)| (*slot, items.as_slice()))
    }

    /// Sum of calories across every selected item
    #[must_use]
    pub fn total_calories(&self) -> f64 {
        self.meals
            .values()
            .flatten()
            .map(|item| item.calories)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn oats() -> FoodItem {
        FoodItem {
            name: "Oats".to_owned(),
            food_type: FoodType::Veg,
            calories: 150.0,
            protein_g: 5.0,
            carbs_g: 27.0,
            fat_g: 3.0,
            meal: MealSlot::Breakfast,
        }
    }

    #[test]
    fn test_meal_shares_sum_to_one() {
        let total: f64 = MealSlot::ALL.iter().map(|slot| slot.calorie_share()).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_preference_parsing_and_filtering() {
        assert_eq!(DietPreference::from_str_lossy("VEG"), DietPreference::Veg);
        assert_eq!(
            DietPreference::from_str_lossy("non-veg"),
            DietPreference::NonVeg
        );
        assert_eq!(
            DietPreference::from_str_lossy("pescatarian"),
            DietPreference::Other
        );
        assert!(!DietPreference::Veg.allows(FoodType::NonVeg));
        assert!(DietPreference::Other.allows(FoodType::NonVeg));
    }

    #[test]
    fn test_food_item_uses_table_column_names() {
        let json = serde_json::to_value(oats()).unwrap();
        assert_eq!(json["Food"], "Oats");
        assert_eq!(json["Type"], "Veg");
        assert_eq!(json["Meal"], "Breakfast");
    }

    #[test]
    fn test_diet_plan_serializes_as_slot_map() {
        let mut plan = DietPlan::empty();
        assert_eq!(serde_json::to_string(&plan).unwrap(), "{}");

        plan.insert(MealSlot::Breakfast, vec![oats()]);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["Breakfast"][0]["Food"], "Oats");
        assert!((plan.total_calories() - 150.0).abs() < f64::EPSILON);
    }
}
