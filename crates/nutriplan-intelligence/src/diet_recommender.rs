// ABOUTME: Meal selection from the food table for a daily calorie target and dietary preference
// ABOUTME: Splits the target across meal slots and samples up to two matching items per slot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Diet Recommender
//!
//! Selection is random and not optimized against the per-slot calorie
//! targets; the targets are reported for information only. The random
//! source is supplied by the caller so plans can be reproduced with a
//! seeded generator.

use nutriplan_core::constants::meal_shares;
use nutriplan_core::models::{CalorieTarget, DietPlan, DietPreference, FoodItem, MealSlot};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Calorie target per meal slot, in plan order
#[must_use]
pub fn meal_calorie_targets(target: CalorieTarget) -> [(MealSlot, f64); 4] {
    let kcal = f64::from(target.kcal());
    MealSlot::ALL.map(|slot| (slot, kcal * slot.calorie_share()))
}

/// Recommends meals from an immutable food table
#[derive(Debug, Clone, Default)]
pub struct DietRecommender {
    foods: Vec<FoodItem>,
}

impl DietRecommender {
    /// Wrap a loaded food table
    #[must_use]
    pub const fn new(foods: Vec<FoodItem>) -> Self {
        Self { foods }
    }

    /// Every row of the food table
    #[must_use]
    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    /// Whether the food table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Build a plan for one day
    ///
    /// For each slot, items tagged with that slot are sampled without
    /// replacement (at most two). A slot with no tagged items samples from
    /// the whole preference-filtered table instead. When the preference
    /// filter leaves nothing, the plan is empty.
    pub fn recommend_diet<R: Rng + ?Sized>(
        &self,
        target: CalorieTarget,
        preference: DietPreference,
        rng: &mut R,
    ) -> DietPlan {
        let allowed: Vec<&FoodItem> = self
            .foods
            .iter()
            .filter(|item| preference.allows(item.food_type))
            .collect();

        if allowed.is_empty() {
            debug!(?preference, "No foods match preference; returning empty plan");
            return DietPlan::empty();
        }

        let mut plan = DietPlan::empty();

        for (slot, slot_kcal) in meal_calorie_targets(target) {
            let tagged: Vec<&FoodItem> = allowed
                .iter()
                .copied()
                .filter(|item| item.meal == slot)
                .collect();
            let pool = if tagged.is_empty() { &allowed } else { &tagged };

            let picks: Vec<FoodItem> = pool
                .choose_multiple(rng, meal_shares::ITEMS_PER_SLOT)
                .map(|item| (*item).clone())
                .collect();

            debug!(
                slot = slot.as_str(),
                target_kcal = slot_kcal,
                candidates = pool.len(),
                fallback = tagged.is_empty(),
                selected = picks.len(),
                "Selected meal items"
            );

            plan.insert(slot, picks);
        }

        debug!(
            target_kcal = target.kcal(),
            plan_kcal = plan.total_calories(),
            "Built diet plan"
        );
        plan
    }
}
