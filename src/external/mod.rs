// ABOUTME: File-backed external inputs for the planner
// ABOUTME: Currently the CSV food table used by the diet recommender
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

/// CSV food table loader
pub mod food_table;

pub use food_table::{FoodTable, FoodTableSource};
