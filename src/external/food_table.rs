// ABOUTME: Loads the food table CSV (Food, Type, Calories, Protein, Carbs, Fat, Meal)
// ABOUTME: A missing file yields an empty table; a malformed one is an InvalidFormat error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutriplan Contributors

//! Food table loader
//!
//! The table is read once at startup. Headers must match the column names
//! exactly; surrounding whitespace in fields is trimmed.

use std::io;
use std::path::{Path, PathBuf};

use nutriplan_core::models::FoodItem;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::{from_csv_error, AppResult};

/// How the food table was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FoodTableSource {
    /// Parsed from a file
    Loaded {
        /// File that was read
        path: PathBuf,
        /// Number of rows parsed
        rows: usize,
    },
    /// No file at the path; the table is empty
    Missing {
        /// Path that was checked
        path: PathBuf,
    },
}

/// In-memory food table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodTable {
    items: Vec<FoodItem>,
}

impl FoodTable {
    /// Load from `path`, treating a missing file as an empty table
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if the file exists but cannot be parsed
    pub fn load(path: &Path) -> AppResult<(Self, FoodTableSource)> {
        if !path.exists() {
            warn!(
                path = %path.display(),
                "Food table not found; diet plans will be empty"
            );
            return Ok((
                Self::default(),
                FoodTableSource::Missing {
                    path: path.to_path_buf(),
                },
            ));
        }

        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| from_csv_error(e, path))?;
        let table = Self::parse(reader, path)?;

        info!(path = %path.display(), rows = table.len(), "Loaded food table");

        let rows = table.len();
        Ok((
            table,
            FoodTableSource::Loaded {
                path: path.to_path_buf(),
                rows,
            },
        ))
    }

    /// Parse CSV text from any reader; `origin` names the source in errors
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` on a bad header, row, or field value
    pub fn from_reader<R: io::Read>(input: R, origin: &Path) -> AppResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(input);
        Self::parse(reader, origin)
    }

    fn parse<R: io::Read>(mut reader: csv::Reader<R>, origin: &Path) -> AppResult<Self> {
        let items = reader
            .deserialize::<FoodItem>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| from_csv_error(e, origin))?;
        Ok(Self { items })
    }

    /// Rows in file order
    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Take ownership of the rows
    #[must_use]
    pub fn into_items(self) -> Vec<FoodItem> {
        self.items
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
