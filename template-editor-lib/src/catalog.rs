// src/catalog.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DbError;

/// A read-only catalog entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub label: String,
}

impl Exercise {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Exercise catalog lookup failed: {0}")]
    Db(#[from] DbError),
}

/// Case-insensitive substring test used by every catalog implementation.
#[must_use]
pub fn label_matches(label: &str, query: &str) -> bool {
    label.to_lowercase().contains(&query.to_lowercase())
}

/// Read-only access to the exercise catalog.
pub trait ExerciseCatalog {
    /// Every entry, in catalog order.
    fn all(&self) -> Result<Vec<Exercise>, CatalogError>;

    /// Entries whose label contains `query`, ignoring case, in catalog order.
    /// An empty query matches nothing.
    fn find_by_label_substring(&self, query: &str) -> Result<Vec<Exercise>, CatalogError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .all()?
            .into_iter()
            .filter(|exercise| label_matches(&exercise.label, query))
            .collect())
    }
}

// (id, label), declaration order is catalog order
const BUILTIN_EXERCISES: &[(&str, &str)] = &[
    ("barbell-bench-press", "Barbell Bench Press"),
    ("incline-dumbbell-press", "Incline Dumbbell Press"),
    ("dumbbell-fly", "Dumbbell Fly"),
    ("push-up", "Push-Up"),
    ("dip", "Dip"),
    ("overhead-press", "Overhead Press"),
    ("lateral-raise", "Lateral Raise"),
    ("face-pull", "Face Pull"),
    ("barbell-row", "Barbell Row"),
    ("dumbbell-row", "Dumbbell Row"),
    ("pull-up", "Pull-Up"),
    ("chin-up", "Chin-Up"),
    ("lat-pulldown", "Lat Pulldown"),
    ("seated-cable-row", "Seated Cable Row"),
    ("deadlift", "Deadlift"),
    ("romanian-deadlift", "Romanian Deadlift"),
    ("back-squat", "Back Squat"),
    ("front-squat", "Front Squat"),
    ("goblet-squat", "Goblet Squat"),
    ("bulgarian-split-squat", "Bulgarian Split Squat"),
    ("leg-press", "Leg Press"),
    ("leg-extension", "Leg Extension"),
    ("lying-leg-curl", "Lying Leg Curl"),
    ("walking-lunge", "Walking Lunge"),
    ("hip-thrust", "Hip Thrust"),
    ("standing-calf-raise", "Standing Calf Raise"),
    ("barbell-curl", "Barbell Curl"),
    ("hammer-curl", "Hammer Curl"),
    ("triceps-pushdown", "Triceps Pushdown"),
    ("skull-crusher", "Skull Crusher"),
    ("plank", "Plank"),
    ("hanging-leg-raise", "Hanging Leg Raise"),
    ("cable-crunch", "Cable Crunch"),
    ("farmers-walk", "Farmer's Walk"),
    ("kettlebell-swing", "Kettlebell Swing"),
];

/// An in-memory catalog. `builtin()` is the default dictionary shipped with
/// the application; `from_entries` lets callers supply their own.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<Exercise>,
}

impl StaticCatalog {
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_EXERCISES
                .iter()
                .map(|(id, label)| Exercise::new(*id, *label)),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = Exercise>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Exercise] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExerciseCatalog for StaticCatalog {
    fn all(&self) -> Result<Vec<Exercise>, CatalogError> {
        Ok(self.entries.clone())
    }

    fn find_by_label_substring(&self, query: &str) -> Result<Vec<Exercise>, CatalogError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self
            .entries
            .iter()
            .filter(|exercise| label_matches(&exercise.label, query))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = StaticCatalog::builtin();
        let mut ids: Vec<_> = catalog.entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn matching_ignores_case_and_keeps_catalog_order() {
        let catalog = StaticCatalog::builtin();
        let labels: Vec<String> = catalog
            .find_by_label_substring("SQUAT")
            .unwrap()
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(
            labels,
            vec!["Back Squat", "Front Squat", "Goblet Squat", "Bulgarian Split Squat"]
        );
    }

    #[test]
    fn empty_query_matches_nothing() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.find_by_label_substring("").unwrap().is_empty());
    }
}
