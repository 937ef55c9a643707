// src/template.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::catalog::Exercise;

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter,
)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "lbs")]
    #[strum(serialize = "lbs")]
    Lbs,
    #[serde(rename = "kg")]
    #[strum(serialize = "kg")]
    Kg,
}

/// One unit of work for an exercise inside a template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub set_number: u32, // 1-based
    pub reps: u32,
    pub weight: f64,
    pub unit: WeightUnit,
}

impl ExerciseSet {
    /// An empty set: no reps, no weight.
    #[must_use]
    pub const fn empty(set_number: u32, unit: WeightUnit) -> Self {
        Self {
            set_number,
            reps: 0,
            weight: 0.0,
            unit,
        }
    }
}

impl Default for ExerciseSet {
    fn default() -> Self {
        Self::empty(1, WeightUnit::Lbs)
    }
}

/// An exercise as it appears within a template, carrying its own sets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseActivity {
    pub exercise_name: String,
    #[serde(default)]
    pub sets: Vec<ExerciseSet>,
}

impl ExerciseActivity {
    /// Builds a fresh activity from a catalog entry. The label is copied, so
    /// later catalog changes never reach the activity.
    #[must_use]
    pub fn from_exercise(exercise: &Exercise, unit: WeightUnit) -> Self {
        Self {
            exercise_name: exercise.label.clone(),
            sets: vec![ExerciseSet::empty(1, unit)],
        }
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Resizes the set list to `count`, keeping existing sets and padding with
    /// empty ones numbered after the last kept set.
    pub fn resize_sets(&mut self, count: usize, unit: WeightUnit) {
        if count <= self.sets.len() {
            self.sets.truncate(count);
            return;
        }
        // Padded sets inherit the unit of the last existing set, if any
        let unit = self.sets.last().map_or(unit, |s| s.unit);
        let start = self.sets.len();
        self.sets.extend((start..count).map(|i| {
            let number = u32::try_from(i + 1).unwrap_or(u32::MAX);
            ExerciseSet::empty(number, unit)
        }));
    }
}

/// A named, ordered collection of exercises. Also the payload handed to the
/// update callback when the editor saves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub name: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseActivity>,
}

impl Template {
    #[must_use]
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(ExerciseActivity::set_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_pads_with_consecutive_numbers() {
        let mut activity = ExerciseActivity {
            exercise_name: "Squat".into(),
            sets: vec![ExerciseSet::default()],
        };
        activity.resize_sets(3, WeightUnit::Lbs);
        let numbers: Vec<u32> = activity.sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(activity.sets.iter().all(|s| s.reps == 0 && s.weight == 0.0));

        activity.resize_sets(1, WeightUnit::Lbs);
        assert_eq!(activity.sets, vec![ExerciseSet::default()]);
    }

    #[test]
    fn padded_sets_follow_last_unit() {
        let mut activity = ExerciseActivity {
            exercise_name: "Deadlift".into(),
            sets: vec![ExerciseSet::empty(1, WeightUnit::Kg)],
        };
        activity.resize_sets(2, WeightUnit::Lbs);
        assert_eq!(activity.sets[1].unit, WeightUnit::Kg);
    }

    #[test]
    fn weight_unit_round_trips_through_strings() {
        assert_eq!(WeightUnit::Lbs.to_string(), "lbs");
        assert_eq!("kg".parse::<WeightUnit>().ok(), Some(WeightUnit::Kg));
    }
}
