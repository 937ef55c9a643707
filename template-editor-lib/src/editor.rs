//src/editor.rs
//! State machine behind the "Edit Template" dialog.
//!
//! The editor owns the transient state of one dialog: the template name, the
//! search field and its matches, and the selected exercises. It never talks
//! to storage: matches come from an [`ExerciseCatalog`] passed in per call,
//! and a successful save hands the edited [`Template`] to a caller-supplied
//! callback.

use thiserror::Error;

use crate::catalog::{CatalogError, Exercise, ExerciseCatalog};
use crate::template::{ExerciseActivity, Template, WeightUnit};

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Template name cannot be empty.")]
    EmptyName,
    #[error("'{0}' is already in this template.")]
    DuplicateExercise(String),
    #[error("No exercise row at position {index} (template has {len}).")]
    RowOutOfRange { index: usize, len: usize },
    #[error("No search result at position {index} ({len} shown).")]
    ResultOutOfRange { index: usize, len: usize },
    #[error("Set count must be at least 1, got {0}.")]
    InvalidSetCount(usize),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Observable phase of the search sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Collapsed,
    ActiveEmpty,
    ActiveWithQuery,
    ActiveWithResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    pub default_unit: WeightUnit,
    pub allow_duplicates: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            default_unit: WeightUnit::Lbs,
            allow_duplicates: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateEditor {
    options: EditorOptions,
    open: bool,
    name: String,
    error_message: Option<String>,
    search_visible: bool,
    query: String,
    results: Vec<Exercise>,
    selected: Vec<ExerciseActivity>,
}

impl TemplateEditor {
    #[must_use]
    pub fn new(options: EditorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    // --- Lifecycle ---

    /// Seeds the dialog from the caller's template and shows it. Runs on
    /// every closed-to-open transition; a missing input seeds an empty value.
    /// Calling it while already open is a no-op.
    pub fn open(&mut self, template_data: Option<Vec<ExerciseActivity>>, template_name: Option<&str>) {
        if self.open {
            return;
        }
        self.reset();
        self.name = template_name.unwrap_or_default().to_string();
        self.selected = template_data.unwrap_or_default();
        self.open = true;
        tracing::info!(
            name = %self.name,
            exercises = self.selected.len(),
            "Template editor opened"
        );
    }

    /// Hides the dialog and discards all transient state.
    pub fn close(&mut self) {
        if self.open {
            tracing::debug!("Template editor closed");
        }
        self.reset();
    }

    fn reset(&mut self) {
        *self = Self::new(self.options);
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn options(&self) -> EditorOptions {
        self.options
    }

    // --- Name ---

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error_message = None;
    }

    pub fn push_name_char(&mut self, c: char) {
        self.name.push(c);
        self.error_message = None;
    }

    pub fn pop_name_char(&mut self) {
        self.name.pop();
        self.error_message = None;
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn report(&mut self, err: EditorError) -> EditorError {
        tracing::warn!(error = %err, "Template editor rejected input");
        self.error_message = Some(err.to_string());
        err
    }

    // --- Search ---

    #[must_use]
    pub const fn is_search_visible(&self) -> bool {
        self.search_visible
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[Exercise] {
        &self.results
    }

    #[must_use]
    pub fn search_phase(&self) -> SearchPhase {
        if !self.search_visible {
            SearchPhase::Collapsed
        } else if !self.results.is_empty() {
            SearchPhase::ActiveWithResults
        } else if self.query.is_empty() {
            SearchPhase::ActiveEmpty
        } else {
            SearchPhase::ActiveWithQuery
        }
    }

    /// The "Add Exercise" affordance.
    pub fn open_search(&mut self) {
        self.search_visible = true;
    }

    /// Collapses the search field, dropping the query and its matches.
    pub fn collapse_search(&mut self) {
        self.search_visible = false;
        self.query.clear();
        self.results.clear();
    }

    /// Replaces the query and re-runs the filter against `catalog`. On a
    /// catalog failure the match list is left empty.
    pub fn set_query(
        &mut self,
        catalog: &dyn ExerciseCatalog,
        query: impl Into<String>,
    ) -> Result<(), EditorError> {
        self.query = query.into();
        self.refresh_results(catalog)
    }

    pub fn push_query_char(
        &mut self,
        catalog: &dyn ExerciseCatalog,
        c: char,
    ) -> Result<(), EditorError> {
        self.query.push(c);
        self.refresh_results(catalog)
    }

    pub fn pop_query_char(&mut self, catalog: &dyn ExerciseCatalog) -> Result<(), EditorError> {
        self.query.pop();
        self.refresh_results(catalog)
    }

    /// The "×" affordance: empties the query without closing the field.
    pub fn clear_query(&mut self) {
        self.query.clear();
        self.results.clear();
    }

    fn refresh_results(&mut self, catalog: &dyn ExerciseCatalog) -> Result<(), EditorError> {
        self.results.clear();
        if self.query.is_empty() {
            return Ok(());
        }
        match catalog.find_by_label_substring(&self.query) {
            Ok(results) => {
                tracing::debug!(query = %self.query, matches = results.len(), "Filtered catalog");
                self.results = results;
                Ok(())
            }
            Err(e) => Err(self.report(e.into())),
        }
    }

    /// Adds the match at `index` in the current result list.
    pub fn select_result(&mut self, index: usize) -> Result<&ExerciseActivity, EditorError> {
        let Some(exercise) = self.results.get(index).cloned() else {
            let len = self.results.len();
            return Err(self.report(EditorError::ResultOutOfRange { index, len }));
        };
        self.select_exercise(&exercise)
    }

    /// Appends `exercise` with a single empty set and resets the query. The
    /// search field stays open for further additions.
    pub fn select_exercise(&mut self, exercise: &Exercise) -> Result<&ExerciseActivity, EditorError> {
        if !self.options.allow_duplicates
            && self
                .selected
                .iter()
                .any(|activity| activity.exercise_name == exercise.label)
        {
            return Err(self.report(EditorError::DuplicateExercise(exercise.label.clone())));
        }

        self.selected
            .push(ExerciseActivity::from_exercise(exercise, self.options.default_unit));
        self.query.clear();
        self.results.clear();
        self.error_message = None;
        tracing::debug!(exercise = %exercise.label, rows = self.selected.len(), "Exercise added");

        let index = self.selected.len() - 1;
        Ok(&self.selected[index])
    }

    // --- Selection list ---

    #[must_use]
    pub fn selected_exercises(&self) -> &[ExerciseActivity] {
        &self.selected
    }

    /// Removes exactly the row at `index`.
    pub fn delete_exercise(&mut self, index: usize) -> Result<ExerciseActivity, EditorError> {
        if index >= self.selected.len() {
            let len = self.selected.len();
            return Err(self.report(EditorError::RowOutOfRange { index, len }));
        }
        let removed = self.selected.remove(index);
        tracing::debug!(exercise = %removed.exercise_name, index, "Exercise removed");
        Ok(removed)
    }

    /// Resizes the set list of row `index` to `count`, truncating or padding
    /// with empty sets.
    pub fn update_set_count(&mut self, index: usize, count: usize) -> Result<(), EditorError> {
        if count == 0 {
            return Err(self.report(EditorError::InvalidSetCount(count)));
        }
        let unit = self.options.default_unit;
        let len = self.selected.len();
        match self.selected.get_mut(index) {
            Some(activity) => {
                activity.resize_sets(count, unit);
                Ok(())
            }
            None => Err(self.report(EditorError::RowOutOfRange { index, len })),
        }
    }

    // --- Save ---

    /// Snapshot of the edited template.
    #[must_use]
    pub fn to_template(&self) -> Template {
        Template {
            name: self.name.clone(),
            exercises: self.selected.clone(),
        }
    }

    /// Validates the edit and hands `{name, selected_exercises}` to
    /// `on_update_template`. A rejected save fills the error slot and never
    /// calls the callback.
    pub fn save<F>(&mut self, on_update_template: F) -> Result<(), EditorError>
    where
        F: FnOnce(Template),
    {
        if self.name.trim().is_empty() {
            return Err(self.report(EditorError::EmptyName));
        }
        self.error_message = None;
        let template = self.to_template();
        tracing::info!(
            name = %template.name,
            exercises = template.exercises.len(),
            "Template saved"
        );
        on_update_template(template);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::template::ExerciseSet;

    fn two_entry_catalog() -> StaticCatalog {
        StaticCatalog::from_entries([
            Exercise::new("e1", "Bench Press"),
            Exercise::new("e2", "Squat"),
        ])
    }

    #[test]
    fn search_phases_follow_query_and_results() {
        let catalog = two_entry_catalog();
        let mut editor = TemplateEditor::default();
        editor.open(None, None);
        assert_eq!(editor.search_phase(), SearchPhase::Collapsed);

        editor.open_search();
        assert_eq!(editor.search_phase(), SearchPhase::ActiveEmpty);

        editor.set_query(&catalog, "zz").unwrap();
        assert_eq!(editor.search_phase(), SearchPhase::ActiveWithQuery);

        editor.set_query(&catalog, "s").unwrap();
        assert_eq!(editor.search_phase(), SearchPhase::ActiveWithResults);

        editor.select_result(0).unwrap();
        assert_eq!(editor.search_phase(), SearchPhase::ActiveEmpty);

        editor.collapse_search();
        assert_eq!(editor.search_phase(), SearchPhase::Collapsed);
    }

    #[test]
    fn keystrokes_refilter_each_time() {
        let catalog = two_entry_catalog();
        let mut editor = TemplateEditor::default();
        editor.open_search();
        editor.push_query_char(&catalog, 'P').unwrap();
        assert_eq!(editor.results().len(), 1);
        editor.pop_query_char(&catalog).unwrap();
        assert!(editor.results().is_empty());
        assert_eq!(editor.query(), "");
    }

    #[test]
    fn select_result_out_of_range_fills_error_slot() {
        let mut editor = TemplateEditor::default();
        let err = editor.select_result(3).unwrap_err();
        assert!(matches!(err, EditorError::ResultOutOfRange { index: 3, len: 0 }));
        assert!(editor.error_message().is_some());
        assert!(editor.selected_exercises().is_empty());
    }

    #[test]
    fn update_set_count_rejects_zero_and_resizes() {
        let mut editor = TemplateEditor::default();
        editor.select_exercise(&Exercise::new("e2", "Squat")).unwrap();

        assert!(matches!(
            editor.update_set_count(0, 0),
            Err(EditorError::InvalidSetCount(0))
        ));
        assert_eq!(editor.selected_exercises()[0].sets.len(), 1);

        editor.update_set_count(0, 3).unwrap();
        assert_eq!(editor.selected_exercises()[0].sets.len(), 3);
        assert_eq!(editor.selected_exercises()[0].sets[2], ExerciseSet::empty(3, WeightUnit::Lbs));

        assert!(matches!(
            editor.update_set_count(5, 2),
            Err(EditorError::RowOutOfRange { index: 5, len: 1 })
        ));
    }

    #[test]
    fn editing_the_name_clears_a_previous_error() {
        let mut editor = TemplateEditor::default();
        assert!(editor.save(|_| {}).is_err());
        assert!(editor.error_message().is_some());
        editor.push_name_char('A');
        assert!(editor.error_message().is_none());
    }

    #[test]
    fn reopening_while_open_keeps_current_edits() {
        let mut editor = TemplateEditor::default();
        editor.open(None, Some("Push"));
        editor.set_name("Push A");
        editor.open(None, Some("Other"));
        assert_eq!(editor.name(), "Push A");
    }
}
