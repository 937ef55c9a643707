// template-editor-tui/src/app/modals.rs
//
// Editor operations that get rejected already carry their message in the
// editor's error slot, which the modal renders; their Results are dropped here.
use super::navigation_helpers::{clamp_table, list_next, list_previous, table_next, table_previous};
use super::state::{ActiveModal, App, EditTemplateField, TemplateTarget};
use super::AppInputError;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::{ListState, TableState};
use template_editor_lib::{ExerciseActivity, Template, TemplateEditor};

// What the handler asks the app to do once the modal borrow ends
enum ModalOutcome {
    Stay,
    Close,
    Saved(TemplateTarget, Template),
    Error(AppInputError),
}

fn parse_set_count(input: &str) -> Result<usize, AppInputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| AppInputError::InvalidNumber(format!("'{trimmed}' is not a valid set count")))
}

fn after_search(editor: &TemplateEditor) -> EditTemplateField {
    if editor.selected_exercises().is_empty() {
        EditTemplateField::Save
    } else {
        EditTemplateField::Exercises
    }
}

fn before_save(editor: &TemplateEditor) -> EditTemplateField {
    if editor.selected_exercises().is_empty() {
        EditTemplateField::Search
    } else {
        EditTemplateField::Exercises
    }
}

// Re-point the dropdown selection at the first of the fresh matches
fn reset_results_selection(state: &mut ListState, editor: &TemplateEditor) {
    state.select(if editor.results().is_empty() {
        None
    } else {
        Some(0)
    });
}

fn focus_rows(state: &mut TableState, editor: &TemplateEditor) {
    if state.selected().is_none() && !editor.selected_exercises().is_empty() {
        state.select(Some(0));
    }
}

pub fn handle_edit_template_modal_input(app: &mut App, key: KeyEvent) -> Result<()> {
    let App {
        editor,
        service,
        active_modal,
        ..
    } = &mut *app;
    let ActiveModal::EditTemplate {
        target,
        focused_field,
        result_list_state,
        row_table_state,
        set_count_input,
    } = active_modal
    else {
        return Ok(());
    };
    let catalog = service.catalog.as_ref();
    let visible_results = service.visible_results(editor.results()).len();
    let mut outcome = ModalOutcome::Stay;

    match *focused_field {
        EditTemplateField::Name => match key.code {
            KeyCode::Char(c) => editor.push_name_char(c),
            KeyCode::Backspace => editor.pop_name_char(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => {
                *focused_field = EditTemplateField::Search;
            }
            KeyCode::BackTab | KeyCode::Up => *focused_field = EditTemplateField::Close,
            KeyCode::Esc => outcome = ModalOutcome::Close,
            _ => {}
        },

        EditTemplateField::Search if !editor.is_search_visible() => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('+') => editor.open_search(),
            KeyCode::Tab | KeyCode::Down => {
                *focused_field = after_search(editor);
                focus_rows(row_table_state, editor);
            }
            KeyCode::BackTab | KeyCode::Up => *focused_field = EditTemplateField::Name,
            KeyCode::Esc => outcome = ModalOutcome::Close,
            _ => {}
        },

        EditTemplateField::Search => match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.clear_query();
                result_list_state.select(None);
            }
            KeyCode::Char(c) => {
                let _ = editor.push_query_char(catalog, c);
                reset_results_selection(result_list_state, editor);
            }
            KeyCode::Backspace => {
                let _ = editor.pop_query_char(catalog);
                reset_results_selection(result_list_state, editor);
            }
            KeyCode::Delete => {
                editor.clear_query();
                result_list_state.select(None);
            }
            KeyCode::Down | KeyCode::Enter if visible_results > 0 => {
                *focused_field = EditTemplateField::Results;
                if result_list_state.selected().is_none() {
                    result_list_state.select(Some(0));
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                *focused_field = after_search(editor);
                focus_rows(row_table_state, editor);
            }
            KeyCode::BackTab | KeyCode::Up => *focused_field = EditTemplateField::Name,
            KeyCode::Esc => {
                editor.collapse_search();
                result_list_state.select(None);
            }
            _ => {}
        },

        EditTemplateField::Results => match key.code {
            KeyCode::Up => list_previous(result_list_state, visible_results),
            KeyCode::Down => list_next(result_list_state, visible_results),
            KeyCode::Enter => {
                if let Some(index) = result_list_state.selected() {
                    if editor.select_result(index).is_ok() {
                        row_table_state.select(Some(editor.selected_exercises().len() - 1));
                    }
                }
                result_list_state.select(None);
                *focused_field = EditTemplateField::Search;
            }
            KeyCode::Char(c) => {
                let _ = editor.push_query_char(catalog, c);
                reset_results_selection(result_list_state, editor);
                *focused_field = EditTemplateField::Search;
            }
            KeyCode::Backspace => {
                let _ = editor.pop_query_char(catalog);
                reset_results_selection(result_list_state, editor);
                *focused_field = EditTemplateField::Search;
            }
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => {
                *focused_field = EditTemplateField::Search;
            }
            _ => {}
        },

        EditTemplateField::Exercises => {
            let rows = editor.selected_exercises().len();
            match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => set_count_input.push(c),
                KeyCode::Backspace => {
                    set_count_input.pop();
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    set_count_input.clear();
                    table_previous(row_table_state, rows);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    set_count_input.clear();
                    table_next(row_table_state, rows);
                }
                KeyCode::Char('+') | KeyCode::Char('-') => match row_table_state.selected() {
                    Some(row) => {
                        if let Some(current) = editor
                            .selected_exercises()
                            .get(row)
                            .map(ExerciseActivity::set_count)
                        {
                            let count = if key.code == KeyCode::Char('+') {
                                current + 1
                            } else {
                                current.saturating_sub(1)
                            };
                            let _ = editor.update_set_count(row, count);
                        }
                    }
                    None => outcome = ModalOutcome::Error(AppInputError::SelectionRequired),
                },
                KeyCode::Enter if !set_count_input.is_empty() => {
                    match (row_table_state.selected(), parse_set_count(set_count_input)) {
                        (Some(row), Ok(count)) => {
                            let _ = editor.update_set_count(row, count);
                        }
                        (None, _) => outcome = ModalOutcome::Error(AppInputError::SelectionRequired),
                        (_, Err(e)) => outcome = ModalOutcome::Error(e),
                    }
                    set_count_input.clear();
                }
                KeyCode::Char('d') | KeyCode::Delete => match row_table_state.selected() {
                    Some(row) => {
                        let _ = editor.delete_exercise(row);
                        set_count_input.clear();
                        clamp_table(row_table_state, editor.selected_exercises().len());
                        if editor.selected_exercises().is_empty() {
                            *focused_field = EditTemplateField::Search;
                        }
                    }
                    None => outcome = ModalOutcome::Error(AppInputError::SelectionRequired),
                },
                KeyCode::Tab => {
                    set_count_input.clear();
                    *focused_field = EditTemplateField::Save;
                }
                KeyCode::BackTab => {
                    set_count_input.clear();
                    *focused_field = EditTemplateField::Search;
                }
                KeyCode::Esc if !set_count_input.is_empty() => set_count_input.clear(),
                KeyCode::Esc => outcome = ModalOutcome::Close,
                _ => {}
            }
        }

        EditTemplateField::Save => match key.code {
            KeyCode::Enter => {
                let mut saved = None;
                if editor.save(|template| saved = Some(template)).is_ok() {
                    if let Some(template) = saved {
                        outcome = ModalOutcome::Saved(*target, template);
                    }
                } else {
                    *focused_field = EditTemplateField::Name;
                }
            }
            KeyCode::Tab | KeyCode::Right => *focused_field = EditTemplateField::Close,
            KeyCode::BackTab | KeyCode::Left | KeyCode::Up => {
                *focused_field = before_save(editor);
                focus_rows(row_table_state, editor);
            }
            KeyCode::Esc => outcome = ModalOutcome::Close,
            _ => {}
        },

        EditTemplateField::Close => match key.code {
            KeyCode::Enter | KeyCode::Esc => outcome = ModalOutcome::Close,
            KeyCode::Tab | KeyCode::Down => *focused_field = EditTemplateField::Name,
            KeyCode::BackTab | KeyCode::Left => *focused_field = EditTemplateField::Save,
            _ => {}
        },
    }

    match outcome {
        ModalOutcome::Stay => {}
        ModalOutcome::Close => app.close_edit_template_modal(),
        ModalOutcome::Saved(target, template) => {
            app.apply_template_update(target, template);
            app.close_edit_template_modal();
        }
        ModalOutcome::Error(e) => app.set_error(e.to_string()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use template_editor_lib::{Config, Exercise, ExerciseSet, StaticCatalog, TemplateService};

    fn test_app() -> App {
        let config = Config {
            templates: vec![Template {
                name: "Leg Day".into(),
                exercises: vec![ExerciseActivity {
                    exercise_name: "Back Squat".into(),
                    sets: vec![ExerciseSet::default()],
                }],
            }],
            ..Default::default()
        };
        let catalog = StaticCatalog::from_entries([
            Exercise::new("e1", "Bench Press"),
            Exercise::new("e2", "Squat"),
            Exercise::new("e3", "Split Squat"),
        ]);
        App::new(TemplateService::with_catalog(config, Box::new(catalog)))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn focus(app: &App) -> EditTemplateField {
        match &app.active_modal {
            ActiveModal::EditTemplate { focused_field, .. } => *focused_field,
            other => panic!("edit modal not open: {other:?}"),
        }
    }

    #[test]
    fn editing_an_existing_template_updates_it_in_place() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('e'));
        assert!(app.editor.is_open());
        assert_eq!(app.editor.name(), "Leg Day");

        type_str(&mut app, " B");
        press(&mut app, KeyCode::Tab); // -> Add Exercise
        press(&mut app, KeyCode::Enter); // open search
        type_str(&mut app, "sq");
        assert_eq!(app.editor.results().len(), 2);

        press(&mut app, KeyCode::Down); // -> results
        press(&mut app, KeyCode::Down); // second match
        press(&mut app, KeyCode::Enter); // add "Split Squat"
        assert_eq!(focus(&app), EditTemplateField::Search);
        assert_eq!(app.editor.query(), "");

        press(&mut app, KeyCode::Tab); // -> Exercises
        press(&mut app, KeyCode::Tab); // -> Save
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.active_modal, ActiveModal::None);
        assert!(!app.editor.is_open());
        assert_eq!(app.templates.len(), 1);
        assert_eq!(app.templates[0].name, "Leg Day B");
        let names: Vec<_> = app.templates[0]
            .exercises
            .iter()
            .map(|a| a.exercise_name.as_str())
            .collect();
        assert_eq!(names, vec!["Back Squat", "Split Squat"]);
    }

    #[test]
    fn new_template_with_blank_name_is_not_saved() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.editor.name(), "");

        press(&mut app, KeyCode::BackTab); // -> Close
        press(&mut app, KeyCode::BackTab); // -> Save
        press(&mut app, KeyCode::Enter);

        assert_eq!(focus(&app), EditTemplateField::Name);
        assert_eq!(app.editor.error_message(), Some("Template name cannot be empty."));
        assert_eq!(app.templates.len(), 1);

        type_str(&mut app, "Arms");
        assert!(app.editor.error_message().is_none());
        press(&mut app, KeyCode::BackTab); // -> Close
        press(&mut app, KeyCode::BackTab); // -> Save
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.templates.len(), 2);
        assert_eq!(app.templates[1].name, "Arms");
        assert_eq!(app.template_list_state.selected(), Some(1));
    }

    #[test]
    fn set_count_and_delete_act_on_selected_row() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab); // -> Add Exercise
        press(&mut app, KeyCode::Tab); // -> Exercises (row 0 selected)
        assert_eq!(focus(&app), EditTemplateField::Exercises);

        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.editor.selected_exercises()[0].set_count(), 2);

        type_str(&mut app, "5");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.editor.selected_exercises()[0].set_count(), 5);

        press(&mut app, KeyCode::Char('d'));
        assert!(app.editor.selected_exercises().is_empty());
        assert_eq!(focus(&app), EditTemplateField::Search);
    }

    #[test]
    fn escape_collapses_search_before_closing() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "bench");
        app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL))
            .unwrap();
        assert_eq!(app.editor.query(), "");
        assert!(app.editor.is_search_visible());

        press(&mut app, KeyCode::Esc);
        assert!(!app.editor.is_search_visible());
        assert!(app.editor.is_open());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.active_modal, ActiveModal::None);
        assert!(!app.editor.is_open());
    }

    #[test]
    fn set_count_parsing_rejects_non_numbers() {
        assert!(matches!(
            parse_set_count("x"),
            Err(AppInputError::InvalidNumber(_))
        ));
        assert_eq!(parse_set_count(" 3 "), Ok(3));
    }
}
