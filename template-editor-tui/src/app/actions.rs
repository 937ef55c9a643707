// template-editor-tui/src/app/actions.rs
use super::modals::handle_edit_template_modal_input;
use super::navigation_helpers::{list_next, list_previous};
use super::state::{ActiveModal, App, EditTemplateField, TemplateTarget};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::{ListState, TableState};
use template_editor_lib::Template;

impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            return self.handle_modal_input(key);
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            KeyCode::Char('k') | KeyCode::Up => {
                list_previous(&mut self.template_list_state, self.templates.len());
            }
            KeyCode::Char('j') | KeyCode::Down => {
                list_next(&mut self.template_list_state, self.templates.len());
            }
            KeyCode::Char('e') | KeyCode::Enter => match self.template_list_state.selected() {
                Some(index) => self.open_edit_template_modal(TemplateTarget::Existing(index)),
                None => self.set_error("No template selected.".to_string()),
            },
            KeyCode::Char('n') => self.open_edit_template_modal(TemplateTarget::New),
            _ => {}
        }
        Ok(())
    }

    fn handle_modal_input(&mut self, key: KeyEvent) -> Result<()> {
        match self.active_modal {
            ActiveModal::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                    self.active_modal = ActiveModal::None;
                }
                _ => {}
            },
            ActiveModal::EditTemplate { .. } => handle_edit_template_modal_input(self, key)?,
            ActiveModal::None => {}
        }
        Ok(())
    }

    /// Opens the editor seeded from `target`. A new template starts empty.
    pub fn open_edit_template_modal(&mut self, target: TemplateTarget) {
        let seed = match target {
            TemplateTarget::Existing(index) => match self.templates.get(index) {
                Some(template) => Some(template.clone()),
                None => {
                    self.set_error(format!("Template #{} no longer exists.", index + 1));
                    return;
                }
            },
            TemplateTarget::New => None,
        };

        // Always start from a closed editor so open() reseeds
        self.editor.close();
        match seed {
            Some(template) => self
                .editor
                .open(Some(template.exercises), Some(&template.name)),
            None => self.editor.open(None, None),
        }

        self.active_modal = ActiveModal::EditTemplate {
            target,
            focused_field: EditTemplateField::Name,
            result_list_state: ListState::default(),
            row_table_state: TableState::default(),
            set_count_input: String::new(),
        };
    }

    /// Hides the modal and discards the editor's state.
    pub fn close_edit_template_modal(&mut self) {
        self.editor.close();
        self.active_modal = ActiveModal::None;
    }

    /// The update callback: stores the saved template in the session list.
    pub fn apply_template_update(&mut self, target: TemplateTarget, template: Template) {
        let name = template.name.clone();
        let index = match target {
            TemplateTarget::Existing(index) if index < self.templates.len() => {
                self.templates[index] = template;
                index
            }
            _ => {
                self.templates.push(template);
                self.templates.len() - 1
            }
        };
        self.template_list_state.select(Some(index));
        tracing::info!(template = %name, index, "Template updated");
        self.set_status(format!("Template '{name}' updated"));
    }
}
