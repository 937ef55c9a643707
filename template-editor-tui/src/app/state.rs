// template-editor-tui/src/app/state.rs
use ratatui::widgets::{ListState, TableState};
use std::time::Instant;
use template_editor_lib::{Template, TemplateEditor, TemplateService};

// Fields within the Edit Template modal, in Tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditTemplateField {
    Name,
    Search, // "Add Exercise" button while collapsed, search input once opened
    Results,
    Exercises,
    Save,
    Close,
}

/// Which template a save should land on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateTarget {
    Existing(usize),
    New,
}

// Represents the state of active modals
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveModal {
    None,
    Help,
    EditTemplate {
        target: TemplateTarget,
        focused_field: EditTemplateField,
        result_list_state: ListState,
        row_table_state: TableState,
        // Pending set count typed over the selected row
        set_count_input: String,
    },
}

// Holds the application state
pub struct App {
    pub service: TemplateService,
    pub should_quit: bool,
    pub active_modal: ActiveModal,
    pub last_error: Option<String>, // For status bar errors
    pub error_clear_time: Option<Instant>,
    pub last_status: Option<String>,

    // === Templates ===
    pub templates: Vec<Template>,
    pub template_list_state: ListState,

    // The dialog itself; open while ActiveModal::EditTemplate is shown
    pub editor: TemplateEditor,
}

impl App {
    pub fn new(service: TemplateService) -> Self {
        let templates = service.templates().to_vec();
        let editor = service.new_editor();
        let mut app = App {
            should_quit: false,
            active_modal: ActiveModal::None,
            last_error: None,
            error_clear_time: None,
            last_status: None,
            templates,
            template_list_state: ListState::default(),
            editor,
            service,
        };
        if !app.templates.is_empty() {
            app.template_list_state.select(Some(0));
        }
        app
    }

    // Method to set status bar errors
    pub fn set_error(&mut self, msg: String) {
        tracing::warn!(error = %msg, "Status bar error");
        self.last_error = Some(msg);
        self.error_clear_time =
            Some(Instant::now() + chrono::Duration::seconds(5).to_std().unwrap_or_default());
    }

    pub fn set_status(&mut self, msg: String) {
        let stamp = chrono::Local::now().format("%H:%M");
        self.last_status = Some(format!("{msg} ({stamp})"));
    }

    // Called once per frame from the main loop
    pub(crate) fn clear_expired_error(&mut self) {
        if let Some(clear_time) = self.error_clear_time {
            if Instant::now() >= clear_time {
                self.last_error = None;
                self.error_clear_time = None;
            }
        }
    }

    pub fn selected_template(&self) -> Option<&Template> {
        self.template_list_state
            .selected()
            .and_then(|i| self.templates.get(i))
    }
}
