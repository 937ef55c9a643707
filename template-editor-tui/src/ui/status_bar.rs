// template-editor-tui/src/ui/status_bar.rs
use crate::app::{ActiveModal, App, EditTemplateField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

fn hint_text(app: &App) -> &'static str {
    match &app.active_modal {
        ActiveModal::None => " [↑↓/jk] Nav | [e/Enter] Edit | [n]ew | [?] Help | [Q]uit ",
        ActiveModal::Help => " [Esc/Enter/?] Close Help ",
        ActiveModal::EditTemplate { focused_field, .. } => match focused_field {
            EditTemplateField::Name => " [Tab/↑↓] Navigate | [Esc] Close ",
            EditTemplateField::Search if app.editor.is_search_visible() => {
                " Type to search | [↓/Enter] Results | [Ctrl-U] Clear | [Esc] Hide Search "
            }
            EditTemplateField::Search => " [Enter] Add Exercise | [Tab/↑↓] Navigate | [Esc] Close ",
            EditTemplateField::Results => " [↑↓] Choose | [Enter] Add | [Esc] Back to Search ",
            EditTemplateField::Exercises => {
                " [↑↓/jk] Row | [+/-] Sets | [0-9 Enter] Set Count | [d]elete | [Tab] Next "
            }
            EditTemplateField::Save | EditTemplateField::Close => {
                " [Enter] Confirm | [Tab/←→] Navigate | [Esc] Close "
            }
        },
    }
}

pub fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let status_paragraph =
        Paragraph::new(hint_text(app)).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status_paragraph, status_chunks[0]);

    // Errors win over the last status message
    let (right_text, right_color) = match (&app.last_error, &app.last_status) {
        (Some(err), _) => (err.as_str(), Color::Red),
        (None, Some(status)) => (status.as_str(), Color::Green),
        (None, None) => ("", Color::White),
    };
    let right_paragraph = Paragraph::new(right_text)
        .style(Style::default().bg(Color::DarkGray).fg(right_color))
        .alignment(Alignment::Right);
    f.render_widget(right_paragraph, status_chunks[1]);
}
