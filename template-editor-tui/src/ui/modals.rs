// template-editor-tui/src/ui/modals.rs
use crate::{
    app::{ActiveModal, App, EditTemplateField},
    ui::layout::{centered_rect, centered_rect_fixed, to_ratatui_color},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

const NAME_PLACEHOLDER: &str = "Enter a name for your template";
const SEARCH_PLACEHOLDER: &str = "Search for an exercise to add";

pub fn render_modal(f: &mut Frame, app: &App) {
    match &app.active_modal {
        ActiveModal::Help => render_help_modal(f),
        ActiveModal::EditTemplate { .. } => render_edit_template_modal(f, app),
        ActiveModal::None => {}
    }
}

fn render_help_modal(f: &mut Frame) {
    let block = Block::default()
        .title("Help (?)")
        .borders(Borders::ALL)
        .title_style(Style::new().bold())
        .border_style(Style::new().yellow());
    let area = centered_rect(60, 70, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let help_text = vec![
        Line::from("--- Templates ---").style(Style::new().bold().underlined()),
        Line::from(" Q: Quit Application"),
        Line::from(" ?: Show/Hide This Help"),
        Line::from(" k/j / ↑/↓: Select Template"),
        Line::from(" e / Enter: Edit Selected Template"),
        Line::from(" n: New Template"),
        Line::from(""),
        Line::from("--- Edit Template ---").style(Style::new().bold().underlined()),
        Line::from(" Tab / Shift-Tab: Cycle Focus"),
        Line::from(" Enter on Add Exercise: Open Search"),
        Line::from(" ↓ in Search: Jump to Results, Enter adds"),
        Line::from(" Ctrl-U / Delete: Clear Search, Esc: Hide Search"),
        Line::from(" +/- or digits + Enter: Change Set Count"),
        Line::from(" d / Delete: Remove Exercise Row"),
        Line::from(" Enter on Save: Save, Esc: Close Without Saving"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Esc, Enter, or ? to close ",
            Style::default().italic(),
        )),
    ];

    let paragraph = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);
    f.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 2,
        }),
    );
}

fn render_edit_template_modal(f: &mut Frame, app: &App) {
    let ActiveModal::EditTemplate {
        focused_field,
        result_list_state,
        row_table_state,
        set_count_input,
        ..
    } = &app.active_modal
    else {
        return;
    };
    let editor = &app.editor;
    let rows = editor.selected_exercises();

    let block = Block::default()
        .title("Edit Template")
        .borders(Borders::ALL)
        .border_style(Style::new().yellow());

    let table_height = rows.len().max(1) as u16 + 2; // header + margin
    let required_height = 2 // borders
        + 1 // name label
        + 1 // name input
        + 1 // error slot
        + 1 // spacer
        + 1 // add exercise / search
        + 1 // spacer
        + table_height
        + 1 // spacer
        + 1; // buttons
    let area = centered_rect_fixed(72, required_height, f.size());
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name label
            Constraint::Length(1), // Name input
            Constraint::Length(1), // Error slot
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Add Exercise / search input
            Constraint::Length(1), // Spacer
            Constraint::Min(3), // Selected exercises
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Buttons
        ])
        .split(inner_area);

    let base_input_style = Style::default().fg(Color::White);
    let input_margin = Margin {
        vertical: 0,
        horizontal: 1,
    };
    let focused_style = |field: EditTemplateField| {
        if *focused_field == field {
            base_input_style.reversed()
        } else {
            base_input_style
        }
    };

    // Name
    f.render_widget(Paragraph::new("Template Name:"), chunks[0]);
    let name_area = chunks[1].inner(&input_margin);
    let name_style = focused_style(EditTemplateField::Name);
    let name_text = if editor.name().is_empty() {
        Paragraph::new(NAME_PLACEHOLDER).style(name_style.fg(Color::DarkGray))
    } else {
        Paragraph::new(editor.name()).style(name_style)
    };
    f.render_widget(name_text, name_area);
    if let Some(err) = editor.error_message() {
        f.render_widget(
            Paragraph::new(err).style(Style::default().fg(Color::Red)),
            chunks[2].inner(&input_margin),
        );
    }

    // Add Exercise button, or the search input once opened
    let search_area = chunks[4].inner(&input_margin);
    if editor.is_search_visible() {
        let search_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(search_area);
        let search_style = focused_style(EditTemplateField::Search)
            .patch(if *focused_field == EditTemplateField::Results {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            });
        let search_text = if editor.query().is_empty() {
            Paragraph::new(SEARCH_PLACEHOLDER).style(search_style.fg(Color::DarkGray))
        } else {
            Paragraph::new(editor.query()).style(search_style)
        };
        f.render_widget(search_text, search_chunks[0]);
        // Clear control only once there is something to clear
        if !editor.query().is_empty() {
            f.render_widget(
                Paragraph::new(" ×").style(Style::default().fg(Color::DarkGray)),
                search_chunks[1],
            );
        }
    } else {
        f.render_widget(
            Paragraph::new("+ Add Exercise")
                .style(focused_style(EditTemplateField::Search).fg(Color::Cyan)),
            search_area,
        );
    }

    // Selected exercises
    let header_color = to_ratatui_color(app.service.config.theme.header());
    let header = Row::new(vec![
        Cell::from("Exercise Name"),
        Cell::from("# of Sets"),
        Cell::from(""),
    ])
    .style(
        Style::default()
            .fg(header_color)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let selected_row = row_table_state.selected();
    let table_rows = rows.iter().enumerate().map(|(i, activity)| {
        // A pending typed count replaces the stored one on the selected row
        let count = if selected_row == Some(i) && !set_count_input.is_empty() {
            format!("{set_count_input}_")
        } else {
            activity.set_count().to_string()
        };
        Row::new(vec![
            Cell::from(activity.exercise_name.as_str()),
            Cell::from(count),
            Cell::from("×").style(Style::default().fg(Color::Red)),
        ])
    });
    let rows_focused = *focused_field == EditTemplateField::Exercises;
    let table = Table::new(
        table_rows,
        [
            Constraint::Percentage(70),
            Constraint::Percentage(20),
            Constraint::Length(2),
        ],
    )
    .header(header)
    .highlight_style(if rows_focused {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    })
    .highlight_symbol(if rows_focused { "> " } else { "  " });
    let mut table_state = row_table_state.clone();
    f.render_stateful_widget(table, chunks[6], &mut table_state);
    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("  No exercises added.").style(Style::default().fg(Color::DarkGray)),
            Rect {
                y: chunks[6].y + 2,
                height: 1,
                ..chunks[6]
            }
            .intersection(chunks[6]),
        );
    }

    // Buttons
    let base_button_style = Style::default().fg(Color::White);
    let button_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[8]);
    let button_style = |field: EditTemplateField| {
        if *focused_field == field {
            base_button_style.reversed()
        } else {
            base_button_style
        }
    };
    f.render_widget(
        Paragraph::new(" Save ")
            .alignment(Alignment::Center)
            .style(button_style(EditTemplateField::Save)),
        button_layout[0],
    );
    f.render_widget(
        Paragraph::new(" Close ")
            .alignment(Alignment::Center)
            .style(button_style(EditTemplateField::Close)),
        button_layout[1],
    );

    // Results dropdown, drawn over the table
    let visible = app.service.visible_results(editor.results());
    if editor.is_search_visible() && !visible.is_empty() {
        let frame = f.size();
        let popup_y = search_area.y + 1;
        let popup_area = Rect {
            x: search_area.x,
            y: popup_y,
            width: search_area
                .width
                .min(frame.width.saturating_sub(search_area.x)),
            height: (visible.len() as u16 + 2).min(frame.height.saturating_sub(popup_y)),
        };

        let list_items: Vec<ListItem> = visible
            .iter()
            .map(|exercise| ListItem::new(exercise.label.as_str()))
            .collect();
        let results_list = List::new(list_items)
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_widget(Clear, popup_area);
        let mut list_state = result_list_state.clone();
        f.render_stateful_widget(results_list, popup_area, &mut list_state);
    }

    // Cursor
    match focused_field {
        EditTemplateField::Name => {
            let cursor_x = (name_area.x + editor.name().chars().count() as u16)
                .min(name_area.right().saturating_sub(1));
            f.set_cursor(cursor_x, name_area.y);
        }
        EditTemplateField::Search | EditTemplateField::Results
            if editor.is_search_visible() =>
        {
            let cursor_x = (search_area.x + editor.query().chars().count() as u16)
                .min(search_area.right().saturating_sub(3));
            f.set_cursor(cursor_x, search_area.y);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, TemplateTarget};
    use crate::ui::render_ui;
    use ratatui::{backend::TestBackend, Terminal};
    use template_editor_lib::{Config, Exercise, StaticCatalog, TemplateService};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn test_app() -> App {
        let catalog = StaticCatalog::from_entries([
            Exercise::new("e1", "Bench Press"),
            Exercise::new("e2", "Squat"),
        ]);
        App::new(TemplateService::with_catalog(
            Config::default(),
            Box::new(catalog),
        ))
    }

    #[test]
    fn empty_list_shows_hint() -> anyhow::Result<()> {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|f| render_ui(f, &mut app))?;
        assert!(buffer_text(&terminal).contains("No templates yet."));
        Ok(())
    }

    #[test]
    fn edit_modal_renders_search_and_rows() -> anyhow::Result<()> {
        let mut app = test_app();
        app.open_edit_template_modal(TemplateTarget::New);
        app.editor.set_name("Push");
        app.editor.open_search();
        let catalog = app.service.catalog.as_ref();
        app.editor.set_query(catalog, "bench")?;

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|f| render_ui(f, &mut app))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("Edit Template"));
        assert!(text.contains("Push"));
        assert!(text.contains("Bench Press"));
        // The dropdown is drawn over the table header
        assert!(text.contains("┌Results"));
        assert!(!text.contains("Exercise Name"));

        app.editor.select_result(0)?;
        terminal.draw(|f| render_ui(f, &mut app))?;
        let text = buffer_text(&terminal);
        assert!(!text.contains("┌Results"));
        assert!(text.contains("Exercise Name"));
        assert!(text.contains(super::SEARCH_PLACEHOLDER));
        assert!(text.contains("Bench Press"));
        assert!(!text.contains("No exercises added."));
        Ok(())
    }

    #[test]
    fn placeholders_and_clear_control_follow_input() -> anyhow::Result<()> {
        let mut app = test_app();
        app.open_edit_template_modal(TemplateTarget::New);
        app.editor.open_search();

        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;
        terminal.draw(|f| render_ui(f, &mut app))?;
        let text = buffer_text(&terminal);
        assert!(text.contains(super::NAME_PLACEHOLDER));
        assert!(text.contains(super::SEARCH_PLACEHOLDER));
        assert!(!text.contains('×'));

        app.editor.set_name("Legs");
        let catalog = app.service.catalog.as_ref();
        app.editor.set_query(catalog, "zz")?;
        terminal.draw(|f| render_ui(f, &mut app))?;
        let text = buffer_text(&terminal);
        assert!(!text.contains(super::NAME_PLACEHOLDER));
        assert!(!text.contains(super::SEARCH_PLACEHOLDER));
        assert!(text.contains(" ×"));

        app.editor.clear_query();
        terminal.draw(|f| render_ui(f, &mut app))?;
        assert!(!buffer_text(&terminal).contains('×'));
        Ok(())
    }
}
