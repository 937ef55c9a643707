// template-editor-tui/src/ui/templates_tab.rs
use crate::{app::App, ui::layout::to_ratatui_color};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};
use template_editor_lib::Template;

pub fn render_templates_tab(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_template_list(f, app, chunks[0]);
    render_template_detail(f, app, chunks[1]);
}

fn render_template_list(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Templates")
        .border_style(Style::default().fg(Color::Yellow));

    if app.templates.is_empty() {
        let empty = Paragraph::new("No templates yet. Press [n] to create one.")
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = app
        .templates
        .iter()
        .map(|t| ListItem::new(format!("{} ({})", t.name, t.exercises.len())))
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.template_list_state);
}

fn render_template_detail(f: &mut Frame, app: &App, area: Rect) {
    let header_color = to_ratatui_color(app.service.config.theme.header());
    let Some(template) = app.selected_template() else {
        let block = Block::default().borders(Borders::ALL).title("Select a Template");
        f.render_widget(
            Paragraph::new("")
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} - {} sets", template.name, template.total_sets()))
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(exercise_table(template, header_color).block(block), area);
}

fn exercise_table(template: &Template, header_color: Color) -> Table<'_> {
    let header = Row::new(["Exercise", "Sets", "Reps", "Weight"].map(Cell::from))
        .style(
            Style::default()
                .fg(header_color)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let rows = template.exercises.iter().map(|activity| {
        let first = activity.sets.first();
        Row::new(vec![
            Cell::from(activity.exercise_name.as_str()),
            Cell::from(activity.set_count().to_string()),
            Cell::from(first.map_or_else(|| "-".to_string(), |s| s.reps.to_string())),
            Cell::from(first.map_or_else(
                || "-".to_string(),
                |s| format!("{:.1} {}", s.weight, s.unit),
            )),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Percentage(46),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(26),
        ],
    )
    .header(header)
}
