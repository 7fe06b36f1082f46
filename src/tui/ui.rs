use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use super::app::{App, DisplayItem, InputField, InputMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let expanded = app
        .expanded_task_id
        .and_then(|id| app.store.task(id))
        .cloned();

    let constraints = if expanded.is_some() {
        vec![
            Constraint::Min(0),    // Table
            Constraint::Length(6), // Detail panel
            Constraint::Length(3), // Help
        ]
    } else {
        vec![
            Constraint::Min(0),   // Table
            Constraint::Length(3) // Help
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let rows: Vec<Row> = app
        .display_items
        .iter()
        .map(|item| match item {
            DisplayItem::CategoryHeader(_, name, count) => Row::new(vec![
                Cell::from(""),
                Cell::from(format!("{} ({})", name, count)),
                Cell::from(""),
                Cell::from(""),
            ])
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            DisplayItem::Task(t) => {
                let mark = if t.completed { "[x]" } else { "[ ]" };
                let style = if t.completed {
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(mark),
                    Cell::from(format!("  {}", t.title)),
                    Cell::from(t.id.to_string()),
                    Cell::from(t.due_date.map(|d| d.to_string()).unwrap_or_default()),
                ])
                .style(style)
            }
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Title", "ID", "Due"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title("Taskdeck - Tasks"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    if let Some(t) = expanded {
        let description = t.description.clone().unwrap_or_else(|| "-".to_string());
        let due = t.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
        let created = t
            .created_at
            .split('T')
            .next()
            .unwrap_or(&t.created_at)
            .to_string();
        let category = app.store.category_name(t.category_id).to_string();
        let text = format!(
            "Description: {}\nCategory: {}\nDue: {}\nCreated: {}",
            description, category, due, created
        );
        let details = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(format!("Task {}", t.id)));
        f.render_widget(details, chunks[1]);
    }

    let help_text = match app.input_mode {
        InputMode::Normal => {
            "q: Quit | a: Add Task | A: Add Category | n: Title | i: Desc | t: Due | m: Move | Space: Toggle Done | c: Show/Hide Done | d: Del | Enter: Details"
        }
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    // A failed save takes over the help line until the next mutation
    let help = match &app.status {
        Some(msg) => Paragraph::new(msg.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL)),
        None => Paragraph::new(help_text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL)),
    };

    f.render_widget(help, chunks[chunks.len() - 1]);

    // Render Input Box if needed
    match app.input_mode {
        InputMode::Editing | InputMode::Adding => {
            let area = centered_rect(60, 3, f.area()); // Fixed height of 3 (border + 1 line)
            f.render_widget(Clear, area); // Clear the area first

            let title = match app.input_mode {
                InputMode::Adding => {
                    if app.add_state.category {
                        "Add Category: Enter Name"
                    } else {
                        match app.add_state.step {
                            0 => "Add Task: Enter Title",
                            1 => "Add Task: Enter Description (Optional)",
                            2 => "Add Task: Enter Due Date (YYYY-MM-DD, Optional)",
                            3 => "Add Task: Enter Category Id (Optional)",
                            _ => "Add Task",
                        }
                    }
                }
                InputMode::Editing => match app.input_field {
                    InputField::Title => "Edit Title",
                    InputField::Description => "Edit Description",
                    InputField::Due => "Edit Due Date (YYYY-MM-DD)",
                    InputField::Category => "Move to Category (Id)",
                    InputField::None => "Edit",
                },
                _ => "",
            };

            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        _ => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
