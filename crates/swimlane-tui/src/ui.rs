use crate::app::{App, AppMode};
use crate::components::*;
use crate::theme::*;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use swimlane_domain::{allowed_targets, is_terminal, Status};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_filter_bar(app, frame, chunks[0]);
    render_columns(app, frame, chunks[1]);
    render_status_line(app, frame, chunks[2]);
    render_footer(app, frame, chunks[3]);

    match &app.mode {
        AppMode::CreateTask => render_input_popup(
            frame,
            "New Task",
            "Title:",
            app.input.as_str(),
            app.input.cursor_column(),
        ),
        AppMode::EditTask(_) => render_input_popup(
            frame,
            "Edit Task",
            "Title:",
            app.input.as_str(),
            app.input.cursor_column(),
        ),
        AppMode::ConfirmDelete(task_id) => {
            let title = app
                .service
                .state()
                .task(task_id)
                .map(|t| t.title.as_str())
                .unwrap_or_default();
            render_confirm_popup(frame, "Delete Task", &format!("Delete '{}'?", title));
        }
        AppMode::AdditionalInfo => render_additional_info_popup(app, frame),
        AppMode::History => render_history_popup(app, frame),
        AppMode::Normal | AppMode::Filter => {}
    }
}

fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.mode == AppMode::Filter;
    let text = app.service.state().filter_text();
    let content = if text.is_empty() && !editing {
        Line::from(Span::styled("press / to filter by title or status", label_text()))
    } else {
        Line::from(Span::styled(text.to_string(), normal_text()))
    };

    let block = Block::default()
        .title(" Filter ")
        .borders(Borders::ALL)
        .border_style(border(editing));
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        frame.set_cursor_position((inner.x + app.input.cursor_column() as u16, inner.y));
    }
}

fn render_columns(app: &App, frame: &mut Frame, area: Rect) {
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let dragged = app.service.state().drag().map(|d| d.task_id.as_str());
    for (status, column_area) in Status::ALL.into_iter().zip(areas.iter()) {
        let column = TaskColumn {
            status,
            tasks: app.column_tasks(status),
            selected: app.selection(status).get(),
            focused: app.focused_column == status,
            dragged,
        };
        render_task_column(frame, *column_area, column);
    }
}

fn render_status_line(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.service.state();
    let line = if let Some(message) = &app.status_message {
        Line::from(Span::styled(format!(" {}", message), error_text()))
    } else if let Some(task) = state.drag().and_then(|d| state.task(&d.task_id)) {
        Line::from(vec![
            Span::styled(" Moving ", label_text()),
            Span::styled(task.title.clone(), bold_highlight()),
            Span::styled(drag_hint(task.status), label_text()),
        ])
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Where a task picked up from `from` can go without being asked why.
pub fn drag_hint(from: Status) -> String {
    if is_terminal(from) {
        return format!(" from {}: every move asks for a reason", from.label());
    }
    let direct: Vec<&str> = allowed_targets(from).iter().map(|s| s.label()).collect();
    format!(
        " from {}: drop on {} to move directly, other columns ask for a reason",
        from.label(),
        direct.join(" or ")
    )
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.mode {
        AppMode::Normal if app.service.state().drag().is_some() => {
            "h/l: choose column | Space: drop | Esc: cancel move"
        }
        AppMode::Normal => {
            "h/l: column | j/k: task | n: new | e: edit | d: delete | /: filter | Space: move | Enter: history | r: reload | q: quit"
        }
        AppMode::CreateTask | AppMode::EditTask(_) => "Enter: save | Esc: cancel",
        AppMode::ConfirmDelete(_) => "y: delete | n: keep",
        AppMode::Filter => "type to filter | Enter: keep | Esc: clear",
        AppMode::AdditionalInfo => "Enter: submit | Esc: cancel move",
        AppMode::History => "j/k: scroll | Esc: close",
    };
    let footer = Paragraph::new(hints)
        .style(label_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_additional_info_popup(app: &App, frame: &mut Frame) {
    let label = app
        .service
        .state()
        .pending()
        .map(|p| {
            format!(
                "Moving '{}' from {} to {}. Why?",
                p.title,
                p.from.label(),
                p.to.label()
            )
        })
        .unwrap_or_default();
    render_input_popup(
        frame,
        "Additional Information",
        &label,
        app.input.as_str(),
        app.input.cursor_column(),
    );
}

fn render_history_popup(app: &App, frame: &mut Frame) {
    let inner = render_popup_with_block(
        frame,
        &format!("History: {}", app.history_title),
        70,
        60,
    );

    let lines: Vec<Line> = if app.history.is_empty() {
        vec![Line::from(Span::styled("No history recorded", label_text()))]
    } else {
        app.history
            .iter()
            .map(|entry| Line::from(Span::styled(entry.describe(), normal_text())))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.history_scroll, 0));
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_hint_names_direct_targets() {
        assert_eq!(
            drag_hint(Status::Todo),
            " from To Do: drop on In Progress to move directly, other columns ask for a reason"
        );
        assert!(drag_hint(Status::InProgress).contains("drop on Done"));
        assert_eq!(
            drag_hint(Status::Done),
            " from Done: every move asks for a reason"
        );
    }
}
