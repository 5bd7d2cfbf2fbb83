use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use swimlane_domain::{Status, Task};

use crate::theme::{border, column_header, dragged_item, label_text, selected_item, task_text};

/// Everything needed to draw one status column.
pub struct TaskColumn<'a> {
    pub status: Status,
    pub tasks: Vec<&'a Task>,
    pub selected: Option<usize>,
    pub focused: bool,
    pub dragged: Option<&'a str>,
}

pub fn render_task_column(frame: &mut Frame, area: Rect, column: TaskColumn<'_>) {
    let header = Line::from(vec![
        Span::styled(format!(" {} ", column.status.label()), column_header(column.status)),
        Span::styled(format!("({}) ", column.tasks.len()), label_text()),
    ]);
    let block = Block::default()
        .title(header)
        .borders(Borders::ALL)
        .border_style(border(column.focused));

    let items: Vec<ListItem> = column
        .tasks
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let is_dragged = column.dragged == Some(task.id.as_str());
            let marker = if is_dragged { "» " } else { "  " };
            let mut style = if is_dragged {
                dragged_item()
            } else {
                task_text(task.status)
            };
            if column.selected == Some(index) {
                style = style.patch(selected_item(column.focused));
            }
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, task.title),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
