use super::colors::*;
use ratatui::style::{Modifier, Style};
use swimlane_domain::Status;

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn border(focused: bool) -> Style {
    if focused {
        focused_border()
    } else {
        unfocused_border()
    }
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    }
}

/// The task currently picked up for a move.
pub fn dragged_item() -> Style {
    Style::default()
        .fg(DRAGGED_TEXT)
        .add_modifier(Modifier::BOLD | Modifier::ITALIC)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn done_text() -> Style {
    Style::default().fg(DONE_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn column_header(status: Status) -> Style {
    let color = match status {
        Status::Todo => TODO_HEADER,
        Status::InProgress => IN_PROGRESS_HEADER,
        Status::Done => DONE_HEADER,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn task_text(status: Status) -> Style {
    match status {
        Status::Done => done_text(),
        _ => normal_text(),
    }
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
