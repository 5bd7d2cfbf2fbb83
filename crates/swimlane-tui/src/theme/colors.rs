use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;

pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const DONE_TEXT: Color = Color::Gray;
pub const DRAGGED_TEXT: Color = Color::LightMagenta;

pub const TODO_HEADER: Color = Color::Yellow;
pub const IN_PROGRESS_HEADER: Color = Color::LightBlue;
pub const DONE_HEADER: Color = Color::Green;

pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
