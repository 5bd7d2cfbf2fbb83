pub mod board_handlers;
pub mod dialog_handlers;
pub mod navigation_handlers;
