pub mod board_view;
pub mod main_window;
