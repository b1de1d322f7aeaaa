pub mod buffer;
pub mod dialogs;
pub mod host;
pub mod main_window;
pub mod menu;
pub mod messages;
pub mod theme;
