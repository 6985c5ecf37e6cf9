mod dialogs;
mod map_canvas;
mod panels;
mod presentation;
mod session;

pub use session::run_tui;
