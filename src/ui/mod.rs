pub mod locale;
pub mod month_view;
pub mod map_view;
pub mod calendar_dialog;
pub mod theme;
