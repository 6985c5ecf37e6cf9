pub mod calendar;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod app;

pub use calendar::{AgendaRoute, CivicEvent, Coordinates, DateIndex, DayStatus, LayerFilter};
pub use app::{DashboardState, LoadStatus, Mode};
pub use sync::repository::EventRepository;
