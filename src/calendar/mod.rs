pub mod event;
pub mod category;
pub mod layers;
pub mod date_index;
pub mod agenda;

pub use event::{CivicEvent, Coordinates};
pub use layers::LayerFilter;
pub use date_index::{DateIndex, DayStatus};
pub use agenda::AgendaRoute;
