pub mod events_api;
pub mod repository;
pub mod loader;
