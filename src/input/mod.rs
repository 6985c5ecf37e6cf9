pub mod agenda_mode;
pub mod calendar_mode;
pub mod command_mode;
pub mod layers_menu;
pub mod normal_mode;

/// Work a key handler hands back to the session because it needs the loader or
/// the preference store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Reload,
    SetMunicipality(Option<String>),
    SetLocale(String),
}
