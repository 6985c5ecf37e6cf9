use tokio::sync::watch;

use crate::storage::config::Config;

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub language: String,
    pub municipality: Option<String>,
}

impl Preferences {
    pub fn from_config(config: &Config) -> Self {
        Self {
            language: config.ui.language.clone(),
            municipality: config.events.municipality.clone(),
        }
    }
}

/// Read/write access to user preferences that several panels react to.
pub trait PreferenceStore {
    fn get(&self) -> Preferences;

    fn update(&self, apply: &dyn Fn(&mut Preferences));

    fn subscribe(&self) -> watch::Receiver<Preferences>;
}

pub struct WatchPreferences {
    sender: watch::Sender<Preferences>,
}

impl WatchPreferences {
    pub fn new(initial: Preferences) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }
}

impl PreferenceStore for WatchPreferences {
    fn get(&self) -> Preferences {
        self.sender.borrow().clone()
    }

    fn update(&self, apply: &dyn Fn(&mut Preferences)) {
        self.sender.send_if_modified(|prefs| {
            let before = prefs.clone();
            apply(prefs);
            *prefs != before
        });
    }

    fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.sender.subscribe()
    }
}
