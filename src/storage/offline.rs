use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calendar::agenda::events_for_date;
use crate::calendar::CivicEvent;

const BUNDLED_DATASET: &str = include_str!("../../data/civic_events.json");

#[derive(Debug, Error)]
pub enum OfflineDataError {
    #[error("Failed to read offline dataset: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse offline dataset: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Static event list shipped with the application, used whenever the network path
/// fails or returns nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineDataset {
    pub version: String,
    pub events: Vec<CivicEvent>,
}

impl OfflineDataset {
    pub fn from_json(content: &str) -> Result<Self, OfflineDataError> {
        serde_json::from_str(content).map_err(OfflineDataError::from)
    }

    pub fn from_path(path: &Path) -> Result<Self, OfflineDataError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn bundled() -> &'static OfflineDataset {
        static BUNDLED: OnceLock<OfflineDataset> = OnceLock::new();
        BUNDLED.get_or_init(|| match Self::from_json(BUNDLED_DATASET) {
            Ok(dataset) => dataset,
            Err(e) => {
                tracing::error!("Bundled offline dataset is unreadable: {}", e);
                OfflineDataset {
                    version: "invalid".to_string(),
                    events: Vec::new(),
                }
            }
        })
    }

    /// Case-insensitive substring match on municipality. When nothing matches, the
    /// whole dataset is returned instead of an empty list.
    pub fn events_for_municipality(&self, municipality: Option<&str>) -> Vec<CivicEvent> {
        let Some(needle) = municipality.map(str::trim).filter(|m| !m.is_empty()) else {
            return self.events.clone();
        };

        let filtered: Vec<CivicEvent> = self
            .events
            .iter()
            .filter(|event| event.matches_municipality(needle))
            .cloned()
            .collect();

        if filtered.is_empty() {
            tracing::info!("No offline events for '{}', using the full dataset", needle);
            self.events.clone()
        } else {
            filtered
        }
    }

    pub fn events_for_date(&self, date: NaiveDate) -> Vec<CivicEvent> {
        events_for_date(&self.events, date)
    }
}
