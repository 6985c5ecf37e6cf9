use std::sync::Arc;

use chrono::NaiveDate;

use crate::calendar::agenda::events_for_date;
use crate::calendar::CivicEvent;
use crate::storage::config::Config;
use crate::storage::offline::OfflineDataset;
use crate::sync::events_api::{ApiError, EventSource, HttpEventSource, OfflineSource};

/// Obtains the event set for a municipality, falling back to the offline dataset
/// on any network failure or empty answer. `load` never fails.
#[derive(Clone)]
pub struct EventRepository {
    source: Arc<dyn EventSource>,
    offline: Arc<OfflineDataset>,
}

impl EventRepository {
    pub fn new(source: Arc<dyn EventSource>, offline: OfflineDataset) -> Self {
        Self {
            source,
            offline: Arc::new(offline),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let source: Arc<dyn EventSource> = if config.api.offline_mode {
            Arc::new(OfflineSource)
        } else {
            Arc::new(HttpEventSource::from_config(&config.api)?)
        };

        let offline = match &config.events.offline_dataset {
            Some(path) => match OfflineDataset::from_path(path) {
                Ok(dataset) => dataset,
                Err(e) => {
                    tracing::warn!("Ignoring offline dataset {}: {}", path.display(), e);
                    OfflineDataset::bundled().clone()
                }
            },
            None => OfflineDataset::bundled().clone(),
        };

        Ok(Self::new(source, offline))
    }

    /// Shared handle to the fallback dataset.
    pub fn offline(&self) -> Arc<OfflineDataset> {
        Arc::clone(&self.offline)
    }

    pub async fn load(&self, municipality: Option<&str>) -> Vec<CivicEvent> {
        let municipality = municipality
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from);

        match self.source.fetch_events(municipality.clone()).await {
            Ok(events) if !events.is_empty() => return events,
            Ok(_) => {
                tracing::warn!("Events API returned no events, using offline dataset");
            }
            Err(e) => {
                tracing::warn!("Events API failed, using offline dataset: {}", e);
            }
        }

        self.offline.events_for_municipality(municipality.as_deref())
    }

    /// Events whose UTC start date is `date`; when the live list has none, the
    /// offline dataset's events for that date are used instead.
    pub async fn events_for_date(&self, date: NaiveDate) -> Vec<CivicEvent> {
        let events = events_for_date(&self.load(None).await, date);

        if events.is_empty() {
            self.offline.events_for_date(date)
        } else {
            events
        }
    }
}
