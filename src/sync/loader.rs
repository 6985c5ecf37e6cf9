use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

use crate::calendar::CivicEvent;
use crate::sync::repository::EventRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub generation: u64,
    pub municipality: Option<String>,
    pub events: Vec<CivicEvent>,
}

/// Runs repository loads off the UI loop and hands back only the newest result.
///
/// Every request supersedes the previous one: the old task is aborted and any
/// outcome it already queued is dropped on receipt because its generation is stale.
pub struct EventLoader {
    repository: EventRepository,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    idle: Arc<Notify>,
    sender: mpsc::UnboundedSender<LoadOutcome>,
    receiver: mpsc::UnboundedReceiver<LoadOutcome>,
}

impl EventLoader {
    pub fn new(repository: EventRepository) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            repository,
            generation: 0,
            in_flight: None,
            idle: Arc::new(Notify::new()),
            sender,
            receiver,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn request(&mut self, municipality: Option<String>) -> u64 {
        self.spawn(municipality, None)
    }

    /// Starts the load once the UI reports idle, or after `max_wait` at the latest.
    pub fn request_when_idle(&mut self, municipality: Option<String>, max_wait: Duration) -> u64 {
        self.spawn(municipality, Some(max_wait))
    }

    pub fn notify_idle(&self) {
        self.idle.notify_one();
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.generation += 1;
    }

    pub async fn next(&mut self) -> Option<LoadOutcome> {
        while let Some(outcome) = self.receiver.recv().await {
            if let Some(current) = self.accept(outcome) {
                return Some(current);
            }
        }
        None
    }

    fn accept(&mut self, outcome: LoadOutcome) -> Option<LoadOutcome> {
        if outcome.generation != self.generation {
            tracing::debug!(
                "Discarding stale load result (generation {} < {})",
                outcome.generation,
                self.generation
            );
            return None;
        }
        self.in_flight = None;
        Some(outcome)
    }

    fn spawn(&mut self, municipality: Option<String>, idle_wait: Option<Duration>) -> u64 {
        self.cancel();
        let generation = self.generation;

        let repository = self.repository.clone();
        let sender = self.sender.clone();
        let idle = Arc::clone(&self.idle);

        self.in_flight = Some(tokio::spawn(async move {
            if let Some(max_wait) = idle_wait {
                tokio::select! {
                    _ = idle.notified() => {}
                    _ = tokio::time::sleep(max_wait) => {
                        tracing::debug!("Idle wait elapsed, loading events anyway");
                    }
                }
            }

            let events = repository.load(municipality.as_deref()).await;
            tracing::info!("Loaded {} events (generation {})", events.len(), generation);

            let _ = sender.send(LoadOutcome {
                generation,
                municipality,
                events,
            });
        }));

        generation
    }
}

impl Drop for EventLoader {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}
