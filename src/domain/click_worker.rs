//! Background worker that applies click-count increments.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ShortenRepository;

/// Drains click events and increments the matching counters.
///
/// At most `concurrency` increments run at once. Each event gets a single
/// attempt; failures are logged and dropped. The worker returns once every
/// sender is dropped and the in-flight increments have finished.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn ShortenRepository>,
    concurrency: usize,
) {
    let limiter = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = limiter.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        in_flight.spawn(async move {
            record_click(repository.as_ref(), &event).await;
            drop(permit);
        });

        while in_flight.try_join_next().is_some() {}
    }

    while in_flight.join_next().await.is_some() {}
    info!("Click worker stopped");
}

/// Applies a single click increment, logging instead of failing.
pub async fn record_click(repository: &dyn ShortenRepository, event: &ClickEvent) {
    match repository.increment_click_count(&event.code).await {
        Ok(true) => debug!(code = %event.code, "Click recorded"),
        Ok(false) => debug!(code = %event.code, "Click for missing code dropped"),
        Err(e) => warn!(code = %event.code, error = %e, "Failed to increment click count"),
    }
}
