use std::time::Duration;

use super::{EventBackend, RefreshTrigger, StoreRegistry};

/// Refresh every open store on a fixed interval.
pub fn spawn_refresh_scheduler<B>(backend: B, registry: StoreRegistry, every: Duration)
where
    B: EventBackend + 'static,
{
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            for store in registry.open_stores() {
                if !store.is_loaded() {
                    continue;
                }
                let report = store.refresh(&backend, RefreshTrigger::Scheduled).await;
                if !report.is_clean() {
                    log::warn!(
                        "Scheduled refresh of event {}: failed {:?}, discarded {}",
                        store.event_id(),
                        report.failed,
                        report.discarded
                    );
                } else {
                    log::debug!("Refreshed event {}: {:?}", store.event_id(), report.updated);
                }
            }
        }
    });
}
