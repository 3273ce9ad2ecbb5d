use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

use crate::store::{FlushPolicy, Store};

/// Background task that writes a periodic-mode [`Store`] to disk.
///
/// Every tick the store is flushed on the blocking pool; nothing is written
/// if no insert happened since the previous flush. [`Flusher::stop`] ends
/// the loop and performs one last flush.
#[derive(Debug)]
pub struct Flusher {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Flusher {
    /// Starts flushing `store` if its policy is [`FlushPolicy::Periodic`].
    ///
    /// Returns `None` for every-insert stores, which never need one.
    pub fn spawn(store: &Store) -> Option<Self> {
        let FlushPolicy::Periodic { interval } = store.flush_policy() else {
            return None;
        };

        let (shutdown, rx) = watch::channel(false);
        let handle = tokio::spawn(run(store.clone(), interval, rx));
        info!(interval_ms = interval.as_millis() as u64, "started periodic flusher");

        Some(Self { shutdown, handle })
    }

    /// Stops the loop and waits for the final flush to finish.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            error!(error = %e, "flusher task failed");
        }
    }
}

async fn run(store: Store, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => flush(&store).await,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    flush(&store).await;
    debug!("periodic flusher stopped");
}

async fn flush(store: &Store) {
    let store = store.clone();
    match tokio::task::spawn_blocking(move || store.flush()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "periodic flush failed"),
        Err(e) => error!(error = %e, "periodic flush task failed"),
    }
}
