use super::ArtifactStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Owned background task that sweeps the artifact store on a fixed period.
///
/// Started once at process startup and stopped explicitly on shutdown; the
/// sweep schedule is fully decoupled from request lifecycles.
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub fn start(store: Arc<ArtifactStore>, period: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The immediate first tick is harmless: sweep is idempotent.
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        store.sweep().await;
                    }
                    _ = shutdown_rx.changed() => {
                        tracing::debug!("Sweeper shutting down");
                        break;
                    }
                }
            }
        });

        Self { shutdown, handle }
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
