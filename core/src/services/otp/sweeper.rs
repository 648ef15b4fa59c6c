//! Background eviction of expired codes

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::store::OtpStore;

/// Owner of the sweeper task
///
/// `shutdown` stops the task after its current sweep; dropping the handle
/// without calling it aborts the task.
#[derive(Debug)]
pub struct SweeperHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    /// Stop the sweeper and wait for it to finish
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |t| t.is_finished())
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn a task that sweeps `store` every `interval`
///
/// The first sweep happens one full interval after spawning.
pub fn spawn_sweeper(store: Arc<OtpStore>, interval: Duration) -> SweeperHandle {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
    let first_sweep = tokio::time::Instant::now() + interval;

    let task = tokio::spawn(async move {
        info!(
            "OTP sweeper started - will run every {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval_at(first_sweep, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    let removed = store.sweep();
                    if removed > 0 {
                        debug!("Sweeper removed {} expired codes", removed);
                    }
                }
            }
        }

        info!("OTP sweeper stopped");
    });

    SweeperHandle {
        stop: Some(stop_tx),
        task: Some(task),
    }
}
