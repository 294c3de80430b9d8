use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::MatrixDevice;
use crate::subscription::{StatusReceiver, StatusUpdate};

/// Time between recurring status polls
pub const POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Recurring status poll over a device.
///
/// The monitor fires an immediate status query on `start()` and then polls
/// at a fixed interval, publishing every tick's outcome to subscribers.
/// Repeated offline ticks are published too, without suppression or
/// backoff. It is the only component in the crate with lifecycle
/// state: a running poll task and its cancellation token.
///
/// # Example
///
/// ```no_run
/// use hdanywhere_mhub::{MhubClient, StatusMonitor};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let monitor = StatusMonitor::new(MhubClient::new("http://10.0.0.60")?);
///     let mut updates = monitor.subscribe();
///     monitor.start();
///
///     while let Some(update) = updates.recv().await {
///         println!("status: {update:?}");
///     }
///     Ok(())
/// }
/// ```
pub struct StatusMonitor<D> {
    device: Arc<D>,
    interval: Duration,
    update_tx: broadcast::Sender<StatusUpdate>,
    observing: Mutex<Option<CancellationToken>>,
}

impl<D: MatrixDevice + Send + Sync + 'static> StatusMonitor<D> {
    /// Create a monitor polling at the default interval
    pub fn new(device: D) -> Self {
        Self::with_interval(device, POLL_INTERVAL)
    }

    /// Create a monitor with a custom poll interval
    pub fn with_interval(device: D, interval: Duration) -> Self {
        let (update_tx, _) = broadcast::channel(16);
        Self {
            device: Arc::new(device),
            interval,
            update_tx,
            observing: Mutex::new(None),
        }
    }

    /// Subscribe to poll updates
    pub fn subscribe(&self) -> StatusReceiver {
        StatusReceiver::new(self.update_tx.subscribe())
    }

    /// Whether a poll task is currently running
    pub fn is_observing(&self) -> bool {
        self.observing.lock().unwrap().is_some()
    }

    /// Begin observation: an immediate query, then one per interval.
    ///
    /// A no-op while observation is already running.
    pub fn start(&self) {
        let mut observing = self.observing.lock().unwrap();
        if observing.is_some() {
            tracing::debug!("status observation already running");
            return;
        }

        let token = CancellationToken::new();
        *observing = Some(token.clone());

        let device = self.device.clone();
        let update_tx = self.update_tx.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            tracing::info!("status observation started, polling every {interval:?}");
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // Cancellation is only honored between ticks; an in-flight
                // query below always finishes and publishes its result.
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let update = match device.get_status().await {
                    Ok(table) => StatusUpdate::Online(table),
                    Err(e) => {
                        tracing::debug!("status poll failed: {e}");
                        StatusUpdate::Offline(Arc::new(e))
                    }
                };
                let _ = update_tx.send(update);
            }

            tracing::info!("status observation stopped");
        });
    }

    /// Cancel the recurring poll; idempotent.
    ///
    /// Only future ticks are prevented; an in-flight query is not
    /// cancelled and still publishes its result.
    pub fn stop(&self) {
        if let Some(token) = self.observing.lock().unwrap().take() {
            token.cancel();
        }
    }

    /// React to a host wake-from-sleep signal.
    ///
    /// The poll timer's notion of elapsed time is meaningless across a
    /// sleep gap, so observation is stopped and restarted to query the
    /// device promptly. A no-op while not observing.
    pub fn handle_wake(&self) {
        if !self.is_observing() {
            return;
        }
        tracing::info!("wake signal received, restarting status observation");
        self.stop();
        self.start();
    }
}
