use std::sync::Arc;

use tokio::sync::broadcast;

use crate::error::MhubError;
use crate::types::{RoutingTable, StatusSnapshot};

/// Outcome of one status poll tick
#[derive(Debug, Clone)]
pub enum StatusUpdate {
    /// The device answered with this routing
    Online(RoutingTable),
    /// The poll failed; the error says whether the device was unreachable
    /// or answered with something unusable
    Offline(Arc<MhubError>),
}

impl StatusUpdate {
    /// Collapse the update into a snapshot, dropping error detail
    pub fn snapshot(&self) -> StatusSnapshot {
        match self {
            StatusUpdate::Online(table) => StatusSnapshot::Online(table.clone()),
            StatusUpdate::Offline(_) => StatusSnapshot::Offline,
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, StatusUpdate::Online(_))
    }
}

/// Receiver for status updates published by the monitor
pub struct StatusReceiver {
    rx: broadcast::Receiver<StatusUpdate>,
}

impl StatusReceiver {
    pub(crate) fn new(rx: broadcast::Receiver<StatusUpdate>) -> Self {
        Self { rx }
    }

    /// Receive the next status update.
    ///
    /// Only the latest status is meaningful, so a receiver that fell
    /// behind skips ahead instead of erroring. Returns `None` once the
    /// monitor has been dropped.
    pub async fn recv(&mut self) -> Option<StatusUpdate> {
        loop {
            match self.rx.recv().await {
                Ok(update) => return Some(update),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("status receiver lagged by {n} updates");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Receive a pending status update without blocking, if there is one
    pub fn try_recv(&mut self) -> Option<StatusUpdate> {
        loop {
            match self.rx.try_recv() {
                Ok(update) => return Some(update),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("status receiver lagged by {n} updates");
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
            }
        }
    }
}
