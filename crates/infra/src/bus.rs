//! Push feed from the store to live sessions.
//!
//! Every successful commit publishes fresh snapshots of the record families
//! it touched. Sessions subscribe once and receive full snapshots rather
//! than deltas, so a subscriber can never observe a half-applied commit.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Mutex;
use std::time::Duration;

use tracing::trace;

use telarstock_catalog::MetadataCatalog;
use telarstock_ledger::{MovementLogEntry, StockItem};

/// One pushed snapshot.
#[derive(Debug, Clone)]
pub enum StoreUpdate {
    /// Full stock listing, SKU-ordered.
    Inventory(Vec<StockItem>),
    /// Recent movement-log window, newest first.
    History(Vec<MovementLogEntry>),
    /// Current metadata catalog.
    Catalog(MetadataCatalog),
}

impl StoreUpdate {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreUpdate::Inventory(_) => "inventory",
            StoreUpdate::History(_) => "history",
            StoreUpdate::Catalog(_) => "catalog",
        }
    }
}

/// A live subscription. Dropping it detaches from the bus; the bus prunes
/// the sender on its next publish.
pub struct Subscription {
    receiver: Receiver<StoreUpdate>,
}

impl Subscription {
    /// Blocks until the next update. `None` once the bus is gone.
    pub fn recv(&self) -> Option<StoreUpdate> {
        self.receiver.recv().ok()
    }

    pub fn try_recv(&self) -> Option<StoreUpdate> {
        self.receiver.try_recv().ok()
    }

    /// Blocks up to `timeout`. `Ok(None)` on timeout, `Err` once the bus is
    /// gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<StoreUpdate>, ()> {
        match self.receiver.recv_timeout(timeout) {
            Ok(update) => Ok(Some(update)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(()),
        }
    }
}

/// Fan-out of store snapshots to any number of subscribed sessions.
#[derive(Debug, Default)]
pub struct UpdateBus {
    subscribers: Mutex<Vec<Sender<StoreUpdate>>>,
}

impl UpdateBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(sender);
        }
        Subscription { receiver }
    }

    /// Deliver one update to every live subscriber, dropping the dead ones.
    pub fn publish(&self, update: StoreUpdate) {
        trace!(kind = update.kind(), "publishing store update");
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|sender| sender.send(update.clone()).is_ok());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_the_update() {
        let bus = UpdateBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(StoreUpdate::Inventory(Vec::new()));

        assert!(matches!(a.recv(), Some(StoreUpdate::Inventory(_))));
        assert!(matches!(b.recv(), Some(StoreUpdate::Inventory(_))));
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_publish() {
        let bus = UpdateBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(StoreUpdate::Catalog(MetadataCatalog::default()));
        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_some());
    }

    #[test]
    fn recv_timeout_distinguishes_silence_from_shutdown() {
        let bus = UpdateBus::new();
        let sub = bus.subscribe();

        assert_eq!(
            sub.recv_timeout(Duration::from_millis(5)).map(|u| u.is_none()),
            Ok(true)
        );

        drop(bus);
        assert!(sub.recv_timeout(Duration::from_millis(5)).is_err());
    }
}
