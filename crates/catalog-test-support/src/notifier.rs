//! Test notifiers — recording and failing notification channels.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_core::error::NotificationError;
use catalog_core::notifier::{StockChangeEvent, StockChangePublisher, StockNotifier};

/// A notifier that records every event it receives. Usable both as a
/// fan-out channel and as the publisher handed to command handlers.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    received: Mutex<Vec<StockChangeEvent>>,
}

impl RecordingNotifier {
    /// Create a notifier with no recorded events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all received events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn received(&self) -> Vec<StockChangeEvent> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl StockNotifier for RecordingNotifier {
    fn channel(&self) -> &'static str {
        "recording"
    }

    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotificationError> {
        self.received.lock().unwrap().push(event.clone());
        Ok(())
    }
}

#[async_trait]
impl StockChangePublisher for RecordingNotifier {
    async fn publish(&self, event: &StockChangeEvent) {
        self.received.lock().unwrap().push(event.clone());
    }
}

/// A channel that fails every delivery.
#[derive(Debug)]
pub struct FailingNotifier;

#[async_trait]
impl StockNotifier for FailingNotifier {
    fn channel(&self) -> &'static str {
        "failing"
    }

    async fn stock_changed(&self, _event: &StockChangeEvent) -> Result<(), NotificationError> {
        Err(NotificationError::Delivery {
            channel: "failing",
            reason: "gateway unavailable".into(),
        })
    }
}
