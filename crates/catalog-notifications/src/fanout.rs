//! Composite notifier that broadcasts to every enabled channel.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_core::notifier::{StockChangeEvent, StockChangePublisher, StockNotifier};
use futures::FutureExt;
use tracing::{debug, warn};

/// How a fan-out treats channel failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// At most once per channel, no retry, failures logged and dropped.
    /// A failing or panicking channel does not stop the channels after it.
    #[default]
    BestEffort,
}

/// Broadcasts a stock change to an ordered, fixed list of channels.
///
/// The channel list is assembled once and never changes, so a single
/// instance can be shared across request tasks.
#[derive(Clone, Default)]
pub struct FanOutNotifier {
    channels: Vec<Arc<dyn StockNotifier>>,
    policy: DeliveryPolicy,
}

impl FanOutNotifier {
    /// Create a best-effort fan-out over `channels`, invoked in order.
    #[must_use]
    pub fn new(channels: Vec<Arc<dyn StockNotifier>>) -> Self {
        Self {
            channels,
            policy: DeliveryPolicy::BestEffort,
        }
    }

    /// The policy applied to channel failures.
    #[must_use]
    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Names of the registered channels, in invocation order.
    #[must_use]
    pub fn channel_names(&self) -> Vec<&'static str> {
        self.channels.iter().map(|c| c.channel()).collect()
    }
}

impl std::fmt::Debug for FanOutNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOutNotifier")
            .field("channels", &self.channel_names())
            .field("policy", &self.policy)
            .finish()
    }
}

#[async_trait]
impl StockChangePublisher for FanOutNotifier {
    async fn publish(&self, event: &StockChangeEvent) {
        match self.policy {
            DeliveryPolicy::BestEffort => {
                for channel in &self.channels {
                    let delivery = AssertUnwindSafe(channel.stock_changed(event))
                        .catch_unwind()
                        .await;
                    match delivery {
                        Ok(Ok(())) => debug!(channel = channel.channel(), "stock change delivered"),
                        Ok(Err(e)) => warn!(
                            channel = channel.channel(),
                            seller_uuid = %event.seller_uuid,
                            error = %e,
                            "stock change notification dropped"
                        ),
                        Err(panic) => warn!(
                            channel = channel.channel(),
                            seller_uuid = %event.seller_uuid,
                            error = panic_message(panic.as_ref()),
                            "stock change channel panicked; notification dropped"
                        ),
                    }
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
