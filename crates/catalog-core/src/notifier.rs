//! Stock-change notification abstractions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::NotificationError;

/// A product's stock value changed.
///
/// Built right after a successful update and dropped once published; it is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChangeEvent {
    /// Seller contact email.
    pub email: String,
    /// Seller contact phone.
    pub phone: String,
    /// Stock before the update.
    pub old_stock: u32,
    /// Stock after the update.
    pub new_stock: u32,
    /// Name of the product whose stock changed.
    pub product_name: String,
    /// Public UUID of the seller.
    pub seller_uuid: Uuid,
}

/// A single channel that receives stock-change events.
#[async_trait]
pub trait StockNotifier: Send + Sync {
    /// Short channel name used in logs.
    fn channel(&self) -> &'static str;

    /// Deliver one event.
    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotificationError>;
}

/// The call shape handlers use to announce a stock change.
///
/// Publishing has no result: delivery guarantees belong to the
/// implementation, not to the caller.
#[async_trait]
pub trait StockChangePublisher: Send + Sync {
    /// Announce a stock change.
    async fn publish(&self, event: &StockChangeEvent);
}
