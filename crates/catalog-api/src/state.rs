//! Shared application state.

use std::sync::Arc;

use catalog_core::notifier::{StockChangePublisher, StockNotifier};
use catalog_core::repository::{ProductRepository, SellerRepository};
use catalog_notifications::{EmailConfig, EmailNotifier, FanOutNotifier, SmsNotifier};
use catalog_products::domain::links::BaseUrl;

use crate::config::Config;

/// Application state shared across all request handlers.
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Product persistence.
    pub products: Arc<dyn ProductRepository>,
    /// Seller persistence.
    pub sellers: Arc<dyn SellerRepository>,
    /// Stock-change publisher.
    pub notifier: Arc<dyn StockChangePublisher>,
    /// Base URL used when a request carries no host information.
    pub public_base_url: BaseUrl,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductRepository>,
        sellers: Arc<dyn SellerRepository>,
        notifier: Arc<dyn StockChangePublisher>,
        public_base_url: BaseUrl,
    ) -> Self {
        Self {
            products,
            sellers,
            notifier,
            public_base_url,
        }
    }
}

/// Assemble the notification fan-out from the enabled channels.
#[must_use]
pub fn build_notifier(config: &Config) -> FanOutNotifier {
    let mut channels: Vec<Arc<dyn StockNotifier>> = Vec::new();
    if config.email_enabled {
        channels.push(Arc::new(EmailNotifier::new(EmailConfig::new(
            config.notify_from_email.clone(),
        ))));
    }
    if config.sms_enabled {
        channels.push(Arc::new(SmsNotifier));
    }
    FanOutNotifier::new(channels)
}
