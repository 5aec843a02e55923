//! SMS channel.

use async_trait::async_trait;
use catalog_core::error::NotificationError;
use catalog_core::notifier::{StockChangeEvent, StockNotifier};
use tracing::info;

const CHANNEL: &str = "sms";

/// A rendered stock alert text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    /// Recipient phone number.
    pub to: String,
    /// Message text.
    pub text: String,
}

/// Sends stock alerts to the seller's phone number via the `catalog::sms`
/// log target.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmsNotifier;

impl SmsNotifier {
    /// Render the alert for `event`.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::MissingRecipient` if the seller has no
    /// phone number.
    pub fn render(event: &StockChangeEvent) -> Result<SmsMessage, NotificationError> {
        let to = event.phone.trim();
        if to.is_empty() {
            return Err(NotificationError::MissingRecipient { channel: CHANNEL });
        }

        Ok(SmsMessage {
            to: to.to_owned(),
            text: format!(
                "{} stock changed from {} to {}",
                event.product_name, event.old_stock, event.new_stock
            ),
        })
    }
}

#[async_trait]
impl StockNotifier for SmsNotifier {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotificationError> {
        let message = Self::render(event)?;
        info!(
            target: "catalog::sms",
            to = %message.to,
            seller_uuid = %event.seller_uuid,
            "{}",
            message.text
        );
        Ok(())
    }
}
