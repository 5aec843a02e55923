//! Email channel.
//!
//! Renders a plain-text stock alert for the seller's contact address and
//! delivers it by logging to the `catalog::email` target.

use async_trait::async_trait;
use catalog_core::error::NotificationError;
use catalog_core::notifier::{StockChangeEvent, StockNotifier};
use tracing::info;

const CHANNEL: &str = "email";

/// Email channel configuration.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Sender address.
    pub from_email: String,
}

impl EmailConfig {
    /// Create a configuration with the given sender address.
    #[must_use]
    pub fn new(from_email: impl Into<String>) -> Self {
        Self {
            from_email: from_email.into(),
        }
    }
}

/// A rendered stock alert email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Sender address.
    pub from: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Sends stock alerts to the seller's email address.
#[derive(Debug, Clone)]
pub struct EmailNotifier {
    config: EmailConfig,
}

impl EmailNotifier {
    /// Create an email channel.
    #[must_use]
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Render the alert for `event`.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::MissingRecipient` if the seller has no
    /// email address.
    pub fn render(&self, event: &StockChangeEvent) -> Result<EmailMessage, NotificationError> {
        let to = event.email.trim();
        if to.is_empty() {
            return Err(NotificationError::MissingRecipient { channel: CHANNEL });
        }

        Ok(EmailMessage {
            to: to.to_owned(),
            from: self.config.from_email.clone(),
            subject: format!("Stock changed: {}", event.product_name),
            body: format!(
                "Hello,\n\nthe stock of \"{}\" changed from {} to {}.\n\nSeller: {}\n",
                event.product_name, event.old_stock, event.new_stock, event.seller_uuid
            ),
        })
    }
}

#[async_trait]
impl StockNotifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        CHANNEL
    }

    async fn stock_changed(&self, event: &StockChangeEvent) -> Result<(), NotificationError> {
        let message = self.render(event)?;
        info!(
            target: "catalog::email",
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            seller_uuid = %event.seller_uuid,
            "{}",
            message.body
        );
        Ok(())
    }
}
