//! Product catalog — stock-change notifications.
//!
//! A [`FanOutNotifier`] broadcasts each stock change to the channels
//! enabled at startup. Delivery is best effort: channel failures are logged
//! and never reach the caller.

mod email;
mod fanout;
mod sms;

pub use email::{EmailConfig, EmailMessage, EmailNotifier};
pub use fanout::{DeliveryPolicy, FanOutNotifier};
pub use sms::{SmsMessage, SmsNotifier};
