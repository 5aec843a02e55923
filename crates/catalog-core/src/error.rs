//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level catalog error type.
///
/// Datastore failures bubble through the product handlers unchanged; the
/// API layer is the only place that turns them into responses.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No row exists for the given public UUID.
    #[error("not found: {0}")]
    NotFound(Uuid),

    /// A foreign UUID (e.g. a seller) does not resolve to a stored row.
    #[error("invalid reference: {0}")]
    InvalidReference(Uuid),

    /// Request content rejected by domain rules.
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other datastore failure.
    #[error("query error: {0}")]
    Query(String),
}

/// Failure reported by a single notification channel.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The event lacks the contact data the channel needs.
    #[error("{channel}: missing recipient")]
    MissingRecipient {
        /// Name of the channel that rejected the event.
        channel: &'static str,
    },

    /// The channel accepted the event but could not deliver it.
    #[error("{channel}: delivery failed: {reason}")]
    Delivery {
        /// Name of the channel that failed.
        channel: &'static str,
        /// Transport-specific failure description.
        reason: String,
    },
}
