//! Storage-level records.
//!
//! Records carry the internal numeric identifiers the datastore uses for
//! joins. They are never serialized; public representations are built from
//! them by the product context.

use uuid::Uuid;

/// A product row joined with its seller's public UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Internal storage identifier. Zero for records not yet persisted.
    pub product_id: i64,
    /// Public, immutable identity.
    pub uuid: Uuid,
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Units in stock.
    pub stock: u32,
    /// Public UUID of the owning seller.
    pub seller_uuid: Uuid,
}

/// A seller row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerRecord {
    /// Internal storage identifier.
    pub seller_id: i64,
    /// Public, immutable identity.
    pub uuid: Uuid,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}
