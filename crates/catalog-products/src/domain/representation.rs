//! Public product and seller representations.
//!
//! One stored row backs every representation. Each version implements
//! [`ProductShape`], which is the single place a record becomes a public
//! shape; handlers pick the version through a type parameter.

use catalog_core::record::{ProductRecord, SellerRecord};
use serde::Serialize;
use uuid::Uuid;

use super::links::{BaseUrl, SELLERS_ENDPOINT, build_self_link};

/// A public product representation built from a stored record.
pub trait ProductShape: Serialize + Send + Sized {
    /// Request-scoped data the mapping needs (e.g. the caller's base URL).
    type Context: Sync + ?Sized;

    /// Map a stored record into this representation.
    fn from_record(record: ProductRecord, context: &Self::Context) -> Self;
}

/// Attributes shared by every product representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAttributes {
    /// Public product identity.
    pub uuid: Uuid,
    /// Product name.
    pub name: String,
    /// Product brand.
    pub brand: String,
    /// Units in stock.
    pub stock: u32,
}

impl ProductAttributes {
    fn from_record(record: &ProductRecord) -> Self {
        Self {
            uuid: record.uuid,
            name: record.name.clone(),
            brand: record.brand.clone(),
            stock: record.stock,
        }
    }
}

/// Version 1: flat seller reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductV1 {
    /// Shared attributes.
    #[serde(flatten)]
    pub attributes: ProductAttributes,
    /// Public UUID of the owning seller.
    pub seller_uuid: Uuid,
}

impl ProductShape for ProductV1 {
    type Context = ();

    fn from_record(record: ProductRecord, _context: &()) -> Self {
        Self {
            attributes: ProductAttributes::from_record(&record),
            seller_uuid: record.seller_uuid,
        }
    }
}

/// Version 2: embedded, hyperlinked seller reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductV2 {
    /// Shared attributes.
    #[serde(flatten)]
    pub attributes: ProductAttributes,
    /// The owning seller.
    pub seller: SellerReference,
}

impl ProductShape for ProductV2 {
    type Context = BaseUrl;

    fn from_record(record: ProductRecord, base: &BaseUrl) -> Self {
        let href = build_self_link(base, SELLERS_ENDPOINT, &record.seller_uuid.to_string());
        Self {
            attributes: ProductAttributes::from_record(&record),
            seller: SellerReference {
                uuid: record.seller_uuid,
                links: Links {
                    self_link: Link { href },
                },
            },
        }
    }
}

/// Seller embedded in a v2 product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerReference {
    /// Public seller identity.
    pub uuid: Uuid,
    /// Hypermedia links.
    #[serde(rename = "_links")]
    pub links: Links,
}

/// Hypermedia links of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Links {
    /// Link to the resource itself.
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// A single hyperlink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Absolute URL.
    pub href: String,
}

/// Public seller representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerView {
    /// Public seller identity.
    pub uuid: Uuid,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

impl From<SellerRecord> for SellerView {
    fn from(record: SellerRecord) -> Self {
        Self {
            uuid: record.uuid,
            email: record.email,
            phone: record.phone,
        }
    }
}
