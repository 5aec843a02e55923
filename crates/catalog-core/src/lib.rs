//! Catalog Core — shared domain abstractions.
//!
//! This crate defines the records, errors and traits that the product,
//! notification and storage crates depend on. It contains no
//! infrastructure code.

pub mod error;
pub mod notifier;
pub mod record;
pub mod repository;
