//! Shared test mocks and utilities for the product catalog service.

mod notifier;
mod repository;

pub use notifier::{FailingNotifier, RecordingNotifier};
pub use repository::{FailingProductRepository, InMemoryCatalog};
