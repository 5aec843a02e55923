//! Application-level handlers for the product context.

pub mod command_handlers;
pub mod query_handlers;
