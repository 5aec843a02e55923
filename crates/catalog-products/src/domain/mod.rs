//! Domain types for the product context.

pub mod commands;
pub mod links;
pub mod representation;
