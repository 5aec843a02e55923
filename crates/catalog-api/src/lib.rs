//! Product catalog — HTTP API.
//!
//! Routing, request extraction, error mapping and startup wiring around the
//! product and notification crates.

pub mod base_url;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
