//! Product catalog — product bounded context.
//!
//! Responsible for the public product representations (v1 and v2), the
//! seller self-links embedded in v2, and the handlers that read, create,
//! update and delete products.

pub mod application;
pub mod domain;
