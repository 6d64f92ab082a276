//! HTTP middleware for request processing.
//!
//! Authentication and rate limiting happen upstream of this service.

pub mod tracing;
