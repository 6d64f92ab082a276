//! Domain layer containing business entities and store contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Record store trait definitions
//! - [`visit_event`] - Queued redirect event model
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].
//!
//! # Visit Processing Flow
//!
//! 1. HTTP handler resolves a slug and redirects
//! 2. [`visit_event::VisitEvent`] is sent to an async channel
//! 3. [`crate::application::visit_worker::run_visit_worker`] records it with retry
//! 4. Visit rows are appended via [`repositories::VisitRepository`]

pub mod entities;
pub mod repositories;
pub mod visit_event;
