//! Application layer services implementing business logic.
//!
//! Services consume repository traits and expose plain data operations to
//! the HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Slug resolution, renaming and visit recording
//! - [`services::analytics_service::AnalyticsService`] - Visit aggregation
//!
//! [`visit_worker`] drains queued redirects into
//! [`services::link_service::LinkService::record_visit`].

pub mod services;
pub mod visit_worker;
